//! CLI module for Bookwise
//!
//! Provides command-line access to the catalog:
//! - books / book / genres: browse
//! - login / logout: manage the stored session
//! - activity: the logged-in user's contributions

mod args;
mod commands;
mod errors;
mod io;

pub use args::{Cli, Command};
pub use commands::{load_config, run, run_command};
pub use errors::{CliError, CliErrorCode, CliResult};
pub use io::{write_json, write_json_to};

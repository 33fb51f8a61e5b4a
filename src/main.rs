//! Bookwise CLI entry point
//!
//! Installs the log subscriber, then delegates everything to the CLI
//! module. Errors go to stderr with a non-zero exit code.

use bookwise::cli;
use tracing_subscriber::EnvFilter;

fn main() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("bookwise=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = cli::run() {
        eprintln!("{}", e);
        std::process::exit(1);
    }
}

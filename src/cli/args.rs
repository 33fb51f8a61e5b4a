//! CLI argument definitions using clap
//!
//! Commands:
//! - bookwise books [--page N] [--search TERM] [--genre G] [--sort ORDER]
//! - bookwise book <id>
//! - bookwise genres
//! - bookwise login --email E --password P
//! - bookwise logout
//! - bookwise activity

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::catalog::{BookQuery, SortOrder};

/// Bookwise - browse and review books against an in-memory backend
#[derive(Parser, Debug)]
#[command(name = "bookwise")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Path to a JSON configuration file
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Where the login session is kept
    #[arg(long, global = true, default_value = "./.bookwise-session.json")]
    pub session: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List one page of books
    Books {
        #[arg(long, default_value_t = 1)]
        page: usize,

        /// Case-insensitive match on title or author
        #[arg(long, default_value = "")]
        search: String,

        /// Exact genre
        #[arg(long, default_value = "")]
        genre: String,

        /// year_asc, year_desc, rating_asc or rating_desc
        #[arg(long, default_value = "")]
        sort: String,
    },

    /// Show one book with its reviews
    Book { id: String },

    /// List the genres in the catalogue
    Genres,

    /// Log in and store the session
    Login {
        #[arg(long)]
        email: String,

        #[arg(long)]
        password: String,
    },

    /// Forget the stored session
    Logout,

    /// Show the logged-in user's books and reviews
    Activity,
}

impl Command {
    /// Listing parameters for `books`, `None` for every other command
    pub fn book_query(&self) -> Option<BookQuery> {
        match self {
            Command::Books {
                page,
                search,
                genre,
                sort,
            } => Some(
                BookQuery::page(*page)
                    .search(search.clone())
                    .genre(genre.clone())
                    .sort(SortOrder::parse_lenient(sort)),
            ),
            _ => None,
        }
    }
}

impl Cli {
    /// Parse command line arguments
    pub fn parse_args() -> Self {
        Cli::parse()
    }
}

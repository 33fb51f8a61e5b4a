//! CLI command implementations
//!
//! Each invocation builds a fresh catalog over the seeded fixture, so
//! only the login session survives between runs.

use std::path::Path;

use serde_json::json;
use tracing::debug;

use crate::auth::{Session, SessionFile};
use crate::catalog::Catalog;
use crate::config::CatalogConfig;

use super::args::{Cli, Command};
use super::errors::{CliError, CliResult};
use super::io::write_json;

/// Load the config file if one was given, defaults otherwise
pub fn load_config(path: Option<&Path>) -> CliResult<CatalogConfig> {
    match path {
        Some(path) => Ok(CatalogConfig::load(path)?),
        None => Ok(CatalogConfig::default()),
    }
}

/// Parse arguments and run the selected command to completion
pub fn run() -> CliResult<()> {
    let cli = Cli::parse_args();
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| CliError::io_error(format!("failed to start runtime: {}", e)))?;

    runtime.block_on(run_command(cli))
}

pub async fn run_command(cli: Cli) -> CliResult<()> {
    let config = load_config(cli.config.as_deref())?;
    let catalog = Catalog::new(config);
    let sessions = SessionFile::new(&cli.session);

    debug!(command = ?cli.command, "running command");

    match &cli.command {
        command @ Command::Books { .. } => {
            let query = command.book_query().unwrap_or_default();
            let page = catalog.list_books(&query).await?;
            write_json(&page)
        }
        Command::Book { id } => {
            let book = catalog.get_book(id).await?;
            write_json(&book)
        }
        Command::Genres => {
            let genres = catalog.genres().await?;
            write_json(&genres)
        }
        Command::Login { email, password } => {
            let session = catalog.login(email, password).await?;
            sessions.save(&session)?;
            write_json(&session.user)
        }
        Command::Logout => {
            sessions.clear()?;
            write_json(&json!({ "loggedOut": true }))
        }
        Command::Activity => {
            let session = require_session(&sessions)?;
            let activity = catalog.user_activity(&session.token).await?;
            write_json(&activity)
        }
    }
}

fn require_session(sessions: &SessionFile) -> CliResult<Session> {
    sessions.load()?.ok_or_else(CliError::not_logged_in)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::errors::CliErrorCode;
    use std::fs;
    use tempfile::TempDir;

    fn cli(tmp: &TempDir, command: Command) -> Cli {
        let config = tmp.path().join("bookwise.json");
        fs::write(&config, r#"{"latency_ms": 0, "token": {"secret": "cli-test"}}"#).unwrap();

        Cli {
            config: Some(config),
            session: tmp.path().join("session.json"),
            command,
        }
    }

    #[tokio::test]
    async fn test_login_then_activity() {
        let tmp = TempDir::new().unwrap();

        run_command(cli(
            &tmp,
            Command::Login {
                email: "alice@example.com".to_string(),
                password: "password123".to_string(),
            },
        ))
        .await
        .unwrap();
        assert!(tmp.path().join("session.json").exists());

        run_command(cli(&tmp, Command::Activity)).await.unwrap();
    }

    #[tokio::test]
    async fn test_activity_without_session() {
        let tmp = TempDir::new().unwrap();

        let err = run_command(cli(&tmp, Command::Activity)).await.unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::NotLoggedIn);
    }

    #[tokio::test]
    async fn test_unknown_book_fails() {
        let tmp = TempDir::new().unwrap();

        let err = run_command(cli(&tmp, Command::Book { id: "404".to_string() }))
            .await
            .unwrap_err();
        assert_eq!(err.code(), &CliErrorCode::OperationFailed);
    }

    #[test]
    fn test_default_config_without_path() {
        let config = load_config(None).unwrap();
        assert_eq!(config.page_size, 5);
    }
}

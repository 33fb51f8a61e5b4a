//! CLI-specific error types
//!
//! Every CLI error ends the invocation with a non-zero exit code.

use std::fmt;
use std::io;

use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::config::ConfigError;

/// CLI error codes
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CliErrorCode {
    /// Configuration file error
    ConfigError,
    /// I/O error (stdout, runtime)
    IoError,
    /// No stored session; run `login` first
    NotLoggedIn,
    /// Session file unreadable or unwritable
    SessionError,
    /// The catalog rejected the operation
    OperationFailed,
}

impl CliErrorCode {
    /// Get the error code string
    pub fn code(&self) -> &'static str {
        match self {
            Self::ConfigError => "BOOKWISE_CLI_CONFIG_ERROR",
            Self::IoError => "BOOKWISE_CLI_IO_ERROR",
            Self::NotLoggedIn => "BOOKWISE_CLI_NOT_LOGGED_IN",
            Self::SessionError => "BOOKWISE_CLI_SESSION_ERROR",
            Self::OperationFailed => "BOOKWISE_CLI_OPERATION_FAILED",
        }
    }
}

/// CLI error
#[derive(Debug)]
pub struct CliError {
    code: CliErrorCode,
    message: String,
}

impl CliError {
    /// Create a new CLI error
    pub fn new(code: CliErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn config_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::ConfigError, msg)
    }

    pub fn io_error(msg: impl Into<String>) -> Self {
        Self::new(CliErrorCode::IoError, msg)
    }

    pub fn not_logged_in() -> Self {
        Self::new(
            CliErrorCode::NotLoggedIn,
            "No stored session. Run 'bookwise login' first.",
        )
    }

    /// Get the error code
    pub fn code(&self) -> &CliErrorCode {
        &self.code
    }

    /// Get the error message
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.code(), self.message)
    }
}

impl std::error::Error for CliError {}

impl From<io::Error> for CliError {
    fn from(e: io::Error) -> Self {
        Self::io_error(e.to_string())
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        Self::io_error(format!("JSON error: {}", e))
    }
}

impl From<ConfigError> for CliError {
    fn from(e: ConfigError) -> Self {
        Self::config_error(e.to_string())
    }
}

impl From<AuthError> for CliError {
    fn from(e: AuthError) -> Self {
        Self::new(
            CliErrorCode::SessionError,
            format!("{} ({})", e, e.status_code()),
        )
    }
}

impl From<CatalogError> for CliError {
    fn from(e: CatalogError) -> Self {
        Self::new(
            CliErrorCode::OperationFailed,
            format!("{} ({})", e, e.status_code()),
        )
    }
}

/// CLI result type
pub type CliResult<T> = Result<T, CliError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_includes_code() {
        let err = CliError::not_logged_in();
        assert!(err.to_string().starts_with("BOOKWISE_CLI_NOT_LOGGED_IN: "));
    }

    #[test]
    fn test_catalog_error_keeps_status() {
        let err = CliError::from(CatalogError::Forbidden);
        assert_eq!(err.code(), &CliErrorCode::OperationFailed);
        assert_eq!(err.message(), "Forbidden (403)");
    }

    #[test]
    fn test_session_error_keeps_status() {
        let err = CliError::from(AuthError::SessionStorage("disk full".into()));
        assert_eq!(err.code(), &CliErrorCode::SessionError);
        assert_eq!(err.message(), "Session storage error: disk full (500)");
    }
}

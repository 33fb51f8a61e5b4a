//! # Auth Errors
//!
//! Error types for the access control gate.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication and authorization errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // ==================
    // Authentication Errors
    // ==================

    /// Unknown email or wrong password (generic - don't leak which)
    #[error("Invalid credentials")]
    InvalidCredentials,

    /// Email already registered
    #[error("Email already registered")]
    EmailAlreadyExists,

    // ==================
    // Token Errors
    // ==================

    /// Token is valid but names a user the store doesn't know,
    /// or no token was supplied at all
    #[error("Unauthorized")]
    Unauthorized,

    /// Token is malformed
    #[error("Malformed token")]
    MalformedToken,

    /// Token has expired
    #[error("Token expired")]
    TokenExpired,

    /// Token signature is invalid
    #[error("Invalid token signature")]
    InvalidSignature,

    // ==================
    // Internal Errors
    // ==================

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,

    /// Session file could not be read or written
    #[error("Session storage error: {0}")]
    SessionStorage(String),
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MalformedToken => 400,

            AuthError::InvalidCredentials => 401,
            AuthError::Unauthorized => 401,
            AuthError::TokenExpired => 401,
            AuthError::InvalidSignature => 401,

            AuthError::EmailAlreadyExists => 409,

            AuthError::TokenGenerationFailed => 500,
            AuthError::SessionStorage(_) => 500,
        }
    }

    /// Returns whether this error came from a presented token
    /// rather than from a login attempt
    pub fn is_token_error(&self) -> bool {
        matches!(
            self,
            AuthError::Unauthorized
                | AuthError::MalformedToken
                | AuthError::TokenExpired
                | AuthError::InvalidSignature
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_status_codes() {
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::Unauthorized.status_code(), 401);
        assert_eq!(AuthError::EmailAlreadyExists.status_code(), 409);
        assert_eq!(AuthError::TokenGenerationFailed.status_code(), 500);
    }

    #[test]
    fn test_error_messages_do_not_leak_info() {
        let err = AuthError::InvalidCredentials;
        assert!(!err.to_string().contains("password"));
        assert!(!err.to_string().contains("email"));
    }

    #[test]
    fn test_token_errors_classified() {
        assert!(AuthError::TokenExpired.is_token_error());
        assert!(AuthError::InvalidSignature.is_token_error());
        assert!(!AuthError::InvalidCredentials.is_token_error());
        assert!(!AuthError::EmailAlreadyExists.is_token_error());
    }
}

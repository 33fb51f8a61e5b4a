//! Catalog error types
//!
//! Every failure is an immediate rejection of the call that raised it;
//! none of them leave the store half-modified.

use std::fmt;

use thiserror::Error;

use crate::auth::AuthError;

/// Result type for catalog operations
pub type CatalogResult<T> = Result<T, CatalogError>;

/// Which collection a missing id was looked up in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Book,
    Review,
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EntityKind::Book => write!(f, "Book"),
            EntityKind::Review => write!(f, "Review"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    /// Login with unknown email or wrong password
    #[error("Invalid credentials.")]
    InvalidCredentials,

    /// Signup with an email that is already registered
    #[error("User with this email already exists.")]
    AlreadyExists,

    #[error("{kind} not found: {id}")]
    NotFound { kind: EntityKind, id: String },

    /// Missing, bad or expired token, or a token that doesn't
    /// match the user it claims to act for
    #[error("Unauthorized")]
    Unauthorized,

    /// Valid token, but the caller doesn't own the resource
    #[error("Forbidden")]
    Forbidden,

    /// Rejected input
    #[error("Invalid input: {0}")]
    Invalid(String),

    #[error("Storage error: {0}")]
    Storage(String),
}

impl CatalogError {
    pub fn book_not_found(id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind: EntityKind::Book,
            id: id.into(),
        }
    }

    pub fn review_not_found(id: impl Into<String>) -> Self {
        CatalogError::NotFound {
            kind: EntityKind::Review,
            id: id.into(),
        }
    }

    pub fn invalid(msg: impl Into<String>) -> Self {
        CatalogError::Invalid(msg.into())
    }

    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            CatalogError::Invalid(_) => 400,
            CatalogError::InvalidCredentials => 401,
            CatalogError::Unauthorized => 401,
            CatalogError::Forbidden => 403,
            CatalogError::NotFound { .. } => 404,
            CatalogError::AlreadyExists => 409,
            CatalogError::Storage(_) => 500,
        }
    }
}

impl From<AuthError> for CatalogError {
    fn from(err: AuthError) -> Self {
        match err {
            e if e.is_token_error() => CatalogError::Unauthorized,
            AuthError::InvalidCredentials => CatalogError::InvalidCredentials,
            AuthError::EmailAlreadyExists => CatalogError::AlreadyExists,
            e => CatalogError::Storage(e.to_string()),
        }
    }
}

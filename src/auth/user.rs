//! # User Management
//!
//! User model and the lookup seam the access gate reads through.

use serde::{Deserialize, Serialize};

/// User record as held by the entity store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    /// Unique user identifier
    pub id: String,

    /// Display name, copied onto reviews at write time
    pub name: String,

    /// User's email address (unique)
    pub email: String,

    /// Stored password, never serialized
    #[serde(skip_serializing, default)]
    pub password: Option<String>,
}

impl User {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        email: impl Into<String>,
        password: Option<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            email: email.into(),
            password,
        }
    }

    /// Public view of this user
    pub fn profile(&self) -> UserProfile {
        UserProfile::from(self)
    }
}

/// User as returned to callers (no password)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub name: String,
    pub email: String,
}

impl From<&User> for UserProfile {
    fn from(user: &User) -> Self {
        Self {
            id: user.id.clone(),
            name: user.name.clone(),
            email: user.email.clone(),
        }
    }
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// User creation request
#[derive(Debug, Clone, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

impl SignupRequest {
    pub fn new(
        name: impl Into<String>,
        email: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            password: password.into(),
        }
    }
}

/// Read-only user lookups
///
/// The access gate never owns users; it reads them through whatever
/// holds the collection.
pub trait UserDirectory {
    /// Find a user by their ID
    fn find_by_id(&self, id: &str) -> Option<&User>;

    /// Find a user by their email
    fn find_by_email(&self, email: &str) -> Option<&User>;

    /// Check if an email is already registered
    fn email_exists(&self, email: &str) -> bool {
        self.find_by_email(email).is_some()
    }
}

impl UserDirectory for [User] {
    fn find_by_id(&self, id: &str) -> Option<&User> {
        self.iter().find(|u| u.id == id)
    }

    fn find_by_email(&self, email: &str) -> Option<&User> {
        self.iter().find(|u| u.email == email)
    }
}

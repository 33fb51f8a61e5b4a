//! # Access Control Gate
//!
//! Turns credentials into a session and a presented token back into a
//! user id. Ownership checks live here too so that every mutating
//! operation rejects the same way.

use serde::{Deserialize, Serialize};
use tracing::warn;

use super::crypto::password_matches;
use super::errors::{AuthError, AuthResult};
use super::jwt::TokenIssuer;
use super::user::{UserDirectory, UserProfile};
use crate::config::TokenConfig;

/// Logged-in user plus the bearer token to present on later calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub user: UserProfile,
    pub token: String,
}

/// Outcome of comparing a caller against a resource owner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ownership {
    Owner,
    NotOwner,
}

impl Ownership {
    pub fn of(owner_id: &str, caller_id: &str) -> Self {
        if owner_id == caller_id {
            Ownership::Owner
        } else {
            Ownership::NotOwner
        }
    }

    pub fn is_owner(self) -> bool {
        self == Ownership::Owner
    }
}

#[derive(Debug, Clone)]
pub struct AccessGate {
    issuer: TokenIssuer,
}

impl AccessGate {
    pub fn new(config: TokenConfig) -> Self {
        Self {
            issuer: TokenIssuer::new(config),
        }
    }

    /// Check an email/password pair and issue a session
    pub fn authenticate<D>(&self, users: &D, email: &str, password: &str) -> AuthResult<Session>
    where
        D: UserDirectory + ?Sized,
    {
        let user = users
            .find_by_email(email)
            .ok_or(AuthError::InvalidCredentials)?;

        if !password_matches(user.password.as_deref(), password) {
            return Err(AuthError::InvalidCredentials);
        }

        let token = self.issuer.issue(user)?;
        Ok(Session {
            user: user.profile(),
            token,
        })
    }

    /// Refuse a signup whose email is already registered
    pub fn check_email_available<D>(&self, users: &D, email: &str) -> AuthResult<()>
    where
        D: UserDirectory + ?Sized,
    {
        if users.email_exists(email) {
            warn!(email = %email, "signup with registered email");
            return Err(AuthError::EmailAlreadyExists);
        }
        Ok(())
    }

    /// Recover the caller's user id from a token.
    ///
    /// Fails with `Unauthorized` for a well-formed token whose user no
    /// longer exists.
    pub fn authorize<D>(&self, users: &D, token: &str) -> AuthResult<String>
    where
        D: UserDirectory + ?Sized,
    {
        let claims = self.issuer.verify(token).map_err(|e| {
            warn!(error = %e, "rejected bearer token");
            e
        })?;

        match users.find_by_id(&claims.sub) {
            Some(user) => Ok(user.id.clone()),
            None => {
                warn!(user_id = %claims.sub, "token names unknown user");
                Err(AuthError::Unauthorized)
            }
        }
    }

    /// Authorize and additionally require the token to belong to `user_id`
    pub fn authorize_as<D>(&self, users: &D, token: &str, user_id: &str) -> AuthResult<String>
    where
        D: UserDirectory + ?Sized,
    {
        let caller = self.authorize(users, token)?;
        if caller != user_id {
            warn!(caller = %caller, claimed = %user_id, "token does not match claimed user");
            return Err(AuthError::Unauthorized);
        }
        Ok(caller)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::user::User;

    fn gate() -> AccessGate {
        AccessGate::new(TokenConfig {
            secret: "gate_test_secret".to_string(),
            ..TokenConfig::default()
        })
    }

    fn users() -> Vec<User> {
        vec![
            User::new("1", "Alice", "alice@example.com", Some("password123".to_string())),
            User::new("2", "Bob", "bob@example.com", None),
        ]
    }

    #[test]
    fn test_authenticate_and_authorize() {
        let gate = gate();
        let users = users();

        let session = gate
            .authenticate(users.as_slice(), "alice@example.com", "password123")
            .unwrap();
        assert_eq!(session.user.name, "Alice");

        let id = gate.authorize(users.as_slice(), &session.token).unwrap();
        assert_eq!(id, "1");
    }

    #[test]
    fn test_wrong_password_and_unknown_email_look_the_same() {
        let gate = gate();
        let users = users();

        let wrong_password = gate
            .authenticate(users.as_slice(), "alice@example.com", "nope")
            .unwrap_err();
        let unknown = gate
            .authenticate(users.as_slice(), "carol@example.com", "password123")
            .unwrap_err();

        assert_eq!(wrong_password, AuthError::InvalidCredentials);
        assert_eq!(wrong_password, unknown);
    }

    #[test]
    fn test_registered_email_unavailable() {
        let gate = gate();
        let users = users();

        assert_eq!(
            gate.check_email_available(users.as_slice(), "alice@example.com")
                .unwrap_err(),
            AuthError::EmailAlreadyExists
        );
        assert!(gate
            .check_email_available(users.as_slice(), "carol@example.com")
            .is_ok());
    }

    #[test]
    fn test_passwordless_user_logs_in() {
        let gate = gate();
        let users = users();

        assert!(gate
            .authenticate(users.as_slice(), "bob@example.com", "")
            .is_ok());
    }

    #[test]
    fn test_token_for_removed_user_is_unauthorized() {
        let gate = gate();
        let mut users = users();
        let session = gate
            .authenticate(users.as_slice(), "bob@example.com", "")
            .unwrap();

        users.retain(|u| u.id != "2");

        assert_eq!(
            gate.authorize(users.as_slice(), &session.token).unwrap_err(),
            AuthError::Unauthorized
        );
    }

    #[test]
    fn test_authorize_as_requires_exact_user() {
        let gate = gate();
        let users = users();
        let session = gate
            .authenticate(users.as_slice(), "alice@example.com", "password123")
            .unwrap();

        assert!(gate.authorize_as(users.as_slice(), &session.token, "1").is_ok());
        assert_eq!(
            gate.authorize_as(users.as_slice(), &session.token, "2")
                .unwrap_err(),
            AuthError::Unauthorized
        );
    }

    #[test]
    fn test_ownership() {
        assert!(Ownership::of("1", "1").is_owner());
        assert!(!Ownership::of("1", "2").is_owner());
    }
}

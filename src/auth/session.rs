//! # Session Persistence
//!
//! Keeps `{ token, user }` on disk between invocations so a caller can
//! log in once and reuse the token. The file is trusted as-is: expiry
//! is only discovered when the token is next presented.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use super::errors::{AuthError, AuthResult};
use super::gate::Session;

/// A session stored as JSON at a fixed path
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Write the session, replacing any previous one
    pub fn save(&self, session: &Session) -> AuthResult<()> {
        let json = serde_json::to_string_pretty(session)
            .map_err(|e| AuthError::SessionStorage(e.to_string()))?;
        fs::write(&self.path, json).map_err(|e| AuthError::SessionStorage(e.to_string()))
    }

    /// Read the stored session, `None` if nothing has been saved
    pub fn load(&self) -> AuthResult<Option<Session>> {
        let content = match fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(AuthError::SessionStorage(e.to_string())),
        };

        serde_json::from_str(&content)
            .map(Some)
            .map_err(|e| AuthError::SessionStorage(format!("corrupt session file: {}", e)))
    }

    /// Forget the stored session. Clearing twice is not an error.
    pub fn clear(&self) -> AuthResult<()> {
        match fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AuthError::SessionStorage(e.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::user::UserProfile;
    use tempfile::TempDir;

    fn session() -> Session {
        Session {
            user: UserProfile {
                id: "1".to_string(),
                name: "Alice".to_string(),
                email: "alice@example.com".to_string(),
            },
            token: "header.payload.signature".to_string(),
        }
    }

    #[test]
    fn test_save_then_load() {
        let tmp = TempDir::new().unwrap();
        let file = SessionFile::new(tmp.path().join("session.json"));

        file.save(&session()).unwrap();
        assert_eq!(file.load().unwrap(), Some(session()));
    }

    #[test]
    fn test_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        let file = SessionFile::new(tmp.path().join("absent.json"));

        assert_eq!(file.load().unwrap(), None);
    }

    #[test]
    fn test_clear_is_idempotent() {
        let tmp = TempDir::new().unwrap();
        let file = SessionFile::new(tmp.path().join("session.json"));

        file.save(&session()).unwrap();
        file.clear().unwrap();
        file.clear().unwrap();
        assert_eq!(file.load().unwrap(), None);
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("session.json");
        fs::write(&path, "{not json").unwrap();

        let result = SessionFile::new(path).load();
        assert!(matches!(result, Err(AuthError::SessionStorage(_))));
    }
}

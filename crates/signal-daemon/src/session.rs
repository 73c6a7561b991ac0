//! Persisted session credentials.
//!
//! signal-cli keeps the account keys in its own data directory. What the
//! bot has to remember between restarts is which linked account to use,
//! stored as `{"account": "+15551234567"}`.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::DaemonError;

/// Default session file name inside the data directory.
pub const SESSION_FILE: &str = "session.json";

/// Credentials of a linked Signal device.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionCredentials {
    /// Phone number of the linked account.
    pub account: String,
}

/// JSON file holding [`SessionCredentials`].
#[derive(Debug, Clone)]
pub struct SessionFile {
    path: PathBuf,
}

impl SessionFile {
    /// Use the given file path.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use [`SESSION_FILE`] inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        Self::new(dir.as_ref().join(SESSION_FILE))
    }

    /// Path of the session file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load saved credentials. A missing or unreadable file means none.
    pub async fn load(&self) -> Option<SessionCredentials> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => return None,
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Failed to read session file");
                return None;
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(credentials) => Some(credentials),
            Err(e) => {
                warn!(path = %self.path.display(), error = %e, "Ignoring invalid session file");
                None
            }
        }
    }

    /// Write credentials, creating the parent directory if needed.
    pub async fn save(&self, credentials: &SessionCredentials) -> Result<(), DaemonError> {
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let bytes = serde_json::to_vec_pretty(credentials)?;
        tokio::fs::write(&self.path, bytes).await?;
        debug!(path = %self.path.display(), "Session credentials saved");
        Ok(())
    }

    /// Delete the credentials file. Deleting a missing file is not an error.
    pub async fn clear(&self) -> Result<(), DaemonError> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => {
                debug!(path = %self.path.display(), "Session credentials removed");
                Ok(())
            }
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::in_dir(dir.path().join("session"));
        let credentials = SessionCredentials {
            account: "+15551234567".to_string(),
        };

        assert!(file.load().await.is_none());

        file.save(&credentials).await.unwrap();
        assert_eq!(file.load().await, Some(credentials));

        file.clear().await.unwrap();
        assert!(file.load().await.is_none());
        file.clear().await.unwrap();
    }

    #[tokio::test]
    async fn test_invalid_file_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let file = SessionFile::in_dir(dir.path());
        tokio::fs::write(file.path(), b"[]").await.unwrap();

        assert!(file.load().await.is_none());
    }
}

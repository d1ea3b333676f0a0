//! Session storage for persisting sign-in state between invocations.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::fs;
use tracing::debug;

use tripkit_core::error::StorageError;
use tripkit_core::{CredentialStore, Result, UserSession};

#[cfg(unix)]
use std::os::unix::fs::PermissionsExt;

const SESSION_FILE: &str = "session.json";

/// A [`CredentialStore`] backed by a JSON file.
///
/// The file holds the session exactly as the backend returned it at
/// sign-in, with the token pair replaced after each refresh.
#[derive(Debug, Clone)]
pub struct FileCredentialStore {
    path: PathBuf,
}

impl FileCredentialStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store in the platform data directory.
    pub fn default_location() -> Result<Self> {
        let dirs = ProjectDirs::from("", "", "tripkit").ok_or_else(|| StorageError::Unavailable {
            message: "could not determine data directory".to_string(),
        })?;

        Ok(Self::new(dirs.data_dir().join(SESSION_FILE)))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileCredentialStore {
    async fn load(&self) -> Result<Option<UserSession>> {
        let json = match fs::read_to_string(&self.path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StorageError::Io(e).into()),
        };

        let session = serde_json::from_str(&json).map_err(StorageError::Format)?;
        debug!(path = %self.path.display(), "Loaded stored session");
        Ok(Some(session))
    }

    async fn save(&self, session: &UserSession) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).await.map_err(StorageError::Io)?;
        }

        let json = serde_json::to_string_pretty(session).map_err(StorageError::Format)?;
        fs::write(&self.path, json).await.map_err(StorageError::Io)?;

        // Tokens are secrets; keep the file private to the user.
        #[cfg(unix)]
        fs::set_permissions(&self.path, std::fs::Permissions::from_mode(0o600))
            .await
            .map_err(StorageError::Io)?;

        debug!(path = %self.path.display(), "Saved session");
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::Io(e).into()),
        }
    }
}

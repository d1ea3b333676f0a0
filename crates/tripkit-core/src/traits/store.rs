//! Durable credential storage trait.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::Result;
use crate::session::UserSession;

/// Durable storage for the signed-in session.
///
/// The client writes here after sign-in and every refresh, and clears it on
/// sign-out or refresh failure.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Load the stored session, if any.
    async fn load(&self) -> Result<Option<UserSession>>;

    /// Replace the stored session.
    async fn save(&self, session: &UserSession) -> Result<()>;

    /// Remove the stored session. Clearing an empty store succeeds.
    async fn clear(&self) -> Result<()>;
}

/// An in-memory store; nothing outlives the process.
#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    session: Mutex<Option<UserSession>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that already holds `session`.
    pub fn with_session(session: UserSession) -> Self {
        Self {
            session: Mutex::new(Some(session)),
        }
    }

    /// Returns a copy of the stored session.
    pub fn snapshot(&self) -> Option<UserSession> {
        self.session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    fn replace(&self, session: Option<UserSession>) {
        *self
            .session
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = session;
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn load(&self) -> Result<Option<UserSession>> {
        Ok(self.snapshot())
    }

    async fn save(&self, session: &UserSession) -> Result<()> {
        self.replace(Some(session.clone()));
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        self.replace(None);
        Ok(())
    }
}

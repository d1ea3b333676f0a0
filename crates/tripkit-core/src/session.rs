//! Signed-in user session.

use serde::{Deserialize, Serialize};

use crate::tokens::CredentialPair;

/// The signed-in user as returned by the sign-in endpoints.
///
/// Everything except `auth_tokens` (profile, settings) is opaque and
/// carried through unchanged. This is the unit kept in [`AuthState`] and
/// persisted by a [`CredentialStore`].
///
/// [`AuthState`]: crate::AuthState
/// [`CredentialStore`]: crate::traits::CredentialStore
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSession {
    pub auth_tokens: CredentialPair,
    #[serde(flatten)]
    pub profile: serde_json::Map<String, serde_json::Value>,
}

impl UserSession {
    /// A session with credentials and no profile data.
    pub fn new(auth_tokens: CredentialPair) -> Self {
        Self {
            auth_tokens,
            profile: serde_json::Map::new(),
        }
    }

    /// The same session with its credentials replaced.
    pub fn with_tokens(&self, auth_tokens: CredentialPair) -> Self {
        Self {
            auth_tokens,
            profile: self.profile.clone(),
        }
    }

    /// The display name from `user_info.username`, if present.
    pub fn username(&self) -> Option<&str> {
        self.profile
            .get("user_info")
            .and_then(|info| info.get("username"))
            .and_then(|name| name.as_str())
    }
}

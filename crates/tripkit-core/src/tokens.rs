//! Token types for backend authentication.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Metadata the backend attaches to a token (expiry and the like).
///
/// Kept verbatim so a persisted session round-trips unchanged.
pub type TokenMetadata = serde_json::Map<String, serde_json::Value>;

/// An access token for authenticated requests.
///
/// Access tokens are short-lived and sent as `Authorization: Bearer <token>`.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct AccessToken {
    token: String,
    #[serde(flatten)]
    metadata: TokenMetadata,
}

impl AccessToken {
    /// Create a new access token without metadata.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            metadata: TokenMetadata::new(),
        }
    }

    /// Returns the token value for use in authorization headers.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Returns the metadata that came with the token.
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }
}

// Hide token value in Debug output
impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AccessToken").field(&"[REDACTED]").finish()
    }
}

/// A refresh token for obtaining new credential pairs.
///
/// Sent as `X-Refresh-Token: <token>` on every authenticated request.
///
/// # Security
///
/// - Never logged or displayed in Debug output
/// - Treat as opaque; do not parse or inspect
#[derive(Clone, PartialEq, Serialize, Deserialize)]
pub struct RefreshToken {
    token: String,
    #[serde(flatten)]
    metadata: TokenMetadata,
}

impl RefreshToken {
    /// Create a new refresh token without metadata.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: token.into(),
            metadata: TokenMetadata::new(),
        }
    }

    /// Returns the token value for use in refresh headers.
    pub fn as_str(&self) -> &str {
        &self.token
    }

    /// Returns the metadata that came with the token.
    pub fn metadata(&self) -> &TokenMetadata {
        &self.metadata
    }
}

// Hide token value in Debug output
impl fmt::Debug for RefreshToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RefreshToken").field(&"[REDACTED]").finish()
    }
}

/// The access/refresh token pair issued by sign-in and refresh.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CredentialPair {
    pub access_token: AccessToken,
    pub refresh_token: RefreshToken,
}

impl CredentialPair {
    pub fn new(access_token: impl Into<String>, refresh_token: impl Into<String>) -> Self {
        Self {
            access_token: AccessToken::new(access_token),
            refresh_token: RefreshToken::new(refresh_token),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn access_token_hides_value_in_debug() {
        let token = AccessToken::new("eyJhbGciOiJIUzI1NiIsInR5cCI6IkpXVCJ9...");
        let debug = format!("{:?}", token);
        assert!(!debug.contains("eyJ"));
        assert!(debug.contains("[REDACTED]"));
    }

    #[test]
    fn credential_pair_debug_is_redacted() {
        let pair = CredentialPair::new("secret-access", "secret-refresh");
        let debug = format!("{:?}", pair);
        assert!(!debug.contains("secret"));
    }

    #[test]
    fn pair_keeps_token_metadata() {
        let wire = json!({
            "access_token": {"token": "A1", "expired_at": 1700000000},
            "refresh_token": {"token": "R1"}
        });
        let pair: CredentialPair = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(pair.access_token.as_str(), "A1");
        assert_eq!(pair.access_token.metadata()["expired_at"], 1700000000);
        assert_eq!(serde_json::to_value(&pair).unwrap(), wire);
    }

    #[test]
    fn pair_requires_token_field() {
        let wire = json!({
            "access_token": {"value": "A1"},
            "refresh_token": {"token": "R1"}
        });
        assert!(serde_json::from_value::<CredentialPair>(wire).is_err());
    }
}

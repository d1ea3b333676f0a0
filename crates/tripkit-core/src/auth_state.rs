//! Process-wide authentication state.

use std::sync::Arc;

use tokio::sync::watch;
use tracing::debug;

use crate::session::UserSession;
use crate::tokens::CredentialPair;

/// Shared, observable authentication state.
///
/// Starts empty (signed out). Cloning yields another handle to the same
/// state. Every write replaces the whole session at once, so readers see
/// either the old or the new value and never a half-updated pair.
///
/// The HTTP client is the only writer; front-ends read it or
/// [`subscribe`](AuthState::subscribe) to notice sign-out.
#[derive(Debug, Clone)]
pub struct AuthState {
    tx: Arc<watch::Sender<Option<UserSession>>>,
}

impl Default for AuthState {
    fn default() -> Self {
        Self::new()
    }
}

impl AuthState {
    /// Create an empty (signed out) state.
    pub fn new() -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(None)),
        }
    }

    /// Create a state already holding `session`.
    pub fn with_session(session: UserSession) -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(Some(session))),
        }
    }

    /// A snapshot of the current session.
    pub fn session(&self) -> Option<UserSession> {
        self.tx.borrow().clone()
    }

    /// A snapshot of the current credential pair.
    pub fn credentials(&self) -> Option<CredentialPair> {
        self.tx
            .borrow()
            .as_ref()
            .map(|session| session.auth_tokens.clone())
    }

    pub fn is_signed_in(&self) -> bool {
        self.tx.borrow().is_some()
    }

    /// Replace the whole session.
    pub fn set_session(&self, session: Option<UserSession>) {
        debug!(signed_in = session.is_some(), "Session replaced");
        self.tx.send_replace(session);
    }

    /// Install or clear credentials.
    ///
    /// Installing keeps the current profile if there is one.
    pub fn set_credentials(&self, credentials: Option<CredentialPair>) {
        match credentials {
            Some(pair) => self.tx.send_modify(|current| {
                debug!(had_session = current.is_some(), "Credentials installed");
                let next = match current.as_ref() {
                    Some(session) => session.with_tokens(pair),
                    None => UserSession::new(pair),
                };
                *current = Some(next);
            }),
            None => {
                self.tx.send_replace(None);
            }
        }
    }

    /// Replace the credential pair only if it is still `expected`.
    ///
    /// Returns whether the swap happened. A session cleared or replaced in
    /// the meantime is left untouched.
    pub fn rotate_credentials(&self, expected: &CredentialPair, next: CredentialPair) -> bool {
        self.tx.send_if_modified(|current| match current {
            Some(session) if session.auth_tokens == *expected => {
                *session = session.with_tokens(next);
                true
            }
            _ => false,
        })
    }

    /// Sign out: drop the session.
    pub fn clear(&self) {
        debug!("Session cleared");
        self.tx.send_replace(None);
    }

    /// Observe changes to the session.
    pub fn subscribe(&self) -> watch::Receiver<Option<UserSession>> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn session_with_profile() -> UserSession {
        serde_json::from_value(json!({
            "user_info": {"username": "mina"},
            "auth_tokens": {
                "access_token": {"token": "A1"},
                "refresh_token": {"token": "R1"}
            }
        }))
        .unwrap()
    }

    #[test]
    fn starts_signed_out() {
        let state = AuthState::new();
        assert!(!state.is_signed_in());
        assert!(state.credentials().is_none());
    }

    #[test]
    fn clones_share_state() {
        let state = AuthState::new();
        let other = state.clone();
        state.set_credentials(Some(CredentialPair::new("A1", "R1")));
        assert_eq!(
            other.credentials().unwrap().access_token.as_str(),
            "A1"
        );
    }

    #[test]
    fn set_credentials_keeps_profile() {
        let state = AuthState::with_session(session_with_profile());
        state.set_credentials(Some(CredentialPair::new("A2", "R2")));

        let session = state.session().unwrap();
        assert_eq!(session.username(), Some("mina"));
        assert_eq!(session.auth_tokens, CredentialPair::new("A2", "R2"));
    }

    #[test]
    fn rotate_replaces_expected_pair() {
        let state = AuthState::with_session(session_with_profile());

        assert!(state.rotate_credentials(
            &CredentialPair::new("A1", "R1"),
            CredentialPair::new("A2", "R2")
        ));
        let session = state.session().unwrap();
        assert_eq!(session.auth_tokens, CredentialPair::new("A2", "R2"));
        assert_eq!(session.username(), Some("mina"));
    }

    #[test]
    fn rotate_does_not_resurrect_cleared_session() {
        let state = AuthState::with_session(session_with_profile());
        state.clear();

        assert!(!state.rotate_credentials(
            &CredentialPair::new("A1", "R1"),
            CredentialPair::new("A2", "R2")
        ));
        assert!(!state.is_signed_in());
    }

    #[test]
    fn rotate_keeps_replaced_pair() {
        let state = AuthState::with_session(session_with_profile());
        state.set_credentials(Some(CredentialPair::new("B1", "BR1")));

        assert!(!state.rotate_credentials(
            &CredentialPair::new("A1", "R1"),
            CredentialPair::new("A2", "R2")
        ));
        assert_eq!(state.credentials(), Some(CredentialPair::new("B1", "BR1")));
    }

    #[tokio::test]
    async fn subscribers_observe_sign_out() {
        let state = AuthState::with_session(session_with_profile());
        let mut rx = state.subscribe();
        assert!(rx.borrow_and_update().is_some());

        state.clear();
        rx.changed().await.unwrap();
        assert!(rx.borrow().is_none());
    }
}

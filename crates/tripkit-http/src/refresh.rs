//! Token refresh decorator.
//!
//! [`AuthRefresh`] wraps a raw [`Transport`]. Every request is stamped with
//! the credentials current at dispatch. When the backend answers with the
//! expired-token signal, the decorator refreshes the credential pair once and
//! resubmits the request once; the second outcome goes back to the caller
//! as-is.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use tripkit_core::error::AuthError;
use tripkit_core::{
    ApiRequest, ApiResponse, AuthState, CredentialPair, CredentialStore, Error, Result,
    SignInNavigator, Transport,
};

use crate::endpoints::REFRESH_TOKEN;

/// Adds credential headers and the single-retry refresh cycle to a transport.
pub struct AuthRefresh<T> {
    inner: T,
    pub(crate) state: AuthState,
    pub(crate) store: Arc<dyn CredentialStore>,
    pub(crate) navigator: Arc<dyn SignInNavigator>,
    refresh_lock: Mutex<()>,
}

impl<T: Transport> AuthRefresh<T> {
    pub fn new(
        inner: T,
        state: AuthState,
        store: Arc<dyn CredentialStore>,
        navigator: Arc<dyn SignInNavigator>,
    ) -> Self {
        Self {
            inner,
            state,
            store,
            navigator,
            refresh_lock: Mutex::new(()),
        }
    }

    /// Returns the wrapped transport.
    pub fn inner(&self) -> &T {
        &self.inner
    }

    /// Returns the shared auth state this decorator reads and writes.
    pub fn auth_state(&self) -> &AuthState {
        &self.state
    }

    /// Send `request`, recovering once from an expired access token.
    ///
    /// Headers are snapshotted from the auth state here, so a credential
    /// change after dispatch never alters a request in flight.
    #[instrument(skip(self, request), fields(method = %request.method, path = %request.path))]
    pub async fn send_with_auth_refresh(&self, request: ApiRequest) -> Result<ApiResponse> {
        let request = request.with_credentials(self.state.credentials().as_ref());

        match self.inner.send(&request).await {
            Err(Error::AuthExpired(_)) if !request.retried => {
                info!("Access token expired, refreshing");
                let pair = self.refresh_after_expiry(&request).await?;

                let retry = request.into_retry().with_credentials(Some(&pair));
                debug!("Resubmitting request with refreshed credentials");
                self.inner.send(&retry).await
            }
            Err(Error::AuthExpired(err)) => {
                debug!(status = err.status, "Access token expired after retry, giving up");
                Err(Error::AuthExpired(err))
            }
            other => other,
        }
    }

    /// Refresh the credential pair on demand.
    ///
    /// Fails with [`AuthError::NoSession`] when nothing is installed. A
    /// failed refresh signs out exactly like the automatic cycle.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<CredentialPair> {
        let _guard = self.refresh_lock.lock().await;
        let current = self.state.credentials().ok_or(AuthError::NoSession)?;
        self.refresh_locked(&current).await
    }

    /// Obtain fresh credentials for a request rejected as expired.
    async fn refresh_after_expiry(&self, request: &ApiRequest) -> Result<CredentialPair> {
        let _guard = self.refresh_lock.lock().await;

        let Some(current) = self.state.credentials() else {
            warn!("Signed out while the request was in flight");
            return Err(Error::RefreshFailed(Box::new(AuthError::NoSession.into())));
        };

        // Another request already rotated the pair this one was sent with.
        if !request.was_sent_with(Some(&current)) {
            debug!("Credentials rotated concurrently, reusing them");
            return Ok(current);
        }

        self.refresh_locked(&current).await
    }

    /// Call the refresh endpoint. The caller holds `refresh_lock`.
    async fn refresh_locked(&self, current: &CredentialPair) -> Result<CredentialPair> {
        let request = ApiRequest::post(REFRESH_TOKEN).with_credentials(Some(current));

        let outcome = match self.inner.send(&request).await {
            Ok(response) => response.into_json::<CredentialPair>(),
            Err(e) => Err(e),
        };

        match outcome {
            Ok(pair) => self.install(current, pair).await,
            Err(e) => {
                warn!(error = %e, "Token refresh failed, signing out");
                self.sign_out_after_failure().await;
                Err(Error::RefreshFailed(Box::new(e)))
            }
        }
    }

    /// Install a refreshed pair in shared state, then persist it.
    ///
    /// The pair only replaces `current`. If the session was cleared while
    /// the refresh was in flight it stays cleared; if it was replaced, the
    /// replacement wins.
    async fn install(
        &self,
        current: &CredentialPair,
        pair: CredentialPair,
    ) -> Result<CredentialPair> {
        if !self.state.rotate_credentials(current, pair.clone()) {
            return match self.state.credentials() {
                Some(replaced) => {
                    debug!("Credentials replaced during refresh, discarding refreshed pair");
                    Ok(replaced)
                }
                None => {
                    warn!("Signed out during refresh, discarding refreshed pair");
                    Err(Error::RefreshFailed(Box::new(AuthError::NoSession.into())))
                }
            };
        }
        info!("Credentials refreshed");

        if let Some(session) = self.state.session()
            && let Err(e) = self.store.save(&session).await
        {
            warn!(error = %e, "Failed to persist refreshed credentials");
        }
        Ok(pair)
    }

    /// Forget the session in shared state and durable storage.
    ///
    /// Waits for an in-flight refresh so its result cannot be persisted
    /// after the session is gone.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<()> {
        let _guard = self.refresh_lock.lock().await;
        self.state.clear();
        self.store.clear().await
    }

    async fn sign_out_after_failure(&self) {
        self.state.clear();
        if let Err(e) = self.store.clear().await {
            warn!(error = %e, "Failed to clear stored credentials");
        }
        self.navigator.present_sign_in();
    }
}

#[async_trait]
impl<T: Transport> Transport for AuthRefresh<T> {
    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        self.send_with_auth_refresh(request.clone()).await
    }
}

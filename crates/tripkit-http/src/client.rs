//! Authenticated API client.

use std::sync::Arc;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, instrument, warn};

use tripkit_core::error::InvalidInputError;
use tripkit_core::{
    ApiRequest, ApiResponse, AuthState, CredentialPair, CredentialStore, MemoryCredentialStore,
    NoopNavigator, Result, SignInNavigator, Transport, UserSession,
};

use crate::config::ClientConfig;
use crate::refresh::AuthRefresh;
use crate::transport::ReqwestTransport;

/// Client for the travel-planning backend.
///
/// Every request goes through [`AuthRefresh`], so it carries the current
/// credentials and survives one access-token expiry. The client is the
/// only writer of its [`AuthState`].
///
/// # Example
///
/// ```no_run
/// use tripkit_core::ApiUrl;
/// use tripkit_http::{ApiClient, ClientConfig};
///
/// # async fn example() -> Result<(), tripkit_core::Error> {
/// let config = ClientConfig::new(ApiUrl::new("http://43.200.219.71:10375")?);
/// let client = ApiClient::configure(config)?;
/// client.restore_session().await?;
///
/// let trips = client.sessions().await?;
/// println!("{trips}");
/// # Ok(())
/// # }
/// ```
pub struct ApiClient<T = ReqwestTransport> {
    transport: AuthRefresh<T>,
}

impl ApiClient<ReqwestTransport> {
    /// Create a client for the configured backend.
    ///
    /// Starts signed out, with an in-memory store and no navigator; swap
    /// those with the `with_*` methods.
    pub fn configure(config: ClientConfig) -> Result<Self> {
        Ok(Self::with_transport(ReqwestTransport::new(&config)?))
    }
}

impl<T: Transport> ApiClient<T> {
    /// Create a client over an arbitrary raw transport.
    pub fn with_transport(transport: T) -> Self {
        Self {
            transport: AuthRefresh::new(
                transport,
                AuthState::new(),
                Arc::new(MemoryCredentialStore::new()),
                Arc::new(NoopNavigator),
            ),
        }
    }

    /// Share an existing auth state.
    pub fn with_auth_state(mut self, state: AuthState) -> Self {
        self.transport.state = state;
        self
    }

    /// Persist credentials to `store`.
    pub fn with_store(mut self, store: Arc<dyn CredentialStore>) -> Self {
        self.transport.store = store;
        self
    }

    /// Notify `navigator` when the user must sign in again.
    pub fn with_navigator(mut self, navigator: Arc<dyn SignInNavigator>) -> Self {
        self.transport.navigator = navigator;
        self
    }

    pub fn auth_state(&self) -> &AuthState {
        self.transport.auth_state()
    }

    pub fn transport(&self) -> &AuthRefresh<T> {
        &self.transport
    }

    /// Load the persisted session into the auth state.
    ///
    /// Returns whether a session was found.
    #[instrument(skip(self))]
    pub async fn restore_session(&self) -> Result<bool> {
        let session = self.transport.store.load().await?;
        let found = session.is_some();
        debug!(found, "Restoring stored session");
        self.transport.state.set_session(session);
        Ok(found)
    }

    /// Install or clear the credentials sent with subsequent requests.
    pub fn set_credentials(&self, credentials: Option<CredentialPair>) {
        self.transport.state.set_credentials(credentials);
    }

    /// Persist a signed-in session, then install it.
    ///
    /// A failed save leaves the client signed out.
    pub(crate) async fn install_session(&self, session: &UserSession) -> Result<()> {
        self.transport.store.save(session).await?;
        self.transport.state.set_session(Some(session.clone()));
        Ok(())
    }

    /// Forget the session locally and in durable storage.
    #[instrument(skip(self))]
    pub async fn sign_out(&self) -> Result<()> {
        info!("Signing out");
        self.transport.sign_out().await
    }

    /// Refresh the credential pair now.
    pub async fn refresh_credentials(&self) -> Result<CredentialPair> {
        self.transport.refresh().await
    }

    /// Issue one request; 2xx responses only.
    pub async fn request(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.transport.send_with_auth_refresh(request).await
    }

    /// Issue one request and decode its JSON body.
    pub async fn request_json<R: DeserializeOwned>(&self, request: ApiRequest) -> Result<R> {
        self.request(request).await?.into_json()
    }
}

/// Serialize a request body.
pub(crate) fn encode<B: Serialize>(body: &B) -> Result<serde_json::Value> {
    serde_json::to_value(body).map_err(|e| {
        warn!(error = %e, "Failed to encode request body");
        InvalidInputError::Other {
            message: e.to_string(),
        }
        .into()
    })
}

impl<T> std::fmt::Debug for ApiClient<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("credentials", &"[REDACTED]")
            .finish()
    }
}

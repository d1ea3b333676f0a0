//! Client construction backed by the on-disk session.

mod navigator;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result, bail};

use tripkit_core::ApiUrl;
use tripkit_http::{ApiClient, ClientConfig};

use crate::cli::ApiArgs;

pub use navigator::TerminalNavigator;
pub use storage::FileCredentialStore;

/// A client wired to the session file and the terminal prompt.
///
/// Any stored session is loaded into the client's auth state.
pub async fn connect(api: &ApiArgs) -> Result<ApiClient> {
    let base_url = ApiUrl::new(&api.api_url).context("Invalid API URL")?;
    let config = ClientConfig::new(base_url).with_timeout(api.timeout());
    let store = FileCredentialStore::default_location().context("Failed to locate session file")?;

    let client = ApiClient::configure(config)
        .context("Failed to create HTTP client")?
        .with_store(Arc::new(store))
        .with_navigator(Arc::new(TerminalNavigator));

    client
        .restore_session()
        .await
        .context("Failed to load session")?;

    Ok(client)
}

/// Like [`connect`], but fails when nobody is signed in.
pub async fn connect_signed_in(api: &ApiArgs) -> Result<ApiClient> {
    let client = connect(api).await?;
    if !client.auth_state().is_signed_in() {
        bail!("No active session. Run 'tripkit auth sign-in' first.");
    }
    Ok(client)
}

//! Backend liveness and version commands.

use anyhow::{Context, Result};

use crate::cli::ApiArgs;
use crate::output;
use crate::session;

pub async fn ping(api: &ApiArgs) -> Result<()> {
    let client = session::connect(api).await?;
    let reply = client.ping().await.context("Ping failed")?;

    output::success(&format!("{} is reachable", api.api_url));
    if !reply.is_null() {
        output::json_pretty(&reply)?;
    }
    Ok(())
}

pub async fn version(api: &ApiArgs) -> Result<()> {
    let client = session::connect(api).await?;
    let version = client
        .version()
        .await
        .context("Failed to fetch backend version")?;

    match version.as_str() {
        Some(v) => output::field("Backend version", v),
        None => output::json_pretty(&version)?,
    }
    Ok(())
}

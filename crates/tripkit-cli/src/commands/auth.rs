//! Sign-in and session commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use tripkit_core::CredentialStore;
use tripkit_http::Provider;

use crate::cli::ApiArgs;
use crate::output;
use crate::session::{self, FileCredentialStore};

#[derive(Args, Debug)]
pub struct AuthCommand {
    #[command(subcommand)]
    pub command: AuthSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum AuthSubcommand {
    /// Exchange an identity-provider token for a session
    SignIn(SignInArgs),

    /// Rotate the stored token pair now
    Refresh,

    /// Display the stored session
    Whoami(WhoamiArgs),

    /// Forget the stored session
    SignOut,
}

#[derive(Args, Debug)]
pub struct SignInArgs {
    /// Identity provider (google, facebook, naver, kakao)
    #[arg(long)]
    pub provider: Provider,

    /// Token issued by the identity provider
    #[arg(long, env = "TRIPKIT_ID_TOKEN", hide_env_values = true)]
    pub id_token: String,
}

#[derive(Args, Debug)]
pub struct WhoamiArgs {
    /// Print the full stored profile as JSON
    #[arg(long)]
    pub profile: bool,
}

pub async fn handle(cmd: AuthCommand, api: &ApiArgs) -> Result<()> {
    match cmd.command {
        AuthSubcommand::SignIn(args) => sign_in(args, api).await,
        AuthSubcommand::Refresh => refresh(api).await,
        AuthSubcommand::Whoami(args) => whoami(args).await,
        AuthSubcommand::SignOut => sign_out(api).await,
    }
}

async fn sign_in(args: SignInArgs, api: &ApiArgs) -> Result<()> {
    let client = session::connect(api).await?;

    output::progress(&format!("Signing in with {}...", args.provider));
    let session = client
        .sign_in(args.provider, &args.id_token)
        .await
        .context("Failed to sign in")?;

    output::success("Signed in successfully");
    println!();
    if let Some(username) = session.username() {
        output::field("User", username);
    }
    output::field("Provider", args.provider.as_str());
    Ok(())
}

async fn refresh(api: &ApiArgs) -> Result<()> {
    let client = session::connect_signed_in(api).await?;

    output::progress("Refreshing session...");
    client
        .refresh_credentials()
        .await
        .context("Failed to refresh session")?;

    output::success("Session refreshed successfully");
    Ok(())
}

async fn whoami(args: WhoamiArgs) -> Result<()> {
    let store = FileCredentialStore::default_location().context("Failed to locate session file")?;
    let session = store
        .load()
        .await
        .context("Failed to load session")?
        .context("No active session. Run 'tripkit auth sign-in' first.")?;

    output::field("User", session.username().unwrap_or("(unknown)"));
    output::field("Session file", &store.path().display().to_string());

    if args.profile {
        println!();
        output::json_pretty(&session.profile)?;
    }
    Ok(())
}

async fn sign_out(api: &ApiArgs) -> Result<()> {
    let client = session::connect(api).await?;
    client.sign_out().await.context("Failed to sign out")?;

    output::success("Signed out");
    Ok(())
}

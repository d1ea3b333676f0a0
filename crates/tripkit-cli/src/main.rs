//! tripkit - command-line client for the travel-planning backend.
//!
//! A thin wrapper over `tripkit-http`. The session is kept in the platform
//! data directory so consecutive invocations share credentials, and
//! refreshed tokens are written back automatically.

mod cli;
mod commands;
mod output;
mod session;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use cli::{Cli, Commands};
use commands::{auth, budget, locate, location, schedule, service, trip};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose, cli.json_logs);

    let api = &cli.api;
    match cli.command {
        Commands::Ping => service::ping(api).await,
        Commands::Version => service::version(api).await,
        Commands::Auth(cmd) => auth::handle(cmd, api).await,
        Commands::Locate(cmd) => locate::handle(cmd, api).await,
        Commands::Trip(cmd) => trip::handle(cmd, api).await,
        Commands::Schedule(cmd) => schedule::handle(cmd, api).await,
        Commands::Location(cmd) => location::handle(cmd, api).await,
        Commands::Budget(cmd) => budget::handle(cmd, api).await,
    }
}

fn init_logging(verbosity: u8, json: bool) {
    let filter = match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));

    // Logs go to stderr so command output stays pipeable.
    if json {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(false).with_writer(std::io::stderr))
            .init();
    }
}

//! CLI argument definitions.

use std::time::Duration;

use clap::{Args, Parser, Subcommand};

use crate::commands::{auth, budget, locate, location, schedule, trip};

/// Command-line client for the tripkit travel-planning backend.
#[derive(Parser, Debug)]
#[command(name = "tripkit")]
#[command(author, version = env!("TRIPKIT_VERSION"), about, long_about = None)]
pub struct Cli {
    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Output logs as JSON
    #[arg(long, global = true)]
    pub json_logs: bool,

    #[command(flatten)]
    pub api: ApiArgs,

    #[command(subcommand)]
    pub command: Commands,
}

/// Backend connection settings shared by every command.
#[derive(Args, Debug, Clone)]
pub struct ApiArgs {
    /// Backend base URL
    #[arg(long, env = "TRIPKIT_API_URL", default_value = tripkit_http::DEFAULT_API_URL, global = true)]
    pub api_url: String,

    /// Per-request timeout in milliseconds
    #[arg(long, env = "TRIPKIT_TIMEOUT_MS", default_value_t = 10_000, global = true)]
    pub timeout_ms: u64,
}

impl ApiArgs {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Check that the backend is reachable
    Ping,

    /// Show the backend version
    Version,

    /// Sign in, refresh and inspect the stored session
    Auth(auth::AuthCommand),

    /// Place search, details, routes and photos
    Locate(locate::LocateCommand),

    /// Trip sessions
    Trip(trip::TripCommand),

    /// Schedule items within a trip
    Schedule(schedule::ScheduleCommand),

    /// Places saved to a trip
    Location(location::LocationCommand),

    /// Travel budget entries
    Budget(budget::BudgetCommand),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "tripkit",
            "trip",
            "list",
            "--api-url",
            "http://localhost:8080",
            "--timeout-ms",
            "2500",
            "-vv",
        ])
        .unwrap();

        assert_eq!(cli.api.api_url, "http://localhost:8080");
        assert_eq!(cli.api.timeout(), Duration::from_millis(2500));
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn rejects_unknown_provider() {
        let result = Cli::try_parse_from([
            "tripkit",
            "auth",
            "sign-in",
            "--provider",
            "apple",
            "--id-token",
            "t",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn verify_cli() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}

//! Trip session commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use tripkit_http::NewTripSession;

use super::date_range;
use crate::cli::ApiArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct TripCommand {
    #[command(subcommand)]
    pub command: TripSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum TripSubcommand {
    /// List your trips
    List,

    /// Plan a new trip
    Create(CreateArgs),

    /// Delete a trip
    Delete {
        #[arg(long)]
        session_id: String,
    },
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Destination country code; repeat for multi-country trips
    #[arg(long = "country", required = true)]
    pub countries: Vec<String>,

    /// First day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub start: String,

    /// Last day of the trip (YYYY-MM-DD)
    #[arg(long)]
    pub end: String,
}

pub async fn handle(cmd: TripCommand, api: &ApiArgs) -> Result<()> {
    let client = session::connect_signed_in(api).await?;

    match cmd.command {
        TripSubcommand::List => {
            let trips = client.sessions().await.context("Failed to list trips")?;
            output::json_pretty(&trips)
        }
        TripSubcommand::Create(args) => {
            let (start_at, end_at) = date_range(&args.start, &args.end)?;
            let trip = NewTripSession {
                country_codes: args.countries,
                start_at,
                end_at,
            };

            let created = client
                .create_session(&trip)
                .await
                .context("Failed to create trip")?;
            output::success("Trip created");
            output::json_pretty(&created)
        }
        TripSubcommand::Delete { session_id } => {
            client
                .delete_session(&session_id)
                .await
                .context("Failed to delete trip")?;
            output::success(&format!("Deleted trip {session_id}"));
            Ok(())
        }
    }
}

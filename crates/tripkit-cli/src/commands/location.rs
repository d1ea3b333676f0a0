//! Trip location commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use tripkit_http::LocationOutcome;

use crate::cli::ApiArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LocationCommand {
    #[command(subcommand)]
    pub command: LocationSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LocationSubcommand {
    /// List places saved to a trip
    List {
        #[arg(long)]
        session_id: String,
    },

    /// Save a place to a trip
    Add {
        #[arg(long)]
        session_id: String,

        #[arg(long)]
        place_id: String,
    },

    /// Remove a saved place
    Remove {
        #[arg(long)]
        location_id: String,
    },
}

pub async fn handle(cmd: LocationCommand, api: &ApiArgs) -> Result<()> {
    let client = session::connect_signed_in(api).await?;

    match cmd.command {
        LocationSubcommand::List { session_id } => {
            let places = client
                .locations(&session_id)
                .await
                .context("Failed to list trip locations")?;
            output::json_pretty(&places)
        }
        LocationSubcommand::Add {
            session_id,
            place_id,
        } => {
            let outcome = client
                .create_location(&session_id, &place_id)
                .await
                .context("Failed to add location")?;

            match outcome {
                LocationOutcome::Created(location) => {
                    output::success("Location added");
                    output::json_pretty(&location)
                }
                LocationOutcome::Duplicate => {
                    output::notice("This place is already saved to the trip.");
                    Ok(())
                }
            }
        }
        LocationSubcommand::Remove { location_id } => {
            client
                .delete_location(&location_id)
                .await
                .context("Failed to remove location")?;
            output::success(&format!("Removed location {location_id}"));
            Ok(())
        }
    }
}

//! Place search commands.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use crate::cli::ApiArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct LocateCommand {
    #[command(subcommand)]
    pub command: LocateSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum LocateSubcommand {
    /// Suggest places for a partial query
    AutoComplete {
        /// Text typed so far
        input: String,
    },

    /// Show a place's details
    Location {
        #[arg(long)]
        place_id: String,
    },

    /// Route between two places
    Direction {
        #[arg(long)]
        origin: String,

        #[arg(long)]
        destination: String,
    },

    /// Places at a coordinate
    Pin {
        #[arg(long, allow_hyphen_values = true)]
        latitude: f64,

        #[arg(long, allow_hyphen_values = true)]
        longitude: f64,
    },

    /// Download a place photo
    Photo(PhotoArgs),

    /// Countries available for trips
    Countries,
}

#[derive(Args, Debug)]
pub struct PhotoArgs {
    /// Photo reference from a place result
    #[arg(long)]
    pub reference: String,

    /// Maximum width in pixels
    #[arg(long, default_value_t = 400)]
    pub max_width: u32,

    /// File to write the image to
    #[arg(short, long)]
    pub output: PathBuf,
}

pub async fn handle(cmd: LocateCommand, api: &ApiArgs) -> Result<()> {
    let client = session::connect_signed_in(api).await?;

    let result = match cmd.command {
        LocateSubcommand::AutoComplete { input } => client.locate_auto_complete(&input).await,
        LocateSubcommand::Location { place_id } => client.locate_location(&place_id).await,
        LocateSubcommand::Direction {
            origin,
            destination,
        } => client.locate_direction(&origin, &destination).await,
        LocateSubcommand::Pin {
            latitude,
            longitude,
        } => client.locate_pin(latitude, longitude).await,
        LocateSubcommand::Countries => client.locate_countries().await,
        LocateSubcommand::Photo(args) => {
            let image = client
                .locate_place_photo(&args.reference, args.max_width)
                .await
                .context("Failed to fetch photo")?;
            tokio::fs::write(&args.output, &image)
                .await
                .with_context(|| format!("Failed to write {}", args.output.display()))?;

            output::success(&format!(
                "Wrote {} bytes to {}",
                image.len(),
                args.output.display()
            ));
            return Ok(());
        }
    };

    let places = result.context("Place lookup failed")?;
    output::json_pretty(&places)
}

//! Schedule item commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use tripkit_http::{NewSchedule, ScheduleUpdate};

use super::timestamp_millis;
use crate::cli::ApiArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct ScheduleCommand {
    #[command(subcommand)]
    pub command: ScheduleSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum ScheduleSubcommand {
    /// List the schedule of one trip day
    List {
        #[arg(long)]
        session_id: String,

        /// Day number within the trip
        #[arg(long)]
        day: i64,
    },

    /// Add a schedule item
    Create(CreateArgs),

    /// Replace a schedule item
    Update(UpdateArgs),

    /// Delete a schedule item
    Delete {
        #[arg(long)]
        schedule_id: String,
    },
}

/// Fields shared by create and update.
#[derive(Args, Debug)]
pub struct ItemArgs {
    #[arg(long)]
    pub place_id: String,

    #[arg(long)]
    pub name: String,

    /// Start time (RFC 3339, or YYYY-MM-DD for midnight UTC)
    #[arg(long)]
    pub start_at: String,

    #[arg(long)]
    pub memo: Option<String>,
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    #[arg(long)]
    pub session_id: String,

    #[command(flatten)]
    pub item: ItemArgs,
}

#[derive(Args, Debug)]
pub struct UpdateArgs {
    #[arg(long)]
    pub schedule_id: String,

    #[command(flatten)]
    pub item: ItemArgs,
}

pub async fn handle(cmd: ScheduleCommand, api: &ApiArgs) -> Result<()> {
    let client = session::connect_signed_in(api).await?;

    match cmd.command {
        ScheduleSubcommand::List { session_id, day } => {
            let items = client
                .schedules(&session_id, day)
                .await
                .context("Failed to list schedule")?;
            output::json_pretty(&items)
        }
        ScheduleSubcommand::Create(args) => {
            let schedule = NewSchedule {
                session_id: args.session_id,
                start_at: timestamp_millis(&args.item.start_at)?,
                place_id: args.item.place_id,
                name: args.item.name,
                memo: args.item.memo,
            };

            let created = client
                .create_schedule(&schedule)
                .await
                .context("Failed to create schedule item")?;
            output::success("Schedule item created");
            output::json_pretty(&created)
        }
        ScheduleSubcommand::Update(args) => {
            let update = ScheduleUpdate {
                schedule_id: args.schedule_id,
                start_at: timestamp_millis(&args.item.start_at)?,
                place_id: args.item.place_id,
                name: args.item.name,
                memo: args.item.memo,
            };

            client
                .update_schedule(&update)
                .await
                .context("Failed to update schedule item")?;
            output::success(&format!("Updated schedule item {}", update.schedule_id));
            Ok(())
        }
        ScheduleSubcommand::Delete { schedule_id } => {
            client
                .delete_schedule(&schedule_id)
                .await
                .context("Failed to delete schedule item")?;
            output::success(&format!("Deleted schedule item {schedule_id}"));
            Ok(())
        }
    }
}

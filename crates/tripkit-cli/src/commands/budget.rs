//! Budget commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};

use tripkit_http::NewBudget;

use crate::cli::ApiArgs;
use crate::output;
use crate::session;

#[derive(Args, Debug)]
pub struct BudgetCommand {
    #[command(subcommand)]
    pub command: BudgetSubcommand,
}

#[derive(Subcommand, Debug)]
pub enum BudgetSubcommand {
    /// List budget entries
    List,

    /// Record a budget entry
    Create(CreateArgs),
}

#[derive(Args, Debug)]
pub struct CreateArgs {
    /// Trip session the entry belongs to
    #[arg(long)]
    pub session_id: String,

    #[arg(long)]
    pub title: String,

    #[arg(long)]
    pub amount: f64,

    /// ISO 4217 currency code
    #[arg(long)]
    pub currency: String,
}

pub async fn handle(cmd: BudgetCommand, api: &ApiArgs) -> Result<()> {
    let client = session::connect_signed_in(api).await?;

    match cmd.command {
        BudgetSubcommand::List => {
            let entries = client.budgets().await.context("Failed to list budget")?;
            output::json_pretty(&entries)
        }
        BudgetSubcommand::Create(args) => {
            let budget = NewBudget {
                sessiontoken: args.session_id,
                title: args.title,
                amount: args.amount,
                currency: args.currency.to_uppercase(),
            };

            let created = client
                .create_budget(&budget)
                .await
                .context("Failed to create budget entry")?;
            output::success("Budget entry created");
            output::json_pretty(&created)
        }
    }
}

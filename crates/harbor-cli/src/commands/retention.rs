//! Retention commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use harbor_client::HarborClient;

use super::print_json;

/// Arguments for the retention command.
#[derive(Args)]
pub struct RetentionArgs {
    #[command(subcommand)]
    pub action: RetentionAction,
}

/// Retention subcommands.
#[derive(Subcommand)]
pub enum RetentionAction {
    /// Show the retention policy of a project
    Get {
        /// Project name or ID
        project: String,
    },
}

/// Runs the retention command.
pub async fn run(client: &HarborClient, args: RetentionArgs) -> Result<()> {
    match args.action {
        RetentionAction::Get { project } => {
            let policy = client
                .retention()
                .get_retention_policy_by_project(&project)
                .await
                .with_context(|| format!("Failed to get retention policy of {project}"))?;
            print_json(&policy)
        }
    }
}

//! Quota commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use harbor_client::api::ProjectApi;
use harbor_client::HarborClient;

use super::print_json;

/// Arguments for the quota command.
#[derive(Args)]
pub struct QuotaArgs {
    #[command(subcommand)]
    pub action: QuotaAction,
}

/// Quota subcommands.
#[derive(Subcommand)]
pub enum QuotaAction {
    /// Show the quota of a project
    Get {
        /// Project name or ID
        project: String,
    },
}

/// Runs the quota command.
pub async fn run(client: &HarborClient, args: QuotaArgs) -> Result<()> {
    match args.action {
        QuotaAction::Get { project } => {
            let stored = client
                .get_project(&project)
                .await
                .with_context(|| format!("Failed to get project {project}"))?;
            let quota = client
                .quotas()
                .get_quota_by_project_id(stored.project_id)
                .await
                .with_context(|| format!("Failed to get quota of {project}"))?;
            print_json(&quota)
        }
    }
}

//! Project metadata commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use harbor_client::api::MetadataApi;
use harbor_client::{HarborClient, MetadataError};
use harbor_core::MetadataKey;
use tracing::info;

use super::print_json;

/// Arguments for the metadata command.
#[derive(Args)]
pub struct MetadataArgs {
    #[command(subcommand)]
    pub action: MetadataAction,
}

/// Metadata subcommands.
#[derive(Subcommand)]
pub enum MetadataAction {
    /// Show one key, or every key of the project
    Get {
        /// Project name or ID
        project: String,

        /// Metadata key, e.g. auto_scan
        key: Option<MetadataKey>,
    },

    /// Set a key, replacing any existing value
    Set {
        /// Project name or ID
        project: String,

        /// Metadata key, e.g. auto_scan
        key: MetadataKey,

        /// New value
        value: String,
    },
}

/// Runs the metadata command.
pub async fn run(client: &HarborClient, args: MetadataArgs) -> Result<()> {
    match args.action {
        MetadataAction::Get { project, key: None } => {
            let metadata = client
                .list_metadata(&project)
                .await
                .with_context(|| format!("Failed to list metadata of {project}"))?;
            print_json(&metadata)
        }
        MetadataAction::Get {
            project,
            key: Some(key),
        } => {
            let value = client
                .get_metadata_value(&project, key)
                .await
                .with_context(|| format!("Failed to get {key} of {project}"))?;
            print_json(&value)
        }
        MetadataAction::Set {
            project,
            key,
            value,
        } => {
            // Harbor has no upsert; update only keys that already exist.
            let result = match client.get_metadata_value(&project, key).await {
                Ok(_) => client.update_metadata(&project, key, &value).await,
                Err(MetadataError::Undefined { .. }) => {
                    client.add_metadata(&project, key, &value).await
                }
                Err(err) => Err(err),
            };
            result.with_context(|| format!("Failed to set {key} of {project}"))?;
            info!(project = %project, %key, value = %value, "Set metadata");
            Ok(())
        }
    }
}

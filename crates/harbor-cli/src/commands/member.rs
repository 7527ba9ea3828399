//! Project member commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use harbor_client::api::{MemberApi, ProjectApi};
use harbor_client::HarborClient;
use harbor_core::{EntityType, MemberRef};
use tracing::info;

use super::print_json;

/// Arguments for the member command.
#[derive(Args)]
pub struct MemberArgs {
    #[command(subcommand)]
    pub action: MemberAction,
}

/// Member subcommands.
#[derive(Subcommand)]
pub enum MemberAction {
    /// List the members of a project
    List {
        /// Project name or ID
        project: String,

        /// Only list members whose name contains this
        #[arg(long)]
        name: Option<String>,
    },

    /// Add a user or group to a project
    Add {
        /// Project name or ID
        project: String,

        /// User or group name
        name: String,

        /// Role ID: 1 admin, 2 developer, 3 guest, 4 maintainer, 5 limited guest
        #[arg(long, default_value = "2")]
        role: i64,

        /// Entity type: u (user) or g (group)
        #[arg(long = "type", default_value = "u")]
        entity_type: EntityType,
    },

    /// Remove a user or group from a project
    Remove {
        /// Project name or ID
        project: String,

        /// User or group name
        name: String,

        /// Entity type: u (user) or g (group)
        #[arg(long = "type", default_value = "u")]
        entity_type: EntityType,
    },
}

/// Runs the member command.
pub async fn run(client: &HarborClient, args: MemberArgs) -> Result<()> {
    match args.action {
        MemberAction::List { project, name } => {
            let members = client
                .list_project_members(&project, name.as_deref())
                .await
                .with_context(|| format!("Failed to list members of {project}"))?;
            print_json(&members)
        }
        MemberAction::Add {
            project,
            name,
            role,
            entity_type,
        } => {
            let stored = client
                .get_project(&project)
                .await
                .with_context(|| format!("Failed to get project {project}"))?;
            let member = member_ref(entity_type, name);
            client
                .add_project_member(&stored, &member, role)
                .await
                .with_context(|| format!("Failed to add {} to {project}", member.name))?;
            info!(project = %stored.name, member = %member.name, role, "Added member");
            Ok(())
        }
        MemberAction::Remove {
            project,
            name,
            entity_type,
        } => {
            let stored = client
                .get_project(&project)
                .await
                .with_context(|| format!("Failed to get project {project}"))?;
            let member = member_ref(entity_type, name);
            client
                .delete_project_member(&stored, &member)
                .await
                .with_context(|| format!("Failed to remove {} from {project}", member.name))?;
            info!(project = %stored.name, member = %member.name, "Removed member");
            Ok(())
        }
    }
}

fn member_ref(entity_type: EntityType, name: String) -> MemberRef {
    match entity_type {
        EntityType::User => MemberRef::user(name),
        EntityType::Group => MemberRef::group(name),
    }
}

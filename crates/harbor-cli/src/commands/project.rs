//! Project commands.

use anyhow::{Context, Result};
use clap::{Args, Subcommand};
use harbor_client::api::ProjectApi;
use harbor_client::HarborClient;
use harbor_core::ProjectReq;
use tracing::info;

use super::print_json;

/// Arguments for the project command.
#[derive(Args)]
pub struct ProjectArgs {
    #[command(subcommand)]
    pub action: ProjectAction,
}

/// Project subcommands.
#[derive(Subcommand)]
pub enum ProjectAction {
    /// List projects
    List {
        /// Only list projects whose name contains this
        #[arg(long)]
        name: Option<String>,
    },

    /// Show a project
    Get {
        /// Project name or ID
        project: String,
    },

    /// Create a project
    Create {
        /// Project name
        name: String,

        /// Make the project public
        #[arg(long)]
        public: bool,

        /// Storage limit in bytes, -1 for unlimited
        #[arg(long)]
        storage_limit: Option<i64>,
    },

    /// Delete a project
    Delete {
        /// Project name or ID
        project: String,
    },
}

/// Runs the project command.
pub async fn run(client: &HarborClient, args: ProjectArgs) -> Result<()> {
    match args.action {
        ProjectAction::List { name } => {
            let projects = client
                .list_projects(name.as_deref())
                .await
                .context("Failed to list projects")?;
            print_json(&projects)
        }
        ProjectAction::Get { project } => {
            let project = client
                .get_project(&project)
                .await
                .with_context(|| format!("Failed to get project {project}"))?;
            print_json(&project)
        }
        ProjectAction::Create {
            name,
            public,
            storage_limit,
        } => {
            let mut req = ProjectReq::new(&name).public(public);
            if let Some(limit) = storage_limit {
                req = req.storage_limit(limit);
            }
            let project = client
                .new_project(&req)
                .await
                .with_context(|| format!("Failed to create project {name}"))?;
            info!(project = %project.name, id = project.project_id, "Created project");
            print_json(&project)
        }
        ProjectAction::Delete { project } => {
            let stored = client
                .get_project(&project)
                .await
                .with_context(|| format!("Failed to get project {project}"))?;
            client
                .delete_project(&stored)
                .await
                .with_context(|| format!("Failed to delete project {project}"))?;
            info!(project = %stored.name, "Deleted project");
            Ok(())
        }
    }
}

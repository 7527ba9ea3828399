//! Repositories inside a project.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A repository, named `<project>/<repository>`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Repository {
    /// Repository ID.
    #[serde(default)]
    pub id: i64,

    /// Owning project.
    #[serde(default)]
    pub project_id: i64,

    /// Full name including the project prefix.
    #[serde(default)]
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Number of artifacts.
    #[serde(default)]
    pub artifact_count: i64,

    /// Number of pulls.
    #[serde(default)]
    pub pull_count: i64,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

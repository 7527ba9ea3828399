//! Project-level (v1) robot accounts.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A robot account as listed for a project.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Robot {
    /// Robot ID.
    #[serde(default)]
    pub id: i64,

    /// Full robot name, e.g. `robot$example-project+ci`.
    #[serde(default)]
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Owning project.
    #[serde(default)]
    pub project_id: i64,

    /// Expiry as a Unix timestamp, `-1` for never.
    #[serde(default)]
    pub expires_at: i64,

    /// Whether the account is disabled.
    #[serde(default)]
    pub disable: bool,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

/// Request body for creating a project robot account.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotCreateV1 {
    /// Short robot name; Harbor adds the prefix and project.
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Expiry as a Unix timestamp, `-1` for never.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<i64>,

    /// Granted permissions.
    #[serde(default)]
    pub access: Vec<RobotAccess>,
}

/// A single permission of a robot account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotAccess {
    /// Resource path, e.g. `/project/5/repository`.
    pub resource: String,

    /// Action, e.g. `push` or `pull`.
    pub action: String,
}

impl RobotAccess {
    /// Grants `action` on the repositories of a project.
    #[must_use]
    pub fn repository(project_id: i64, action: impl Into<String>) -> Self {
        Self {
            resource: format!("/project/{project_id}/repository"),
            action: action.into(),
        }
    }
}

/// Response to a robot account creation, carrying its one-time secret.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RobotCreated {
    /// Robot ID.
    #[serde(default)]
    pub id: i64,

    /// Full robot name.
    #[serde(default)]
    pub name: String,

    /// Secret, only returned on creation.
    #[serde(default, alias = "token")]
    pub secret: String,

    /// Expiry as a Unix timestamp.
    #[serde(default)]
    pub expires_at: i64,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,
}

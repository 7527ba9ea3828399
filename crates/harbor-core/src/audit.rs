//! Audit log entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One recorded operation on a Harbor resource.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLog {
    /// Entry ID.
    #[serde(default)]
    pub id: i64,

    /// User who performed the operation.
    #[serde(default)]
    pub username: String,

    /// Affected resource, e.g. `example-project/nginx:1.25`.
    #[serde(default)]
    pub resource: String,

    /// Resource type, e.g. `artifact`.
    #[serde(default)]
    pub resource_type: String,

    /// Operation, e.g. `create` or `pull`.
    #[serde(default)]
    pub operation: String,

    /// When the operation happened.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub op_time: Option<DateTime<Utc>>,
}

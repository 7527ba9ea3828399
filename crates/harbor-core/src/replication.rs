//! Replication policies and executions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::registry::Registry;

/// A replication policy between Harbor and a remote registry.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplicationPolicy {
    /// Server-assigned policy ID.
    #[serde(default)]
    pub id: i64,

    /// Policy name.
    #[serde(default)]
    pub name: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Source registry, absent for push-based policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub src_registry: Option<Registry>,

    /// Destination registry, absent for pull-based policies.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_registry: Option<Registry>,

    /// Destination namespace.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_namespace: Option<String>,

    /// How many leading path components of the source are replaced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_namespace_replace_count: Option<i64>,

    /// What starts an execution.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<ReplicationTrigger>,

    /// Resource filters.
    #[serde(default)]
    pub filters: Vec<ReplicationFilter>,

    /// Whether deletions are replicated.
    #[serde(default)]
    pub replicate_deletion: bool,

    /// Whether existing resources at the destination are overwritten.
    #[serde(rename = "override", default)]
    pub overwrite: bool,

    /// Whether the policy is enabled.
    #[serde(default)]
    pub enabled: bool,

    /// Bandwidth limit in KB/s, `-1` for unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub speed: Option<i64>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

/// Trigger of a [`ReplicationPolicy`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationTrigger {
    /// `manual`, `scheduled` or `event_based`.
    #[serde(rename = "type")]
    pub kind: TriggerType,

    /// Cron settings for scheduled triggers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger_settings: Option<TriggerSettings>,
}

/// Kind of replication trigger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TriggerType {
    /// Started by an explicit execution request.
    Manual,
    /// Started on a cron schedule.
    Scheduled,
    /// Started by push and delete events.
    EventBased,
}

/// Cron settings of a scheduled trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TriggerSettings {
    /// Six-field cron expression.
    #[serde(default)]
    pub cron: String,
}

/// A resource filter of a [`ReplicationPolicy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReplicationFilter {
    /// Filter type: `name`, `tag`, `label` or `resource`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Filter value; a string for most types, a list for labels.
    pub value: serde_json::Value,

    /// `matches` or `excludes`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub decoration: Option<String>,
}

/// One run of a replication policy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplicationExecution {
    /// Execution ID.
    #[serde(default)]
    pub id: i64,

    /// Policy that was executed.
    #[serde(default)]
    pub policy_id: i64,

    /// Overall status.
    #[serde(default)]
    pub status: String,

    /// Additional status detail.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_text: Option<String>,

    /// How the execution was triggered.
    #[serde(default)]
    pub trigger: String,

    /// Task counters.
    #[serde(default)]
    pub total: i64,
    /// Failed tasks.
    #[serde(default)]
    pub failed: i64,
    /// Succeeded tasks.
    #[serde(default)]
    pub succeed: i64,
    /// Running tasks.
    #[serde(default)]
    pub in_progress: i64,
    /// Stopped tasks.
    #[serde(default)]
    pub stopped: i64,

    /// Start timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<DateTime<Utc>>,

    /// End timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<DateTime<Utc>>,
}

/// Request body for starting an execution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StartReplicationExecution {
    /// Policy to execute.
    pub policy_id: i64,
}

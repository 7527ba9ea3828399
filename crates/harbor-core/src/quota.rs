//! Storage quotas.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Resource name to amount, e.g. `"storage" -> 1073741824`.
pub type ResourceList = BTreeMap<String, i64>;

/// A quota attached to a reference object, usually a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Quota {
    /// Quota ID.
    pub id: i64,

    /// The object the quota is attached to.
    ///
    /// Left untyped because its shape depends on the reference kind; for
    /// projects it is an object carrying `id`, `name` and `owner_name`.
    #[serde(rename = "ref", default)]
    pub reference: serde_json::Value,

    /// Hard limits.
    #[serde(default)]
    pub hard: ResourceList,

    /// Current usage.
    #[serde(default)]
    pub used: ResourceList,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

/// Request body for changing a quota's hard limits.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuotaUpdateReq {
    /// New hard limits.
    pub hard: ResourceList,
}

impl QuotaUpdateReq {
    /// Creates a request setting only the storage limit.
    #[must_use]
    pub fn storage(limit: i64) -> Self {
        let mut hard = ResourceList::new();
        hard.insert("storage".to_string(), limit);
        Self { hard }
    }
}

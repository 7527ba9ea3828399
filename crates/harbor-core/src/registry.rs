//! External registry endpoints.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A remote registry Harbor can replicate with or proxy.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registry {
    /// Server-assigned registry ID.
    #[serde(default)]
    pub id: i64,

    /// Registry name, expected to be unique.
    #[serde(default)]
    pub name: String,

    /// Adapter type, e.g. `harbor`, `docker-hub`, `docker-registry`.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Registry URL.
    #[serde(default)]
    pub url: String,

    /// Description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Whether certificate verification is skipped.
    #[serde(default)]
    pub insecure: bool,

    /// Credential used to access the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential: Option<RegistryCredential>,

    /// Health status as last observed by Harbor.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

/// Credential of a [`Registry`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryCredential {
    /// Credential type, usually `basic`.
    #[serde(rename = "type", default)]
    pub kind: String,

    /// Access key or user name.
    #[serde(default)]
    pub access_key: String,

    /// Access secret or password.
    #[serde(default)]
    pub access_secret: String,
}

/// Request body for checking that a registry is reachable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryPing {
    /// ID of a stored registry to ping.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,

    /// Adapter type of an unsaved registry.
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,

    /// URL of an unsaved registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Credential type.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credential_type: Option<String>,

    /// Access key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_key: Option<String>,

    /// Access secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub access_secret: Option<String>,

    /// Skip certificate verification.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insecure: Option<bool>,
}

impl RegistryPing {
    /// Pings a stored registry by ID.
    #[must_use]
    pub fn stored(id: i64) -> Self {
        Self {
            id: Some(id),
            ..Self::default()
        }
    }
}

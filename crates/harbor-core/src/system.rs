//! System-wide information, configuration, statistics and health.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// General information about a Harbor instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneralInfo {
    /// Harbor version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub harbor_version: Option<String>,

    /// External URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,

    /// Authentication mode, e.g. `db_auth` or `oidc_auth`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_mode: Option<String>,

    /// Who may create projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project_creation_restriction: Option<String>,

    /// Whether self-registration is allowed.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub self_registration: Option<bool>,

    /// Whether a root CA is available for download.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub has_ca_root: Option<bool>,

    /// Whether the instance is in read-only mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub read_only: Option<bool>,

    /// Storage backend of the registry.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_storage_provider_name: Option<String>,

    /// Whether webhooks are enabled.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notification_enable: Option<bool>,
}

/// A flat configuration update, key to value.
pub type Configurations = BTreeMap<String, serde_json::Value>;

/// Configuration as reported by the server, key to item.
pub type ConfigurationsResponse = BTreeMap<String, ConfigItem>;

/// One configuration value as reported by the server.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigItem {
    /// Current value.
    #[serde(default)]
    pub value: serde_json::Value,

    /// Whether the value may be changed through the API.
    #[serde(default)]
    pub editable: bool,
}

/// Project and repository counters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Statistic {
    /// Private projects.
    #[serde(default)]
    pub private_project_count: i64,
    /// Private repositories.
    #[serde(default)]
    pub private_repo_count: i64,
    /// Public projects.
    #[serde(default)]
    pub public_project_count: i64,
    /// Public repositories.
    #[serde(default)]
    pub public_repo_count: i64,
    /// All projects.
    #[serde(default)]
    pub total_project_count: i64,
    /// All repositories.
    #[serde(default)]
    pub total_repo_count: i64,
    /// Storage consumption in bytes.
    #[serde(default)]
    pub total_storage_consumption: i64,
}

/// Overall health of a Harbor instance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OverallHealthStatus {
    /// `healthy` or `unhealthy`.
    #[serde(default)]
    pub status: String,

    /// Per-component status.
    #[serde(default)]
    pub components: Vec<ComponentHealthStatus>,
}

impl OverallHealthStatus {
    /// Returns true if the instance reports itself healthy.
    #[must_use]
    pub fn is_healthy(&self) -> bool {
        self.status == "healthy"
    }

    /// Returns the components that are not healthy.
    #[must_use]
    pub fn unhealthy_components(&self) -> Vec<&ComponentHealthStatus> {
        self.components
            .iter()
            .filter(|c| c.status != "healthy")
            .collect()
    }
}

/// Health of one Harbor component.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ComponentHealthStatus {
    /// Component name, e.g. `core` or `database`.
    #[serde(default)]
    pub name: String,

    /// `healthy` or `unhealthy`.
    #[serde(default)]
    pub status: String,

    /// Error detail for unhealthy components.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Request body for testing an OIDC endpoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OidcPing {
    /// OIDC provider URL.
    pub url: String,

    /// Whether the provider certificate is verified.
    #[serde(default)]
    pub verify_cert: bool,
}

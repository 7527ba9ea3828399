//! Projects, project members and project metadata.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;
use crate::quota::ResourceList;
use crate::registry::Registry;

/// A Harbor project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Project {
    /// Server-assigned project ID.
    #[serde(default)]
    pub project_id: i64,

    /// Unique project name.
    #[serde(default)]
    pub name: String,

    /// Owner user ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<i64>,

    /// Owner user name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub owner_name: Option<String>,

    /// ID of the upstream registry for proxy-cache projects.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<i64>,

    /// Number of repositories in the project.
    #[serde(default)]
    pub repo_count: i64,

    /// Whether the project has been deleted.
    #[serde(default)]
    pub deleted: bool,

    /// Project settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProjectMetadata>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

/// Request body for creating or updating a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectReq {
    /// Project name.
    pub project_name: String,

    /// Deprecated top-level public flag, still honoured by the server.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<bool>,

    /// Project settings.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<ProjectMetadata>,

    /// Storage limit in bytes, `-1` for unlimited.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub storage_limit: Option<i64>,

    /// Upstream registry ID, turns the project into a proxy cache.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry_id: Option<i64>,
}

impl ProjectReq {
    /// Creates a request for a project with the given name.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            project_name: name.into(),
            ..Self::default()
        }
    }

    /// Sets the public flag.
    #[must_use]
    pub fn public(mut self, public: bool) -> Self {
        self.public = Some(public);
        self
    }

    /// Sets the storage limit in bytes.
    #[must_use]
    pub const fn storage_limit(mut self, limit: i64) -> Self {
        self.storage_limit = Some(limit);
        self
    }

    /// Sets the upstream registry for a proxy-cache project.
    #[must_use]
    pub const fn registry_id(mut self, registry_id: i64) -> Self {
        self.registry_id = Some(registry_id);
        self
    }

    /// Sets the project settings.
    #[must_use]
    pub fn metadata(mut self, metadata: ProjectMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Project settings as returned inside a [`Project`].
///
/// Harbor transmits every value as a string, including booleans.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMetadata {
    /// `"true"` if the project is public.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub public: Option<String>,

    /// `"true"` if content trust is enforced.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enable_content_trust: Option<String>,

    /// `"true"` if vulnerable images are blocked from pulls.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prevent_vul: Option<String>,

    /// Severity threshold for `prevent_vul`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub severity: Option<String>,

    /// `"true"` if images are scanned on push.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auto_scan: Option<String>,

    /// `"true"` if the system CVE allowlist is reused.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reuse_sys_cve_allowlist: Option<String>,

    /// ID of the retention policy bound to the project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub retention_id: Option<String>,
}

/// Keys accepted by the project metadata endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MetadataKey {
    /// Content trust enforcement.
    EnableContentTrust,
    /// Scan images on push.
    AutoScan,
    /// Severity threshold for blocking pulls.
    Severity,
    /// Reuse the system CVE allowlist.
    ReuseSysCveAllowlist,
    /// Public project.
    Public,
    /// Block pulls of vulnerable images.
    PreventVul,
    /// Bound retention policy ID.
    RetentionId,
}

impl MetadataKey {
    /// All supported keys.
    pub const ALL: [Self; 7] = [
        Self::EnableContentTrust,
        Self::AutoScan,
        Self::Severity,
        Self::ReuseSysCveAllowlist,
        Self::Public,
        Self::PreventVul,
        Self::RetentionId,
    ];

    /// Returns the wire name of the key.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::EnableContentTrust => "enable_content_trust",
            Self::AutoScan => "auto_scan",
            Self::Severity => "severity",
            Self::ReuseSysCveAllowlist => "reuse_sys_cve_allowlist",
            Self::Public => "public",
            Self::PreventVul => "prevent_vul",
            Self::RetentionId => "retention_id",
        }
    }
}

impl fmt::Display for MetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for MetadataKey {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| Error::UnknownMetadataKey { key: s.to_string() })
    }
}

/// Kind of entity a project membership refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EntityType {
    /// A user (`"u"` on the wire).
    #[serde(rename = "u")]
    User,
    /// A user group (`"g"` on the wire).
    #[serde(rename = "g")]
    Group,
}

impl EntityType {
    /// Returns the wire representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::User => "u",
            Self::Group => "g",
        }
    }
}

impl fmt::Display for EntityType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "u" | "user" => Ok(Self::User),
            "g" | "group" => Ok(Self::Group),
            other => Err(Error::UnknownEntityType {
                value: other.to_string(),
            }),
        }
    }
}

/// A membership as listed by the project members endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMemberEntity {
    /// Member ID, the handle required for update and delete.
    pub id: i64,

    /// Project the membership belongs to.
    #[serde(default)]
    pub project_id: i64,

    /// User name or group name.
    pub entity_name: String,

    /// User ID or group ID.
    #[serde(default)]
    pub entity_id: i64,

    /// Whether the entity is a user or a group.
    pub entity_type: EntityType,

    /// Granted role ID.
    #[serde(default)]
    pub role_id: i64,

    /// Granted role name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role_name: Option<String>,
}

/// Identifies a member of a project by entity type and name.
///
/// Harbor exposes no lookup of a membership by name, so this is resolved to
/// a member ID by listing the project members.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct MemberRef {
    /// Whether the member is a user or a group.
    pub entity_type: EntityType,
    /// User name or group name.
    pub name: String,
}

impl MemberRef {
    /// References a user by name.
    #[must_use]
    pub fn user(name: impl Into<String>) -> Self {
        Self {
            entity_type: EntityType::User,
            name: name.into(),
        }
    }

    /// References a group by name.
    #[must_use]
    pub fn group(name: impl Into<String>) -> Self {
        Self {
            entity_type: EntityType::Group,
            name: name.into(),
        }
    }

    /// Returns true if the listed membership refers to this member.
    #[must_use]
    pub fn matches(&self, entity: &ProjectMemberEntity) -> bool {
        entity.entity_type == self.entity_type && entity.entity_name == self.name
    }

    /// Builds the request body that grants this member a role.
    #[must_use]
    pub fn to_request(&self, role_id: i64) -> ProjectMember {
        match self.entity_type {
            EntityType::User => ProjectMember {
                role_id,
                member_user: Some(UserEntity {
                    user_id: None,
                    username: self.name.clone(),
                }),
                member_group: None,
            },
            EntityType::Group => ProjectMember {
                role_id,
                member_user: None,
                member_group: Some(UserGroup {
                    id: None,
                    group_name: self.name.clone(),
                    group_type: None,
                    ldap_group_dn: None,
                }),
            },
        }
    }
}

/// Request body for adding a member to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectMember {
    /// Role to grant.
    pub role_id: i64,

    /// User to add.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_user: Option<UserEntity>,

    /// Group to add.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_group: Option<UserGroup>,
}

/// A user reference inside a [`ProjectMember`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserEntity {
    /// User ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    /// User name.
    pub username: String,
}

/// A group reference inside a [`ProjectMember`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserGroup {
    /// Group ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    /// Group name.
    pub group_name: String,
    /// Group type (1 LDAP, 2 HTTP, 3 OIDC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub group_type: Option<i64>,
    /// LDAP distinguished name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ldap_group_dn: Option<String>,
}

/// Request body for changing a member's role.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRequest {
    /// New role ID.
    pub role_id: i64,
}

/// Aggregated counters of a project.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectSummary {
    /// Number of repositories.
    #[serde(default)]
    pub repo_count: i64,
    /// Number of project admins.
    #[serde(default)]
    pub project_admin_count: i64,
    /// Number of maintainers.
    #[serde(default)]
    pub maintainer_count: i64,
    /// Number of developers.
    #[serde(default)]
    pub developer_count: i64,
    /// Number of guests.
    #[serde(default)]
    pub guest_count: i64,
    /// Number of limited guests.
    #[serde(default)]
    pub limited_guest_count: i64,
    /// Quota consumption.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quota: Option<ProjectSummaryQuota>,
    /// Upstream registry of a proxy-cache project.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub registry: Option<Registry>,
}

/// Quota section of a [`ProjectSummary`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectSummaryQuota {
    /// Hard limits.
    #[serde(default)]
    pub hard: ResourceList,
    /// Current usage.
    #[serde(default)]
    pub used: ResourceList,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metadata_key_round_trip_through_str() {
        for key in MetadataKey::ALL {
            assert_eq!(key.as_str().parse::<MetadataKey>(), Ok(key));
        }
    }

    #[test]
    fn test_metadata_key_rejects_unknown() {
        let err = "colour".parse::<MetadataKey>().unwrap_err();
        assert!(matches!(err, Error::UnknownMetadataKey { key } if key == "colour"));
    }

    #[test]
    fn test_entity_type_wire_format() {
        assert_eq!(serde_json::to_string(&EntityType::User).unwrap(), "\"u\"");
        assert_eq!(
            serde_json::from_str::<EntityType>("\"g\"").unwrap(),
            EntityType::Group
        );
    }

    #[test]
    fn test_member_ref_matches_type_and_name() {
        let entity = ProjectMemberEntity {
            id: 3,
            project_id: 1,
            entity_name: "foobar".to_string(),
            entity_id: 12,
            entity_type: EntityType::User,
            role_id: 1,
            role_name: None,
        };

        assert!(MemberRef::user("foobar").matches(&entity));
        assert!(!MemberRef::group("foobar").matches(&entity));
        assert!(!MemberRef::user("other").matches(&entity));
    }

    #[test]
    fn test_member_ref_to_request() {
        let req = MemberRef::group("developers").to_request(2);
        assert_eq!(req.role_id, 2);
        assert!(req.member_user.is_none());
        assert_eq!(req.member_group.unwrap().group_name, "developers");
    }

    #[test]
    fn test_project_req_skips_unset_fields() {
        let json = serde_json::to_value(ProjectReq::new("example-project")).unwrap();
        assert_eq!(json, serde_json::json!({ "project_name": "example-project" }));
    }

    #[test]
    fn test_project_deserializes_with_metadata() {
        let project: Project = serde_json::from_value(serde_json::json!({
            "project_id": 5,
            "name": "example-project",
            "metadata": { "auto_scan": "true", "retention_id": "7" }
        }))
        .unwrap();

        assert_eq!(project.project_id, 5);
        let metadata = project.metadata.unwrap();
        assert_eq!(metadata.auto_scan.as_deref(), Some("true"));
        assert_eq!(metadata.retention_id.as_deref(), Some("7"));
    }
}

//! Capability traits implemented by [`crate::HarborClient`].
//!
//! Code that only needs part of the API can take `&impl ProjectApi` (or a
//! `dyn` trait object) instead of the whole client, and be tested against a
//! stand-in implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use harbor_core::{
    Configurations, ConfigurationsResponse, GeneralInfo, MemberRef, MetadataKey, OidcPing,
    OverallHealthStatus, PasswordReq, Project, ProjectMemberEntity, ProjectReq, ProjectSummary,
    Registry, RegistryPing, ReplicationExecution, ReplicationPolicy, Statistic, User,
    UserCreationReq, UserProfile,
};

use crate::member::MemberError;
use crate::metadata::MetadataError;
use crate::project::ProjectError;
use crate::registry::RegistryError;
use crate::replication::ReplicationError;
use crate::system::SystemError;
use crate::user::UserError;

/// Project lifecycle.
#[async_trait]
pub trait ProjectApi: Send + Sync {
    /// Creates a project and returns it as stored.
    async fn new_project(&self, req: &ProjectReq) -> Result<Project, ProjectError>;

    /// Fetches a project by name or numeric ID.
    async fn get_project(&self, name_or_id: &str) -> Result<Project, ProjectError>;

    /// Lists every project, optionally filtered by name.
    async fn list_projects(&self, name: Option<&str>) -> Result<Vec<Project>, ProjectError>;

    /// Returns true if a project with this name exists.
    async fn project_exists(&self, name: &str) -> Result<bool, ProjectError>;

    /// Updates a project after checking it still matches the server.
    async fn update_project(
        &self,
        project: &Project,
        storage_limit: Option<i64>,
    ) -> Result<(), ProjectError>;

    /// Deletes a project after checking it still matches the server.
    async fn delete_project(&self, project: &Project) -> Result<(), ProjectError>;

    /// Fetches the summary of a project.
    async fn get_project_summary(&self, name_or_id: &str) -> Result<ProjectSummary, ProjectError>;
}

/// Project membership.
#[async_trait]
pub trait MemberApi: Send + Sync {
    /// Lists every member of a project.
    async fn list_project_members(
        &self,
        project: &str,
        entity_name: Option<&str>,
    ) -> Result<Vec<ProjectMemberEntity>, MemberError>;

    /// Adds a user or group to a project.
    async fn add_project_member(
        &self,
        project: &Project,
        member: &MemberRef,
        role_id: i64,
    ) -> Result<(), MemberError>;

    /// Changes the role of a member.
    async fn update_project_member_role(
        &self,
        project: &Project,
        member: &MemberRef,
        role_id: i64,
    ) -> Result<(), MemberError>;

    /// Removes a member from a project.
    async fn delete_project_member(
        &self,
        project: &Project,
        member: &MemberRef,
    ) -> Result<(), MemberError>;
}

/// Project metadata.
#[async_trait]
pub trait MetadataApi: Send + Sync {
    /// Adds a metadata key.
    async fn add_metadata(
        &self,
        project: &str,
        key: MetadataKey,
        value: &str,
    ) -> Result<(), MetadataError>;

    /// Fetches the value of a metadata key.
    async fn get_metadata_value(
        &self,
        project: &str,
        key: MetadataKey,
    ) -> Result<String, MetadataError>;

    /// Lists every metadata key of a project.
    async fn list_metadata(&self, project: &str)
        -> Result<BTreeMap<String, String>, MetadataError>;

    /// Replaces the value of a metadata key.
    async fn update_metadata(
        &self,
        project: &str,
        key: MetadataKey,
        value: &str,
    ) -> Result<(), MetadataError>;

    /// Deletes a metadata key.
    async fn delete_metadata(&self, project: &str, key: MetadataKey) -> Result<(), MetadataError>;
}

/// User accounts.
#[async_trait]
pub trait UserApi: Send + Sync {
    /// Creates a user and returns it as stored.
    async fn new_user(&self, req: &UserCreationReq) -> Result<User, UserError>;

    /// Fetches a user by ID.
    async fn get_user_by_id(&self, id: i64) -> Result<User, UserError>;

    /// Fetches a user by exact username.
    async fn get_user_by_name(&self, username: &str) -> Result<User, UserError>;

    /// Lists every user.
    async fn list_users(&self) -> Result<Vec<User>, UserError>;

    /// Returns true if a user with this username exists.
    async fn user_exists(&self, username: &str) -> Result<bool, UserError>;

    /// Updates the profile of a user.
    async fn update_user_profile(&self, id: i64, profile: &UserProfile) -> Result<(), UserError>;

    /// Changes the password of a user.
    async fn update_user_password(&self, id: i64, req: &PasswordReq) -> Result<(), UserError>;

    /// Grants or revokes system admin rights.
    async fn set_user_sysadmin(&self, id: i64, sysadmin: bool) -> Result<(), UserError>;

    /// Deletes a user after checking it still matches the server.
    async fn delete_user(&self, user: &User) -> Result<(), UserError>;
}

/// Registry endpoints.
#[async_trait]
pub trait RegistryApi: Send + Sync {
    /// Creates a registry endpoint and returns it as stored.
    async fn new_registry(&self, registry: &Registry) -> Result<Registry, RegistryError>;

    /// Fetches a registry by ID.
    async fn get_registry_by_id(&self, id: i64) -> Result<Registry, RegistryError>;

    /// Fetches the single registry with this name.
    async fn get_registry_by_name(&self, name: &str) -> Result<Registry, RegistryError>;

    /// Lists every registry.
    async fn list_registries(&self) -> Result<Vec<Registry>, RegistryError>;

    /// Updates a registry after checking it still matches the server.
    async fn update_registry(&self, registry: &Registry) -> Result<(), RegistryError>;

    /// Deletes a registry after checking it still matches the server.
    async fn delete_registry(&self, registry: &Registry) -> Result<(), RegistryError>;

    /// Checks that Harbor can reach a registry.
    async fn ping_registry(&self, ping: &RegistryPing) -> Result<(), RegistryError>;
}

/// Replication policies and executions.
#[async_trait]
pub trait ReplicationApi: Send + Sync {
    /// Creates a policy and returns it as stored.
    async fn new_replication_policy(
        &self,
        policy: &ReplicationPolicy,
    ) -> Result<ReplicationPolicy, ReplicationError>;

    /// Fetches a policy by ID.
    async fn get_replication_policy_by_id(
        &self,
        id: i64,
    ) -> Result<ReplicationPolicy, ReplicationError>;

    /// Fetches the single policy with this name.
    async fn get_replication_policy_by_name(
        &self,
        name: &str,
    ) -> Result<ReplicationPolicy, ReplicationError>;

    /// Lists every policy.
    async fn list_replication_policies(&self) -> Result<Vec<ReplicationPolicy>, ReplicationError>;

    /// Updates a policy after checking it still matches the server.
    async fn update_replication_policy(
        &self,
        policy: &ReplicationPolicy,
    ) -> Result<(), ReplicationError>;

    /// Deletes a policy after checking it still matches the server.
    async fn delete_replication_policy(
        &self,
        policy: &ReplicationPolicy,
    ) -> Result<(), ReplicationError>;

    /// Starts a run of a policy.
    async fn trigger_replication_execution(
        &self,
        policy_id: i64,
    ) -> Result<Option<i64>, ReplicationError>;

    /// Lists every run of a policy.
    async fn list_replication_executions(
        &self,
        policy_id: i64,
    ) -> Result<Vec<ReplicationExecution>, ReplicationError>;

    /// Fetches one run.
    async fn get_replication_execution(
        &self,
        id: i64,
    ) -> Result<ReplicationExecution, ReplicationError>;

    /// Stops a run.
    async fn stop_replication_execution(&self, id: i64) -> Result<(), ReplicationError>;
}

/// Instance-wide information and settings.
#[async_trait]
pub trait SystemApi: Send + Sync {
    /// Fetches general information about the instance.
    async fn get_system_info(&self) -> Result<GeneralInfo, SystemError>;

    /// Fetches the system configuration.
    async fn get_configurations(&self) -> Result<ConfigurationsResponse, SystemError>;

    /// Updates configuration keys.
    async fn update_configurations(&self, config: &Configurations) -> Result<(), SystemError>;

    /// Fetches project and repository counters.
    async fn get_statistic(&self) -> Result<Statistic, SystemError>;

    /// Fetches the health of the instance.
    async fn get_health(&self) -> Result<OverallHealthStatus, SystemError>;

    /// Pings the instance.
    async fn ping(&self) -> Result<String, SystemError>;

    /// Tests an OIDC provider.
    async fn ping_oidc(&self, endpoint: &OidcPing) -> Result<(), SystemError>;
}

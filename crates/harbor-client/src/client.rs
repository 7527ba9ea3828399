//! The aggregate client.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use harbor_core::{
    Configurations, ConfigurationsResponse, GeneralInfo, MemberRef, MetadataKey, OidcPing,
    OverallHealthStatus, PasswordReq, Project, ProjectMemberEntity, ProjectReq, ProjectSummary,
    Registry, RegistryPing, ReplicationExecution, ReplicationPolicy, Statistic, User,
    UserCreationReq, UserProfile,
};

use crate::api::{
    MemberApi, MetadataApi, ProjectApi, RegistryApi, ReplicationApi, SystemApi, UserApi,
};
use crate::auditlog::AuditLogClient;
use crate::config::ClientConfig;
use crate::context::ClientContext;
use crate::gc::GcClient;
use crate::immutable::ImmutableClient;
use crate::member::{MemberClient, MemberError};
use crate::metadata::{MetadataClient, MetadataError};
use crate::project::{ProjectClient, ProjectError};
use crate::purge::PurgeClient;
use crate::quota::QuotaClient;
use crate::registry::{RegistryClient, RegistryError};
use crate::replication::{ReplicationClient, ReplicationError};
use crate::repository::RepositoryClient;
use crate::retention::RetentionClient;
use crate::robot::RobotClient;
use crate::scanall::ScanAllClient;
use crate::system::{SystemClient, SystemError};
use crate::transport::{HttpTransport, Transport, TransportError};
use crate::user::{UserClient, UserError};

/// Client for every Harbor resource domain.
///
/// All domain clients share one transport and one set of
/// [`RequestOptions`](crate::RequestOptions). Cloning is cheap.
#[derive(Debug, Clone)]
pub struct HarborClient {
    ctx: ClientContext,
    projects: ProjectClient,
    members: MemberClient,
    metadata: MetadataClient,
    users: UserClient,
    registries: RegistryClient,
    replication: ReplicationClient,
    quotas: QuotaClient,
    retention: RetentionClient,
    immutable: ImmutableClient,
    robots: RobotClient,
    repositories: RepositoryClient,
    system: SystemClient,
    gc: GcClient,
    purge: PurgeClient,
    scan_all: ScanAllClient,
    audit_logs: AuditLogClient,
}

impl HarborClient {
    /// Creates a client talking HTTP to the configured instance.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL is invalid or the TLS material cannot
    /// be loaded.
    pub fn new(config: ClientConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(&config)?;
        tracing::debug!(url = %transport.base_url(), "Created Harbor client");
        Ok(Self::with_transport(Arc::new(transport), config))
    }

    /// Creates a client on top of any transport.
    #[must_use]
    pub fn with_transport(transport: Arc<dyn Transport>, config: ClientConfig) -> Self {
        let ctx = ClientContext::new(transport, config.auth, config.options);
        Self {
            projects: ProjectClient::new(ctx.clone()),
            members: MemberClient::new(ctx.clone()),
            metadata: MetadataClient::new(ctx.clone()),
            users: UserClient::new(ctx.clone()),
            registries: RegistryClient::new(ctx.clone()),
            replication: ReplicationClient::new(ctx.clone()),
            quotas: QuotaClient::new(ctx.clone()),
            retention: RetentionClient::new(ctx.clone()),
            immutable: ImmutableClient::new(ctx.clone()),
            robots: RobotClient::new(ctx.clone()),
            repositories: RepositoryClient::new(ctx.clone()),
            system: SystemClient::new(ctx.clone()),
            gc: GcClient::new(ctx.clone()),
            purge: PurgeClient::new(ctx.clone()),
            scan_all: ScanAllClient::new(ctx.clone()),
            audit_logs: AuditLogClient::new(ctx.clone()),
            ctx,
        }
    }

    /// Returns the shared request context.
    #[must_use]
    pub const fn context(&self) -> &ClientContext {
        &self.ctx
    }

    /// Returns the project client.
    #[must_use]
    pub const fn projects(&self) -> &ProjectClient {
        &self.projects
    }

    /// Returns the member client.
    #[must_use]
    pub const fn members(&self) -> &MemberClient {
        &self.members
    }

    /// Returns the project metadata client.
    #[must_use]
    pub const fn metadata(&self) -> &MetadataClient {
        &self.metadata
    }

    /// Returns the user client.
    #[must_use]
    pub const fn users(&self) -> &UserClient {
        &self.users
    }

    /// Returns the registry client.
    #[must_use]
    pub const fn registries(&self) -> &RegistryClient {
        &self.registries
    }

    /// Returns the replication client.
    #[must_use]
    pub const fn replication(&self) -> &ReplicationClient {
        &self.replication
    }

    /// Returns the quota client.
    #[must_use]
    pub const fn quotas(&self) -> &QuotaClient {
        &self.quotas
    }

    /// Returns the retention client.
    #[must_use]
    pub const fn retention(&self) -> &RetentionClient {
        &self.retention
    }

    /// Returns the immutable tag rule client.
    #[must_use]
    pub const fn immutable(&self) -> &ImmutableClient {
        &self.immutable
    }

    /// Returns the robot account client.
    #[must_use]
    pub const fn robots(&self) -> &RobotClient {
        &self.robots
    }

    /// Returns the repository client.
    #[must_use]
    pub const fn repositories(&self) -> &RepositoryClient {
        &self.repositories
    }

    /// Returns the system client.
    #[must_use]
    pub const fn system(&self) -> &SystemClient {
        &self.system
    }

    /// Returns the garbage collection client.
    #[must_use]
    pub const fn gc(&self) -> &GcClient {
        &self.gc
    }

    /// Returns the audit log purge client.
    #[must_use]
    pub const fn purge(&self) -> &PurgeClient {
        &self.purge
    }

    /// Returns the scan-all client.
    #[must_use]
    pub const fn scan_all(&self) -> &ScanAllClient {
        &self.scan_all
    }

    /// Returns the audit log client.
    #[must_use]
    pub const fn audit_logs(&self) -> &AuditLogClient {
        &self.audit_logs
    }
}

#[async_trait]
impl ProjectApi for HarborClient {
    async fn new_project(&self, req: &ProjectReq) -> Result<Project, ProjectError> {
        self.projects.new_project(req).await
    }

    async fn get_project(&self, name_or_id: &str) -> Result<Project, ProjectError> {
        self.projects.get_project(name_or_id).await
    }

    async fn list_projects(&self, name: Option<&str>) -> Result<Vec<Project>, ProjectError> {
        self.projects.list_projects(name).await
    }

    async fn project_exists(&self, name: &str) -> Result<bool, ProjectError> {
        self.projects.project_exists(name).await
    }

    async fn update_project(
        &self,
        project: &Project,
        storage_limit: Option<i64>,
    ) -> Result<(), ProjectError> {
        self.projects.update_project(project, storage_limit).await
    }

    async fn delete_project(&self, project: &Project) -> Result<(), ProjectError> {
        self.projects.delete_project(project).await
    }

    async fn get_project_summary(&self, name_or_id: &str) -> Result<ProjectSummary, ProjectError> {
        self.projects.get_project_summary(name_or_id).await
    }
}

#[async_trait]
impl MemberApi for HarborClient {
    async fn list_project_members(
        &self,
        project: &str,
        entity_name: Option<&str>,
    ) -> Result<Vec<ProjectMemberEntity>, MemberError> {
        self.members.list_project_members(project, entity_name).await
    }

    async fn add_project_member(
        &self,
        project: &Project,
        member: &MemberRef,
        role_id: i64,
    ) -> Result<(), MemberError> {
        self.members
            .add_project_member(project, member, role_id)
            .await
    }

    async fn update_project_member_role(
        &self,
        project: &Project,
        member: &MemberRef,
        role_id: i64,
    ) -> Result<(), MemberError> {
        self.members
            .update_project_member_role(project, member, role_id)
            .await
    }

    async fn delete_project_member(
        &self,
        project: &Project,
        member: &MemberRef,
    ) -> Result<(), MemberError> {
        self.members.delete_project_member(project, member).await
    }
}

#[async_trait]
impl MetadataApi for HarborClient {
    async fn add_metadata(
        &self,
        project: &str,
        key: MetadataKey,
        value: &str,
    ) -> Result<(), MetadataError> {
        self.metadata.add_metadata(project, key, value).await
    }

    async fn get_metadata_value(
        &self,
        project: &str,
        key: MetadataKey,
    ) -> Result<String, MetadataError> {
        self.metadata.get_metadata_value(project, key).await
    }

    async fn list_metadata(
        &self,
        project: &str,
    ) -> Result<BTreeMap<String, String>, MetadataError> {
        self.metadata.list_metadata(project).await
    }

    async fn update_metadata(
        &self,
        project: &str,
        key: MetadataKey,
        value: &str,
    ) -> Result<(), MetadataError> {
        self.metadata.update_metadata(project, key, value).await
    }

    async fn delete_metadata(&self, project: &str, key: MetadataKey) -> Result<(), MetadataError> {
        self.metadata.delete_metadata(project, key).await
    }
}

#[async_trait]
impl UserApi for HarborClient {
    async fn new_user(&self, req: &UserCreationReq) -> Result<User, UserError> {
        self.users.new_user(req).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<User, UserError> {
        self.users.get_user_by_id(id).await
    }

    async fn get_user_by_name(&self, username: &str) -> Result<User, UserError> {
        self.users.get_user_by_name(username).await
    }

    async fn list_users(&self) -> Result<Vec<User>, UserError> {
        self.users.list_users().await
    }

    async fn user_exists(&self, username: &str) -> Result<bool, UserError> {
        self.users.user_exists(username).await
    }

    async fn update_user_profile(&self, id: i64, profile: &UserProfile) -> Result<(), UserError> {
        self.users.update_user_profile(id, profile).await
    }

    async fn update_user_password(&self, id: i64, req: &PasswordReq) -> Result<(), UserError> {
        self.users.update_user_password(id, req).await
    }

    async fn set_user_sysadmin(&self, id: i64, sysadmin: bool) -> Result<(), UserError> {
        self.users.set_user_sysadmin(id, sysadmin).await
    }

    async fn delete_user(&self, user: &User) -> Result<(), UserError> {
        self.users.delete_user(user).await
    }
}

#[async_trait]
impl RegistryApi for HarborClient {
    async fn new_registry(&self, registry: &Registry) -> Result<Registry, RegistryError> {
        self.registries.new_registry(registry).await
    }

    async fn get_registry_by_id(&self, id: i64) -> Result<Registry, RegistryError> {
        self.registries.get_registry_by_id(id).await
    }

    async fn get_registry_by_name(&self, name: &str) -> Result<Registry, RegistryError> {
        self.registries.get_registry_by_name(name).await
    }

    async fn list_registries(&self) -> Result<Vec<Registry>, RegistryError> {
        self.registries.list_registries().await
    }

    async fn update_registry(&self, registry: &Registry) -> Result<(), RegistryError> {
        self.registries.update_registry(registry).await
    }

    async fn delete_registry(&self, registry: &Registry) -> Result<(), RegistryError> {
        self.registries.delete_registry(registry).await
    }

    async fn ping_registry(&self, ping: &RegistryPing) -> Result<(), RegistryError> {
        self.registries.ping_registry(ping).await
    }
}

#[async_trait]
impl ReplicationApi for HarborClient {
    async fn new_replication_policy(
        &self,
        policy: &ReplicationPolicy,
    ) -> Result<ReplicationPolicy, ReplicationError> {
        self.replication.new_replication_policy(policy).await
    }

    async fn get_replication_policy_by_id(
        &self,
        id: i64,
    ) -> Result<ReplicationPolicy, ReplicationError> {
        self.replication.get_replication_policy_by_id(id).await
    }

    async fn get_replication_policy_by_name(
        &self,
        name: &str,
    ) -> Result<ReplicationPolicy, ReplicationError> {
        self.replication.get_replication_policy_by_name(name).await
    }

    async fn list_replication_policies(&self) -> Result<Vec<ReplicationPolicy>, ReplicationError> {
        self.replication.list_replication_policies().await
    }

    async fn update_replication_policy(
        &self,
        policy: &ReplicationPolicy,
    ) -> Result<(), ReplicationError> {
        self.replication.update_replication_policy(policy).await
    }

    async fn delete_replication_policy(
        &self,
        policy: &ReplicationPolicy,
    ) -> Result<(), ReplicationError> {
        self.replication.delete_replication_policy(policy).await
    }

    async fn trigger_replication_execution(
        &self,
        policy_id: i64,
    ) -> Result<Option<i64>, ReplicationError> {
        self.replication
            .trigger_replication_execution(policy_id)
            .await
    }

    async fn list_replication_executions(
        &self,
        policy_id: i64,
    ) -> Result<Vec<ReplicationExecution>, ReplicationError> {
        self.replication.list_replication_executions(policy_id).await
    }

    async fn get_replication_execution(
        &self,
        id: i64,
    ) -> Result<ReplicationExecution, ReplicationError> {
        self.replication.get_replication_execution(id).await
    }

    async fn stop_replication_execution(&self, id: i64) -> Result<(), ReplicationError> {
        self.replication.stop_replication_execution(id).await
    }
}

#[async_trait]
impl SystemApi for HarborClient {
    async fn get_system_info(&self) -> Result<GeneralInfo, SystemError> {
        self.system.get_system_info().await
    }

    async fn get_configurations(&self) -> Result<ConfigurationsResponse, SystemError> {
        self.system.get_configurations().await
    }

    async fn update_configurations(&self, config: &Configurations) -> Result<(), SystemError> {
        self.system.update_configurations(config).await
    }

    async fn get_statistic(&self) -> Result<Statistic, SystemError> {
        self.system.get_statistic().await
    }

    async fn get_health(&self) -> Result<OverallHealthStatus, SystemError> {
        self.system.get_health().await
    }

    async fn ping(&self) -> Result<String, SystemError> {
        self.system.ping().await
    }

    async fn ping_oidc(&self, endpoint: &OidcPing) -> Result<(), SystemError> {
        self.system.ping_oidc(endpoint).await
    }
}

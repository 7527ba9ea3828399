//! # Harbor Core
//!
//! Data model for the Harbor container registry REST API (v2.0).
//!
//! This crate provides the plain records exchanged with a Harbor instance,
//! including:
//!
//! - [`Project`], [`ProjectMember`] and [`MetadataKey`] - projects and their settings
//! - [`Registry`] and [`ReplicationPolicy`] - external registries and replication
//! - [`Quota`] and [`RetentionPolicy`] - storage limits and tag retention
//! - [`Schedule`] - GC, audit-log purge and scan-all schedules
//!
//! The records carry no behaviour beyond (de)serialization and the parsing
//! of the closed enumerations Harbor uses on the wire.
//!
//! ## Example
//!
//! ```rust
//! use harbor_core::{MetadataKey, ProjectReq};
//!
//! let req = ProjectReq::new("example-project").public(true);
//! assert_eq!(req.project_name, "example-project");
//! assert_eq!(MetadataKey::AutoScan.as_str(), "auto_scan");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod audit;
pub mod error;
pub mod immutable;
pub mod project;
pub mod quota;
pub mod registry;
pub mod replication;
pub mod repository;
pub mod retention;
pub mod robot;
pub mod schedule;
pub mod system;
pub mod user;

#[cfg(test)]
mod proptest_tests;

// Re-export main types at crate root
pub use audit::AuditLog;
pub use error::{Error, Result};
pub use immutable::{ImmutableRule, ImmutableSelector};
pub use project::{
    EntityType, MemberRef, MetadataKey, Project, ProjectMember, ProjectMemberEntity,
    ProjectMetadata, ProjectReq, ProjectSummary, ProjectSummaryQuota, RoleRequest, UserEntity,
    UserGroup,
};
pub use quota::{Quota, QuotaUpdateReq, ResourceList};
pub use registry::{Registry, RegistryCredential, RegistryPing};
pub use replication::{
    ReplicationExecution, ReplicationFilter, ReplicationPolicy, ReplicationTrigger,
    StartReplicationExecution, TriggerSettings, TriggerType,
};
pub use repository::Repository;
pub use retention::{
    RetentionPolicy, RetentionPolicyScope, RetentionRule, RetentionRuleTrigger,
    RetentionSelector,
};
pub use robot::{Robot, RobotAccess, RobotCreateV1, RobotCreated};
pub use schedule::{ExecHistory, Schedule, ScheduleObj, ScheduleType, ScanAllMetrics};
pub use system::{
    ComponentHealthStatus, ConfigItem, Configurations, ConfigurationsResponse, GeneralInfo,
    OidcPing, OverallHealthStatus, Statistic,
};
pub use user::{
    PasswordReq, User, UserCreationReq, UserProfile, UserSearchResult, UserSysAdminFlag,
};

//! # Harbor Client
//!
//! Typed async client for the Harbor container registry REST API (v2.0).
//!
//! # Overview
//!
//! One client per resource domain, all sharing a [`ClientContext`]:
//! - **Projects**: [`ProjectClient`], [`MemberClient`], [`MetadataClient`]
//! - **Access**: [`UserClient`], [`RobotClient`]
//! - **Replication**: [`RegistryClient`], [`ReplicationClient`]
//! - **Storage**: [`QuotaClient`], [`RetentionClient`], [`ImmutableClient`],
//!   [`RepositoryClient`]
//! - **System**: [`SystemClient`], [`GcClient`], [`PurgeClient`],
//!   [`ScanAllClient`], [`AuditLogClient`]
//!
//! [`HarborClient`] bundles them and implements the capability traits in
//! [`api`].
//!
//! Every domain has its own error enum. Failures reported by the
//! [`Transport`] are normalized into it by the domain's `handle_*_errors`
//! function, and anything not recognised is passed through unchanged as
//! the `Transport` variant.
//!
//! Update and delete calls on projects, registries, replication policies
//! and users first check that the local record still matches the server,
//! failing with a `Mismatch` error instead of touching another resource.
//!
//! # Example
//!
//! ```rust,no_run
//! use harbor_client::{AuthInfo, ClientConfig, HarborClient};
//! use harbor_client::api::ProjectApi;
//! use harbor_core::ProjectReq;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = ClientConfig::new("https://harbor.example.com")
//!         .with_auth(AuthInfo::basic("admin", "Harbor12345"));
//!     let client = HarborClient::new(config)?;
//!
//!     let project = client.new_project(&ProjectReq::new("example-project")).await?;
//!     println!("Created project {}", project.project_id);
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::module_name_repetitions)]

pub mod api;
pub mod auditlog;
pub mod client;
pub mod config;
mod context;
pub mod gc;
pub mod immutable;
pub mod member;
pub mod metadata;
pub mod pagination;
pub mod project;
pub mod purge;
pub mod quota;
pub mod registry;
pub mod replication;
pub mod repository;
pub mod retention;
pub mod robot;
pub mod scanall;
pub mod system;
pub mod transport;
pub mod user;

#[cfg(test)]
mod testing;

// Re-export main types at crate root
pub use auditlog::{handle_audit_log_errors, AuditLogClient, AuditLogError};
pub use client::HarborClient;
pub use config::{AuthInfo, ClientConfig, RequestOptions, TlsConfig, API_PREFIX};
pub use context::ClientContext;
pub use gc::{handle_gc_errors, GcClient, GcError};
pub use immutable::{handle_immutable_errors, ImmutableClient, ImmutableError};
pub use member::{handle_member_errors, MemberClient, MemberError};
pub use metadata::{handle_metadata_errors, MetadataClient, MetadataError};
pub use pagination::{collect_pages, Page};
pub use project::{handle_project_errors, ProjectClient, ProjectError};
pub use purge::{handle_purge_errors, PurgeClient, PurgeError};
pub use quota::{handle_quota_errors, QuotaClient, QuotaError};
pub use registry::{handle_registry_errors, RegistryClient, RegistryError};
pub use replication::{handle_replication_errors, ReplicationClient, ReplicationError};
pub use repository::{handle_repository_errors, RepositoryClient, RepositoryError};
pub use retention::{handle_retention_errors, RetentionClient, RetentionError};
pub use robot::{handle_robot_errors, RobotClient, RobotError};
pub use scanall::{handle_scan_all_errors, ScanAllClient, ScanAllError};
pub use system::{handle_system_errors, SystemClient, SystemError};
pub use transport::{
    ApiRequest, ApiResponse, HttpTransport, MockTransport, Operation, RecordedCall, ResponseClass,
    Transport, TransportError,
};
pub use user::{handle_user_errors, UserClient, UserError};

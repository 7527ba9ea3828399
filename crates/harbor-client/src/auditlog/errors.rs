//! Audit log errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by audit log operations.
#[derive(Debug, Error)]
pub enum AuditLogError {
    /// No project reference was supplied.
    #[error("project not provided")]
    ProjectNotProvided,

    /// The query was rejected as malformed.
    #[error("illegal audit log query")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on audit logs")]
    Forbidden,

    /// The project does not exist.
    #[error("project not found")]
    NotFound,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of an audit log operation.
///
/// # Errors
///
/// Always returns the audit log error matching the failure, or the
/// transport error unchanged if it is not recognised.
pub fn handle_audit_log_errors(err: TransportError) -> Result<(), AuditLogError> {
    Err(match err.status() {
        Some(400) => AuditLogError::IllegalFormat,
        Some(401) => AuditLogError::Unauthorized,
        Some(403) => AuditLogError::Forbidden,
        Some(404) => AuditLogError::NotFound,
        Some(500) => AuditLogError::InternalErrors,
        _ => AuditLogError::Transport(err),
    })
}

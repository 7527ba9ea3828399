//! Audit log purge errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by audit log purge operations.
#[derive(Debug, Error)]
pub enum PurgeError {
    /// No schedule or execution ID was supplied.
    #[error("purge schedule not provided")]
    NotProvided,

    /// The schedule was rejected as malformed.
    #[error("illegal purge schedule format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on audit log purge")]
    Forbidden,

    /// The execution does not exist.
    #[error("purge execution not found")]
    NotFound,

    /// A schedule already exists; update it instead.
    #[error("purge schedule already exists")]
    ScheduleAlreadyExists,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of an audit log purge operation.
///
/// # Errors
///
/// Returns the purge error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_purge_errors(err: TransportError) -> Result<(), PurgeError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("createPurgeSchedule", 409)), _) => PurgeError::ScheduleAlreadyExists,
        (_, Some(400)) => PurgeError::IllegalFormat,
        (_, Some(401)) => PurgeError::Unauthorized,
        (_, Some(403)) => PurgeError::Forbidden,
        (_, Some(404)) => PurgeError::NotFound,
        (_, Some(500)) => PurgeError::InternalErrors,
        _ => PurgeError::Transport(err),
    })
}

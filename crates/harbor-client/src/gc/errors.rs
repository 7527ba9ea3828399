//! Garbage collection errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by garbage collection operations.
#[derive(Debug, Error)]
pub enum GcError {
    /// No schedule or execution ID was supplied.
    #[error("gc schedule not provided")]
    NotProvided,

    /// The schedule was rejected as malformed.
    #[error("illegal gc schedule format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on garbage collection")]
    Forbidden,

    /// The execution does not exist.
    #[error("gc execution not found")]
    NotFound,

    /// A schedule already exists; update it instead.
    #[error("gc schedule already exists")]
    ScheduleAlreadyExists,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a garbage collection operation.
///
/// # Errors
///
/// Returns the GC error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_gc_errors(err: TransportError) -> Result<(), GcError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("createGCSchedule", 409)), _) => GcError::ScheduleAlreadyExists,
        (_, Some(400)) => GcError::IllegalFormat,
        (_, Some(401)) => GcError::Unauthorized,
        (_, Some(403)) => GcError::Forbidden,
        (_, Some(404)) => GcError::NotFound,
        (_, Some(500)) => GcError::InternalErrors,
        _ => GcError::Transport(err),
    })
}

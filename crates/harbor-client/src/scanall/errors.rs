//! Scan-all errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by scan-all operations.
#[derive(Debug, Error)]
pub enum ScanAllError {
    /// No schedule was supplied.
    #[error("scan-all schedule not provided")]
    NotProvided,

    /// The request was rejected as malformed.
    #[error("illegal scan-all schedule format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on scan-all")]
    Forbidden,

    /// A schedule already exists; update it instead.
    #[error("scan-all schedule already exists")]
    ScheduleAlreadyExists,

    /// No default scanner is configured.
    #[error("no scanner configured")]
    ScannerNotConfigured,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a scan-all operation.
///
/// # Errors
///
/// Returns the scan-all error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_scan_all_errors(err: TransportError) -> Result<(), ScanAllError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("createScanAllSchedule", 409)), _) => ScanAllError::ScheduleAlreadyExists,
        (_, Some(400)) => ScanAllError::IllegalFormat,
        (_, Some(401)) => ScanAllError::Unauthorized,
        (_, Some(403)) => ScanAllError::Forbidden,
        (_, Some(412)) => ScanAllError::ScannerNotConfigured,
        (_, Some(500)) => ScanAllError::InternalErrors,
        _ => ScanAllError::Transport(err),
    })
}

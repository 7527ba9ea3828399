//! Quota errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by quota operations.
#[derive(Debug, Error)]
pub enum QuotaError {
    /// No quota ID or project ID was supplied.
    #[error("quota not provided")]
    NotProvided,

    /// The request was rejected as malformed.
    #[error("illegal quota request format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on quotas")]
    Forbidden,

    /// The quota does not exist.
    #[error("quota not found")]
    NotFound,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// No listed quota references the project.
    #[error("no quota references project {project_id}")]
    RefNotFound {
        /// Requested project ID.
        project_id: i64,
    },

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a quota operation.
///
/// Quota endpoints answer as documented, so an undeclared 201 is passed
/// through like any other unexpected status.
///
/// # Errors
///
/// Returns the quota error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_quota_errors(err: TransportError) -> Result<(), QuotaError> {
    Err(match err.status() {
        Some(400) => QuotaError::IllegalFormat,
        Some(401) => QuotaError::Unauthorized,
        Some(403) => QuotaError::Forbidden,
        Some(404) => QuotaError::NotFound,
        Some(500) => QuotaError::InternalErrors,
        _ => QuotaError::Transport(err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ApiResponse;

    #[test]
    fn test_status_table() {
        let err = |status| {
            handle_quota_errors(TransportError::ErrorResponse {
                operation: "getQuota",
                status,
                message: String::new(),
            })
            .unwrap_err()
        };

        assert!(matches!(err(400), QuotaError::IllegalFormat));
        assert!(matches!(err(401), QuotaError::Unauthorized));
        assert!(matches!(err(403), QuotaError::Forbidden));
        assert!(matches!(err(404), QuotaError::NotFound));
        assert!(matches!(err(500), QuotaError::InternalErrors));
    }

    #[test]
    fn test_undeclared_created_passes_through() {
        let err = TransportError::UnexpectedStatus {
            operation: "updateQuota",
            response: Box::new(ApiResponse::new(201)),
        };
        assert!(matches!(handle_quota_errors(err), Err(QuotaError::Transport(_))));
    }
}

//! System errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by system-wide operations.
#[derive(Debug, Error)]
pub enum SystemError {
    /// No configuration or endpoint was supplied.
    #[error("system request not provided")]
    NotProvided,

    /// The request was rejected as malformed.
    #[error("illegal system request format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on system settings")]
    Forbidden,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a system operation.
///
/// # Errors
///
/// Always returns the system error matching the failure, or the transport
/// error unchanged if it is not recognised.
pub fn handle_system_errors(err: TransportError) -> Result<(), SystemError> {
    Err(match err.status() {
        Some(400) => SystemError::IllegalFormat,
        Some(401) => SystemError::Unauthorized,
        Some(403) => SystemError::Forbidden,
        Some(500) => SystemError::InternalErrors,
        _ => SystemError::Transport(err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ApiResponse;

    #[test]
    fn test_status_table() {
        let err = |status| {
            handle_system_errors(TransportError::ErrorResponse {
                operation: "getConfigurations",
                status,
                message: String::new(),
            })
            .unwrap_err()
        };
        assert!(matches!(err(401), SystemError::Unauthorized));
        assert!(matches!(err(403), SystemError::Forbidden));
        assert!(matches!(err(500), SystemError::InternalErrors));
    }

    #[test]
    fn test_undeclared_status_passes_through() {
        let err = TransportError::UnexpectedStatus {
            operation: "getHealth",
            response: Box::new(ApiResponse::new(503)),
        };
        assert!(matches!(
            handle_system_errors(err),
            Err(SystemError::Transport(e)) if e.status() == Some(503)
        ));
    }
}

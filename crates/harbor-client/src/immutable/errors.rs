//! Immutable tag rule errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by immutable tag rule operations.
#[derive(Debug, Error)]
pub enum ImmutableError {
    /// No project reference was supplied.
    #[error("project not provided")]
    ProjectNotProvided,

    /// No rule ID was supplied.
    #[error("immutable rule not provided")]
    NotProvided,

    /// The rule was rejected as malformed.
    #[error("illegal immutable rule format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on immutable rules")]
    Forbidden,

    /// The project or rule does not exist.
    #[error("project or immutable rule not found")]
    NotFound,

    /// The rule ID to update or delete does not exist.
    #[error("immutable rule ID does not exist")]
    IdNotExists,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of an immutable tag rule operation.
///
/// # Errors
///
/// Returns the immutable rule error matching the failure, or the transport
/// error unchanged if it is not recognised.
pub fn handle_immutable_errors(err: TransportError) -> Result<(), ImmutableError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("updateImmuRule" | "deleteImmuRule", 404)), _) => ImmutableError::IdNotExists,
        (_, Some(400)) => ImmutableError::IllegalFormat,
        (_, Some(401)) => ImmutableError::Unauthorized,
        (_, Some(403)) => ImmutableError::Forbidden,
        (_, Some(404)) => ImmutableError::NotFound,
        (_, Some(500)) => ImmutableError::InternalErrors,
        _ => ImmutableError::Transport(err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::ApiResponse;

    fn declared(operation: &'static str, status: u16) -> TransportError {
        TransportError::ErrorResponse {
            operation,
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_status_table() {
        let err = |status| handle_immutable_errors(declared("listImmuRules", status)).unwrap_err();

        assert!(matches!(err(400), ImmutableError::IllegalFormat));
        assert!(matches!(err(401), ImmutableError::Unauthorized));
        assert!(matches!(err(403), ImmutableError::Forbidden));
        assert!(matches!(err(404), ImmutableError::NotFound));
        assert!(matches!(err(500), ImmutableError::InternalErrors));
        assert!(matches!(
            handle_immutable_errors(declared("deleteImmuRule", 404)),
            Err(ImmutableError::IdNotExists)
        ));
    }

    #[test]
    fn test_undeclared_created_is_success() {
        let err = TransportError::UnexpectedStatus {
            operation: "updateImmuRule",
            response: Box::new(ApiResponse::new(201)),
        };
        assert!(handle_immutable_errors(err).is_ok());
    }
}

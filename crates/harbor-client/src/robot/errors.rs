//! Robot account errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by project robot account operations.
#[derive(Debug, Error)]
pub enum RobotError {
    /// No project reference was supplied.
    #[error("project not provided")]
    ProjectNotProvided,

    /// No robot account or robot ID was supplied.
    #[error("robot account not provided")]
    NotProvided,

    /// The request was rejected as malformed.
    #[error("illegal robot account format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on robot accounts")]
    Forbidden,

    /// The project or robot account does not exist.
    #[error("project or robot account not found")]
    NotFound,

    /// The robot ID to update or delete does not exist.
    #[error("robot account ID does not exist")]
    IdNotExists,

    /// A robot account with this name already exists in the project.
    #[error("robot account name already exists")]
    NameAlreadyExists,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a robot account operation.
///
/// # Errors
///
/// Returns the robot error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_robot_errors(err: TransportError) -> Result<(), RobotError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("updateRobotV1" | "deleteRobotV1", 404)), _) => RobotError::IdNotExists,
        (_, Some(400)) => RobotError::IllegalFormat,
        (_, Some(401)) => RobotError::Unauthorized,
        (_, Some(403)) => RobotError::Forbidden,
        (_, Some(404)) => RobotError::NotFound,
        (_, Some(409)) => RobotError::NameAlreadyExists,
        (_, Some(500)) => RobotError::InternalErrors,
        _ => RobotError::Transport(err),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn declared(operation: &'static str, status: u16) -> TransportError {
        TransportError::ErrorResponse {
            operation,
            status,
            message: String::new(),
        }
    }

    #[test]
    fn test_sentinels_before_status_table() {
        assert!(matches!(
            handle_robot_errors(declared("deleteRobotV1", 404)),
            Err(RobotError::IdNotExists)
        ));
        assert!(matches!(
            handle_robot_errors(declared("getRobotByIDV1", 404)),
            Err(RobotError::NotFound)
        ));
        assert!(matches!(
            handle_robot_errors(declared("createRobotV1", 409)),
            Err(RobotError::NameAlreadyExists)
        ));
    }

    #[test]
    fn test_unknown_status_passes_through() {
        let err = handle_robot_errors(declared("listRobotV1", 418)).unwrap_err();
        assert!(matches!(err, RobotError::Transport(e) if e.status() == Some(418)));
    }
}

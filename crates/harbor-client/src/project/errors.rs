//! Project errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by project operations.
#[derive(Debug, Error)]
pub enum ProjectError {
    /// No project, or a project without a name, was supplied.
    #[error("project not provided")]
    NotProvided,

    /// The project ID or request body was rejected as malformed.
    #[error("illegal project ID or request format")]
    IllegalIdFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on project")]
    NoPermission,

    /// The project does not exist.
    #[error("unknown project")]
    UnknownResource,

    /// The project ID to update or delete does not exist.
    #[error("project ID does not exist")]
    IdNotExists,

    /// A project with this name already exists.
    #[error("project name already exists")]
    NameAlreadyExists,

    /// The project still contains repositories or other dependents.
    #[error("project has dependent resources")]
    HasDependents,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// The supplied project does not match the project stored under its name.
    #[error("project {name} with ID {id} does not match the stored project")]
    Mismatch {
        /// Supplied project name.
        name: String,
        /// Supplied project ID.
        id: i64,
    },

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a project operation.
///
/// Returns `Ok(())` for an undeclared 201, which Harbor sends on success.
///
/// # Errors
///
/// Returns the project error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_project_errors(err: TransportError) -> Result<(), ProjectError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("deleteProject" | "updateProject", 404)), _) => ProjectError::IdNotExists,
        (Some(("createProject", 409)), _) => ProjectError::NameAlreadyExists,
        (Some(("deleteProject", 412)), _) => ProjectError::HasDependents,
        (_, Some(400)) => ProjectError::IllegalIdFormat,
        (_, Some(401)) => ProjectError::Unauthorized,
        (_, Some(403)) => ProjectError::NoPermission,
        (_, Some(404)) => ProjectError::UnknownResource,
        (_, Some(409)) => ProjectError::NameAlreadyExists,
        (_, Some(500)) => ProjectError::InternalErrors,
        _ => ProjectError::Transport(err),
    })
}

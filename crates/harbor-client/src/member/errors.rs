//! Project member errors and their normalization.

use thiserror::Error;

use crate::project::ProjectError;
use crate::transport::TransportError;

/// Errors returned by project member operations.
#[derive(Debug, Error)]
pub enum MemberError {
    /// No member, or a member without a name, was supplied.
    #[error("member not provided")]
    NotProvided,

    /// The request was rejected as malformed.
    #[error("illegal member request format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on project members")]
    Forbidden,

    /// The project or membership does not exist.
    #[error("project or member not found")]
    NotFound,

    /// The member ID to update or delete does not exist.
    #[error("member ID does not exist")]
    MemberIdNotExists,

    /// The entity is already a member of the project.
    #[error("member already exists")]
    AlreadyExists,

    /// The named user is not a member of the project.
    #[error("user {name} is not a member of the project")]
    UserIsNoMember {
        /// User name.
        name: String,
    },

    /// No membership matched the named group.
    #[error("no member found for group {name}")]
    NoMemberFound {
        /// Group name.
        name: String,
    },

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// Resolving the project failed.
    #[error(transparent)]
    Project(#[from] ProjectError),

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a project member operation.
///
/// # Errors
///
/// Returns the member error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_member_errors(err: TransportError) -> Result<(), MemberError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("updateProjectMember" | "deleteProjectMember", 404)), _) => {
            MemberError::MemberIdNotExists
        }
        (Some(("createProjectMember", 409)), _) => MemberError::AlreadyExists,
        (_, Some(400)) => MemberError::IllegalFormat,
        (_, Some(401)) => MemberError::Unauthorized,
        (_, Some(403)) => MemberError::Forbidden,
        (_, Some(404)) => MemberError::NotFound,
        (_, Some(409)) => MemberError::AlreadyExists,
        (_, Some(500)) => MemberError::InternalErrors,
        _ => MemberError::Transport(err),
    })
}

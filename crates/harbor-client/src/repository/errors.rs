//! Repository errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by repository operations.
#[derive(Debug, Error)]
pub enum RepositoryError {
    /// No project name was supplied.
    #[error("project not provided")]
    ProjectNotProvided,

    /// No repository name was supplied.
    #[error("repository not provided")]
    NotProvided,

    /// The request was rejected as malformed.
    #[error("illegal repository format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on repositories")]
    Forbidden,

    /// The project or repository does not exist.
    #[error("project or repository not found")]
    NotFound,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a repository operation.
///
/// Repository operations never answer with an undocumented 201, so every
/// failure is an error.
///
/// # Errors
///
/// Always returns the repository error matching the failure, or the
/// transport error unchanged if it is not recognised.
pub fn handle_repository_errors(err: TransportError) -> Result<(), RepositoryError> {
    Err(match err.status() {
        Some(400) => RepositoryError::IllegalFormat,
        Some(401) => RepositoryError::Unauthorized,
        Some(403) => RepositoryError::Forbidden,
        Some(404) => RepositoryError::NotFound,
        Some(500) => RepositoryError::InternalErrors,
        _ => RepositoryError::Transport(err),
    })
}

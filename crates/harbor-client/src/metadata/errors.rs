//! Project metadata errors and their normalization.

use harbor_core::MetadataKey;
use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by project metadata operations.
#[derive(Debug, Error)]
pub enum MetadataError {
    /// No project reference was supplied.
    #[error("project not provided")]
    ProjectNotProvided,

    /// The key or value was rejected.
    #[error("invalid metadata key or value")]
    InvalidRequest,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on project metadata")]
    Forbidden,

    /// The project or the key does not exist.
    #[error("project or metadata key not found")]
    NotFound,

    /// The key is already set on the project.
    #[error("metadata key already exists")]
    KeyAlreadyExists,

    /// The request body was not JSON.
    #[error("unsupported media type")]
    UnsupportedMediaType,

    /// The response did not carry a value for the key.
    #[error("metadata value of {key} is undefined")]
    Undefined {
        /// Requested key.
        key: MetadataKey,
    },

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a project metadata operation.
///
/// # Errors
///
/// Returns the metadata error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_metadata_errors(err: TransportError) -> Result<(), MetadataError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("addProjectMetadatas", 409)), _) => MetadataError::KeyAlreadyExists,
        (_, Some(400)) => MetadataError::InvalidRequest,
        (_, Some(401)) => MetadataError::Unauthorized,
        (_, Some(403)) => MetadataError::Forbidden,
        (_, Some(404)) => MetadataError::NotFound,
        (_, Some(409)) => MetadataError::KeyAlreadyExists,
        (_, Some(415)) => MetadataError::UnsupportedMediaType,
        (_, Some(500)) => MetadataError::InternalErrors,
        _ => MetadataError::Transport(err),
    })
}

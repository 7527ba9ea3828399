//! Retention errors and their normalization.

use std::num::ParseIntError;

use thiserror::Error;

use crate::metadata::MetadataError;
use crate::transport::TransportError;

/// Errors returned by retention operations.
#[derive(Debug, Error)]
pub enum RetentionError {
    /// No policy or policy ID was supplied.
    #[error("retention policy not provided")]
    NotProvided,

    /// The policy was rejected as malformed.
    #[error("illegal retention policy format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on retention policies")]
    Forbidden,

    /// The policy does not exist.
    #[error("retention policy not found")]
    NotFound,

    /// The policy ID to update or delete does not exist.
    #[error("retention policy ID does not exist")]
    IdNotExists,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// The project's `retention_id` metadata is not an integer.
    #[error("invalid retention ID {value:?}: {source}")]
    InvalidRetentionId {
        /// Stored metadata value.
        value: String,
        /// Parse failure.
        #[source]
        source: ParseIntError,
    },

    /// Reading the project's `retention_id` metadata failed.
    #[error(transparent)]
    Metadata(#[from] MetadataError),

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a retention operation.
///
/// # Errors
///
/// Returns the retention error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_retention_errors(err: TransportError) -> Result<(), RetentionError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("updateRetention" | "deleteRetention", 404)), _) => RetentionError::IdNotExists,
        (_, Some(400)) => RetentionError::IllegalFormat,
        (_, Some(401)) => RetentionError::Unauthorized,
        (_, Some(403)) => RetentionError::Forbidden,
        (_, Some(404)) => RetentionError::NotFound,
        (_, Some(500)) => RetentionError::InternalErrors,
        _ => RetentionError::Transport(err),
    })
}

//! Replication errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by replication operations.
#[derive(Debug, Error)]
pub enum ReplicationError {
    /// No policy, policy name or ID was supplied.
    #[error("replication policy not provided")]
    NotProvided,

    /// The ID or request body was rejected as malformed.
    #[error("illegal replication ID or request format")]
    IllegalIdFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on replication")]
    Forbidden,

    /// The policy or execution does not exist.
    #[error("replication resource not found")]
    NotFound,

    /// The policy ID to update or delete does not exist.
    #[error("replication policy ID does not exist")]
    IdNotExists,

    /// A policy with this name already exists.
    #[error("replication policy name already exists")]
    NameAlreadyExists,

    /// The policy is disabled or still has running executions.
    #[error("replication precondition failed")]
    PreconditionFailed,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// No policy has this exact name.
    #[error("replication policy {name} not found")]
    PolicyNotFound {
        /// Requested name.
        name: String,
    },

    /// More than one policy has this name.
    #[error("{count} replication policies match name {name}")]
    MultipleResults {
        /// Requested name.
        name: String,
        /// Number of matches.
        count: usize,
    },

    /// The supplied policy does not match the policy stored under its name.
    #[error("replication policy {name} with ID {id} does not match the stored policy")]
    Mismatch {
        /// Supplied policy name.
        name: String,
        /// Supplied policy ID.
        id: i64,
    },

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a replication operation.
///
/// # Errors
///
/// Returns the replication error matching the failure, or the transport
/// error unchanged if it is not recognised.
pub fn handle_replication_errors(err: TransportError) -> Result<(), ReplicationError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("updateReplicationPolicy" | "deleteReplicationPolicy", 404)), _) => {
            ReplicationError::IdNotExists
        }
        (Some(("createReplicationPolicy", 409)), _) => ReplicationError::NameAlreadyExists,
        (_, Some(400)) => ReplicationError::IllegalIdFormat,
        (_, Some(401)) => ReplicationError::Unauthorized,
        (_, Some(403)) => ReplicationError::Forbidden,
        (_, Some(404)) => ReplicationError::NotFound,
        (_, Some(409)) => ReplicationError::NameAlreadyExists,
        (_, Some(412)) => ReplicationError::PreconditionFailed,
        (_, Some(500)) => ReplicationError::InternalErrors,
        _ => ReplicationError::Transport(err),
    })
}

//! Registry errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
    /// No registry, or a registry without a name, was supplied.
    #[error("registry not provided")]
    NotProvided,

    /// The registry ID or request body was rejected as malformed.
    #[error("illegal registry ID or request format")]
    IllegalIdFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on registries")]
    NoPermission,

    /// The registry does not exist.
    #[error("registry not found")]
    NotFound,

    /// The registry ID to update or delete does not exist.
    #[error("registry ID does not exist")]
    IdNotExists,

    /// A registry with this name already exists.
    #[error("registry name already exists")]
    NameAlreadyExists,

    /// The registry is still referenced by replication policies.
    #[error("registry is in use")]
    InUse,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// A lookup by name matched more than one registry.
    #[error("{count} registries match name {name}")]
    MultipleResults {
        /// Requested name.
        name: String,
        /// Number of matches.
        count: usize,
    },

    /// The supplied registry does not match the registry stored under its name.
    #[error("registry {name} with ID {id} does not match the stored registry")]
    Mismatch {
        /// Supplied registry name.
        name: String,
        /// Supplied registry ID.
        id: i64,
    },

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a registry operation.
///
/// # Errors
///
/// Returns the registry error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_registry_errors(err: TransportError) -> Result<(), RegistryError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (Some(("updateRegistry" | "deleteRegistry", 404)), _) => RegistryError::IdNotExists,
        (Some(("createRegistry" | "updateRegistry", 409)), _) => RegistryError::NameAlreadyExists,
        (Some(("deleteRegistry", 412)), _) => RegistryError::InUse,
        (_, Some(400)) => RegistryError::IllegalIdFormat,
        (_, Some(401)) => RegistryError::Unauthorized,
        (_, Some(403)) => RegistryError::NoPermission,
        (_, Some(404)) => RegistryError::NotFound,
        (_, Some(409)) => RegistryError::NameAlreadyExists,
        (_, Some(500)) => RegistryError::InternalErrors,
        _ => RegistryError::Transport(err),
    })
}

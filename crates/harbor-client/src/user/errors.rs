//! User errors and their normalization.

use thiserror::Error;

use crate::transport::TransportError;

/// Errors returned by user operations.
#[derive(Debug, Error)]
pub enum UserError {
    /// No user, user name or user ID was supplied.
    #[error("user not provided")]
    NotProvided,

    /// The request was rejected as malformed.
    #[error("illegal user request format")]
    IllegalFormat,

    /// The credentials were missing or rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// The credentials lack permission for the operation.
    #[error("no permission on users")]
    Forbidden,

    /// The user does not exist.
    #[error("user not found")]
    NotFound,

    /// No user has this exact name.
    #[error("user {name} not found")]
    UserNotFound {
        /// Requested user name.
        name: String,
    },

    /// The user ID to update or delete does not exist.
    #[error("user ID does not exist")]
    IdNotExists,

    /// A user with this name or email already exists.
    #[error("user already exists")]
    AlreadyExists,

    /// The request body was not JSON.
    #[error("unsupported media type")]
    UnsupportedMediaType,

    /// Harbor reported an internal error.
    #[error("internal server errors")]
    InternalErrors,

    /// The supplied user does not match the user stored under its name.
    #[error("user {username} with ID {id} does not match the stored user")]
    Mismatch {
        /// Supplied user name.
        username: String,
        /// Supplied user ID.
        id: i64,
    },

    /// Any error not recognised above.
    #[error(transparent)]
    Transport(#[from] TransportError),
}

/// Normalizes a transport error of a user operation.
///
/// # Errors
///
/// Returns the user error matching the failure, or the transport error
/// unchanged if it is not recognised.
pub fn handle_user_errors(err: TransportError) -> Result<(), UserError> {
    if err.is_undeclared_created() {
        return Ok(());
    }

    Err(match (err.sentinel(), err.status()) {
        (
            Some((
                "deleteUser" | "updateUserProfile" | "updateUserPassword" | "setUserSysAdmin",
                404,
            )),
            _,
        ) => UserError::IdNotExists,
        (Some(("createUser", 409)), _) => UserError::AlreadyExists,
        (_, Some(400)) => UserError::IllegalFormat,
        (_, Some(401)) => UserError::Unauthorized,
        (_, Some(403)) => UserError::Forbidden,
        (_, Some(404)) => UserError::NotFound,
        (_, Some(409)) => UserError::AlreadyExists,
        (_, Some(415)) => UserError::UnsupportedMediaType,
        (_, Some(500)) => UserError::InternalErrors,
        _ => UserError::Transport(err),
    })
}

//! Error types for Harbor model parsing.
//!
//! This module defines the errors raised when a wire value does not belong
//! to one of the closed enumerations the Harbor API uses.

use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur when parsing Harbor model values.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Project metadata key outside the supported set.
    #[error("unknown project metadata key: {key}")]
    UnknownMetadataKey {
        /// The rejected key.
        key: String,
    },

    /// Member entity type other than `u` or `g`.
    #[error("unknown member entity type: {value}")]
    UnknownEntityType {
        /// The rejected value.
        value: String,
    },

    /// Schedule type outside the supported set.
    #[error("unknown schedule type: {value}")]
    UnknownScheduleType {
        /// The rejected value.
        value: String,
    },
}

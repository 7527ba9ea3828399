//! Error type of the transport layer.

use std::path::PathBuf;

use thiserror::Error;

use super::ApiResponse;

/// Errors returned by a [`Transport`](super::Transport).
///
/// The resource clients hand these to their domain's error handler, which
/// turns the ones it recognises into domain errors and passes the rest
/// through unchanged.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The server answered with an error status the operation declares.
    #[error("{operation} failed with status {status}: {message}")]
    ErrorResponse {
        /// Operation ID.
        operation: &'static str,
        /// HTTP status code.
        status: u16,
        /// Error message from the response body.
        message: String,
    },

    /// The server answered with a status the operation does not declare.
    #[error("{operation} returned unexpected status {}", .response.status)]
    UnexpectedStatus {
        /// Operation ID.
        operation: &'static str,
        /// The full response.
        response: Box<ApiResponse>,
    },

    /// The request could not be sent or its response could not be read.
    #[error("{operation} request to {url} failed: {source}")]
    Request {
        /// Operation ID.
        operation: &'static str,
        /// Request URL.
        url: String,
        /// Underlying error.
        #[source]
        source: reqwest::Error,
    },

    /// The response body could not be decoded.
    #[error("failed to decode {operation} response: {source}")]
    Decode {
        /// Operation ID.
        operation: &'static str,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The request body could not be encoded.
    #[error("failed to encode {operation} request: {source}")]
    Encode {
        /// Operation ID.
        operation: &'static str,
        /// Underlying error.
        #[source]
        source: serde_json::Error,
    },

    /// The configured URL or a request path is not a valid URL.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// URL string.
        url: String,
    },

    /// Credentials could not be turned into a header value.
    #[error("invalid credentials: {message}")]
    InvalidCredentials {
        /// Error message.
        message: String,
    },

    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {message}")]
    ClientBuild {
        /// Error message.
        message: String,
    },

    /// A certificate or key file could not be read.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File path.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: std::io::Error,
    },

    /// An error status was accepted as success but no response was kept.
    #[error("{operation} was accepted without a response")]
    EmptyResponse {
        /// Operation ID.
        operation: &'static str,
    },

    /// No response was available for the operation.
    #[error("no response available for {operation}")]
    NoResponse {
        /// Operation ID.
        operation: &'static str,
    },
}

impl TransportError {
    /// Returns the HTTP status carried by the error, if any.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::ErrorResponse { status, .. } => Some(*status),
            Self::UnexpectedStatus { response, .. } => Some(response.status),
            Self::Request { source, .. } => source.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Returns `(operation, status)` for declared error responses.
    #[must_use]
    pub const fn sentinel(&self) -> Option<(&'static str, u16)> {
        match self {
            Self::ErrorResponse {
                operation, status, ..
            } => Some((*operation, *status)),
            _ => None,
        }
    }

    /// Returns the response of an undeclared status.
    #[must_use]
    pub fn unexpected_response(&self) -> Option<&ApiResponse> {
        match self {
            Self::UnexpectedStatus { response, .. } => Some(response),
            _ => None,
        }
    }

    /// Returns true for an undeclared 201, which some Harbor endpoints send
    /// where they document 200.
    #[must_use]
    pub fn is_undeclared_created(&self) -> bool {
        self.unexpected_response().is_some_and(|r| r.status == 201)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_error_response() {
        let err = TransportError::ErrorResponse {
            operation: "deleteProject",
            status: 412,
            message: "project contains repositories".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "deleteProject failed with status 412: project contains repositories"
        );
    }

    #[test]
    fn test_error_display_unexpected_status() {
        let err = TransportError::UnexpectedStatus {
            operation: "updateProject",
            response: Box::new(ApiResponse::new(201)),
        };
        assert_eq!(err.to_string(), "updateProject returned unexpected status 201");
        assert!(err.is_undeclared_created());
    }

    #[test]
    fn test_status_without_response() {
        let err = TransportError::NoResponse {
            operation: "getProject",
        };
        assert_eq!(err.status(), None);
        assert!(err.sentinel().is_none());
    }
}

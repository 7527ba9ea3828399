//! Transport seam between the resource clients and the Harbor HTTP API.
//!
//! A [`Transport`] executes one [`ApiRequest`] for one [`Operation`] and
//! classifies the response against the operation's contract:
//!
//! - a success status yields the [`ApiResponse`];
//! - an error status the operation declares yields
//!   [`TransportError::ErrorResponse`], identified by operation and status;
//! - any other status yields [`TransportError::UnexpectedStatus`], carrying
//!   the full response.
//!
//! The resource clients never see HTTP details beyond this.

mod error;
mod http;
mod mock;

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue, LOCATION};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::AuthInfo;

pub use error::TransportError;
pub use http::HttpTransport;
pub use mock::{MockTransport, RecordedCall};

/// Response header carrying the size of a paginated collection.
pub const TOTAL_COUNT_HEADER: &str = "x-total-count";

/// Request header telling Harbor whether a project reference is a name.
pub const RESOURCE_NAME_HEADER: &str = "x-is-resource-name";

/// Executes API operations against a Harbor instance.
#[async_trait]
pub trait Transport: Send + Sync + std::fmt::Debug {
    /// Executes a request, passing the credentials through unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be sent or the response
    /// status is not a success status of the request's operation.
    async fn execute(
        &self,
        request: ApiRequest,
        auth: &AuthInfo,
    ) -> Result<ApiResponse, TransportError>;
}

/// Contract of one API operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operation {
    /// Operation ID, e.g. `deleteProject`.
    pub id: &'static str,
    /// Statuses meaning success.
    pub success: &'static [u16],
    /// Error statuses the operation documents.
    pub declared: &'static [u16],
}

/// How a response status relates to an [`Operation`]'s contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseClass {
    /// A success status.
    Success,
    /// A documented error status.
    Declared,
    /// Anything else.
    Unexpected,
}

impl Operation {
    /// Describes an operation.
    #[must_use]
    pub const fn new(id: &'static str, success: &'static [u16], declared: &'static [u16]) -> Self {
        Self {
            id,
            success,
            declared,
        }
    }

    /// Classifies a response status.
    #[must_use]
    pub fn classify(&self, status: u16) -> ResponseClass {
        if self.success.contains(&status) {
            ResponseClass::Success
        } else if self.declared.contains(&status) {
            ResponseClass::Declared
        } else {
            ResponseClass::Unexpected
        }
    }

    /// Turns a raw response into the operation's result.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::ErrorResponse`] for declared error statuses
    /// and [`TransportError::UnexpectedStatus`] for anything else that is
    /// not a success status.
    pub fn check(&self, response: ApiResponse) -> Result<ApiResponse, TransportError> {
        match self.classify(response.status) {
            ResponseClass::Success => Ok(response),
            ResponseClass::Declared => Err(TransportError::ErrorResponse {
                operation: self.id,
                status: response.status,
                message: response.error_message(),
            }),
            ResponseClass::Unexpected => Err(TransportError::UnexpectedStatus {
                operation: self.id,
                response: Box::new(response),
            }),
        }
    }
}

/// A request for one API operation.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// The operation being invoked.
    pub operation: Operation,
    /// HTTP method.
    pub method: Method,
    /// Path below the API prefix, starting with `/`.
    pub path: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Extra request headers.
    pub headers: Vec<(&'static str, String)>,
    /// JSON body.
    pub body: Option<serde_json::Value>,
    /// Timeout of this request.
    pub timeout: Option<Duration>,
}

impl ApiRequest {
    /// Creates a request without query, headers or body.
    #[must_use]
    pub fn new(operation: Operation, method: Method, path: impl Into<String>) -> Self {
        Self {
            operation,
            method,
            path: path.into(),
            query: Vec::new(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.query.push((key.into(), value.to_string()));
        self
    }

    /// Adds a query parameter if a value is present.
    #[must_use]
    pub fn query_opt(self, key: impl Into<String>, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.query(key, value),
            None => self,
        }
    }

    /// Adds a request header.
    #[must_use]
    pub fn header(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.headers.push((name, value.into()));
        self
    }

    /// Sets a JSON body.
    ///
    /// # Errors
    ///
    /// Returns an error if the body cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, TransportError> {
        let value = serde_json::to_value(body).map_err(|source| TransportError::Encode {
            operation: self.operation.id,
            source,
        })?;
        self.body = Some(value);
        Ok(self)
    }

    /// Sets the request timeout.
    #[must_use]
    pub const fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Returns the value of a query parameter.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// A raw response from the Harbor API.
#[derive(Debug, Clone, Default)]
pub struct ApiResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates an empty response with the given status.
    #[must_use]
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a response with a JSON body.
    #[must_use]
    pub fn json_body(status: u16, body: &serde_json::Value) -> Self {
        Self {
            status,
            headers: HeaderMap::new(),
            body: body.to_string().into_bytes(),
        }
    }

    /// Adds a header; invalid names or values are ignored.
    #[must_use]
    pub fn with_header(mut self, name: &str, value: impl AsRef<str>) -> Self {
        if let (Ok(name), Ok(value)) = (
            HeaderName::from_bytes(name.as_bytes()),
            HeaderValue::from_str(value.as_ref()),
        ) {
            self.headers.insert(name, value);
        }
        self
    }

    /// Sets the collection size header.
    #[must_use]
    pub fn with_total_count(self, total: i64) -> Self {
        self.with_header(TOTAL_COUNT_HEADER, total.to_string())
    }

    /// Returns the collection size reported by a list operation.
    #[must_use]
    pub fn total_count(&self) -> Option<i64> {
        self.headers
            .get(TOTAL_COUNT_HEADER)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim().parse().ok())
    }

    /// Returns the ID at the end of the `Location` header of a create
    /// operation, e.g. `5` for `/api/v2.0/projects/5`.
    #[must_use]
    pub fn location_id(&self) -> Option<i64> {
        self.headers
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.trim_end_matches('/').rsplit('/').next())
            .and_then(|id| id.parse().ok())
    }

    /// Decodes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the body is not valid JSON for `T`.
    pub fn json<T: DeserializeOwned>(&self, operation: &'static str) -> Result<T, TransportError> {
        serde_json::from_slice(&self.body)
            .map_err(|source| TransportError::Decode { operation, source })
    }

    /// Returns the error message of a Harbor error payload, falling back to
    /// the raw body.
    #[must_use]
    pub fn error_message(&self) -> String {
        #[derive(serde::Deserialize)]
        struct Errors {
            errors: Vec<ErrorItem>,
        }

        #[derive(serde::Deserialize)]
        struct ErrorItem {
            #[serde(default)]
            message: String,
        }

        serde_json::from_slice::<Errors>(&self.body).map_or_else(
            |_| String::from_utf8_lossy(&self.body).trim().to_string(),
            |errors| {
                errors
                    .errors
                    .into_iter()
                    .map(|e| e.message)
                    .collect::<Vec<_>>()
                    .join("; ")
            },
        )
    }
}

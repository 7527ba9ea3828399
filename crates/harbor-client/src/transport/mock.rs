//! In-memory transport for testing.

use std::collections::{HashMap, VecDeque};

use async_trait::async_trait;
use parking_lot::Mutex;
use reqwest::Method;

use super::{ApiRequest, ApiResponse, Transport, TransportError};
use crate::config::AuthInfo;

/// A request seen by a [`MockTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCall {
    /// Operation ID.
    pub operation: &'static str,
    /// HTTP method.
    pub method: Method,
    /// Request path.
    pub path: String,
    /// Query parameters.
    pub query: Vec<(String, String)>,
    /// Extra headers.
    pub headers: Vec<(&'static str, String)>,
    /// JSON body.
    pub body: Option<serde_json::Value>,
}

impl RecordedCall {
    /// Returns the value of a query parameter.
    #[must_use]
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Returns the value of an extra header.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

#[derive(Debug)]
enum Reply {
    Response(ApiResponse),
    Error(TransportError),
}

#[derive(Debug, Default)]
struct State {
    replies: HashMap<String, VecDeque<Reply>>,
    calls: Vec<RecordedCall>,
}

/// Transport answering from per-operation queues of canned replies.
///
/// Responses are classified by the request's operation exactly as the
/// HTTP transport would, so a queued 404 on an operation declaring 404
/// surfaces as [`TransportError::ErrorResponse`].
#[derive(Debug, Default)]
pub struct MockTransport {
    state: Mutex<State>,
}

impl MockTransport {
    /// Creates a transport with no queued replies.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a response for the next call of an operation.
    pub fn respond(&self, operation: &str, response: ApiResponse) -> &Self {
        self.push(operation, Reply::Response(response));
        self
    }

    /// Queues a JSON response for the next call of an operation.
    pub fn respond_json(&self, operation: &str, status: u16, body: serde_json::Value) -> &Self {
        self.respond(operation, ApiResponse::json_body(status, &body))
    }

    /// Queues a transport error for the next call of an operation.
    pub fn fail(&self, operation: &str, error: TransportError) -> &Self {
        self.push(operation, Reply::Error(error));
        self
    }

    /// Returns every call seen so far, oldest first.
    #[must_use]
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.state.lock().calls.clone()
    }

    /// Returns the operation IDs of every call seen so far, oldest first.
    #[must_use]
    pub fn operations(&self) -> Vec<&'static str> {
        self.state.lock().calls.iter().map(|c| c.operation).collect()
    }

    /// Returns how many calls were seen.
    #[must_use]
    pub fn call_count(&self) -> usize {
        self.state.lock().calls.len()
    }

    fn push(&self, operation: &str, reply: Reply) {
        self.state
            .lock()
            .replies
            .entry(operation.to_string())
            .or_default()
            .push_back(reply);
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn execute(
        &self,
        request: ApiRequest,
        _auth: &AuthInfo,
    ) -> Result<ApiResponse, TransportError> {
        let operation = request.operation;
        let reply = {
            let mut state = self.state.lock();
            state.calls.push(RecordedCall {
                operation: operation.id,
                method: request.method,
                path: request.path,
                query: request.query,
                headers: request.headers,
                body: request.body,
            });
            state
                .replies
                .get_mut(operation.id)
                .and_then(VecDeque::pop_front)
        };

        match reply {
            Some(Reply::Response(response)) => operation.check(response),
            Some(Reply::Error(error)) => Err(error),
            None => Err(TransportError::NoResponse {
                operation: operation.id,
            }),
        }
    }
}

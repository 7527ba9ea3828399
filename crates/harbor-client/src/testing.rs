//! Fixtures for unit tests.

use std::sync::Arc;

use crate::config::{AuthInfo, RequestOptions};
use crate::context::ClientContext;
use crate::transport::MockTransport;

/// Returns a fresh mock transport and a context using it.
pub fn mock_context() -> (Arc<MockTransport>, ClientContext) {
    mock_context_with(RequestOptions::default())
}

/// Returns a fresh mock transport and a context using the given options.
pub fn mock_context_with(options: RequestOptions) -> (Arc<MockTransport>, ClientContext) {
    let transport = Arc::new(MockTransport::new());
    let ctx = ClientContext::new(transport.clone(), AuthInfo::basic("admin", "secret"), options);
    (transport, ctx)
}

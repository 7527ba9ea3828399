//! Request plumbing shared by the resource clients.

use std::sync::Arc;

use reqwest::Method;
use serde::de::DeserializeOwned;

use crate::config::{AuthInfo, RequestOptions};
use crate::pagination::Page;
use crate::transport::{
    ApiRequest, ApiResponse, Operation, Transport, TransportError, RESOURCE_NAME_HEADER,
};

/// Transport, credentials and options shared by every resource client.
///
/// Cloning is cheap; all clones talk through the same transport.
#[derive(Debug, Clone)]
pub struct ClientContext {
    transport: Arc<dyn Transport>,
    auth: AuthInfo,
    options: RequestOptions,
}

impl ClientContext {
    /// Creates a context.
    #[must_use]
    pub fn new(transport: Arc<dyn Transport>, auth: AuthInfo, options: RequestOptions) -> Self {
        Self {
            transport,
            auth,
            options,
        }
    }

    /// Returns the request options.
    #[must_use]
    pub const fn options(&self) -> &RequestOptions {
        &self.options
    }

    /// Starts a request carrying the per-request timeout.
    pub(crate) fn request(
        &self,
        operation: Operation,
        method: Method,
        path: impl Into<String>,
    ) -> ApiRequest {
        ApiRequest::new(operation, method, path).timeout(self.options.timeout)
    }

    /// Starts a request on a project addressed by name or by ID.
    ///
    /// `suffix` is appended to `/projects/{project}`.
    pub(crate) fn project_request(
        &self,
        operation: Operation,
        method: Method,
        project: &str,
        suffix: &str,
    ) -> ApiRequest {
        let is_name = !is_numeric_id(project);
        self.project_path_request(operation, method, project, suffix, is_name)
    }

    /// Starts a request on a project addressed by name, even an all-digit one.
    pub(crate) fn project_request_by_name(
        &self,
        operation: Operation,
        method: Method,
        name: &str,
        suffix: &str,
    ) -> ApiRequest {
        self.project_path_request(operation, method, name, suffix, true)
    }

    fn project_path_request(
        &self,
        operation: Operation,
        method: Method,
        project: &str,
        suffix: &str,
        is_name: bool,
    ) -> ApiRequest {
        self.request(
            operation,
            method,
            format!("/projects/{}{suffix}", encode_segment(project)),
        )
        .header(RESOURCE_NAME_HEADER, is_name.to_string())
    }

    /// Adds paging, sorting and filtering to a list request.
    ///
    /// An explicit `query` wins over the configured default.
    pub(crate) fn paged(&self, request: ApiRequest, page: i64, query: Option<&str>) -> ApiRequest {
        request
            .query("page", page)
            .query("page_size", self.options.page_size)
            .query_opt("sort", self.options.sort.as_deref())
            .query_opt("q", query.or(self.options.query.as_deref()))
    }

    /// Executes a request, routing failures through a domain error handler.
    ///
    /// When the handler accepts the failure, the response carried by the
    /// error is returned as if the call had succeeded.
    pub(crate) async fn send<E>(
        &self,
        request: ApiRequest,
        handle: impl FnOnce(TransportError) -> Result<(), E>,
    ) -> Result<ApiResponse, E>
    where
        E: From<TransportError>,
    {
        let operation = request.operation.id;
        match self.transport.execute(request, &self.auth).await {
            Ok(response) => Ok(response),
            Err(err) => {
                let accepted = err.unexpected_response().cloned();
                handle(err)?;
                tracing::debug!(operation, "Accepted undeclared response status");
                accepted.ok_or_else(|| TransportError::EmptyResponse { operation }.into())
            }
        }
    }

    /// Executes a request and decodes the JSON payload.
    pub(crate) async fn fetch<T, E>(
        &self,
        request: ApiRequest,
        handle: impl FnOnce(TransportError) -> Result<(), E>,
    ) -> Result<T, E>
    where
        T: DeserializeOwned,
        E: From<TransportError>,
    {
        let operation = request.operation.id;
        let response = self.send(request, handle).await?;
        Ok(response.json(operation)?)
    }

    /// Executes a list request and returns one page with the reported total.
    pub(crate) async fn fetch_page<T, E>(
        &self,
        request: ApiRequest,
        handle: impl FnOnce(TransportError) -> Result<(), E>,
    ) -> Result<Page<T>, E>
    where
        T: DeserializeOwned,
        E: From<TransportError>,
    {
        let operation = request.operation.id;
        let response = self.send(request, handle).await?;
        // Harbor answers an empty collection with an empty body on some endpoints.
        let items = if response.body.is_empty() {
            Vec::new()
        } else {
            response.json(operation)?
        };
        Ok(Page {
            items,
            total: response.total_count(),
        })
    }
}

/// Returns true if a project reference is a numeric ID rather than a name.
pub(crate) fn is_numeric_id(reference: &str) -> bool {
    !reference.is_empty() && reference.bytes().all(|b| b.is_ascii_digit())
}

/// Percent-encodes one path segment.
pub(crate) fn encode_segment(segment: &str) -> String {
    // byte_serialize encodes a literal '+' as %2B, so any '+' left is a space.
    url::form_urlencoded::byte_serialize(segment.as_bytes())
        .collect::<String>()
        .replace('+', "%20")
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::transport::MockTransport;

    const LIST_THINGS: Operation = Operation::new("listThings", &[200], &[400]);

    fn context(options: RequestOptions) -> ClientContext {
        ClientContext::new(Arc::new(MockTransport::new()), AuthInfo::None, options)
    }

    #[test]
    fn test_is_numeric_id() {
        assert!(is_numeric_id("5"));
        assert!(is_numeric_id("1024"));
        assert!(!is_numeric_id(""));
        assert!(!is_numeric_id("library"));
        assert!(!is_numeric_id("5a"));
    }

    #[test]
    fn test_encode_segment() {
        assert_eq!(encode_segment("library"), "library");
        assert_eq!(encode_segment("team/nginx"), "team%2Fnginx");
        assert_eq!(encode_segment("a b+c"), "a%20b%2Bc");
        assert_eq!(encode_segment(&encode_segment("team/nginx")), "team%252Fnginx");
    }

    #[test]
    fn test_project_request_marks_names() {
        let ctx = context(RequestOptions::default());

        let by_name = ctx.project_request(LIST_THINGS, Method::GET, "library", "/members");
        assert_eq!(by_name.path, "/projects/library/members");
        assert_eq!(by_name.headers, vec![(RESOURCE_NAME_HEADER, "true".to_string())]);

        let by_id = ctx.project_request(LIST_THINGS, Method::GET, "5", "");
        assert_eq!(by_id.path, "/projects/5");
        assert_eq!(by_id.headers, vec![(RESOURCE_NAME_HEADER, "false".to_string())]);
    }

    #[test]
    fn test_project_request_by_name_marks_digit_names() {
        let ctx = context(RequestOptions::default());

        let request = ctx.project_request_by_name(LIST_THINGS, Method::GET, "2024", "");
        assert_eq!(request.path, "/projects/2024");
        assert_eq!(request.headers, vec![(RESOURCE_NAME_HEADER, "true".to_string())]);
    }

    #[test]
    fn test_request_carries_timeout() {
        let ctx = context(RequestOptions::default().with_timeout(Duration::from_secs(3)));
        let request = ctx.request(LIST_THINGS, Method::GET, "/things");
        assert_eq!(request.timeout, Some(Duration::from_secs(3)));
    }

    #[test]
    fn test_paged_uses_options() {
        let ctx = context(
            RequestOptions::default()
                .with_page_size(25)
                .with_sort("name")
                .with_query("name=~lib"),
        );

        let request = ctx.paged(ctx.request(LIST_THINGS, Method::GET, "/things"), 2, None);
        assert_eq!(request.query_value("page"), Some("2"));
        assert_eq!(request.query_value("page_size"), Some("25"));
        assert_eq!(request.query_value("sort"), Some("name"));
        assert_eq!(request.query_value("q"), Some("name=~lib"));

        let explicit = ctx.paged(
            ctx.request(LIST_THINGS, Method::GET, "/things"),
            1,
            Some("name=nginx"),
        );
        assert_eq!(explicit.query_value("q"), Some("name=nginx"));
    }

    #[tokio::test]
    async fn test_send_returns_response_accepted_by_handler() {
        let transport = Arc::new(MockTransport::new());
        transport.respond_json("listThings", 201, serde_json::json!([1, 2]));
        let ctx = ClientContext::new(transport, AuthInfo::None, RequestOptions::default());

        let items: Vec<i64> = ctx
            .fetch(ctx.request(LIST_THINGS, Method::GET, "/things"), |err| {
                if err.is_undeclared_created() {
                    Ok(())
                } else {
                    Err(err)
                }
            })
            .await
            .unwrap();
        assert_eq!(items, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_send_accepting_error_without_response() {
        let ctx = context(RequestOptions::default());

        let err = ctx
            .send(ctx.request(LIST_THINGS, Method::GET, "/things"), |_| {
                Ok::<(), TransportError>(())
            })
            .await
            .unwrap_err();
        assert!(matches!(err, TransportError::EmptyResponse { operation: "listThings" }));
    }

    #[tokio::test]
    async fn test_fetch_page_reads_total_and_empty_body() {
        let transport = Arc::new(MockTransport::new());
        transport
            .respond(
                "listThings",
                ApiResponse::json_body(200, &serde_json::json!(["a"])).with_total_count(7),
            )
            .respond("listThings", ApiResponse::new(200));
        let ctx = ClientContext::new(transport, AuthInfo::None, RequestOptions::default());

        let page: Page<String> = ctx
            .fetch_page(ctx.request(LIST_THINGS, Method::GET, "/things"), Err)
            .await
            .unwrap();
        assert_eq!(page.items, vec!["a".to_string()]);
        assert_eq!(page.total, Some(7));

        let empty: Page<String> = ctx
            .fetch_page(ctx.request(LIST_THINGS, Method::GET, "/things"), Err)
            .await
            .unwrap();
        assert!(empty.items.is_empty());
        assert_eq!(empty.total, None);
    }
}

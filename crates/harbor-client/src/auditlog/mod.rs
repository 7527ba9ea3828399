//! Audit logs, system-wide and per project.
//!
//! Both listings honour the configured `q` filter, e.g.
//! `operation=delete,op_time=[2024-01-01 00:00:00~2024-02-01 00:00:00]`.

mod errors;

use harbor_core::AuditLog;
use reqwest::Method;

pub use errors::{handle_audit_log_errors, AuditLogError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::transport::Operation;

const LIST_AUDIT_LOGS: Operation = Operation::new("listAuditLogs", &[200], &[400, 401, 500]);
const GET_PROJECT_LOGS: Operation = Operation::new("getLogs", &[200], &[400, 401, 500]);

/// Client for the audit log endpoints.
#[derive(Debug, Clone)]
pub struct AuditLogClient {
    ctx: ClientContext,
}

impl AuditLogClient {
    /// Creates an audit log client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Lists every audit log entry visible to the caller.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_audit_logs(&self) -> Result<Vec<AuditLog>, AuditLogError> {
        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx.paged(
                ctx.request(LIST_AUDIT_LOGS, Method::GET, "/audit-logs"),
                page,
                None,
            );
            ctx.fetch_page(request, handle_audit_log_errors)
        })
        .await
    }

    /// Lists every audit log entry of a project.
    ///
    /// # Errors
    ///
    /// Returns [`AuditLogError::ProjectNotProvided`] for an empty project.
    pub async fn list_project_logs(&self, project: &str) -> Result<Vec<AuditLog>, AuditLogError> {
        if project.is_empty() {
            return Err(AuditLogError::ProjectNotProvided);
        }

        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx.paged(
                ctx.project_request(GET_PROJECT_LOGS, Method::GET, project, "/logs"),
                page,
                None,
            );
            ctx.fetch_page(request, handle_audit_log_errors)
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::RequestOptions;
    use crate::testing::{mock_context, mock_context_with};
    use crate::transport::ApiResponse;

    #[tokio::test]
    async fn test_list_audit_logs_applies_query() {
        let (transport, ctx) =
            mock_context_with(RequestOptions::default().with_query("operation=delete"));
        transport.respond(
            "listAuditLogs",
            ApiResponse::json_body(
                200,
                &json!([{ "id": 1, "username": "admin", "operation": "delete" }]),
            )
            .with_total_count(1),
        );

        let logs = AuditLogClient::new(ctx).list_audit_logs().await.unwrap();

        assert_eq!(logs[0].operation, "delete");
        assert_eq!(transport.calls()[0].query_value("q"), Some("operation=delete"));
    }

    #[tokio::test]
    async fn test_list_project_logs() {
        let (transport, ctx) = mock_context();
        transport.respond("getLogs", ApiResponse::new(200).with_total_count(0));

        let logs = AuditLogClient::new(ctx)
            .list_project_logs("example-project")
            .await
            .unwrap();

        assert!(logs.is_empty());
        assert_eq!(transport.calls()[0].path, "/projects/example-project/logs");
    }

    #[tokio::test]
    async fn test_list_project_logs_requires_project() {
        let (transport, ctx) = mock_context();

        let err = AuditLogClient::new(ctx).list_project_logs("").await.unwrap_err();

        assert!(matches!(err, AuditLogError::ProjectNotProvided));
        assert_eq!(transport.call_count(), 0);
    }
}

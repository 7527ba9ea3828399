//! Immutable tag rules of a project.

mod errors;

use harbor_core::ImmutableRule;
use reqwest::Method;

pub use errors::{handle_immutable_errors, ImmutableError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::transport::{ApiRequest, Operation};

const CREATE_RULE: Operation =
    Operation::new("createImmuRule", &[201], &[400, 401, 403, 404, 500]);
const LIST_RULES: Operation = Operation::new("listImmuRules", &[200], &[400, 401, 403, 500]);
const UPDATE_RULE: Operation =
    Operation::new("updateImmuRule", &[200], &[400, 401, 403, 404, 500]);
const DELETE_RULE: Operation =
    Operation::new("deleteImmuRule", &[200], &[400, 401, 403, 404, 500]);

/// Client for the immutable tag rule endpoints.
#[derive(Debug, Clone)]
pub struct ImmutableClient {
    ctx: ClientContext,
}

impl ImmutableClient {
    /// Creates an immutable tag rule client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Adds a rule to a project and returns its ID if Harbor reports one.
    ///
    /// # Errors
    ///
    /// Returns [`ImmutableError::IllegalFormat`] if the rule is rejected.
    pub async fn new_immutable_rule(
        &self,
        project: &str,
        rule: &ImmutableRule,
    ) -> Result<Option<i64>, ImmutableError> {
        let request = self
            .rules_request(CREATE_RULE, Method::POST, project, None)?
            .json(rule)?;
        let response = self.ctx.send(request, handle_immutable_errors).await?;
        Ok(response.location_id())
    }

    /// Lists every rule of a project.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_immutable_rules(
        &self,
        project: &str,
    ) -> Result<Vec<ImmutableRule>, ImmutableError> {
        // Validate once up front so the page loop cannot fail on it.
        self.rules_request(LIST_RULES, Method::GET, project, None)?;

        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx.paged(
                ctx.project_request(LIST_RULES, Method::GET, project, "/immutabletagrules"),
                page,
                None,
            );
            ctx.fetch_page(request, handle_immutable_errors)
        })
        .await
    }

    /// Replaces a rule, identified by its ID.
    ///
    /// # Errors
    ///
    /// Returns [`ImmutableError::IdNotExists`] if the rule does not exist.
    pub async fn update_immutable_rule(
        &self,
        project: &str,
        rule: &ImmutableRule,
    ) -> Result<(), ImmutableError> {
        let request = self
            .rules_request(UPDATE_RULE, Method::PUT, project, Some(rule.id))?
            .json(rule)?;
        self.ctx.send(request, handle_immutable_errors).await?;
        Ok(())
    }

    /// Deletes a rule.
    ///
    /// # Errors
    ///
    /// Returns [`ImmutableError::IdNotExists`] if the rule does not exist.
    pub async fn delete_immutable_rule(
        &self,
        project: &str,
        id: i64,
    ) -> Result<(), ImmutableError> {
        let request = self.rules_request(DELETE_RULE, Method::DELETE, project, Some(id))?;
        self.ctx.send(request, handle_immutable_errors).await?;
        Ok(())
    }

    fn rules_request(
        &self,
        operation: Operation,
        method: Method,
        project: &str,
        id: Option<i64>,
    ) -> Result<ApiRequest, ImmutableError> {
        if project.is_empty() {
            return Err(ImmutableError::ProjectNotProvided);
        }
        let suffix = match id {
            Some(id) if id <= 0 => return Err(ImmutableError::NotProvided),
            Some(id) => format!("/immutabletagrules/{id}"),
            None => "/immutabletagrules".to_string(),
        };
        Ok(self.ctx.project_request(operation, method, project, &suffix))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::config::RequestOptions;
    use crate::testing::{mock_context, mock_context_with};
    use crate::transport::ApiResponse;

    fn rules(ids: std::ops::RangeInclusive<i64>, total: i64) -> ApiResponse {
        let entries: Vec<_> = ids.map(|id| json!({ "id": id, "action": "immutable" })).collect();
        ApiResponse::json_body(200, &json!(entries)).with_total_count(total)
    }

    #[tokio::test]
    async fn test_list_rules_across_pages() {
        let (transport, ctx) = mock_context_with(RequestOptions::default().with_page_size(2));
        transport
            .respond("listImmuRules", rules(1..=2, 3))
            .respond("listImmuRules", rules(3..=3, 3));

        let listed = ImmutableClient::new(ctx)
            .list_immutable_rules("library")
            .await
            .unwrap();

        assert_eq!(listed.iter().map(|r| r.id).collect::<Vec<_>>(), vec![1, 2, 3]);
        let calls = transport.calls();
        assert_eq!(calls.len(), 2);
        assert_eq!(calls[1].query_value("page"), Some("2"));
        assert_eq!(calls[1].path, "/projects/library/immutabletagrules");
    }

    #[tokio::test]
    async fn test_new_rule() {
        let (transport, ctx) = mock_context();
        transport.respond(
            "createImmuRule",
            ApiResponse::new(201)
                .with_header("Location", "/api/v2.0/projects/5/immutabletagrules/3"),
        );

        let id = ImmutableClient::new(ctx)
            .new_immutable_rule("5", &ImmutableRule::matching("**", "v*"))
            .await
            .unwrap();

        assert_eq!(id, Some(3));
        let body = transport.calls()[0].body.clone().unwrap();
        assert_eq!(body["tag_selectors"][0]["pattern"], "v*");
    }

    #[tokio::test]
    async fn test_delete_unknown_rule() {
        let (transport, ctx) = mock_context();
        transport.respond("deleteImmuRule", ApiResponse::new(404));

        let err = ImmutableClient::new(ctx)
            .delete_immutable_rule("library", 3)
            .await
            .unwrap_err();
        assert!(matches!(err, ImmutableError::IdNotExists));
    }

    #[tokio::test]
    async fn test_preconditions() {
        let (transport, ctx) = mock_context();
        let client = ImmutableClient::new(ctx);

        assert!(matches!(
            client.list_immutable_rules("").await,
            Err(ImmutableError::ProjectNotProvided)
        ));
        assert!(matches!(
            client.update_immutable_rule("library", &ImmutableRule::default()).await,
            Err(ImmutableError::NotProvided)
        ));
        assert_eq!(transport.call_count(), 0);
    }
}

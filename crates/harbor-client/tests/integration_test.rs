//! Integration tests for the resource clients.
//!
//! Every test builds its own mock transport and client, queues the replies
//! Harbor would send, and asserts both the result and the exact calls made.

use std::sync::Arc;

use harbor_client::api::{MemberApi, MetadataApi, ProjectApi};
use harbor_client::{
    handle_metadata_errors, handle_project_errors, handle_quota_errors, handle_registry_errors,
    ApiResponse, AuthInfo, ClientConfig, HarborClient, MemberError, MockTransport, ProjectError,
    QuotaError, RegistryError, RequestOptions, RetentionError, TransportError,
};
use harbor_core::{MemberRef, MetadataKey, Project};
use reqwest::Method;
use serde_json::{json, Value};

/// Creates a fresh mock transport and a client using it.
fn harbor(options: RequestOptions) -> (Arc<MockTransport>, HarborClient) {
    let transport = Arc::new(MockTransport::new());
    let config = ClientConfig::new("https://harbor.example.com")
        .with_auth(AuthInfo::basic("admin", "Harbor12345"))
        .with_options(options);
    let client = HarborClient::with_transport(transport.clone(), config);
    (transport, client)
}

fn declared(operation: &'static str, status: u16) -> TransportError {
    TransportError::ErrorResponse {
        operation,
        status,
        message: format!("{operation} failed"),
    }
}

fn undeclared(operation: &'static str, status: u16) -> TransportError {
    TransportError::UnexpectedStatus {
        operation,
        response: Box::new(ApiResponse::new(status)),
    }
}

fn stored_project() -> Value {
    json!({ "project_id": 5, "name": "example-project" })
}

fn project(id: i64) -> Project {
    Project {
        project_id: id,
        name: "example-project".to_string(),
        ..Project::default()
    }
}

fn listed(entries: Value) -> ApiResponse {
    let total = entries.as_array().map_or(0, Vec::len);
    ApiResponse::json_body(200, &entries).with_total_count(i64::try_from(total).unwrap())
}

// ============================================================================
// Error normalization
// ============================================================================

#[test]
fn test_project_status_table() {
    let err = |status| handle_project_errors(declared("getProject", status)).unwrap_err();

    assert!(matches!(err(400), ProjectError::IllegalIdFormat));
    assert!(matches!(err(401), ProjectError::Unauthorized));
    assert!(matches!(err(403), ProjectError::NoPermission));
    assert!(matches!(err(404), ProjectError::UnknownResource));
    assert!(matches!(err(500), ProjectError::InternalErrors));
}

#[test]
fn test_sentinels_win_over_status_table() {
    assert!(matches!(
        handle_project_errors(declared("deleteProject", 404)),
        Err(ProjectError::IdNotExists)
    ));
    assert!(matches!(
        handle_project_errors(declared("updateProject", 404)),
        Err(ProjectError::IdNotExists)
    ));
    assert!(matches!(
        handle_project_errors(declared("createProject", 409)),
        Err(ProjectError::NameAlreadyExists)
    ));
    assert!(matches!(
        handle_registry_errors(declared("deleteRegistry", 412)),
        Err(RegistryError::InUse)
    ));
}

#[test]
fn test_undeclared_created_is_success_where_quirk_applies() {
    assert!(handle_project_errors(undeclared("updateProject", 201)).is_ok());
    assert!(handle_metadata_errors(undeclared("deleteProjectMetadata", 201)).is_ok());
    assert!(matches!(
        handle_quota_errors(undeclared("updateQuota", 201)),
        Err(QuotaError::Transport(_))
    ));
}

#[test]
fn test_unrecognised_errors_pass_through() {
    let err = handle_project_errors(undeclared("getProject", 418)).unwrap_err();
    match err {
        ProjectError::Transport(TransportError::UnexpectedStatus {
            operation,
            response,
        }) => {
            assert_eq!(operation, "getProject");
            assert_eq!(response.status, 418);
        }
        other => panic!("expected passthrough, got {other:?}"),
    }

    let err = handle_project_errors(TransportError::NoResponse {
        operation: "getProject",
    })
    .unwrap_err();
    assert!(matches!(
        err,
        ProjectError::Transport(TransportError::NoResponse { operation: "getProject" })
    ));
}

// ============================================================================
// Guarded mutations
// ============================================================================

#[tokio::test]
async fn test_delete_with_foreign_id_is_a_mismatch() {
    let (transport, client) = harbor(RequestOptions::default());
    transport.respond_json("getProject", 200, stored_project());

    let err = client.delete_project(&project(100)).await.unwrap_err();

    assert!(matches!(
        err,
        ProjectError::Mismatch { ref name, id: 100 } if name == "example-project"
    ));
    assert_eq!(transport.operations(), vec!["getProject"]);
}

#[tokio::test]
async fn test_update_of_unknown_project_is_a_mismatch() {
    let (transport, client) = harbor(RequestOptions::default());
    transport.respond("getProject", ApiResponse::new(404));

    let err = client.update_project(&project(5), None).await.unwrap_err();

    assert!(matches!(err, ProjectError::Mismatch { .. }));
    assert_eq!(transport.operations(), vec!["getProject"]);
}

#[tokio::test]
async fn test_delete_uses_resolved_id() {
    let (transport, client) = harbor(RequestOptions::default());
    transport
        .respond_json("getProject", 200, stored_project())
        .respond("deleteProject", ApiResponse::new(200));

    client.delete_project(&project(5)).await.unwrap();

    let calls = transport.calls();
    assert_eq!(transport.operations(), vec!["getProject", "deleteProject"]);
    assert_eq!(calls[1].method, Method::DELETE);
    assert_eq!(calls[1].path, "/projects/5");
}

// ============================================================================
// Member resolution
// ============================================================================

#[tokio::test]
async fn test_resolve_member_by_name() {
    let (transport, client) = harbor(RequestOptions::default());
    transport.respond(
        "listProjectMembers",
        listed(json!([
            { "id": 3, "entity_type": "g", "entity_name": "foobar" },
            { "id": 7, "entity_type": "u", "entity_name": "foobar" },
        ])),
    );

    let id = client
        .members()
        .resolve_member_id("example-project", &MemberRef::user("foobar"))
        .await
        .unwrap();

    assert_eq!(id, 7);
    assert_eq!(transport.calls()[0].query_value("entityname"), Some("foobar"));
}

#[tokio::test]
async fn test_resolve_absent_member() {
    let (transport, client) = harbor(RequestOptions::default());
    transport
        .respond("listProjectMembers", listed(json!([])))
        .respond("listProjectMembers", listed(json!([])));

    let user = client
        .members()
        .resolve_member_id("example-project", &MemberRef::user("nobody"))
        .await
        .unwrap_err();
    let group = client
        .members()
        .resolve_member_id("example-project", &MemberRef::group("nobody"))
        .await
        .unwrap_err();

    assert!(matches!(user, MemberError::UserIsNoMember { .. }));
    assert!(matches!(group, MemberError::NoMemberFound { .. }));
}

#[tokio::test]
async fn test_remove_member_guards_then_resolves() {
    let (transport, client) = harbor(RequestOptions::default());
    transport
        .respond_json("getProject", 200, stored_project())
        .respond(
            "listProjectMembers",
            listed(json!([{ "id": 7, "entity_type": "u", "entity_name": "foobar" }])),
        )
        .respond("deleteProjectMember", ApiResponse::new(200));

    client
        .delete_project_member(&project(5), &MemberRef::user("foobar"))
        .await
        .unwrap();

    assert_eq!(
        transport.operations(),
        vec!["getProject", "listProjectMembers", "deleteProjectMember"]
    );
    assert_eq!(transport.calls()[2].path, "/projects/5/members/7");
}

// ============================================================================
// Metadata update
// ============================================================================

#[tokio::test]
async fn test_metadata_update_reads_deletes_and_recreates() {
    let (transport, client) = harbor(RequestOptions::default());
    transport
        .respond_json("getProjectMetadata", 200, json!({ "auto_scan": "true" }))
        .respond("deleteProjectMetadata", ApiResponse::new(200))
        .respond("addProjectMetadatas", ApiResponse::new(200))
        .respond_json("getProjectMetadata", 200, json!({ "auto_scan": "false" }));

    client
        .update_metadata("example-project", MetadataKey::AutoScan, "false")
        .await
        .unwrap();
    let value = client
        .get_metadata_value("example-project", MetadataKey::AutoScan)
        .await
        .unwrap();

    assert_eq!(value, "false");
    let calls = transport.calls();
    let methods: Vec<_> = calls.iter().take(3).map(|c| c.method.clone()).collect();
    assert_eq!(methods, vec![Method::GET, Method::DELETE, Method::POST]);
    assert_eq!(calls[2].body, Some(json!({ "auto_scan": "false" })));
}

#[tokio::test]
async fn test_metadata_update_stops_when_read_fails() {
    let (transport, client) = harbor(RequestOptions::default());
    transport.respond("getProjectMetadata", ApiResponse::new(404));

    let result = client
        .update_metadata("example-project", MetadataKey::AutoScan, "false")
        .await;

    assert!(result.is_err());
    assert_eq!(transport.operations(), vec!["getProjectMetadata"]);
}

// ============================================================================
// Pagination
// ============================================================================

#[tokio::test]
async fn test_pagination_reads_until_total() {
    let (transport, client) = harbor(RequestOptions::default().with_page_size(10));
    for page in 0..3 {
        let size = if page == 2 { 5 } else { 10 };
        let entries: Vec<_> = (0..size)
            .map(|i| json!({ "id": page * 10 + i + 1, "ref": { "id": 1 } }))
            .collect();
        transport.respond(
            "listQuotas",
            ApiResponse::json_body(200, &json!(entries)).with_total_count(25),
        );
    }

    let quotas = client.quotas().list_quotas(None, None).await.unwrap();

    assert_eq!(quotas.len(), 25);
    assert!(quotas.windows(2).all(|w| w[0].id < w[1].id));
    let pages: Vec<_> = transport
        .calls()
        .iter()
        .map(|c| c.query_value("page").map(str::to_string))
        .collect();
    assert_eq!(
        pages,
        vec![Some("1".into()), Some("2".into()), Some("3".into())]
    );
}

#[tokio::test]
async fn test_pagination_of_empty_collection() {
    let (transport, client) = harbor(RequestOptions::default());
    transport.respond("listQuotas", listed(json!([])));

    let quotas = client.quotas().list_quotas(None, None).await.unwrap();

    assert!(quotas.is_empty());
    assert_eq!(transport.call_count(), 1);
}

// ============================================================================
// Quota and retention resolution
// ============================================================================

#[tokio::test]
async fn test_quota_by_project_reference() {
    let (transport, client) = harbor(RequestOptions::default());
    let quotas = json!([
        { "id": 10, "ref": { "id": 1 } },
        { "id": 20, "ref": { "id": 2 } },
        { "id": 30, "ref": { "id": 3 } },
    ]);
    transport
        .respond("listQuotas", listed(quotas.clone()))
        .respond("listQuotas", listed(quotas));

    let found = client.quotas().get_quota_by_project_id(2).await.unwrap();
    let missing = client.quotas().get_quota_by_project_id(99).await.unwrap_err();

    assert_eq!(found.id, 20);
    assert!(matches!(missing, QuotaError::RefNotFound { project_id: 99 }));
}

#[tokio::test]
async fn test_retention_follows_project_metadata() {
    let (transport, client) = harbor(RequestOptions::default());
    transport
        .respond_json("getProjectMetadata", 200, json!({ "retention_id": "7" }))
        .respond_json("getRetention", 200, json!({ "id": 7 }));

    let policy = client
        .retention()
        .get_retention_policy_by_project("example-project")
        .await
        .unwrap();

    assert_eq!(policy.id, 7);
    assert_eq!(transport.operations(), vec!["getProjectMetadata", "getRetention"]);
    assert_eq!(transport.calls()[1].path, "/retentions/7");
}

#[tokio::test]
async fn test_retention_with_unparsable_id_makes_no_policy_call() {
    let (transport, client) = harbor(RequestOptions::default());
    transport.respond_json(
        "getProjectMetadata",
        200,
        json!({ "retention_id": "not-a-number" }),
    );

    let err = client
        .retention()
        .get_retention_policy_by_project("example-project")
        .await
        .unwrap_err();

    assert!(matches!(err, RetentionError::InvalidRetentionId { .. }));
    assert_eq!(transport.operations(), vec!["getProjectMetadata"]);
}

// ============================================================================
// Preconditions
// ============================================================================

#[tokio::test]
async fn test_missing_arguments_never_reach_transport() {
    let (transport, client) = harbor(RequestOptions::default());

    assert!(matches!(
        client.delete_project(&Project::default()).await,
        Err(ProjectError::NotProvided)
    ));
    assert!(matches!(
        client.update_project(&Project::default(), Some(1024)).await,
        Err(ProjectError::NotProvided)
    ));
    assert!(matches!(
        client
            .add_project_member(&project(5), &MemberRef::user(""), 1)
            .await,
        Err(MemberError::NotProvided)
    ));
    assert!(client
        .delete_metadata("", MetadataKey::AutoScan)
        .await
        .is_err());
    assert!(client.users().get_user_by_id(0).await.is_err());
    assert!(client.registries().get_registry_by_id(0).await.is_err());

    assert_eq!(transport.call_count(), 0);
}

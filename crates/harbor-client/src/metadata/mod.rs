//! Project metadata.
//!
//! Harbor has no reliable in-place update for a metadata key, so
//! [`MetadataClient::update_metadata`] reads the key, deletes it and adds
//! it again. The sequence is not atomic: if the final add fails the key is
//! left unset.

mod errors;

use std::collections::BTreeMap;

use harbor_core::MetadataKey;
use reqwest::Method;

pub use errors::{handle_metadata_errors, MetadataError};

use crate::context::{encode_segment, ClientContext};
use crate::transport::{ApiRequest, Operation};

const ADD_PROJECT_METADATAS: Operation = Operation::new(
    "addProjectMetadatas",
    &[200],
    &[400, 401, 403, 404, 409, 415, 500],
);
const GET_PROJECT_METADATA: Operation =
    Operation::new("getProjectMetadata", &[200], &[400, 401, 403, 404, 500]);
const LIST_PROJECT_METADATAS: Operation =
    Operation::new("listProjectMetadatas", &[200], &[401, 403, 404, 500]);
const DELETE_PROJECT_METADATA: Operation =
    Operation::new("deleteProjectMetadata", &[200], &[400, 401, 403, 404, 500]);

/// Client for the project metadata endpoints.
#[derive(Debug, Clone)]
pub struct MetadataClient {
    ctx: ClientContext,
}

impl MetadataClient {
    /// Creates a metadata client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Sets a key that is not yet present on the project.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::KeyAlreadyExists`] if the key is set.
    pub async fn add_metadata(
        &self,
        project: &str,
        key: MetadataKey,
        value: &str,
    ) -> Result<(), MetadataError> {
        let body = BTreeMap::from([(key.as_str(), value)]);
        let request = self
            .project_request(ADD_PROJECT_METADATAS, Method::POST, project, None)?
            .json(&body)?;
        self.ctx.send(request, handle_metadata_errors).await?;
        Ok(())
    }

    /// Returns the value of one key.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::Undefined`] if Harbor answers without a
    /// value for the key.
    pub async fn get_metadata_value(
        &self,
        project: &str,
        key: MetadataKey,
    ) -> Result<String, MetadataError> {
        let request = self.project_request(GET_PROJECT_METADATA, Method::GET, project, Some(key))?;
        let mut values: BTreeMap<String, String> =
            self.ctx.fetch(request, handle_metadata_errors).await?;
        values
            .remove(key.as_str())
            .ok_or(MetadataError::Undefined { key })
    }

    /// Returns every key set on the project.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::NotFound`] if the project does not exist.
    pub async fn list_metadata(
        &self,
        project: &str,
    ) -> Result<BTreeMap<String, String>, MetadataError> {
        let request = self.project_request(LIST_PROJECT_METADATAS, Method::GET, project, None)?;
        self.ctx.fetch(request, handle_metadata_errors).await
    }

    /// Replaces the value of a key by reading, deleting and re-adding it.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing step. A failure of the read
    /// leaves the key untouched; a failure of the re-add leaves it unset.
    pub async fn update_metadata(
        &self,
        project: &str,
        key: MetadataKey,
        value: &str,
    ) -> Result<(), MetadataError> {
        let previous = self.get_metadata_value(project, key).await?;
        tracing::debug!(project, %key, %previous, "Read metadata before update");

        self.delete_metadata(project, key).await?;
        tracing::debug!(project, %key, "Deleted metadata before update");

        self.add_metadata(project, key, value).await?;
        tracing::debug!(project, %key, value, "Re-added metadata");
        Ok(())
    }

    /// Removes a key from the project.
    ///
    /// # Errors
    ///
    /// Returns [`MetadataError::NotFound`] if the project or key is unknown.
    pub async fn delete_metadata(
        &self,
        project: &str,
        key: MetadataKey,
    ) -> Result<(), MetadataError> {
        let request =
            self.project_request(DELETE_PROJECT_METADATA, Method::DELETE, project, Some(key))?;
        self.ctx.send(request, handle_metadata_errors).await?;
        Ok(())
    }

    fn project_request(
        &self,
        operation: Operation,
        method: Method,
        project: &str,
        key: Option<MetadataKey>,
    ) -> Result<ApiRequest, MetadataError> {
        if project.is_empty() {
            return Err(MetadataError::ProjectNotProvided);
        }
        let suffix = key.map_or_else(
            || "/metadatas".to_string(),
            |key| format!("/metadatas/{}", encode_segment(key.as_str())),
        );
        Ok(self.ctx.project_request(operation, method, project, &suffix))
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::testing::mock_context;
    use crate::transport::ApiResponse;

    #[tokio::test]
    async fn test_update_reads_deletes_then_adds() {
        let (transport, ctx) = mock_context();
        transport
            .respond_json("getProjectMetadata", 200, json!({ "auto_scan": "true" }))
            .respond("deleteProjectMetadata", ApiResponse::new(200))
            .respond("addProjectMetadatas", ApiResponse::new(200))
            .respond_json("getProjectMetadata", 200, json!({ "auto_scan": "false" }));
        let client = MetadataClient::new(ctx);

        client
            .update_metadata("example-project", MetadataKey::AutoScan, "false")
            .await
            .unwrap();

        assert_eq!(
            transport.operations(),
            vec!["getProjectMetadata", "deleteProjectMetadata", "addProjectMetadatas"]
        );
        let calls = transport.calls();
        assert_eq!(calls[1].method, Method::DELETE);
        assert_eq!(calls[1].path, "/projects/example-project/metadatas/auto_scan");
        assert_eq!(calls[2].method, Method::POST);
        assert_eq!(calls[2].body, Some(json!({ "auto_scan": "false" })));

        let value = client
            .get_metadata_value("example-project", MetadataKey::AutoScan)
            .await
            .unwrap();
        assert_eq!(value, "false");
    }

    #[tokio::test]
    async fn test_update_stops_when_read_fails() {
        let (transport, ctx) = mock_context();
        transport.respond("getProjectMetadata", ApiResponse::new(404));

        let err = MetadataClient::new(ctx)
            .update_metadata("example-project", MetadataKey::Severity, "high")
            .await
            .unwrap_err();

        assert!(matches!(err, MetadataError::NotFound));
        assert_eq!(transport.operations(), vec!["getProjectMetadata"]);
    }

    #[tokio::test]
    async fn test_update_stops_when_delete_fails() {
        let (transport, ctx) = mock_context();
        transport
            .respond_json("getProjectMetadata", 200, json!({ "severity": "low" }))
            .respond("deleteProjectMetadata", ApiResponse::new(403));

        let err = MetadataClient::new(ctx)
            .update_metadata("example-project", MetadataKey::Severity, "high")
            .await
            .unwrap_err();

        assert!(matches!(err, MetadataError::Forbidden));
        assert_eq!(transport.call_count(), 2);
    }

    #[tokio::test]
    async fn test_update_leaves_key_unset_when_add_fails() {
        let (transport, ctx) = mock_context();
        transport
            .respond_json("getProjectMetadata", 200, json!({ "auto_scan": "true" }))
            .respond("deleteProjectMetadata", ApiResponse::new(200))
            .respond("addProjectMetadatas", ApiResponse::new(500));

        let err = MetadataClient::new(ctx)
            .update_metadata("example-project", MetadataKey::AutoScan, "false")
            .await
            .unwrap_err();

        assert!(matches!(err, MetadataError::InternalErrors));
        assert_eq!(
            transport.operations(),
            vec!["getProjectMetadata", "deleteProjectMetadata", "addProjectMetadatas"]
        );
    }

    #[tokio::test]
    async fn test_undefined_value() {
        let (transport, ctx) = mock_context();
        transport.respond_json("getProjectMetadata", 200, json!({}));

        let err = MetadataClient::new(ctx)
            .get_metadata_value("5", MetadataKey::RetentionId)
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            MetadataError::Undefined {
                key: MetadataKey::RetentionId
            }
        ));
    }

    #[tokio::test]
    async fn test_add_existing_key() {
        let (transport, ctx) = mock_context();
        transport.respond("addProjectMetadatas", ApiResponse::new(409));

        let err = MetadataClient::new(ctx)
            .add_metadata("example-project", MetadataKey::Public, "true")
            .await
            .unwrap_err();
        assert!(matches!(err, MetadataError::KeyAlreadyExists));
    }

    #[tokio::test]
    async fn test_list_metadata() {
        let (transport, ctx) = mock_context();
        transport.respond_json(
            "listProjectMetadatas",
            200,
            json!({ "public": "true", "auto_scan": "false" }),
        );

        let values = MetadataClient::new(ctx)
            .list_metadata("example-project")
            .await
            .unwrap();
        assert_eq!(values.get("public").map(String::as_str), Some("true"));
        assert_eq!(values.len(), 2);
    }

    #[tokio::test]
    async fn test_empty_project_never_reaches_transport() {
        let (transport, ctx) = mock_context();

        let err = MetadataClient::new(ctx)
            .update_metadata("", MetadataKey::AutoScan, "true")
            .await
            .unwrap_err();

        assert!(matches!(err, MetadataError::ProjectNotProvided));
        assert_eq!(transport.call_count(), 0);
    }
}

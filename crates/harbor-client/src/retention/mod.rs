//! Tag retention policies.
//!
//! A project points at its retention policy through the `retention_id`
//! metadata key, so looking up the policy of a project takes two calls.

mod errors;

use harbor_core::{MetadataKey, RetentionPolicy};
use reqwest::Method;

pub use errors::{handle_retention_errors, RetentionError};

use crate::context::ClientContext;
use crate::metadata::MetadataClient;
use crate::transport::Operation;

const CREATE_RETENTION: Operation =
    Operation::new("createRetention", &[201], &[400, 401, 403, 500]);
const GET_RETENTION: Operation = Operation::new("getRetention", &[200], &[401, 403, 404, 500]);
const UPDATE_RETENTION: Operation =
    Operation::new("updateRetention", &[200], &[400, 401, 403, 404, 500]);
const DELETE_RETENTION: Operation =
    Operation::new("deleteRetention", &[200], &[400, 401, 403, 404, 500]);

/// Client for the retention endpoints.
#[derive(Debug, Clone)]
pub struct RetentionClient {
    ctx: ClientContext,
    metadata: MetadataClient,
}

impl RetentionClient {
    /// Creates a retention client.
    #[must_use]
    pub fn new(ctx: ClientContext) -> Self {
        Self {
            metadata: MetadataClient::new(ctx.clone()),
            ctx,
        }
    }

    /// Creates a policy and returns its ID if Harbor reports one.
    ///
    /// Harbor binds the policy to the project named in its scope.
    ///
    /// # Errors
    ///
    /// Returns [`RetentionError::IllegalFormat`] if the policy is rejected.
    pub async fn new_retention_policy(
        &self,
        policy: &RetentionPolicy,
    ) -> Result<Option<i64>, RetentionError> {
        let request = self
            .ctx
            .request(CREATE_RETENTION, Method::POST, "/retentions")
            .json(policy)?;
        let response = self.ctx.send(request, handle_retention_errors).await?;
        Ok(response.location_id())
    }

    /// Fetches a policy by ID.
    ///
    /// # Errors
    ///
    /// Returns [`RetentionError::NotFound`] if it does not exist.
    pub async fn get_retention_policy_by_id(
        &self,
        id: i64,
    ) -> Result<RetentionPolicy, RetentionError> {
        let request = self
            .ctx
            .request(GET_RETENTION, Method::GET, retention_path(id)?);
        self.ctx.fetch(request, handle_retention_errors).await
    }

    /// Fetches the policy bound to a project.
    ///
    /// # Errors
    ///
    /// Returns [`RetentionError::Metadata`] if the project has no
    /// `retention_id`, and [`RetentionError::InvalidRetentionId`] if the
    /// stored value is not an integer; no policy is fetched in either case.
    pub async fn get_retention_policy_by_project(
        &self,
        project: &str,
    ) -> Result<RetentionPolicy, RetentionError> {
        let value = self
            .metadata
            .get_metadata_value(project, MetadataKey::RetentionId)
            .await?;
        let id = value
            .parse::<i64>()
            .map_err(|source| RetentionError::InvalidRetentionId {
                value: value.clone(),
                source,
            })?;
        tracing::debug!(project, retention_id = id, "Resolved retention policy ID");

        self.get_retention_policy_by_id(id).await
    }

    /// Replaces a policy.
    ///
    /// # Errors
    ///
    /// Returns [`RetentionError::IdNotExists`] if the policy does not exist.
    pub async fn update_retention_policy(
        &self,
        policy: &RetentionPolicy,
    ) -> Result<(), RetentionError> {
        let request = self
            .ctx
            .request(UPDATE_RETENTION, Method::PUT, retention_path(policy.id)?)
            .json(policy)?;
        self.ctx.send(request, handle_retention_errors).await?;
        Ok(())
    }

    /// Deletes a policy.
    ///
    /// # Errors
    ///
    /// Returns [`RetentionError::IdNotExists`] if the policy does not exist.
    pub async fn delete_retention_policy(&self, id: i64) -> Result<(), RetentionError> {
        let request = self
            .ctx
            .request(DELETE_RETENTION, Method::DELETE, retention_path(id)?);
        self.ctx.send(request, handle_retention_errors).await?;
        Ok(())
    }
}

fn retention_path(id: i64) -> Result<String, RetentionError> {
    if id <= 0 {
        return Err(RetentionError::NotProvided);
    }
    Ok(format!("/retentions/{id}"))
}

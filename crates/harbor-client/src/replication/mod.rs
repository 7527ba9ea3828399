//! Replication policies and executions.

mod errors;

use harbor_core::{ReplicationExecution, ReplicationPolicy, StartReplicationExecution};
use reqwest::Method;

pub use errors::{handle_replication_errors, ReplicationError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::transport::Operation;

const CREATE_POLICY: Operation =
    Operation::new("createReplicationPolicy", &[201], &[400, 401, 403, 409, 500]);
const GET_POLICY: Operation =
    Operation::new("getReplicationPolicy", &[200], &[401, 403, 404, 500]);
const LIST_POLICIES: Operation =
    Operation::new("listReplicationPolicies", &[200], &[401, 403, 500]);
const UPDATE_POLICY: Operation = Operation::new(
    "updateReplicationPolicy",
    &[200],
    &[400, 401, 403, 404, 409, 500],
);
const DELETE_POLICY: Operation = Operation::new(
    "deleteReplicationPolicy",
    &[200],
    &[400, 401, 403, 404, 412, 500],
);
const START_REPLICATION: Operation =
    Operation::new("startReplication", &[201], &[400, 401, 403, 404, 412, 500]);
const LIST_EXECUTIONS: Operation =
    Operation::new("listReplicationExecutions", &[200], &[401, 403, 500]);
const GET_EXECUTION: Operation =
    Operation::new("getReplicationExecution", &[200], &[401, 403, 404, 500]);
const STOP_REPLICATION: Operation =
    Operation::new("stopReplication", &[200], &[401, 403, 404, 500]);

/// Client for the replication endpoints.
#[derive(Debug, Clone)]
pub struct ReplicationClient {
    ctx: ClientContext,
}

impl ReplicationClient {
    /// Creates a replication client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Creates a policy and returns it as stored by Harbor.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::NameAlreadyExists`] if the name is taken.
    pub async fn new_replication_policy(
        &self,
        policy: &ReplicationPolicy,
    ) -> Result<ReplicationPolicy, ReplicationError> {
        if policy.name.is_empty() {
            return Err(ReplicationError::NotProvided);
        }

        let request = self
            .ctx
            .request(CREATE_POLICY, Method::POST, "/replication/policies")
            .json(policy)?;
        self.ctx.send(request, handle_replication_errors).await?;

        self.get_replication_policy_by_name(&policy.name).await
    }

    /// Fetches a policy by ID.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::NotFound`] if it does not exist.
    pub async fn get_replication_policy_by_id(
        &self,
        id: i64,
    ) -> Result<ReplicationPolicy, ReplicationError> {
        let request = self
            .ctx
            .request(GET_POLICY, Method::GET, policy_path(id)?);
        self.ctx.fetch(request, handle_replication_errors).await
    }

    /// Fetches the single policy with exactly this name.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::PolicyNotFound`] if none matches and
    /// [`ReplicationError::MultipleResults`] if several do.
    pub async fn get_replication_policy_by_name(
        &self,
        name: &str,
    ) -> Result<ReplicationPolicy, ReplicationError> {
        if name.is_empty() {
            return Err(ReplicationError::NotProvided);
        }

        let mut matches: Vec<_> = self
            .list(Some(name))
            .await?
            .into_iter()
            .filter(|policy| policy.name == name)
            .collect();
        match matches.len() {
            0 => Err(ReplicationError::PolicyNotFound {
                name: name.to_string(),
            }),
            1 => Ok(matches.remove(0)),
            count => Err(ReplicationError::MultipleResults {
                name: name.to_string(),
                count,
            }),
        }
    }

    /// Lists all policies.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_replication_policies(
        &self,
    ) -> Result<Vec<ReplicationPolicy>, ReplicationError> {
        self.list(None).await
    }

    /// Updates a policy.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::Mismatch`] if `policy` does not match the
    /// policy stored under its name.
    pub async fn update_replication_policy(
        &self,
        policy: &ReplicationPolicy,
    ) -> Result<(), ReplicationError> {
        let id = self.guard(policy).await?;

        let request = self
            .ctx
            .request(UPDATE_POLICY, Method::PUT, policy_path(id)?)
            .json(policy)?;
        self.ctx.send(request, handle_replication_errors).await?;
        Ok(())
    }

    /// Deletes a policy.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::Mismatch`] if `policy` does not match the
    /// stored policy, or [`ReplicationError::PreconditionFailed`] while
    /// executions are running.
    pub async fn delete_replication_policy(
        &self,
        policy: &ReplicationPolicy,
    ) -> Result<(), ReplicationError> {
        let id = self.guard(policy).await?;

        let request = self
            .ctx
            .request(DELETE_POLICY, Method::DELETE, policy_path(id)?);
        self.ctx.send(request, handle_replication_errors).await?;
        tracing::debug!(policy = %policy.name, id, "Deleted replication policy");
        Ok(())
    }

    /// Starts a manual execution of a policy.
    ///
    /// Returns the execution ID if Harbor reports one.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::PreconditionFailed`] if the policy is
    /// disabled.
    pub async fn trigger_replication_execution(
        &self,
        policy_id: i64,
    ) -> Result<Option<i64>, ReplicationError> {
        if policy_id <= 0 {
            return Err(ReplicationError::NotProvided);
        }

        let request = self
            .ctx
            .request(START_REPLICATION, Method::POST, "/replication/executions")
            .json(&StartReplicationExecution { policy_id })?;
        let response = self.ctx.send(request, handle_replication_errors).await?;
        Ok(response.location_id())
    }

    /// Lists the executions of a policy.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_replication_executions(
        &self,
        policy_id: i64,
    ) -> Result<Vec<ReplicationExecution>, ReplicationError> {
        if policy_id <= 0 {
            return Err(ReplicationError::NotProvided);
        }

        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx
                .paged(
                    ctx.request(LIST_EXECUTIONS, Method::GET, "/replication/executions"),
                    page,
                    None,
                )
                .query("policy_id", policy_id);
            ctx.fetch_page(request, handle_replication_errors)
        })
        .await
    }

    /// Fetches an execution.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::NotFound`] if it does not exist.
    pub async fn get_replication_execution(
        &self,
        id: i64,
    ) -> Result<ReplicationExecution, ReplicationError> {
        let request = self
            .ctx
            .request(GET_EXECUTION, Method::GET, execution_path(id)?);
        self.ctx.fetch(request, handle_replication_errors).await
    }

    /// Stops a running execution.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::NotFound`] if it does not exist.
    pub async fn stop_replication_execution(&self, id: i64) -> Result<(), ReplicationError> {
        let request = self
            .ctx
            .request(STOP_REPLICATION, Method::PUT, execution_path(id)?);
        self.ctx.send(request, handle_replication_errors).await?;
        Ok(())
    }

    /// Resolves the stored ID of a caller-supplied policy.
    ///
    /// # Errors
    ///
    /// Returns [`ReplicationError::Mismatch`] if the name resolves to nothing
    /// or to a policy with a different ID.
    pub async fn guard(&self, policy: &ReplicationPolicy) -> Result<i64, ReplicationError> {
        let mismatch = || ReplicationError::Mismatch {
            name: policy.name.clone(),
            id: policy.id,
        };
        let stored = match self.get_replication_policy_by_name(&policy.name).await {
            Ok(stored) => stored,
            Err(ReplicationError::PolicyNotFound { .. } | ReplicationError::NotFound) => {
                return Err(mismatch())
            }
            Err(err) => return Err(err),
        };

        tracing::debug!(policy = %policy.name, stored = stored.id, "Resolved replication policy");
        if stored.id == policy.id {
            Ok(stored.id)
        } else {
            Err(mismatch())
        }
    }

    async fn list(&self, name: Option<&str>) -> Result<Vec<ReplicationPolicy>, ReplicationError> {
        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx
                .paged(
                    ctx.request(LIST_POLICIES, Method::GET, "/replication/policies"),
                    page,
                    None,
                )
                .query_opt("name", name);
            ctx.fetch_page(request, handle_replication_errors)
        })
        .await
    }
}

fn policy_path(id: i64) -> Result<String, ReplicationError> {
    if id <= 0 {
        return Err(ReplicationError::NotProvided);
    }
    Ok(format!("/replication/policies/{id}"))
}

fn execution_path(id: i64) -> Result<String, ReplicationError> {
    if id <= 0 {
        return Err(ReplicationError::NotProvided);
    }
    Ok(format!("/replication/executions/{id}"))
}

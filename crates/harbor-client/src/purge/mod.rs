//! Audit log purge schedule and history.
//!
//! Purge jobs take `audit_retention_hour` and `include_operations` as
//! schedule parameters.

mod errors;

use harbor_core::{ExecHistory, Schedule};
use reqwest::Method;

pub use errors::{handle_purge_errors, PurgeError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::transport::Operation;

const CREATE_PURGE_SCHEDULE: Operation =
    Operation::new("createPurgeSchedule", &[201], &[400, 401, 403, 409, 500]);
const GET_PURGE_SCHEDULE: Operation =
    Operation::new("getPurgeSchedule", &[200], &[401, 403, 500]);
const UPDATE_PURGE_SCHEDULE: Operation =
    Operation::new("updatePurgeSchedule", &[200], &[400, 401, 403, 500]);
const GET_PURGE_HISTORY: Operation =
    Operation::new("getPurgeHistory", &[200], &[401, 403, 500]);
const GET_PURGE_JOB: Operation = Operation::new("getPurgeJob", &[200], &[401, 403, 404, 500]);

const SCHEDULE_PATH: &str = "/system/purgeaudit/schedule";

/// Client for the audit log purge endpoints.
#[derive(Debug, Clone)]
pub struct PurgeClient {
    ctx: ClientContext,
}

impl PurgeClient {
    /// Creates an audit log purge client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Creates the purge schedule.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeError::ScheduleAlreadyExists`] if one is already set.
    pub async fn new_purge_schedule(&self, schedule: &Schedule) -> Result<(), PurgeError> {
        self.put_schedule(CREATE_PURGE_SCHEDULE, Method::POST, schedule)
            .await
    }

    /// Fetches the purge schedule.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeError::Forbidden`] unless the caller is an admin.
    pub async fn get_purge_schedule(&self) -> Result<Schedule, PurgeError> {
        let request = self
            .ctx
            .request(GET_PURGE_SCHEDULE, Method::GET, SCHEDULE_PATH);
        self.ctx.fetch(request, handle_purge_errors).await
    }

    /// Replaces the purge schedule.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeError::IllegalFormat`] if the schedule is rejected.
    pub async fn update_purge_schedule(&self, schedule: &Schedule) -> Result<(), PurgeError> {
        self.put_schedule(UPDATE_PURGE_SCHEDULE, Method::PUT, schedule)
            .await
    }

    /// Lists every past purge run.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_purge_history(&self) -> Result<Vec<ExecHistory>, PurgeError> {
        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx.paged(
                ctx.request(GET_PURGE_HISTORY, Method::GET, "/system/purgeaudit"),
                page,
                None,
            );
            ctx.fetch_page(request, handle_purge_errors)
        })
        .await
    }

    /// Fetches one purge run.
    ///
    /// # Errors
    ///
    /// Returns [`PurgeError::NotFound`] if it does not exist.
    pub async fn get_purge_execution(&self, id: i64) -> Result<ExecHistory, PurgeError> {
        if id <= 0 {
            return Err(PurgeError::NotProvided);
        }
        let request = self.ctx.request(
            GET_PURGE_JOB,
            Method::GET,
            format!("/system/purgeaudit/{id}"),
        );
        self.ctx.fetch(request, handle_purge_errors).await
    }

    async fn put_schedule(
        &self,
        operation: Operation,
        method: Method,
        schedule: &Schedule,
    ) -> Result<(), PurgeError> {
        if schedule.schedule.is_none() {
            return Err(PurgeError::NotProvided);
        }
        let request = self
            .ctx
            .request(operation, method, SCHEDULE_PATH)
            .json(schedule)?;
        self.ctx.send(request, handle_purge_errors).await?;
        tracing::debug!(operation = operation.id, "Stored purge schedule");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use harbor_core::ScheduleType;
    use serde_json::json;

    use super::*;
    use crate::testing::mock_context;
    use crate::transport::ApiResponse;

    #[tokio::test]
    async fn test_new_purge_schedule_sends_parameters() {
        let (transport, ctx) = mock_context();
        transport.respond("createPurgeSchedule", ApiResponse::new(201));

        let schedule = Schedule::new(ScheduleType::Weekly, "0 0 0 * * 0")
            .with_parameter("audit_retention_hour", json!(168))
            .with_parameter("include_operations", json!("create,delete,pull"));
        PurgeClient::new(ctx)
            .new_purge_schedule(&schedule)
            .await
            .unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.path, "/system/purgeaudit/schedule");
        let body = call.body.as_ref().unwrap();
        assert_eq!(body["schedule"]["type"], "Weekly");
        assert_eq!(body["parameters"]["audit_retention_hour"], 168);
    }

    #[tokio::test]
    async fn test_get_purge_execution() {
        let (transport, ctx) = mock_context();
        transport.respond_json(
            "getPurgeJob",
            200,
            json!({ "id": 9, "job_name": "PURGE_AUDIT", "job_kind": "MANUAL" }),
        );

        let run = PurgeClient::new(ctx).get_purge_execution(9).await.unwrap();

        assert_eq!(run.job_name, "PURGE_AUDIT");
        assert_eq!(transport.calls()[0].path, "/system/purgeaudit/9");
    }

    #[tokio::test]
    async fn test_missing_purge_execution() {
        let (transport, ctx) = mock_context();
        transport.respond("getPurgeJob", ApiResponse::new(404));

        let err = PurgeClient::new(ctx).get_purge_execution(9).await.unwrap_err();
        assert!(matches!(err, PurgeError::NotFound));
    }
}

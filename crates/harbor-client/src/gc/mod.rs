//! Garbage collection schedule and history.

mod errors;

use harbor_core::{ExecHistory, Schedule};
use reqwest::Method;

pub use errors::{handle_gc_errors, GcError};

use crate::context::ClientContext;
use crate::pagination::collect_pages;
use crate::transport::Operation;

const CREATE_GC_SCHEDULE: Operation =
    Operation::new("createGCSchedule", &[201], &[400, 401, 403, 409, 500]);
const GET_GC_SCHEDULE: Operation = Operation::new("getGCSchedule", &[200], &[401, 403, 500]);
const UPDATE_GC_SCHEDULE: Operation =
    Operation::new("updateGCSchedule", &[200], &[400, 401, 403, 500]);
const GET_GC_HISTORY: Operation = Operation::new("getGCHistory", &[200], &[401, 403, 500]);
const GET_GC: Operation = Operation::new("getGC", &[200], &[401, 403, 404, 500]);

const SCHEDULE_PATH: &str = "/system/gc/schedule";

/// Client for the garbage collection endpoints.
#[derive(Debug, Clone)]
pub struct GcClient {
    ctx: ClientContext,
}

impl GcClient {
    /// Creates a garbage collection client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Creates the GC schedule.
    ///
    /// # Errors
    ///
    /// Returns [`GcError::ScheduleAlreadyExists`] if one is already set.
    pub async fn new_gc_schedule(&self, schedule: &Schedule) -> Result<(), GcError> {
        self.put_schedule(CREATE_GC_SCHEDULE, Method::POST, schedule)
            .await
    }

    /// Fetches the GC schedule.
    ///
    /// # Errors
    ///
    /// Returns [`GcError::Forbidden`] unless the caller is an admin.
    pub async fn get_gc_schedule(&self) -> Result<Schedule, GcError> {
        let request = self.ctx.request(GET_GC_SCHEDULE, Method::GET, SCHEDULE_PATH);
        self.ctx.fetch(request, handle_gc_errors).await
    }

    /// Replaces the GC schedule.
    ///
    /// # Errors
    ///
    /// Returns [`GcError::IllegalFormat`] if the schedule is rejected.
    pub async fn update_gc_schedule(&self, schedule: &Schedule) -> Result<(), GcError> {
        self.put_schedule(UPDATE_GC_SCHEDULE, Method::PUT, schedule)
            .await
    }

    /// Lists every past GC run.
    ///
    /// # Errors
    ///
    /// Returns the error of the first failing page.
    pub async fn list_gc_history(&self) -> Result<Vec<ExecHistory>, GcError> {
        let ctx = &self.ctx;
        collect_pages(ctx.options(), move |page| {
            let request = ctx.paged(
                ctx.request(GET_GC_HISTORY, Method::GET, "/system/gc"),
                page,
                None,
            );
            ctx.fetch_page(request, handle_gc_errors)
        })
        .await
    }

    /// Fetches one GC run.
    ///
    /// # Errors
    ///
    /// Returns [`GcError::NotFound`] if it does not exist.
    pub async fn get_gc_execution(&self, id: i64) -> Result<ExecHistory, GcError> {
        if id <= 0 {
            return Err(GcError::NotProvided);
        }
        let request = self
            .ctx
            .request(GET_GC, Method::GET, format!("/system/gc/{id}"));
        self.ctx.fetch(request, handle_gc_errors).await
    }

    async fn put_schedule(
        &self,
        operation: Operation,
        method: Method,
        schedule: &Schedule,
    ) -> Result<(), GcError> {
        if schedule.schedule.is_none() {
            return Err(GcError::NotProvided);
        }
        let request = self
            .ctx
            .request(operation, method, SCHEDULE_PATH)
            .json(schedule)?;
        self.ctx.send(request, handle_gc_errors).await?;
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
    async fn test_new_gc_schedule_conflict() {
        let (transport, ctx) = mock_context();
        transport.respond("createGCSchedule", ApiResponse::new(409));

        let schedule = Schedule::new(ScheduleType::Daily, "0 0 0 * * *");
        let err = GcClient::new(ctx).new_gc_schedule(&schedule).await.unwrap_err();

        assert!(matches!(err, GcError::ScheduleAlreadyExists));
    }

    #[tokio::test]
    async fn test_update_gc_schedule_accepts_created() {
        let (transport, ctx) = mock_context();
        transport.respond("updateGCSchedule", ApiResponse::new(201));

        let schedule = Schedule::new(ScheduleType::Custom, "0 0 * * * *")
            .with_parameter("delete_untagged", json!(true));
        GcClient::new(ctx).update_gc_schedule(&schedule).await.unwrap();

        let call = &transport.calls()[0];
        assert_eq!(call.path, "/system/gc/schedule");
        assert_eq!(call.body.as_ref().unwrap()["parameters"]["delete_untagged"], true);
    }

    #[tokio::test]
    async fn test_list_gc_history() {
        let (transport, ctx) = mock_context();
        transport.respond(
            "getGCHistory",
            ApiResponse::json_body(
                200,
                &json!([{ "id": 2, "job_name": "GARBAGE_COLLECTION", "job_status": "Success" }]),
            )
            .with_total_count(1),
        );

        let history = GcClient::new(ctx).list_gc_history().await.unwrap();

        assert_eq!(history.len(), 1);
        assert_eq!(history[0].job_status, "Success");
    }

    #[tokio::test]
    async fn test_preconditions() {
        let (transport, ctx) = mock_context();
        let client = GcClient::new(ctx);

        assert!(matches!(client.get_gc_execution(0).await, Err(GcError::NotProvided)));
        assert!(matches!(
            client.new_gc_schedule(&Schedule::default()).await,
            Err(GcError::NotProvided)
        ));
        assert_eq!(transport.call_count(), 0);
    }
}

//! Vulnerability scans of every artifact.

mod errors;

use harbor_core::{ScanAllMetrics, Schedule};
use reqwest::Method;

pub use errors::{handle_scan_all_errors, ScanAllError};

use crate::context::ClientContext;
use crate::transport::Operation;

const CREATE_SCAN_ALL_SCHEDULE: Operation = Operation::new(
    "createScanAllSchedule",
    &[201],
    &[400, 401, 403, 409, 412, 500],
);
const GET_SCAN_ALL_SCHEDULE: Operation =
    Operation::new("getScanAllSchedule", &[200], &[401, 403, 412, 500]);
const UPDATE_SCAN_ALL_SCHEDULE: Operation =
    Operation::new("updateScanAllSchedule", &[200], &[400, 401, 403, 412, 500]);
const GET_SCAN_ALL_METRICS: Operation =
    Operation::new("getLatestScanAllMetrics", &[200], &[401, 403, 412, 500]);
const STOP_SCAN_ALL: Operation = Operation::new("stopScanAll", &[202], &[400, 401, 403, 500]);

const SCHEDULE_PATH: &str = "/system/scanAll/schedule";

/// Client for the scan-all endpoints.
#[derive(Debug, Clone)]
pub struct ScanAllClient {
    ctx: ClientContext,
}

impl ScanAllClient {
    /// Creates a scan-all client.
    #[must_use]
    pub const fn new(ctx: ClientContext) -> Self {
        Self { ctx }
    }

    /// Creates the scan-all schedule.
    ///
    /// A [`harbor_core::ScheduleType::Manual`] schedule starts a run at once.
    ///
    /// # Errors
    ///
    /// Returns [`ScanAllError::ScannerNotConfigured`] if Harbor has no
    /// default scanner.
    pub async fn new_scan_all_schedule(&self, schedule: &Schedule) -> Result<(), ScanAllError> {
        self.put_schedule(CREATE_SCAN_ALL_SCHEDULE, Method::POST, schedule)
            .await
    }

    /// Fetches the scan-all schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScanAllError::ScannerNotConfigured`] if Harbor has no
    /// default scanner.
    pub async fn get_scan_all_schedule(&self) -> Result<Schedule, ScanAllError> {
        let request = self
            .ctx
            .request(GET_SCAN_ALL_SCHEDULE, Method::GET, SCHEDULE_PATH);
        self.ctx.fetch(request, handle_scan_all_errors).await
    }

    /// Replaces the scan-all schedule.
    ///
    /// # Errors
    ///
    /// Returns [`ScanAllError::IllegalFormat`] if the schedule is rejected.
    pub async fn update_scan_all_schedule(&self, schedule: &Schedule) -> Result<(), ScanAllError> {
        self.put_schedule(UPDATE_SCAN_ALL_SCHEDULE, Method::PUT, schedule)
            .await
    }

    /// Fetches the progress of the latest scan-all run.
    ///
    /// # Errors
    ///
    /// Returns [`ScanAllError::ScannerNotConfigured`] if Harbor has no
    /// default scanner.
    pub async fn get_scan_all_metrics(&self) -> Result<ScanAllMetrics, ScanAllError> {
        let request = self
            .ctx
            .request(GET_SCAN_ALL_METRICS, Method::GET, "/scans/all/metrics");
        self.ctx.fetch(request, handle_scan_all_errors).await
    }

    /// Stops the running scan-all job.
    ///
    /// # Errors
    ///
    /// Returns [`ScanAllError::IllegalFormat`] if no job is running.
    pub async fn stop_scan_all(&self) -> Result<(), ScanAllError> {
        let request = self
            .ctx
            .request(STOP_SCAN_ALL, Method::POST, "/system/scanAll/stop");
        self.ctx.send(request, handle_scan_all_errors).await?;
        Ok(())
    }

    async fn put_schedule(
        &self,
        operation: Operation,
        method: Method,
        schedule: &Schedule,
    ) -> Result<(), ScanAllError> {
        if schedule.schedule.is_none() {
            return Err(ScanAllError::NotProvided);
        }
        let request = self
            .ctx
            .request(operation, method, SCHEDULE_PATH)
            .json(schedule)?;
        self.ctx.send(request, handle_scan_all_errors).await?;
        Ok(())
    }
}

//! Schedules and execution history of system jobs (GC, audit-log purge,
//! scan-all).

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Error;

/// A system job schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Schedule {
    /// Schedule ID.
    #[serde(default)]
    pub id: i64,

    /// Status of the last run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,

    /// When and how often the job runs.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleObj>,

    /// Job parameters, e.g. `delete_untagged` for GC or
    /// `audit_retention_hour` for purge.
    #[serde(default)]
    pub parameters: BTreeMap<String, serde_json::Value>,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

impl Schedule {
    /// Creates a schedule of the given type and cron expression.
    #[must_use]
    pub fn new(kind: ScheduleType, cron: impl Into<String>) -> Self {
        Self {
            schedule: Some(ScheduleObj {
                kind,
                cron: Some(cron.into()),
                next_scheduled_time: None,
            }),
            ..Self::default()
        }
    }

    /// Adds a job parameter.
    #[must_use]
    pub fn with_parameter(mut self, key: impl Into<String>, value: serde_json::Value) -> Self {
        self.parameters.insert(key.into(), value);
        self
    }
}

/// Timing of a [`Schedule`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleObj {
    /// Schedule type.
    #[serde(rename = "type")]
    pub kind: ScheduleType,

    /// Cron expression for `Custom` schedules.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cron: Option<String>,

    /// Next planned run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_scheduled_time: Option<DateTime<Utc>>,
}

/// Kind of schedule Harbor accepts for system jobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScheduleType {
    /// Every hour.
    Hourly,
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Custom cron expression.
    Custom,
    /// Run once, now.
    Manual,
    /// Disabled.
    None,
    /// Generic scheduled run, as reported in histories.
    Schedule,
}

impl ScheduleType {
    /// Returns the wire name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Hourly => "Hourly",
            Self::Daily => "Daily",
            Self::Weekly => "Weekly",
            Self::Custom => "Custom",
            Self::Manual => "Manual",
            Self::None => "None",
            Self::Schedule => "Schedule",
        }
    }
}

impl fmt::Display for ScheduleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ScheduleType {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            "custom" => Ok(Self::Custom),
            "manual" => Ok(Self::Manual),
            "none" => Ok(Self::None),
            "schedule" => Ok(Self::Schedule),
            _ => Err(Error::UnknownScheduleType {
                value: s.to_string(),
            }),
        }
    }
}

/// One past run of a system job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecHistory {
    /// Execution ID.
    #[serde(default)]
    pub id: i64,

    /// Job name, e.g. `GARBAGE_COLLECTION` or `PURGE_AUDIT`.
    #[serde(default)]
    pub job_name: String,

    /// Job kind, `MANUAL` or `SCHEDULE`.
    #[serde(default)]
    pub job_kind: String,

    /// Job parameters as a JSON string.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub job_parameters: Option<String>,

    /// Schedule that started the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule: Option<ScheduleObj>,

    /// Final or current status.
    #[serde(default)]
    pub job_status: String,

    /// Whether the record was deleted.
    #[serde(default)]
    pub deleted: bool,

    /// Creation timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_time: Option<DateTime<Utc>>,

    /// Last update timestamp.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update_time: Option<DateTime<Utc>>,
}

/// Progress of a scan-all run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScanAllMetrics {
    /// Artifacts to scan.
    #[serde(default)]
    pub total: i64,

    /// Artifacts scanned so far.
    #[serde(default)]
    pub completed: i64,

    /// Artifact counts by scan status.
    #[serde(default)]
    pub metrics: BTreeMap<String, i64>,

    /// Whether a run is in progress.
    #[serde(default)]
    pub ongoing: bool,

    /// What started the run.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trigger: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schedule_type_parses_case_insensitively() {
        assert_eq!("daily".parse::<ScheduleType>(), Ok(ScheduleType::Daily));
        assert_eq!("Custom".parse::<ScheduleType>(), Ok(ScheduleType::Custom));
        assert!("yearly".parse::<ScheduleType>().is_err());
    }

    #[test]
    fn test_schedule_serializes_type_field() {
        let schedule = Schedule::new(ScheduleType::Custom, "0 0 * * * *")
            .with_parameter("delete_untagged", serde_json::json!(true));
        let json = serde_json::to_value(schedule).unwrap();

        assert_eq!(json["schedule"]["type"], "Custom");
        assert_eq!(json["schedule"]["cron"], "0 0 * * * *");
        assert_eq!(json["parameters"]["delete_untagged"], true);
    }
}

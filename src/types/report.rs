//! Report output rows and report job bookkeeping.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Column order of the report CSV
pub const REPORT_COLUMNS: [&str; 7] = [
    "store_id",
    "uptime_last_hour",
    "downtime_last_hour",
    "uptime_last_day",
    "downtime_last_day",
    "uptime_last_week",
    "downtime_last_week",
];

/// Per-store availability within business hours.
///
/// Hour figures are minutes; day and week figures are hours. All values are
/// rounded to two decimal places. Field order matches `REPORT_COLUMNS`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityRecord {
    pub store_id: String,
    pub uptime_last_hour: f64,
    pub downtime_last_hour: f64,
    pub uptime_last_day: f64,
    pub downtime_last_day: f64,
    pub uptime_last_week: f64,
    pub downtime_last_week: f64,
}

impl AvailabilityRecord {
    pub fn empty(store_id: &str) -> Self {
        Self {
            store_id: store_id.to_string(),
            uptime_last_hour: 0.0,
            downtime_last_hour: 0.0,
            uptime_last_day: 0.0,
            downtime_last_day: 0.0,
            uptime_last_week: 0.0,
            downtime_last_week: 0.0,
        }
    }
}

/// Lifecycle of a report job
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportStatus {
    Pending,
    Running,
    Complete,
    Failed,
}

impl ReportStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReportStatus::Pending => "Pending",
            ReportStatus::Running => "Running",
            ReportStatus::Complete => "Complete",
            ReportStatus::Failed => "Failed",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self, ReportStatus::Complete | ReportStatus::Failed)
    }
}

impl fmt::Display for ReportStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ReportStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Pending" => Ok(ReportStatus::Pending),
            "Running" => Ok(ReportStatus::Running),
            "Complete" => Ok(ReportStatus::Complete),
            "Failed" => Ok(ReportStatus::Failed),
            other => Err(format!("Unknown report status '{}'", other)),
        }
    }
}

/// Persisted state of one report job
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportJobInfo {
    pub report_id: String,
    pub status: ReportStatus,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
    pub file_path: Option<String>,
    pub error: Option<String>,
}

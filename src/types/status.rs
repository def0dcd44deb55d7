//! Status observations as polled from stores, and the continuous intervals
//! reconstructed from them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Store status as reported by a poll (stored as 1 = active, 0 = inactive)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoreStatus {
    Inactive,
    Active,
}

impl StoreStatus {
    /// Integer code used by the database
    pub fn code(self) -> i64 {
        match self {
            StoreStatus::Inactive => 0,
            StoreStatus::Active => 1,
        }
    }

    pub fn from_code(code: i64) -> Option<Self> {
        match code {
            0 => Some(StoreStatus::Inactive),
            1 => Some(StoreStatus::Active),
            _ => None,
        }
    }

    pub fn is_active(self) -> bool {
        self == StoreStatus::Active
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreStatus::Inactive => write!(f, "inactive"),
            StoreStatus::Active => write!(f, "active"),
        }
    }
}

impl FromStr for StoreStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "active" | "1" => Ok(StoreStatus::Active),
            "inactive" | "0" => Ok(StoreStatus::Inactive),
            other => Err(format!("Unknown store status '{}'", other)),
        }
    }
}

/// A single timestamped poll result for a store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusObservation {
    pub store_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: StoreStatus,
}

impl StatusObservation {
    pub fn new(store_id: impl Into<String>, timestamp: DateTime<Utc>, status: StoreStatus) -> Self {
        Self {
            store_id: store_id.into(),
            timestamp,
            status,
        }
    }
}

/// A span of time over which a store is assumed to hold one status.
///
/// Produced by timeline reconstruction and never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: StoreStatus,
}

impl StatusInterval {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>, status: StoreStatus) -> Self {
        Self { start, end, status }
    }

    pub fn duration_minutes(&self) -> f64 {
        (self.end - self.start).num_milliseconds() as f64 / 60_000.0
    }
}

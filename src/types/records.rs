//! Raw CSV row shapes for the bulk loader.
//!
//! Fields are kept as strings so malformed rows can be reported per line
//! instead of aborting the whole file.

use serde::{Deserialize, Serialize};

/// Row of `store_status.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreStatusRecord {
    pub store_id: String,
    pub status: String,
    pub timestamp_utc: String,
}

/// Row of `menu_hours.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MenuHoursRecord {
    pub store_id: String,
    #[serde(rename = "dayOfWeek", alias = "day")]
    pub day_of_week: String,
    pub start_time_local: String,
    pub end_time_local: String,
}

/// Row of `timezones.csv`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimezoneRecord {
    pub store_id: String,
    #[serde(default)]
    pub timezone_str: Option<String>,
}

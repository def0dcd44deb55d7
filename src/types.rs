//! Store Uptime Reporter - Type System
//!
//! - `status`: Polled status observations and reconstructed status intervals
//! - `business_hours`: Weekly business-hour rules and their parsed form
//! - `store`: Store profiles (timezone assignment)
//! - `report`: Availability records and report job bookkeeping
//! - `records`: Raw CSV row shapes consumed by the bulk loader
//! - `run_config`: Explicit configuration for report runs and loads
//! - `statistics`: Run statistics with timing information

pub mod business_hours;
pub mod records;
pub mod report;
mod run_config;
pub mod statistics;
pub mod status;
pub mod store;

pub use business_hours::{BusinessHourRule, ParsedRule};
pub use records::{MenuHoursRecord, StoreStatusRecord, TimezoneRecord};
pub use report::{AvailabilityRecord, ReportJobInfo, ReportStatus, REPORT_COLUMNS};
pub use run_config::*;
pub use statistics::{LoadStats, ReportRunStats};
pub use status::{StatusInterval, StatusObservation, StoreStatus};
pub use store::StoreProfile;

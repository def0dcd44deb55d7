//! Database trait abstractions.
//!
//! `StoreDataSource` is the bulk-fetch seam the report processor depends on;
//! the SQLite `Database` implements it, and tests can substitute their own.

use crate::errors::AppResult;
use crate::types::{
    BusinessHourRule, ReportJobInfo, StatusObservation, StoreProfile,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;

/// Bulk reads consumed by the report processor.
///
/// Missing entries are left absent; default-filling is the caller's job.
pub trait StoreDataSource {
    /// Full store population, sorted by id
    fn fetch_stores(&self) -> AppResult<Vec<String>>;

    /// Timezone identifiers for the given stores (only stores that have one)
    fn fetch_timezones(&self, store_ids: &[String]) -> AppResult<HashMap<String, String>>;

    /// Business-hour rules for the given stores (only stores that have any)
    fn fetch_business_hours(
        &self,
        store_ids: &[String],
    ) -> AppResult<HashMap<String, Vec<BusinessHourRule>>>;

    /// Observations with `range_start <= timestamp <= range_end`, each list
    /// ordered by timestamp
    fn fetch_status_observations(
        &self,
        store_ids: &[String],
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
    ) -> AppResult<HashMap<String, Vec<StatusObservation>>>;

    /// Most recent observation across all stores
    fn latest_observation_timestamp(&self) -> AppResult<Option<DateTime<Utc>>>;
}

/// Bulk loader writes
pub trait IngestOperations {
    fn insert_status_batch(&mut self, batch: &[StatusObservation]) -> AppResult<()>;

    fn insert_business_hours_batch(&mut self, batch: &[BusinessHourRule]) -> AppResult<()>;

    /// Insert or replace store timezone assignments
    fn upsert_stores_batch(&mut self, batch: &[StoreProfile]) -> AppResult<()>;
}

/// Report job bookkeeping
pub trait ReportOperations {
    /// Record a new job in `Pending` state
    fn create_report(&mut self, report_id: &str) -> AppResult<()>;

    fn mark_report_running(&mut self, report_id: &str) -> AppResult<()>;

    fn mark_report_complete(&mut self, report_id: &str, file_path: &str) -> AppResult<()>;

    fn mark_report_failed(&mut self, report_id: &str, error: &str) -> AppResult<()>;

    fn get_report(&self, report_id: &str) -> AppResult<Option<ReportJobInfo>>;
}

/// Statistics and reporting operations
pub trait StatisticsOperations {
    fn get_database_stats(&self) -> AppResult<crate::database::DatabaseStats>;
}

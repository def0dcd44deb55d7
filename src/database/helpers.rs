//! Shared database helper functions
//!
//! Row mapping and IN-list construction used by the fetch and report operations.

use crate::types::{BusinessHourRule, ReportJobInfo, ReportStatus, StatusObservation, StoreStatus};
use crate::utils::time::from_micros;
use chrono::{DateTime, Utc};
use rusqlite::types::Type;
use rusqlite::Row;

/// Upper bound on ids bound into a single `IN (...)` list
pub const MAX_IN_LIST: usize = 500;

/// Build "?1, ?2, ..., ?n" for an IN list
pub fn placeholders(count: usize) -> String {
    (1..=count)
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convert a stored microsecond timestamp, reporting bad values as a conversion failure
pub fn timestamp_from_column(row: &Row, idx: usize) -> rusqlite::Result<DateTime<Utc>> {
    let micros: i64 = row.get(idx)?;
    from_micros(micros).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            idx,
            Type::Integer,
            format!("timestamp out of range: {}", micros).into(),
        )
    })
}

fn optional_timestamp_from_column(
    row: &Row,
    idx: usize,
) -> rusqlite::Result<Option<DateTime<Utc>>> {
    match row.get::<_, Option<i64>>(idx)? {
        Some(_) => timestamp_from_column(row, idx).map(Some),
        None => Ok(None),
    }
}

/// Construct a StatusObservation from a database row
///
/// Expects columns: store_id, timestamp_utc, status
pub fn status_observation_from_row(row: &Row) -> rusqlite::Result<StatusObservation> {
    let code: i64 = row.get(2)?;
    let status = StoreStatus::from_code(code).ok_or_else(|| {
        rusqlite::Error::FromSqlConversionFailure(
            2,
            Type::Integer,
            format!("unknown status code {}", code).into(),
        )
    })?;

    Ok(StatusObservation {
        store_id: row.get(0)?,
        timestamp: timestamp_from_column(row, 1)?,
        status,
    })
}

/// Construct a BusinessHourRule from a database row
///
/// Expects columns: store_id, day_of_week, start_time_local, end_time_local
pub fn business_hour_rule_from_row(row: &Row) -> rusqlite::Result<BusinessHourRule> {
    Ok(BusinessHourRule {
        store_id: row.get(0)?,
        day_of_week: row.get(1)?,
        start_time_local: row.get(2)?,
        end_time_local: row.get(3)?,
    })
}

/// Construct a ReportJobInfo from a database row
///
/// Expects columns: report_id, status, created_at, completed_at, file_path, error
pub fn report_job_from_row(row: &Row) -> rusqlite::Result<ReportJobInfo> {
    let status_text: String = row.get(1)?;
    let status = status_text.parse::<ReportStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(1, Type::Text, e.into())
    })?;

    Ok(ReportJobInfo {
        report_id: row.get(0)?,
        status,
        created_at: timestamp_from_column(row, 2)?,
        completed_at: optional_timestamp_from_column(row, 3)?,
        file_path: row.get(4)?,
        error: row.get(5)?,
    })
}

//! Statistics and reporting operations.

use crate::database::traits::StatisticsOperations;
use crate::database::Database;
use crate::errors::AppResult;
use crate::utils::time::from_micros;
use chrono::{DateTime, Utc};

/// Database statistics for reporting
#[derive(Debug)]
pub struct DatabaseStats {
    pub stores: usize,
    pub status_rows: usize,
    pub business_hour_rows: usize,
    pub reports: usize,
    pub earliest_observation: Option<DateTime<Utc>>,
    pub latest_observation: Option<DateTime<Utc>>,
}

impl StatisticsOperations for Database {
    fn get_database_stats(&self) -> AppResult<DatabaseStats> {
        let conn = self.connection();

        let count = |sql: &str| -> AppResult<usize> {
            let n: i64 = conn.query_row(sql, [], |row| row.get(0))?;
            Ok(n as usize)
        };

        let (min_ts, max_ts): (Option<i64>, Option<i64>) = conn.query_row(
            "SELECT MIN(timestamp_utc), MAX(timestamp_utc) FROM store_status",
            [],
            |row| Ok((row.get(0)?, row.get(1)?)),
        )?;

        Ok(DatabaseStats {
            stores: count(
                "SELECT COUNT(*) FROM (SELECT store_id FROM stores \
                 UNION SELECT store_id FROM store_status \
                 UNION SELECT store_id FROM business_hours)",
            )?,
            status_rows: count("SELECT COUNT(*) FROM store_status")?,
            business_hour_rows: count("SELECT COUNT(*) FROM business_hours")?,
            reports: count("SELECT COUNT(*) FROM store_reports")?,
            earliest_observation: min_ts.and_then(from_micros),
            latest_observation: max_ts.and_then(from_micros),
        })
    }
}

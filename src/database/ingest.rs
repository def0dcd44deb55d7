//! Bulk loader database operations.
//!
//! Each batch is inserted atomically inside one transaction.

use crate::database::traits::IngestOperations;
use crate::database::Database;
use crate::errors::AppResult;
use crate::types::{BusinessHourRule, StatusObservation, StoreProfile};
use crate::utils::time::to_micros;
use rusqlite::params;
use tracing::debug;

impl IngestOperations for Database {
    fn insert_status_batch(&mut self, batch: &[StatusObservation]) -> AppResult<()> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO store_status (store_id, timestamp_utc, status) VALUES (?1, ?2, ?3)",
            )?;
            for observation in batch {
                stmt.execute(params![
                    observation.store_id,
                    to_micros(observation.timestamp),
                    observation.status.code()
                ])?;
            }
            debug!("Inserted {} status observations", batch.len());
            Ok(())
        })
    }

    fn insert_business_hours_batch(&mut self, batch: &[BusinessHourRule]) -> AppResult<()> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                r#"INSERT INTO business_hours
                   (store_id, day_of_week, start_time_local, end_time_local)
                   VALUES (?1, ?2, ?3, ?4)"#,
            )?;
            for rule in batch {
                stmt.execute(params![
                    rule.store_id,
                    rule.day_of_week,
                    rule.start_time_local,
                    rule.end_time_local
                ])?;
            }
            debug!("Inserted {} business-hour rules", batch.len());
            Ok(())
        })
    }

    fn upsert_stores_batch(&mut self, batch: &[StoreProfile]) -> AppResult<()> {
        self.execute_transaction(|tx| {
            let mut stmt = tx.prepare_cached(
                "INSERT OR REPLACE INTO stores (store_id, timezone_str) VALUES (?1, ?2)",
            )?;
            for profile in batch {
                stmt.execute(params![profile.store_id, profile.timezone])?;
            }
            debug!("Upserted {} stores", batch.len());
            Ok(())
        })
    }
}

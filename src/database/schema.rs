//! SQLite schema for store status data and report jobs
//!
//! - `stores`: store id and IANA timezone (NULL means "use the default")
//! - `store_status`: polled observations, timestamps as UTC microseconds
//! - `business_hours`: weekly rules in local wall-clock time (0 = Monday)
//! - `store_reports`: report job lifecycle

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::debug;

/// Initialise the schema; safe to run against an existing database
pub fn setup_schema(connection: &Connection) -> AppResult<()> {
    connection.execute_batch(
        r#"
        PRAGMA user_version = 1;

        CREATE TABLE IF NOT EXISTS stores (
            store_id TEXT PRIMARY KEY,
            timezone_str TEXT
        );

        CREATE TABLE IF NOT EXISTS store_status (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id TEXT NOT NULL,
            timestamp_utc INTEGER NOT NULL,   -- microseconds since epoch
            status INTEGER NOT NULL CHECK (status IN (0, 1))
        );

        CREATE INDEX IF NOT EXISTS idx_store_status_store_ts
            ON store_status(store_id, timestamp_utc);
        CREATE INDEX IF NOT EXISTS idx_store_status_ts
            ON store_status(timestamp_utc);

        CREATE TABLE IF NOT EXISTS business_hours (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id TEXT NOT NULL,
            day_of_week INTEGER NOT NULL,
            start_time_local TEXT NOT NULL,
            end_time_local TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_business_hours_store
            ON business_hours(store_id);

        CREATE TABLE IF NOT EXISTS store_reports (
            report_id TEXT PRIMARY KEY,
            status TEXT NOT NULL,
            created_at INTEGER NOT NULL,      -- microseconds since epoch
            completed_at INTEGER,
            file_path TEXT,
            error TEXT
        );
        "#,
    )?;

    debug!("Schema initialised");
    Ok(())
}

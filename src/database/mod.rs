//! SQLite persistence for store data and report jobs.
//!
//! ## Architecture
//!
//! The `Database` struct directly implements the operation traits:
//! - `StoreDataSource` - bulk fetches consumed by the report processor
//! - `IngestOperations` - bulk loader writes
//! - `ReportOperations` - report job lifecycle
//! - `StatisticsOperations` - row counts for summaries

pub mod helpers;
mod ingest;
mod reports;
pub mod schema;
mod source;
pub mod statistics;
pub mod traits;

pub use schema::setup_schema;
pub use statistics::DatabaseStats;
pub use traits::*;

use crate::errors::AppResult;
use rusqlite::Connection;
use tracing::info;

/// The main database interface that implements all operation traits.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Open (or create) a database and initialise the schema.
    ///
    /// Pass ":memory:" for a throwaway in-memory database.
    pub fn new(database_path: &str) -> AppResult<Self> {
        let connection = Connection::open(database_path)?;

        setup_schema(&connection)?;

        info!("Database initialised at: {}", database_path);
        Ok(Self { connection })
    }

    /// Get a reference to the underlying connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Execute a function within a database transaction
    pub fn execute_transaction<F, R>(&mut self, f: F) -> AppResult<R>
    where
        F: FnOnce(&rusqlite::Transaction) -> AppResult<R>,
    {
        let tx = self.connection.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

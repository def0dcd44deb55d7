use thiserror::Error;

/// Application-wide error type - single point of truth
#[derive(Error, Debug)]
pub enum AppError {
    /// Database operations (bulk fetches and job bookkeeping)
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),

    /// Bulk-fetch failure from a non-SQLite data source
    #[error("Data source error: {0}")]
    DataSource(String),

    /// Business-hour rule or timezone for a store could not be interpreted
    #[error("Invalid input data for store {store_id}: {reason}")]
    InputData { store_id: String, reason: String },

    /// File I/O operations
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV processing
    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    /// Configuration issues
    #[error("Configuration error: {0}")]
    Config(String),

    /// Data validation/parsing
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Invalid source record during bulk load
    #[error("Invalid record at line {line}: {reason}")]
    InvalidRecord { line: usize, reason: String },

    /// Unknown report identifier
    #[error("Report not found: {0}")]
    ReportNotFound(String),

    /// An aggregation worker thread panicked
    #[error("Worker thread failed: {0}")]
    Worker(String),
}

impl AppError {
    /// Build an input data error for a store
    pub fn input_data(store_id: &str, reason: impl Into<String>) -> Self {
        AppError::InputData {
            store_id: store_id.to_string(),
            reason: reason.into(),
        }
    }

    /// True for errors caused by a store's own records (unparseable rule time, unknown timezone)
    pub fn is_input_data(&self) -> bool {
        matches!(self, AppError::InputData { .. })
    }

    /// True for failures of the bulk-fetch layer
    pub fn is_data_source(&self) -> bool {
        matches!(self, AppError::Database(_) | AppError::DataSource(_))
    }
}

/// Application-wide result type - single point of truth
pub type AppResult<T> = Result<T, AppError>;

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::InvalidData(format!("JSON error: {}", err))
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}

//! Explicit configuration for report runs and bulk loads.
//!
//! Defaults live here rather than in module-level globals so that callers
//! (and tests) can vary them per run.

use crate::config::{DEFAULT_BATCH_SIZE, DEFAULT_TIMEZONE, DEFAULT_WORKERS};
use chrono_tz::Tz;
use std::path::PathBuf;

/// Configuration for one availability report run
#[derive(Debug, Clone)]
pub struct ReportConfig {
    /// Stores fetched and aggregated together; bounds peak memory
    pub batch_size: usize,
    /// Worker threads used to aggregate the stores of one batch
    pub workers: usize,
    /// Timezone for stores with no timezone record
    pub default_timezone: Tz,
    /// Where report CSVs are written
    pub reports_dir: PathBuf,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            workers: DEFAULT_WORKERS,
            default_timezone: chrono_tz::America::Chicago,
            reports_dir: "./reports".into(),
        }
    }
}

/// Builder for ReportConfig with validation
#[derive(Debug, Default)]
pub struct ReportConfigBuilder {
    batch_size: Option<usize>,
    workers: Option<usize>,
    default_timezone: Option<String>,
    reports_dir: Option<PathBuf>,
}

impl ReportConfigBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_size(mut self, size: usize) -> Self {
        self.batch_size = Some(size);
        self
    }

    pub fn workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    /// IANA timezone identifier, e.g. "America/Chicago"
    pub fn default_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.default_timezone = Some(timezone.into());
        self
    }

    pub fn reports_dir<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.reports_dir = Some(path.into());
        self
    }

    /// Build the configuration with validation
    pub fn build(self) -> Result<ReportConfig, String> {
        let timezone_name = self
            .default_timezone
            .unwrap_or_else(|| DEFAULT_TIMEZONE.to_string());
        let default_timezone = timezone_name
            .parse::<Tz>()
            .map_err(|_| format!("Unknown default timezone '{}'", timezone_name))?;

        let config = ReportConfig {
            batch_size: self.batch_size.unwrap_or(DEFAULT_BATCH_SIZE),
            workers: self.workers.unwrap_or(DEFAULT_WORKERS),
            default_timezone,
            reports_dir: self.reports_dir.unwrap_or_else(|| "./reports".into()),
        };

        config.validate()?;
        Ok(config)
    }
}

impl ReportConfig {
    pub fn builder() -> ReportConfigBuilder {
        ReportConfigBuilder::new()
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.batch_size == 0 {
            return Err("Batch size cannot be zero".to_string());
        }

        if self.workers == 0 {
            return Err("Worker count cannot be zero".to_string());
        }

        Ok(())
    }
}

/// Configuration for the CSV bulk loader
#[derive(Debug, Clone)]
pub struct LoadConfig {
    pub data_dir: PathBuf,
    pub database_path: PathBuf,
    /// Rows inserted per transaction
    pub batch_size: usize,
    /// Timezone written for stores whose timezone column is empty
    pub default_timezone: String,
}

impl Default for LoadConfig {
    fn default() -> Self {
        Self {
            data_dir: "./data".into(),
            database_path: "./store_uptime.db".into(),
            batch_size: 10_000,
            default_timezone: DEFAULT_TIMEZONE.to_string(),
        }
    }
}

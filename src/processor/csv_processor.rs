use super::{ProgressReporter, StandardProgressTracker};
use crate::database::traits::{IngestOperations, StatisticsOperations};
use crate::database::{Database, DatabaseStats};
use crate::errors::{AppError, AppResult};
use crate::types::statistics::{LoadStats, StatisticsCollector};
use crate::types::{
    BusinessHourRule, LoadConfig, MenuHoursRecord, StatusObservation, StoreProfile,
    StoreStatusRecord, TimezoneRecord,
};
use crate::utils::time::parse_utc_timestamp;
use csv::ReaderBuilder;
use serde::de::DeserializeOwned;
use std::fs::File;
use std::io::BufReader;
use tracing::{info, warn};

pub const STATUS_FILE: &str = "store_status.csv";
pub const MENU_HOURS_FILE: &str = "menu_hours.csv";
pub const TIMEZONES_FILE: &str = "timezones.csv";

/// Bulk loader for the three store data CSVs
pub struct CsvLoader {
    config: LoadConfig,
    database: Database,
}

impl CsvLoader {
    pub fn new(config: LoadConfig) -> AppResult<Self> {
        let database = Database::new(&config.database_path.to_string_lossy())?;

        info!("CSV Loader initialised");
        info!("Data directory: {}", config.data_dir.display());
        info!("Database: {}", config.database_path.display());
        info!("Batch size: {}", config.batch_size);

        Ok(Self { config, database })
    }

    pub fn database(&self) -> &Database {
        &self.database
    }

    pub fn into_database(self) -> Database {
        self.database
    }

    pub fn get_database_stats(&self) -> AppResult<DatabaseStats> {
        self.database.get_database_stats()
    }

    /// Load every CSV found in the data directory
    pub fn load_all(&mut self) -> AppResult<LoadStats> {
        if self.config.batch_size == 0 {
            return Err(AppError::Config(
                "Batch size must be greater than 0".to_string(),
            ));
        }

        let mut stats = LoadStats::new();
        info!("Starting CSV load from {}", self.config.data_dir.display());

        let timezone_rows = self.load_file(
            TIMEZONES_FILE,
            &mut stats,
            |record: TimezoneRecord, default_timezone| {
                let timezone = record
                    .timezone_str
                    .as_deref()
                    .map(str::trim)
                    .filter(|tz| !tz.is_empty())
                    .unwrap_or(default_timezone);
                Ok(StoreProfile::new(record.store_id.trim(), timezone))
            },
            |db, batch| db.upsert_stores_batch(batch),
        )?;

        let business_hour_rows = self.load_file(
            MENU_HOURS_FILE,
            &mut stats,
            |record: MenuHoursRecord, _| {
                let day = record
                    .day_of_week
                    .trim()
                    .parse::<u8>()
                    .map_err(|_| format!("invalid dayOfWeek '{}'", record.day_of_week))?;
                Ok(BusinessHourRule::new(
                    record.store_id.trim(),
                    day,
                    record.start_time_local.trim(),
                    record.end_time_local.trim(),
                ))
            },
            |db, batch| db.insert_business_hours_batch(batch),
        )?;

        let status_rows = self.load_file(
            STATUS_FILE,
            &mut stats,
            |record: StoreStatusRecord, _| {
                let status = record.status.parse()?;
                let timestamp = parse_utc_timestamp(&record.timestamp_utc)
                    .ok_or_else(|| format!("invalid timestamp '{}'", record.timestamp_utc))?;
                Ok(StatusObservation::new(record.store_id.trim(), timestamp, status))
            },
            |db, batch| db.insert_status_batch(batch),
        )?;

        stats.timezone_rows = timezone_rows;
        stats.business_hour_rows = business_hour_rows;
        stats.status_rows = status_rows;
        stats.finish();

        info!("CSV load completed");
        info!("{}", stats.summary());
        Ok(stats)
    }

    /// Stream one CSV into the database in batches, returning the rows stored.
    ///
    /// Rows that fail to deserialize or convert are counted as malformed and
    /// skipped. A missing file is skipped with a warning.
    fn load_file<R, T, C, I>(
        &mut self,
        file_name: &str,
        stats: &mut LoadStats,
        convert: C,
        insert: I,
    ) -> AppResult<usize>
    where
        R: DeserializeOwned,
        C: Fn(R, &str) -> Result<T, String>,
        I: Fn(&mut Database, &[T]) -> AppResult<()>,
    {
        let path = self.config.data_dir.join(file_name);
        if !path.exists() {
            warn!("{} not found, skipping", path.display());
            return Ok(0);
        }

        info!("Loading {}", path.display());
        let file = File::open(&path).map_err(AppError::Io)?;
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(csv::Trim::Headers)
            .from_reader(BufReader::new(file));

        let mut batch = Vec::with_capacity(self.config.batch_size);
        let mut stored = 0usize;

        let mut progress_tracker = StandardProgressTracker::new();
        progress_tracker.start();

        for (index, result) in csv_reader.deserialize::<R>().enumerate() {
            // Header is line 1
            let line = index + 2;

            let record = match result {
                Ok(record) => record,
                Err(e) if e.is_io_error() => return Err(AppError::Csv(e)),
                Err(e) => {
                    warn!("{}", AppError::InvalidRecord { line, reason: e.to_string() });
                    stats.malformed_records += 1;
                    continue;
                }
            };

            match convert(record, &self.config.default_timezone) {
                Ok(item) => batch.push(item),
                Err(reason) => {
                    warn!("{}: {}", file_name, AppError::InvalidRecord { line, reason });
                    stats.malformed_records += 1;
                    continue;
                }
            }

            if batch.len() >= self.config.batch_size {
                insert(&mut self.database, &batch)?;
                stored += batch.len();
                stats.batches_processed += 1;
                batch.clear();
            }

            if progress_tracker.should_report() {
                ProgressReporter::report_progress_with_metrics(
                    &*stats,
                    stored,
                    None,
                    progress_tracker.elapsed_seconds(),
                )?;
            }
        }

        if !batch.is_empty() {
            insert(&mut self.database, &batch)?;
            stored += batch.len();
            stats.batches_processed += 1;
        }

        ProgressReporter::finish_progress_line(&progress_tracker);
        info!("{}: {} rows stored", file_name, stored);
        Ok(stored)
    }
}

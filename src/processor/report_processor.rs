//! Batch orchestrator for availability reports.
//!
//! The store population is split into fixed-size batches that are fetched and
//! aggregated one after another, so only one batch's status logs are ever held
//! in memory. Within a batch, stores are independent and are spread across
//! worker threads.

use super::{ConfigValidator, ProgressReporter, StandardProgressTracker};
use crate::availability::{aggregate, TrailingWindow};
use crate::database::StoreDataSource;
use crate::errors::{AppError, AppResult};
use crate::types::statistics::StatisticsCollector;
use crate::types::{
    AvailabilityRecord, BusinessHourRule, ReportConfig, ReportRunStats, StatusObservation,
};
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use tracing::{debug, info};

/// Everything fetched for one batch of stores
struct BatchData {
    timezones: HashMap<String, String>,
    hours: HashMap<String, Vec<BusinessHourRule>>,
    observations: HashMap<String, Vec<StatusObservation>>,
}

/// Computes availability records for every store known to a data source
pub struct ReportProcessor<'a, S: StoreDataSource + ?Sized> {
    source: &'a S,
    config: ReportConfig,
}

impl<'a, S: StoreDataSource + ?Sized> ReportProcessor<'a, S> {
    pub fn new(source: &'a S, config: ReportConfig) -> AppResult<Self> {
        ConfigValidator::validate_batch_config(config.batch_size, config.workers)?;
        Ok(Self { source, config })
    }

    pub fn config(&self) -> &ReportConfig {
        &self.config
    }

    /// One record per store, sorted by store id
    pub fn run(&self, now: DateTime<Utc>) -> AppResult<Vec<AvailabilityRecord>> {
        self.run_with_stats(now).map(|(records, _)| records)
    }

    pub fn run_with_stats(
        &self,
        now: DateTime<Utc>,
    ) -> AppResult<(Vec<AvailabilityRecord>, ReportRunStats)> {
        let mut stats = ReportRunStats::new();
        let window_start = TrailingWindow::Week.start(now);

        let store_ids = self.source.fetch_stores()?;
        stats.stores_total = store_ids.len();

        ConfigValidator::log_config_summary(
            "Availability Report",
            self.config.batch_size,
            self.config.workers,
            Some(&format!(
                "Stores: {} | Window: {} .. {} | Default timezone: {}",
                store_ids.len(),
                window_start,
                now,
                self.config.default_timezone.name()
            )),
        );

        let mut progress_tracker = StandardProgressTracker::new();
        progress_tracker.start();

        let mut records = Vec::with_capacity(store_ids.len());
        for batch in store_ids.chunks(self.config.batch_size) {
            let data = self.fetch_batch(batch, window_start, now, &mut stats)?;
            let batch_records = self.aggregate_batch(batch, &data, now)?;

            stats.stores_processed += batch_records.len();
            stats.batches_processed += 1;
            records.extend(batch_records);

            debug!(
                "Batch {} done: {} stores",
                stats.batches_processed,
                batch.len()
            );

            if progress_tracker.should_report() {
                ProgressReporter::report_progress_with_metrics(
                    &stats,
                    stats.stores_processed,
                    Some(stats.stores_total),
                    progress_tracker.elapsed_seconds(),
                )?;
            }
        }

        records.sort_by(|a, b| a.store_id.cmp(&b.store_id));

        stats.finish();
        ProgressReporter::finish_progress_line(&progress_tracker);
        ProgressReporter::report_completion(
            "Availability Report",
            stats.stores_processed,
            progress_tracker.elapsed_seconds(),
        );
        info!("{}", stats.summary());

        Ok((records, stats))
    }

    fn fetch_batch(
        &self,
        store_ids: &[String],
        window_start: DateTime<Utc>,
        now: DateTime<Utc>,
        stats: &mut ReportRunStats,
    ) -> AppResult<BatchData> {
        let timezones = self.source.fetch_timezones(store_ids)?;
        let hours = self.source.fetch_business_hours(store_ids)?;
        let mut observations = self
            .source
            .fetch_status_observations(store_ids, window_start, now)?;

        // Stable, so equal timestamps keep the source's order
        for list in observations.values_mut() {
            list.sort_by_key(|observation| observation.timestamp);
        }

        stats.observations_loaded += observations.values().map(Vec::len).sum::<usize>();
        stats.stores_without_timezone += store_ids
            .iter()
            .filter(|id| !timezones.contains_key(*id))
            .count();
        stats.stores_without_hours += store_ids
            .iter()
            .filter(|id| hours.get(*id).map_or(true, Vec::is_empty))
            .count();

        Ok(BatchData {
            timezones,
            hours,
            observations,
        })
    }

    /// Aggregate a batch, keeping the order of `store_ids`
    fn aggregate_batch(
        &self,
        store_ids: &[String],
        data: &BatchData,
        now: DateTime<Utc>,
    ) -> AppResult<Vec<AvailabilityRecord>> {
        let default_timezone = self.config.default_timezone.name();
        let workers = self.config.workers.min(store_ids.len());

        if workers <= 1 {
            return store_ids
                .iter()
                .map(|id| aggregate_store(id, data, default_timezone, now))
                .collect();
        }

        let chunk_size = (store_ids.len() + workers - 1) / workers;

        crossbeam::thread::scope(|scope| {
            let handles: Vec<_> = store_ids
                .chunks(chunk_size)
                .map(|chunk| {
                    scope.spawn(move |_| {
                        chunk
                            .iter()
                            .map(|id| aggregate_store(id, data, default_timezone, now))
                            .collect::<AppResult<Vec<_>>>()
                    })
                })
                .collect();

            let mut records = Vec::with_capacity(store_ids.len());
            for handle in handles {
                let part = handle
                    .join()
                    .map_err(|_| AppError::Worker("aggregation worker panicked".to_string()))??;
                records.extend(part);
            }
            Ok::<_, AppError>(records)
        })
        .map_err(|_| AppError::Worker("aggregation scope panicked".to_string()))?
    }
}

/// Aggregate one store, filling in the default timezone and 24/7 hours
fn aggregate_store(
    store_id: &str,
    data: &BatchData,
    default_timezone: &str,
    now: DateTime<Utc>,
) -> AppResult<AvailabilityRecord> {
    let timezone = data
        .timezones
        .get(store_id)
        .map(String::as_str)
        .unwrap_or(default_timezone);

    let all_day;
    let rules = match data.hours.get(store_id) {
        Some(rules) if !rules.is_empty() => rules.as_slice(),
        _ => {
            all_day = BusinessHourRule::all_day(store_id);
            all_day.as_slice()
        }
    };

    let observations = data
        .observations
        .get(store_id)
        .map(Vec::as_slice)
        .unwrap_or(&[]);

    aggregate(store_id, now, timezone, rules, observations)
}

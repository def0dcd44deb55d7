//! Statistics for bulk loads and report runs
//!
//! Both collectors share `TimingInfo` and implement `StatisticsCollector` so the
//! CLI can print uniform summaries.

use crate::utils::math::safe_percentage;
use std::time::{Duration, Instant};

/// Common trait for all statistics collectors
pub trait StatisticsCollector {
    /// Get the total processing duration
    fn duration(&self) -> Duration;

    /// Calculate the processing rate (items per second)
    fn processing_rate(&self) -> f64;

    /// Finalize statistics collection
    fn finish(&mut self);

    /// Get a summary of the statistics
    fn summary(&self) -> String;
}

/// Common timing information for all statistics
#[derive(Debug, Clone)]
pub struct TimingInfo {
    pub start_time: Instant,
    pub processing_duration: Duration,
}

impl Default for TimingInfo {
    fn default() -> Self {
        Self {
            start_time: Instant::now(),
            processing_duration: Duration::default(),
        }
    }
}

impl TimingInfo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn finish(&mut self) {
        self.processing_duration = self.start_time.elapsed();
    }

    pub fn elapsed(&self) -> Duration {
        if self.processing_duration.is_zero() {
            self.start_time.elapsed()
        } else {
            self.processing_duration
        }
    }
}

fn rate(count: usize, elapsed: Duration) -> f64 {
    let secs = elapsed.as_secs_f64();
    if secs > 0.0 {
        count as f64 / secs
    } else {
        0.0
    }
}

/// Bulk load statistics
#[derive(Debug, Clone, Default)]
pub struct LoadStats {
    pub status_rows: usize,
    pub business_hour_rows: usize,
    pub timezone_rows: usize,
    pub malformed_records: usize,
    pub batches_processed: usize,
    pub timing: TimingInfo,
}

impl LoadStats {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_rows(&self) -> usize {
        self.status_rows + self.business_hour_rows + self.timezone_rows
    }

    pub fn error_rate(&self) -> f64 {
        safe_percentage(
            self.malformed_records,
            self.total_rows() + self.malformed_records,
        )
    }
}

impl crate::processor::RunMetrics for LoadStats {
    fn format_custom_metrics(&self) -> String {
        format!(
            "Status: {} | Hours: {} | Timezones: {} | Malformed: {}",
            self.status_rows, self.business_hour_rows, self.timezone_rows, self.malformed_records
        )
    }
}

impl StatisticsCollector for LoadStats {
    fn duration(&self) -> Duration {
        self.timing.elapsed()
    }

    fn processing_rate(&self) -> f64 {
        rate(self.total_rows(), self.timing.elapsed())
    }

    fn finish(&mut self) {
        self.timing.finish();
    }

    fn summary(&self) -> String {
        format!(
            "Load: {} rows ({} status, {} hours, {} timezones), {} malformed ({:.1}%), {:.1} rows/sec",
            self.total_rows(),
            self.status_rows,
            self.business_hour_rows,
            self.timezone_rows,
            self.malformed_records,
            self.error_rate(),
            self.processing_rate()
        )
    }
}

/// Report run statistics
#[derive(Debug, Clone, Default)]
pub struct ReportRunStats {
    pub stores_total: usize,
    pub stores_processed: usize,
    pub batches_processed: usize,
    pub observations_loaded: usize,
    pub stores_without_hours: usize,
    pub stores_without_timezone: usize,
    pub timing: TimingInfo,
}

impl ReportRunStats {
    pub fn new() -> Self {
        Self::default()
    }
}

impl crate::processor::RunMetrics for ReportRunStats {
    fn format_custom_metrics(&self) -> String {
        format!(
            "Batches: {} | Observations: {} | 24/7 defaults: {}",
            self.batches_processed, self.observations_loaded, self.stores_without_hours
        )
    }
}

impl StatisticsCollector for ReportRunStats {
    fn duration(&self) -> Duration {
        self.timing.elapsed()
    }

    fn processing_rate(&self) -> f64 {
        rate(self.stores_processed, self.timing.elapsed())
    }

    fn finish(&mut self) {
        self.timing.finish();
    }

    fn summary(&self) -> String {
        format!(
            "Report: {}/{} stores in {} batches, {} observations, {:.1} stores/sec",
            self.stores_processed,
            self.stores_total,
            self.batches_processed,
            self.observations_loaded,
            self.processing_rate()
        )
    }
}

use crate::errors::{AppError, AppResult};
use std::io::Write;
use std::time::Instant;
use tracing::{info, warn};

/// Timer-driven progress tracking for long-running operations
pub struct StandardProgressTracker {
    start_time: Option<Instant>,
    last_report: Option<Instant>,
    report_interval_ms: u64,
    reported: bool,
}

impl Default for StandardProgressTracker {
    fn default() -> Self {
        Self {
            start_time: None,
            last_report: None,
            report_interval_ms: 500,
            reported: false,
        }
    }
}

impl StandardProgressTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self) {
        let now = Instant::now();
        self.start_time = Some(now);
        self.last_report = Some(now);
    }

    /// True at most once per report interval
    pub fn should_report(&mut self) -> bool {
        let now = Instant::now();
        let due = self.last_report.map_or(true, |last| {
            now.duration_since(last).as_millis() > self.report_interval_ms as u128
        });
        if due {
            self.last_report = Some(now);
            self.reported = true;
        }
        due
    }

    /// Whether any progress report has been due since creation
    pub fn has_reported(&self) -> bool {
        self.reported
    }

    pub fn elapsed_seconds(&self) -> f64 {
        self.start_time
            .map(|start| start.elapsed().as_secs_f64())
            .unwrap_or(0.0)
    }
}

/// Configuration validation utilities
pub struct ConfigValidator;

impl ConfigValidator {
    pub fn validate_batch_config(batch_size: usize, workers: usize) -> AppResult<()> {
        if batch_size == 0 {
            return Err(AppError::Config(
                "Batch size must be greater than 0".to_string(),
            ));
        }
        if workers == 0 {
            return Err(AppError::Config(
                "Worker count must be greater than 0".to_string(),
            ));
        }
        if batch_size > 10_000 {
            warn!(
                "Large batch size: {} stores - status logs for the whole batch are held in memory",
                batch_size
            );
        }
        Ok(())
    }

    pub fn log_config_summary(
        processor_name: &str,
        batch_size: usize,
        workers: usize,
        additional_info: Option<&str>,
    ) {
        info!("=== {} Configuration ===", processor_name);
        info!("  Batch size: {}", batch_size);
        info!("  Workers: {}", workers);
        if let Some(info) = additional_info {
            info!("  {}", info);
        }
    }
}

/// Run-specific metrics shown on the progress line
pub trait RunMetrics {
    /// e.g. "Batches: 3 | Observations: 1200"
    fn format_custom_metrics(&self) -> String;
}

/// Progress reporting utilities
pub struct ProgressReporter;

impl ProgressReporter {
    /// Format elapsed seconds into human-readable time (days, hours, minutes, seconds)
    pub fn format_elapsed_time(elapsed_secs: f64) -> String {
        if elapsed_secs < 60.0 {
            return format!("{:.1}s", elapsed_secs);
        }

        let days = (elapsed_secs / 86400.0).floor();
        let hours = ((elapsed_secs % 86400.0) / 3600.0).floor();
        let minutes = ((elapsed_secs % 3600.0) / 60.0).floor();
        let seconds = elapsed_secs % 60.0;

        if elapsed_secs < 3600.0 {
            format!("{}m {:.0}s ({:.1}s)", minutes, seconds, elapsed_secs)
        } else if elapsed_secs < 86400.0 {
            format!(
                "{}h {}m {:.0}s ({:.1}s)",
                hours, minutes, seconds, elapsed_secs
            )
        } else {
            format!(
                "{}d {}h {}m {:.0}s ({:.1}s)",
                days, hours, minutes, seconds, elapsed_secs
            )
        }
    }

    pub fn report_completion(operation: &str, total_processed: usize, elapsed: f64) {
        let rate = if elapsed > 0.0 {
            total_processed as f64 / elapsed
        } else {
            0.0
        };
        info!("=== {} Completed ===", operation);
        info!("  Total processed: {}", total_processed);
        info!("  Time elapsed: {}", Self::format_elapsed_time(elapsed));
        info!("  Average rate: {:.1} items/sec", rate);
    }

    /// End an in-place progress line, if one was printed
    pub fn finish_progress_line(tracker: &StandardProgressTracker) {
        if tracker.has_reported() {
            println!();
        }
    }

    pub fn format_standard_progress(
        processed_count: usize,
        total_estimate: Option<usize>,
        rate: f64,
        elapsed: f64,
        custom_metrics: &str,
    ) -> String {
        let progress_pct = match total_estimate {
            Some(total) if total > 0 => {
                format!(" ({:.1}%)", (processed_count as f64 / total as f64) * 100.0)
            }
            _ => String::new(),
        };

        format!(
            "Processed: {}{} | Rate: {:.1}/sec | Elapsed: {} | {}",
            processed_count,
            progress_pct,
            rate,
            Self::format_elapsed_time(elapsed),
            custom_metrics
        )
    }

    pub fn print_progress_line(message: &str) -> AppResult<()> {
        print!("\r{}", message);
        std::io::stdout().flush().map_err(AppError::Io)?;
        Ok(())
    }

    pub fn report_progress_with_metrics<T: RunMetrics>(
        metrics: &T,
        processed_count: usize,
        total_estimate: Option<usize>,
        elapsed_secs: f64,
    ) -> AppResult<()> {
        let rate = if elapsed_secs > 0.0 {
            processed_count as f64 / elapsed_secs
        } else {
            0.0
        };

        let message = Self::format_standard_progress(
            processed_count,
            total_estimate,
            rate,
            elapsed_secs,
            &metrics.format_custom_metrics(),
        );
        Self::print_progress_line(&message)
    }
}

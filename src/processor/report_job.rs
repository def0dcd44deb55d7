//! Report job lifecycle: Pending -> Running -> Complete | Failed.
//!
//! The job layer owns everything around the availability computation: the
//! report id, persisted status transitions, choosing `now` and writing the CSV.
//! Failures are persisted as a message and also returned to the caller typed.

use super::{ReportProcessor, ReportWriter};
use crate::database::{ReportOperations, StoreDataSource};
use crate::errors::{AppError, AppResult};
use crate::types::{AvailabilityRecord, ReportConfig, ReportJobInfo, ReportRunStats};
use chrono::{DateTime, Utc};
use std::path::PathBuf;
use tracing::{error, info};
use uuid::Uuid;

/// Result of a completed report job
#[derive(Debug)]
pub struct ReportOutcome {
    pub report_id: String,
    pub file_path: PathBuf,
    /// Reference instant all trailing windows end at
    pub now: DateTime<Utc>,
    pub records: Vec<AvailabilityRecord>,
    pub stats: ReportRunStats,
}

pub struct ReportJob;

impl ReportJob {
    /// Run a report end to end and persist its outcome.
    ///
    /// `now` defaults to the latest observation across all stores, or the
    /// current time when there are none.
    pub fn trigger<D>(
        db: &mut D,
        config: &ReportConfig,
        now: Option<DateTime<Utc>>,
    ) -> AppResult<ReportOutcome>
    where
        D: StoreDataSource + ReportOperations,
    {
        let report_id = Uuid::new_v4().to_string();
        db.create_report(&report_id)?;
        db.mark_report_running(&report_id)?;
        info!("Report {} running", report_id);

        let result = Self::execute(&*db, config, &report_id, now).and_then(|outcome| {
            db.mark_report_complete(&report_id, &outcome.file_path.to_string_lossy())?;
            Ok(outcome)
        });

        match result {
            Ok(outcome) => {
                info!(
                    "Report {} complete: {} stores -> {}",
                    report_id,
                    outcome.records.len(),
                    outcome.file_path.display()
                );
                Ok(outcome)
            }
            Err(e) => {
                error!("Report {} failed: {}", report_id, e);
                if let Err(mark_err) = db.mark_report_failed(&report_id, &e.to_string()) {
                    error!(
                        "Could not record failure of report {}: {}",
                        report_id, mark_err
                    );
                }
                Err(e)
            }
        }
    }

    /// Current state of a report; unknown ids are an error
    pub fn status<D: ReportOperations + ?Sized>(db: &D, report_id: &str) -> AppResult<ReportJobInfo> {
        db.get_report(report_id)?
            .ok_or_else(|| AppError::ReportNotFound(report_id.to_string()))
    }

    fn execute<D: StoreDataSource + ?Sized>(
        db: &D,
        config: &ReportConfig,
        report_id: &str,
        now: Option<DateTime<Utc>>,
    ) -> AppResult<ReportOutcome> {
        let now = match now {
            Some(now) => now,
            None => db.latest_observation_timestamp()?.unwrap_or_else(Utc::now),
        };

        let processor = ReportProcessor::new(db, config.clone())?;
        let (records, stats) = processor.run_with_stats(now)?;

        let file_path = ReportWriter::new(&config.reports_dir).write(report_id, &records)?;

        Ok(ReportOutcome {
            report_id: report_id.to_string(),
            file_path,
            now,
            records,
            stats,
        })
    }
}

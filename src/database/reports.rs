//! Report job lifecycle operations.

use crate::database::helpers::report_job_from_row;
use crate::database::traits::ReportOperations;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::types::{ReportJobInfo, ReportStatus};
use crate::utils::time::to_micros;
use chrono::Utc;
use rusqlite::{params, OptionalExtension};
use tracing::debug;

impl Database {
    /// Update a job's status, failing if the id is unknown
    fn update_report(
        &mut self,
        report_id: &str,
        status: ReportStatus,
        file_path: Option<&str>,
        error: Option<&str>,
    ) -> AppResult<()> {
        let completed_at = status.is_terminal().then(|| to_micros(Utc::now()));
        let updated = self.connection().execute(
            r#"UPDATE store_reports
               SET status = ?2,
                   completed_at = COALESCE(?3, completed_at),
                   file_path = COALESCE(?4, file_path),
                   error = ?5
               WHERE report_id = ?1"#,
            params![report_id, status.as_str(), completed_at, file_path, error],
        )?;

        if updated == 0 {
            return Err(AppError::ReportNotFound(report_id.to_string()));
        }

        debug!("Report {} -> {}", report_id, status);
        Ok(())
    }
}

impl ReportOperations for Database {
    fn create_report(&mut self, report_id: &str) -> AppResult<()> {
        self.connection().execute(
            "INSERT INTO store_reports (report_id, status, created_at) VALUES (?1, ?2, ?3)",
            params![
                report_id,
                ReportStatus::Pending.as_str(),
                to_micros(Utc::now())
            ],
        )?;
        debug!("Report {} created", report_id);
        Ok(())
    }

    fn mark_report_running(&mut self, report_id: &str) -> AppResult<()> {
        self.update_report(report_id, ReportStatus::Running, None, None)
    }

    fn mark_report_complete(&mut self, report_id: &str, file_path: &str) -> AppResult<()> {
        self.update_report(report_id, ReportStatus::Complete, Some(file_path), None)
    }

    fn mark_report_failed(&mut self, report_id: &str, error: &str) -> AppResult<()> {
        self.update_report(report_id, ReportStatus::Failed, None, Some(error))
    }

    fn get_report(&self, report_id: &str) -> AppResult<Option<ReportJobInfo>> {
        let report = self
            .connection()
            .query_row(
                r#"SELECT report_id, status, created_at, completed_at, file_path, error
                   FROM store_reports WHERE report_id = ?1"#,
                params![report_id],
                report_job_from_row,
            )
            .optional()?;
        Ok(report)
    }
}

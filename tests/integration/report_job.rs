//! Report job lifecycle tests

use crate::common::database::TestDatabase;
use crate::common::db_seeding::seed_s1;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use store_uptime::database::{IngestOperations, ReportOperations, StoreDataSource};
use store_uptime::errors::{AppError, AppResult};
use store_uptime::processor::{ReportJob, ReportProcessor};
use store_uptime::types::{
    BusinessHourRule, ReportConfig, ReportJobInfo, ReportStatus, StatusObservation, StoreProfile,
    REPORT_COLUMNS,
};
use tempfile::TempDir;

fn config_in(dir: &TempDir) -> ReportConfig {
    ReportConfig::builder()
        .reports_dir(dir.path())
        .build()
        .unwrap()
}

/// Ids of all persisted jobs, oldest first
fn report_ids(test_db: &TestDatabase) -> Vec<String> {
    let conn = test_db.database().connection();
    let mut stmt = conn
        .prepare("SELECT report_id FROM store_reports ORDER BY created_at")
        .unwrap();
    stmt.query_map([], |row| row.get::<_, String>(0))
        .unwrap()
        .collect::<Result<Vec<_>, _>>()
        .unwrap()
}

#[test]
fn test_completed_job_writes_report_csv() -> anyhow::Result<()> {
    let reports = TempDir::new()?;
    let mut test_db = TestDatabase::new("job_complete")?;
    let now = seed_s1(test_db.database_mut())?;

    let outcome = ReportJob::trigger(test_db.database_mut(), &config_in(&reports), Some(now))?;
    assert_eq!(outcome.now, now);
    assert_eq!(outcome.records.len(), 1);

    let info = ReportJob::status(test_db.database(), &outcome.report_id)?;
    assert_eq!(info.status, ReportStatus::Complete);
    assert!(info.completed_at.is_some());
    assert!(info.error.is_none());
    assert_eq!(
        info.file_path.as_deref(),
        Some(outcome.file_path.to_string_lossy().as_ref())
    );

    let content = std::fs::read_to_string(&outcome.file_path)?;
    let lines: Vec<&str> = content.lines().collect();
    assert_eq!(lines[0], REPORT_COLUMNS.join(","));
    assert_eq!(lines[1], "S1,0.0,0.0,4.0,4.0,4.0,4.0");
    Ok(())
}

#[test]
fn test_job_defaults_now_to_latest_observation() -> anyhow::Result<()> {
    let reports = TempDir::new()?;
    let mut test_db = TestDatabase::new("job_latest_now")?;
    seed_s1(test_db.database_mut())?;

    let outcome = ReportJob::trigger(test_db.database_mut(), &config_in(&reports), None)?;

    // Latest S1 poll is Monday 16:00
    assert_eq!(outcome.now.to_rfc3339(), "2023-01-23T16:00:00+00:00");
    Ok(())
}

#[test]
fn test_unknown_timezone_fails_job() -> anyhow::Result<()> {
    let reports = TempDir::new()?;
    let mut test_db = TestDatabase::new("job_bad_timezone")?;
    seed_s1(test_db.database_mut())?;
    test_db
        .database_mut()
        .upsert_stores_batch(&[StoreProfile::new("S2", "Mars/Base")])?;

    let err = ReportJob::trigger(test_db.database_mut(), &config_in(&reports), None).unwrap_err();
    assert!(err.is_input_data());

    let ids = report_ids(&test_db);
    assert_eq!(ids.len(), 1);
    let info = ReportJob::status(test_db.database(), &ids[0])?;
    assert_eq!(info.status, ReportStatus::Failed);
    assert!(info.error.unwrap().contains("Mars/Base"));
    assert!(info.file_path.is_none());

    // No partial report is left behind
    assert_eq!(std::fs::read_dir(reports.path())?.count(), 0);
    Ok(())
}

/// In-memory data source with report bookkeeping, where bulk fetches and
/// individual status writes can be made to fail
#[derive(Default)]
struct StubSource {
    reports: HashMap<String, ReportJobInfo>,
    unreachable: bool,
    reject_complete: bool,
    reject_failed: bool,
}

impl StubSource {
    fn unreachable() -> Self {
        StubSource {
            unreachable: true,
            ..StubSource::default()
        }
    }

    fn only_report(&self) -> &ReportJobInfo {
        assert_eq!(self.reports.len(), 1);
        self.reports.values().next().unwrap()
    }

    fn set_status(
        &mut self,
        report_id: &str,
        status: ReportStatus,
        error: Option<&str>,
    ) -> AppResult<()> {
        let info = self
            .reports
            .get_mut(report_id)
            .ok_or_else(|| AppError::ReportNotFound(report_id.to_string()))?;
        info.status = status;
        info.error = error.map(str::to_string);
        if status.is_terminal() {
            info.completed_at = Some(Utc::now());
        }
        Ok(())
    }
}

impl StoreDataSource for StubSource {
    fn fetch_stores(&self) -> AppResult<Vec<String>> {
        if self.unreachable {
            Ok(vec!["s1".to_string(), "s2".to_string()])
        } else {
            Ok(Vec::new())
        }
    }

    fn fetch_timezones(&self, _store_ids: &[String]) -> AppResult<HashMap<String, String>> {
        if self.unreachable {
            return Err(AppError::DataSource("connection timed out".to_string()));
        }
        Ok(HashMap::new())
    }

    fn fetch_business_hours(
        &self,
        _store_ids: &[String],
    ) -> AppResult<HashMap<String, Vec<BusinessHourRule>>> {
        Ok(HashMap::new())
    }

    fn fetch_status_observations(
        &self,
        _store_ids: &[String],
        _range_start: DateTime<Utc>,
        _range_end: DateTime<Utc>,
    ) -> AppResult<HashMap<String, Vec<StatusObservation>>> {
        Ok(HashMap::new())
    }

    fn latest_observation_timestamp(&self) -> AppResult<Option<DateTime<Utc>>> {
        Ok(None)
    }
}

impl ReportOperations for StubSource {
    fn create_report(&mut self, report_id: &str) -> AppResult<()> {
        self.reports.insert(
            report_id.to_string(),
            ReportJobInfo {
                report_id: report_id.to_string(),
                status: ReportStatus::Pending,
                created_at: Utc::now(),
                completed_at: None,
                file_path: None,
                error: None,
            },
        );
        Ok(())
    }

    fn mark_report_running(&mut self, report_id: &str) -> AppResult<()> {
        self.set_status(report_id, ReportStatus::Running, None)
    }

    fn mark_report_complete(&mut self, report_id: &str, file_path: &str) -> AppResult<()> {
        if self.reject_complete {
            return Err(AppError::DataSource("disk I/O error".to_string()));
        }
        self.set_status(report_id, ReportStatus::Complete, None)?;
        if let Some(info) = self.reports.get_mut(report_id) {
            info.file_path = Some(file_path.to_string());
        }
        Ok(())
    }

    fn mark_report_failed(&mut self, report_id: &str, error: &str) -> AppResult<()> {
        if self.reject_failed {
            return Err(AppError::DataSource("database is locked".to_string()));
        }
        self.set_status(report_id, ReportStatus::Failed, Some(error))
    }

    fn get_report(&self, report_id: &str) -> AppResult<Option<ReportJobInfo>> {
        Ok(self.reports.get(report_id).cloned())
    }
}

#[test]
fn test_data_source_failure_propagates() {
    let source = StubSource::unreachable();
    let processor = ReportProcessor::new(&source, ReportConfig::default()).unwrap();

    let err = processor.run(Utc::now()).unwrap_err();
    assert!(err.is_data_source());
    assert!(!err.is_input_data());
}

#[test]
fn test_data_source_failure_marks_job_failed() {
    let reports = TempDir::new().unwrap();
    let mut source = StubSource::unreachable();

    let err = ReportJob::trigger(&mut source, &config_in(&reports), None).unwrap_err();
    assert!(err.is_data_source());

    let info = source.only_report();
    assert_eq!(info.status, ReportStatus::Failed);
    assert_eq!(
        info.error.as_deref(),
        Some("Data source error: connection timed out")
    );
}

#[test]
fn test_unrecorded_completion_marks_job_failed() {
    let reports = TempDir::new().unwrap();
    let mut source = StubSource {
        reject_complete: true,
        ..StubSource::default()
    };

    let err = ReportJob::trigger(&mut source, &config_in(&reports), None).unwrap_err();
    assert!(matches!(err, AppError::DataSource(ref msg) if msg == "disk I/O error"));

    let info = source.only_report();
    assert_eq!(info.status, ReportStatus::Failed);
    assert_eq!(info.error.as_deref(), Some("Data source error: disk I/O error"));
    assert!(info.file_path.is_none());
}

#[test]
fn test_unrecorded_failure_keeps_original_error() {
    let reports = TempDir::new().unwrap();
    let mut source = StubSource {
        reject_failed: true,
        ..StubSource::unreachable()
    };

    let err = ReportJob::trigger(&mut source, &config_in(&reports), None).unwrap_err();
    assert!(matches!(err, AppError::DataSource(ref msg) if msg == "connection timed out"));
    assert_eq!(source.only_report().status, ReportStatus::Running);
}

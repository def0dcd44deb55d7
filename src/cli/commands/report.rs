use super::load_app_config;
use crate::database::Database;
use crate::errors::{AppError, AppResult};
use crate::processor::{ProgressReporter, ReportJob};
use crate::types::statistics::StatisticsCollector;
use crate::types::{ReportConfig, ReportStatus};
use crate::utils::time::parse_utc_timestamp;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct TriggerReportCommand {
    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Directory report CSVs are written to (overrides config.toml and env vars)
    #[arg(long)]
    reports_dir: Option<PathBuf>,

    /// Stores per fetch batch (overrides config.toml)
    #[arg(long)]
    batch_size: Option<usize>,

    /// Aggregation worker threads (overrides config.toml)
    #[arg(long)]
    workers: Option<usize>,

    /// Reference time, e.g. "2023-01-25 18:13:22 UTC" (defaults to the latest observation)
    #[arg(long)]
    now: Option<String>,
}

impl TriggerReportCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== Store Uptime - Trigger Report ===");
        let app_config = load_app_config();

        let now = self
            .now
            .as_deref()
            .map(|value| {
                parse_utc_timestamp(value)
                    .ok_or_else(|| AppError::Config(format!("Invalid --now value '{}'", value)))
            })
            .transpose()?;

        let config = ReportConfig::builder()
            .batch_size(self.batch_size.unwrap_or(app_config.processing.batch_size))
            .workers(self.workers.unwrap_or(app_config.processing.workers))
            .default_timezone(app_config.defaults.timezone.clone())
            .reports_dir(
                self.reports_dir
                    .clone()
                    .unwrap_or(app_config.paths.reports_dir.clone()),
            )
            .build()
            .map_err(AppError::Config)?;

        let database_path = self
            .database_path
            .clone()
            .unwrap_or(app_config.database.default_path.clone());
        let mut db = Database::new(&database_path.to_string_lossy())?;

        let outcome = ReportJob::trigger(&mut db, &config, now)?;

        println!("\n=== REPORT COMPLETE ===");
        println!("Report id: {}", outcome.report_id);
        println!("Reference time: {}", outcome.now);
        println!("Stores: {}", outcome.records.len());
        println!("Batches: {}", outcome.stats.batches_processed);
        println!("Observations: {}", outcome.stats.observations_loaded);
        println!(
            "Processing time: {}",
            ProgressReporter::format_elapsed_time(outcome.stats.duration().as_secs_f64())
        );
        println!("\nReport written to: {}", outcome.file_path.display());
        Ok(())
    }
}

#[derive(Args)]
pub struct GetReportCommand {
    /// Report id printed by trigger-report
    report_id: String,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Print the full job record as JSON
    #[arg(long)]
    json: bool,
}

impl GetReportCommand {
    pub fn run(&self) -> AppResult<()> {
        let app_config = load_app_config();
        let database_path = self
            .database_path
            .clone()
            .unwrap_or(app_config.database.default_path.clone());
        let db = Database::new(&database_path.to_string_lossy())?;

        let report = ReportJob::status(&db, &self.report_id)?;

        if self.json {
            println!("{}", serde_json::to_string_pretty(&report)?);
            return Ok(());
        }

        println!("Report {}: {}", report.report_id, report.status);
        match report.status {
            ReportStatus::Complete => {
                if let Some(path) = report.file_path {
                    println!("File: {}", path);
                }
            }
            ReportStatus::Failed => {
                if let Some(error) = report.error {
                    println!("Error: {}", error);
                }
            }
            ReportStatus::Pending | ReportStatus::Running => {}
        }
        Ok(())
    }
}

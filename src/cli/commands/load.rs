use super::load_app_config;
use crate::errors::{AppError, AppResult};
use crate::processor::{CsvLoader, ProgressReporter};
use crate::types::statistics::StatisticsCollector;
use crate::types::LoadConfig;
use clap::Args;
use std::path::PathBuf;
use tracing::info;

#[derive(Args)]
pub struct LoadCommand {
    /// Directory holding the source CSVs (overrides config.toml and env vars)
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Database path (overrides config.toml and env vars)
    #[arg(long)]
    database_path: Option<PathBuf>,

    /// Rows per insert transaction
    #[arg(long, default_value_t = 10_000)]
    batch_size: usize,
}

impl LoadCommand {
    pub fn run(&self) -> AppResult<()> {
        info!("=== Store Uptime - Load ===");
        let app_config = load_app_config();

        let config = LoadConfig {
            data_dir: self
                .data_dir
                .clone()
                .unwrap_or(app_config.paths.data_dir.clone()),
            database_path: self
                .database_path
                .clone()
                .unwrap_or(app_config.database.default_path.clone()),
            batch_size: self.batch_size,
            default_timezone: app_config.defaults.timezone.clone(),
        };

        if !config.data_dir.is_dir() {
            return Err(AppError::Config(format!(
                "Data directory does not exist: {}",
                config.data_dir.display()
            )));
        }

        let mut loader = CsvLoader::new(config.clone())?;
        let stats = loader.load_all()?;

        println!("\n=== LOAD COMPLETE ===");
        println!("Status observations: {}", stats.status_rows);
        println!("Business-hour rules: {}", stats.business_hour_rows);
        println!("Timezone rows: {}", stats.timezone_rows);
        println!("Malformed records: {}", stats.malformed_records);
        println!("Error rate: {:.4}%", stats.error_rate());
        println!(
            "Processing time: {}",
            ProgressReporter::format_elapsed_time(stats.duration().as_secs_f64())
        );
        println!("Processing rate: {:.2} rows/sec", stats.processing_rate());

        let db_stats = loader.get_database_stats()?;
        println!("\n=== DATABASE SUMMARY ===");
        println!("Stores: {}", db_stats.stores);
        println!("Status rows: {}", db_stats.status_rows);
        println!("Business-hour rows: {}", db_stats.business_hour_rows);
        if let (Some(min), Some(max)) = (
            db_stats.earliest_observation,
            db_stats.latest_observation,
        ) {
            println!("Observation range: {} - {}", min, max);
        }

        println!("\nDatabase written to: {}", config.database_path.display());
        Ok(())
    }
}

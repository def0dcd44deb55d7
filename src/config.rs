use config::{Config, ConfigError, File};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;

/// Application configuration loaded from config.toml or environment variables
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub paths: PathsConfig,
    pub database: DatabaseConfig,
    pub processing: ProcessingConfig,
    pub defaults: DefaultsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    /// Directory holding store_status.csv, menu_hours.csv and timezones.csv
    pub data_dir: PathBuf,
    /// Directory that generated report CSVs are written into
    pub reports_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    pub default_path: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProcessingConfig {
    pub batch_size: usize,
    pub workers: usize,
}

/// Fill-in values for store records that are absent from the source data
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsConfig {
    pub timezone: String,
}

pub const DEFAULT_BATCH_SIZE: usize = 250;
pub const DEFAULT_WORKERS: usize = 4;
pub const DEFAULT_TIMEZONE: &str = "America/Chicago";

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            paths: PathsConfig {
                data_dir: PathBuf::from("./data"),
                reports_dir: PathBuf::from("./reports"),
            },
            database: DatabaseConfig {
                default_path: PathBuf::from("./store_uptime.db"),
            },
            processing: ProcessingConfig {
                batch_size: DEFAULT_BATCH_SIZE,
                workers: DEFAULT_WORKERS,
            },
            defaults: DefaultsConfig {
                timezone: DEFAULT_TIMEZONE.to_string(),
            },
        }
    }
}

impl AppConfig {
    /// Load configuration from config.toml file and environment variables
    /// Environment variables take precedence over file configuration
    pub fn load() -> Result<Self, ConfigError> {
        let defaults = AppConfig::default();
        let config = Config::builder()
            .set_default(
                "paths.data_dir",
                defaults.paths.data_dir.to_string_lossy().to_string(),
            )?
            .set_default(
                "paths.reports_dir",
                defaults.paths.reports_dir.to_string_lossy().to_string(),
            )?
            .set_default(
                "database.default_path",
                defaults.database.default_path.to_string_lossy().to_string(),
            )?
            .set_default(
                "processing.batch_size",
                defaults.processing.batch_size as i64,
            )?
            .set_default("processing.workers", defaults.processing.workers as i64)?
            .set_default("defaults.timezone", defaults.defaults.timezone)?
            // Load from config.toml if it exists
            .add_source(File::with_name("config").required(false))
            // STORE_UPTIME_PROCESSING__BATCH_SIZE etc. override nested keys
            .add_source(
                config::Environment::with_prefix("STORE_UPTIME")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        let mut app_config: AppConfig = config.try_deserialize()?;

        // Short-form environment variables for the most common overrides
        if let Ok(db_path) = env::var("STORE_UPTIME_DATABASE_PATH") {
            app_config.database.default_path = PathBuf::from(db_path);
        }

        if let Ok(reports_dir) = env::var("STORE_UPTIME_REPORTS_DIR") {
            app_config.paths.reports_dir = PathBuf::from(reports_dir);
        }

        Ok(app_config)
    }

    /// Get default config values for CLI argument defaults
    pub fn get_defaults() -> Self {
        Self::load().unwrap_or_default()
    }
}

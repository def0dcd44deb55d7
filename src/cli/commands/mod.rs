pub mod load;
pub mod report;

use crate::config::AppConfig;
use tracing::{info, warn};

/// Load configuration from file/environment, falling back to built-in defaults
pub(crate) fn load_app_config() -> AppConfig {
    match AppConfig::load() {
        Ok(config) => {
            info!("Configuration loaded successfully");
            config
        }
        Err(e) => {
            warn!("Failed to load configuration: {}", e);
            info!("Using default configuration");
            AppConfig::default()
        }
    }
}

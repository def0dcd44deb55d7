use crate::errors::AppResult;
use clap::{Parser, Subcommand};

pub mod commands;

/// Store Uptime Reporter
#[derive(Parser)]
#[command(name = "store-uptime")]
#[command(about = "Per-store uptime and downtime within business hours")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Bulk load store_status.csv, menu_hours.csv and timezones.csv into the database
    Load(commands::load::LoadCommand),
    /// Compute the availability report for every store and write it as CSV
    TriggerReport(commands::report::TriggerReportCommand),
    /// Show the status of a report, or its file path once complete
    GetReport(commands::report::GetReportCommand),
}

pub fn run() -> AppResult<()> {
    // Uses RUST_LOG environment variable (defaults to "error" if not set)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Load(command) => command.run(),
        Commands::TriggerReport(command) => command.run(),
        Commands::GetReport(command) => command.run(),
    }
}

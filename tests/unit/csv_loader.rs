//! Bulk loader tests against generated CSV files

use crate::common::create_unique_test_db_path;
use crate::common::fixtures::monday;
use std::fs;
use std::path::PathBuf;
use store_uptime::database::{StatisticsOperations, StoreDataSource};
use store_uptime::processor::{CsvLoader, ReportProcessor};
use store_uptime::types::{LoadConfig, ReportConfig};
use tempfile::TempDir;

fn write_csv(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).expect("Failed to write test CSV");
    path
}

fn load_config(dir: &TempDir, test_name: &str) -> LoadConfig {
    LoadConfig {
        data_dir: dir.path().to_path_buf(),
        database_path: create_unique_test_db_path(test_name).into(),
        batch_size: 100,
        ..LoadConfig::default()
    }
}

#[test]
fn test_loaded_data_produces_expected_report() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write_csv(
        &dir,
        "store_status.csv",
        "store_id,status,timestamp_utc\n\
         S1,active,2023-01-23 08:00:00.000000 UTC\n\
         S1,inactive,2023-01-23 12:00:00 UTC\n\
         S1,active,2023-01-23 16:00:00 UTC\n",
    );
    write_csv(
        &dir,
        "menu_hours.csv",
        "store_id,dayOfWeek,start_time_local,end_time_local\n\
         S1,0,09:00:00,17:00:00\n",
    );
    write_csv(&dir, "timezones.csv", "store_id,timezone_str\nS1,UTC\n");

    let config = load_config(&dir, "loader_report");
    let mut loader = CsvLoader::new(config.clone())?;
    let stats = loader.load_all()?;

    assert_eq!(stats.status_rows, 3);
    assert_eq!(stats.business_hour_rows, 1);
    assert_eq!(stats.timezone_rows, 1);
    assert_eq!(stats.malformed_records, 0);

    let db = loader.into_database();
    let records = ReportProcessor::new(&db, ReportConfig::default())?.run(monday(18))?;
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].uptime_last_day, 4.0);
    assert_eq!(records[0].downtime_last_day, 4.0);

    drop(db);
    let _ = fs::remove_file(&config.database_path);
    Ok(())
}

#[test]
fn test_malformed_rows_are_counted_not_fatal() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write_csv(
        &dir,
        "store_status.csv",
        "store_id,status,timestamp_utc\n\
         s1,active,2023-01-23 08:00:00 UTC\n\
         s1,maybe,2023-01-23 09:00:00 UTC\n\
         s1,inactive,yesterday\n\
         s1,inactive\n\
         s2,Inactive,2023-01-23T10:00:00Z\n",
    );
    write_csv(
        &dir,
        "menu_hours.csv",
        "store_id,dayOfWeek,start_time_local,end_time_local\n\
         s1,Monday,09:00:00,17:00:00\n\
         s1,1,09:00:00,17:00:00\n",
    );

    let config = load_config(&dir, "loader_malformed");
    let mut loader = CsvLoader::new(config.clone())?;
    let stats = loader.load_all()?;

    assert_eq!(stats.status_rows, 2);
    assert_eq!(stats.business_hour_rows, 1);
    assert_eq!(stats.timezone_rows, 0);
    assert_eq!(stats.malformed_records, 4);

    let db_stats = loader.get_database_stats()?;
    assert_eq!(db_stats.stores, 2);
    assert_eq!(db_stats.status_rows, 2);

    let _ = fs::remove_file(&config.database_path);
    Ok(())
}

#[test]
fn test_day_header_alias_and_default_timezone() -> anyhow::Result<()> {
    let dir = TempDir::new()?;
    write_csv(
        &dir,
        "menu_hours.csv",
        "store_id,day,start_time_local,end_time_local\n\
         s1,6,10:00:00,14:00:00\n",
    );
    write_csv(&dir, "timezones.csv", "store_id,timezone_str\ns1,\n");

    let config = LoadConfig {
        default_timezone: "Asia/Kolkata".to_string(),
        ..load_config(&dir, "loader_alias")
    };
    let mut loader = CsvLoader::new(config.clone())?;
    loader.load_all()?;

    let ids = vec!["s1".to_string()];
    let db = loader.database();
    assert_eq!(db.fetch_timezones(&ids)?["s1"], "Asia/Kolkata");
    let hours = db.fetch_business_hours(&ids)?;
    assert_eq!(hours["s1"][0].day_of_week, 6);
    assert_eq!(hours["s1"][0].start_time_local, "10:00:00");

    let _ = fs::remove_file(&config.database_path);
    Ok(())
}

//! Report pipeline tests: database -> batch orchestrator -> records

use crate::common::database::TestDatabase;
use crate::common::db_seeding::{seed_population, seed_s1};
use crate::common::fixtures::{observation, utc};
use store_uptime::database::IngestOperations;
use store_uptime::processor::ReportProcessor;
use store_uptime::types::{AvailabilityRecord, BusinessHourRule, ReportConfig, StoreProfile};

fn config(batch_size: usize, workers: usize) -> ReportConfig {
    ReportConfig::builder()
        .batch_size(batch_size)
        .workers(workers)
        .default_timezone("UTC")
        .build()
        .unwrap()
}

fn record_for<'a>(records: &'a [AvailabilityRecord], store_id: &str) -> &'a AvailabilityRecord {
    records
        .iter()
        .find(|r| r.store_id == store_id)
        .unwrap_or_else(|| panic!("no record for {}", store_id))
}

#[test]
fn test_s1_scenario_end_to_end() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("s1_scenario")?;
    let now = seed_s1(test_db.database_mut())?;

    let records = ReportProcessor::new(test_db.database(), config(250, 4))?.run(now)?;
    assert_eq!(records.len(), 1);

    // 09-12 and 16-17 up, 12-16 down; nothing after 17:00
    let s1 = record_for(&records, "S1");
    assert_eq!(s1.uptime_last_hour, 0.0);
    assert_eq!(s1.downtime_last_hour, 0.0);
    assert_eq!(s1.uptime_last_day, 4.0);
    assert_eq!(s1.downtime_last_day, 4.0);
    assert_eq!(s1.uptime_last_week, 4.0);
    assert_eq!(s1.downtime_last_week, 4.0);
    Ok(())
}

#[test]
fn test_batch_size_and_workers_do_not_change_results() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("batch_invariance")?;
    let now = utc(2023, 1, 25, 18, 13);
    seed_population(test_db.database_mut(), 120, now)?;

    let db = test_db.database();
    let baseline = ReportProcessor::new(db, config(120, 1))?.run(now)?;
    assert_eq!(baseline.len(), 120);

    for (batch_size, workers) in [(1, 1), (50, 1), (50, 4), (120, 4), (7, 3)] {
        let records = ReportProcessor::new(db, config(batch_size, workers))?.run(now)?;
        assert_eq!(
            records, baseline,
            "batch_size={} workers={}",
            batch_size, workers
        );
    }
    Ok(())
}

#[test]
fn test_chicago_hours_follow_dst() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("chicago_dst")?;
    let db = test_db.database_mut();
    db.upsert_stores_batch(&[
        StoreProfile::new("winter", "America/Chicago"),
        StoreProfile::new("summer", "America/Chicago"),
    ])?;
    db.insert_business_hours_batch(&[
        BusinessHourRule::new("winter", 0, "09:00:00", "17:00:00"),
        BusinessHourRule::new("summer", 0, "09:00:00", "17:00:00"),
    ])?;

    // Monday 09:30 local: 15:30 UTC in January (CST), 14:30 UTC in July (CDT)
    db.insert_status_batch(&[observation("winter", utc(2023, 1, 23, 14, 0), true)])?;
    db.insert_status_batch(&[observation("summer", utc(2023, 7, 24, 13, 0), true)])?;

    let processor = ReportProcessor::new(test_db.database(), config(250, 1))?;

    let winter = processor.run(utc(2023, 1, 23, 15, 30))?;
    assert_eq!(record_for(&winter, "winter").uptime_last_hour, 30.0);
    assert_eq!(record_for(&winter, "winter").downtime_last_hour, 0.0);

    let summer = processor.run(utc(2023, 7, 24, 14, 30))?;
    assert_eq!(record_for(&summer, "summer").uptime_last_hour, 30.0);
    assert_eq!(record_for(&summer, "summer").downtime_last_hour, 0.0);
    Ok(())
}

#[test]
fn test_store_without_hours_is_open_all_day() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("all_day_default")?;
    test_db
        .database_mut()
        .upsert_stores_batch(&[StoreProfile::new("silent", "UTC")])?;

    let records =
        ReportProcessor::new(test_db.database(), config(250, 1))?.run(utc(2023, 1, 25, 12, 0))?;
    let silent = record_for(&records, "silent");

    // No observations: the whole span is down, minus one second per day
    assert_eq!(silent.uptime_last_hour, 0.0);
    assert_eq!(silent.downtime_last_hour, 60.0);
    assert_eq!(silent.downtime_last_day, 24.0);
    assert_eq!(silent.downtime_last_week, 168.0);
    Ok(())
}

#[test]
fn test_missing_timezone_uses_configured_default() -> anyhow::Result<()> {
    let mut test_db = TestDatabase::new("default_timezone")?;
    let db = test_db.database_mut();
    db.insert_business_hours_batch(&[BusinessHourRule::new("s1", 0, "09:00:00", "17:00:00")])?;
    db.insert_status_batch(&[observation("s1", utc(2023, 1, 23, 2, 0), true)])?;

    // 04:00 UTC Monday is 09:30 in Kolkata, still closed in UTC
    let now = utc(2023, 1, 23, 4, 0);

    let utc_records = ReportProcessor::new(test_db.database(), config(250, 1))?.run(now)?;
    assert_eq!(utc_records[0].uptime_last_hour, 0.0);

    let kolkata = ReportConfig::builder()
        .default_timezone("Asia/Kolkata")
        .build()
        .unwrap();
    let kolkata_records = ReportProcessor::new(test_db.database(), kolkata)?.run(now)?;
    assert_eq!(kolkata_records[0].uptime_last_hour, 30.0);
    Ok(())
}

//! Common Test Utilities
//!
//! Shared helpers for the unit and integration test binaries.

#![allow(dead_code)]


use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};

/// Global test counter for generating unique test database paths
static TEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique database path per test, so tests can run in parallel
pub fn create_unique_test_db_path(test_name: &str) -> String {
    let test_dir = std::env::temp_dir().join("store_uptime_tests");
    std::fs::create_dir_all(&test_dir).unwrap();

    let unique_id = TEST_COUNTER.fetch_add(1, Ordering::SeqCst);
    let timestamp = std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_nanos();

    let db_path: PathBuf = test_dir.join(format!(
        "{}_{}_{}_{}.db",
        test_name,
        std::process::id(),
        unique_id,
        timestamp
    ));
    db_path.to_str().unwrap().to_string()
}

/// Database setup and teardown utilities
pub mod database {
    use store_uptime::database::Database;

    /// Test database wrapper that removes its file on drop
    pub struct TestDatabase {
        pub db: Database,
        path: String,
    }

    impl TestDatabase {
        pub fn new(test_name: &str) -> anyhow::Result<Self> {
            let path = super::create_unique_test_db_path(test_name);
            let db = Database::new(&path)?;
            Ok(TestDatabase { db, path })
        }

        pub fn path(&self) -> &str {
            &self.path
        }

        pub fn database(&self) -> &Database {
            &self.db
        }

        pub fn database_mut(&mut self) -> &mut Database {
            &mut self.db
        }
    }

    impl Drop for TestDatabase {
        fn drop(&mut self) {
            if std::path::Path::new(&self.path).exists() {
                let _ = std::fs::remove_file(&self.path);
            }
        }
    }
}

/// Test fixture utilities
pub mod fixtures {
    use chrono::{DateTime, TimeZone, Utc};
    use store_uptime::types::{BusinessHourRule, StatusObservation, StoreStatus};

    pub fn utc(year: i32, month: u32, day: u32, hour: u32, minute: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(year, month, day, hour, minute, 0).unwrap()
    }

    pub fn observation(store_id: &str, timestamp: DateTime<Utc>, active: bool) -> StatusObservation {
        let status = if active {
            StoreStatus::Active
        } else {
            StoreStatus::Inactive
        };
        StatusObservation::new(store_id, timestamp, status)
    }

    /// Monday 2023-01-23 at `hour`:00 UTC
    pub fn monday(hour: u32) -> DateTime<Utc> {
        utc(2023, 1, 23, hour, 0)
    }

    /// Store "S1": UTC, open Monday 09:00-17:00, active at 08:00, inactive at
    /// 12:00, active again at 16:00. Reported at Monday 18:00.
    pub struct S1Scenario {
        pub timezone: &'static str,
        pub rules: Vec<BusinessHourRule>,
        pub observations: Vec<StatusObservation>,
        pub now: DateTime<Utc>,
    }

    pub fn s1_scenario() -> S1Scenario {
        S1Scenario {
            timezone: "UTC",
            rules: vec![BusinessHourRule::new("S1", 0, "09:00:00", "17:00:00")],
            observations: vec![
                observation("S1", monday(8), true),
                observation("S1", monday(12), false),
                observation("S1", monday(16), true),
            ],
            now: monday(18),
        }
    }
}

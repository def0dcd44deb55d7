//! Time utilities for status timestamps and business-hour conversion
//!
//! Shared parsing helpers plus the local-to-UTC resolution used when
//! materializing business windows.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a wall-clock time of day in strict "HH:MM:SS" form, e.g. "09:00:00".
///
/// # Examples
/// ```
/// use store_uptime::utils::time::parse_time_of_day;
/// use chrono::NaiveTime;
/// assert_eq!(parse_time_of_day("09:30:00"), NaiveTime::from_hms_opt(9, 30, 0));
/// assert_eq!(parse_time_of_day("25:00:00"), None);
/// assert_eq!(parse_time_of_day("09:30"), None);
/// ```
pub fn parse_time_of_day(value: &str) -> Option<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), "%H:%M:%S").ok()
}

/// Parse a UTC status timestamp.
///
/// Accepts the poller's export format ("2023-01-22 12:09:39.388884 UTC"),
/// RFC 3339 (with "Z" or an offset), and bare "YYYY-MM-DD HH:MM:SS" which is
/// taken as UTC.
///
/// # Examples
/// ```
/// use store_uptime::utils::time::parse_utc_timestamp;
/// let ts = parse_utc_timestamp("2023-01-22 12:09:39.388884 UTC").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2023-01-22T12:09:39.388884+00:00");
/// ```
pub fn parse_utc_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();

    if let Some(naive) = value.strip_suffix(" UTC") {
        return parse_naive_datetime(naive).map(|dt| dt.and_utc());
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(value) {
        return Some(dt.with_timezone(&Utc));
    }

    parse_naive_datetime(value).map(|dt| dt.and_utc())
}

fn parse_naive_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, "%Y-%m-%d %H:%M:%S%.f")
        .or_else(|_| NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f"))
        .ok()
}

/// Convert a store-local wall-clock time on a concrete date to UTC.
///
/// Uses the offset in force on that date. Ambiguous local times (clocks going
/// back) resolve to the later, standard-time instant; local times skipped by a
/// spring-forward gap are interpreted with the offset in force before the gap.
pub fn local_to_utc(tz: &Tz, date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    let naive = date.and_time(time);

    if let Some(dt) = tz.from_local_datetime(&naive).latest() {
        return dt.with_timezone(&Utc);
    }

    // Inside a gap: step back before it, resolve, then step forward again
    let mut step_back = Duration::hours(1);
    while step_back <= Duration::hours(24) {
        if let Some(dt) = tz.from_local_datetime(&(naive - step_back)).latest() {
            return dt.with_timezone(&Utc) + step_back;
        }
        step_back = step_back + Duration::hours(1);
    }

    naive.and_utc()
}

/// Convert a duration to fractional minutes
pub fn minutes_between(start: DateTime<Utc>, end: DateTime<Utc>) -> f64 {
    (end - start).num_milliseconds() as f64 / 60_000.0
}

/// Microseconds since the Unix epoch, as stored in the database
pub fn to_micros(ts: DateTime<Utc>) -> i64 {
    ts.timestamp_micros()
}

pub fn from_micros(micros: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp_micros(micros)
}

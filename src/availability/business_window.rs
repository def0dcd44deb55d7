//! Business-window materialization
//!
//! Expands recurring weekly rules (store-local wall-clock times) into concrete
//! UTC intervals for each calendar date touched by a window. The conversion uses
//! the offset in force on each date, so DST transitions shift the UTC result.

use super::overlap::overlap_minutes;
use crate::errors::AppResult;
use crate::types::{BusinessHourRule, ParsedRule};
use crate::utils::time::{local_to_utc, minutes_between};
use chrono::{DateTime, Datelike, Utc};
use chrono_tz::Tz;

/// One concrete open block in UTC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BusinessWindow {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusinessWindow {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// Length in minutes; zero for degenerate (inverted) rules
    pub fn duration_minutes(&self) -> f64 {
        minutes_between(self.start, self.end).max(0.0)
    }
}

/// Parse `rules` and materialize them over `[window_start, window_end]`.
///
/// Fails with an input data error if any rule has an unparseable time.
pub fn materialize(
    rules: &[BusinessHourRule],
    tz: &Tz,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> AppResult<Vec<BusinessWindow>> {
    let parsed = rules
        .iter()
        .map(BusinessHourRule::parse)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(materialize_parsed(&parsed, tz, window_start, window_end))
}

/// Materialize already-parsed rules.
///
/// Every store-local date from the local date of `window_start` through the
/// local date of `window_end` is visited; each rule whose weekday matches
/// yields exactly one window on that date. Windows are emitted whole, even
/// where they extend past the requested range; callers clip by overlap.
pub fn materialize_parsed(
    rules: &[ParsedRule],
    tz: &Tz,
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<BusinessWindow> {
    let first_date = window_start.with_timezone(tz).date_naive();
    let last_date = window_end.with_timezone(tz).date_naive();

    let mut windows = Vec::new();
    let mut date = first_date;
    while date <= last_date {
        for rule in rules.iter().filter(|r| r.weekday == date.weekday()) {
            windows.push(BusinessWindow::new(
                local_to_utc(tz, date, rule.start),
                local_to_utc(tz, date, rule.end),
            ));
        }
        match date.succ_opt() {
            Some(next) => date = next,
            None => break,
        }
    }

    windows.sort_by_key(|w| (w.start, w.end));
    windows
}

/// Business minutes that fall inside `[window_start, window_end]`
pub fn business_minutes_within(
    windows: &[BusinessWindow],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> f64 {
    windows
        .iter()
        .map(|w| overlap_minutes(w.start, w.end, window_start, window_end))
        .sum()
}

//! Interval overlap and up/down accumulation

use super::business_window::BusinessWindow;
use crate::types::StatusInterval;
use crate::utils::time::minutes_between;
use chrono::{DateTime, Utc};

/// Minutes covered by both `[a_start, a_end]` and `[b_start, b_end]`; never negative
pub fn overlap_minutes(
    a_start: DateTime<Utc>,
    a_end: DateTime<Utc>,
    b_start: DateTime<Utc>,
    b_end: DateTime<Utc>,
) -> f64 {
    let latest_start = a_start.max(b_start);
    let earliest_end = a_end.min(b_end);
    if latest_start >= earliest_end {
        return 0.0;
    }
    minutes_between(latest_start, earliest_end)
}

/// Running up/down minute totals for one store and one trailing window
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct OverlapAccumulator {
    pub up_minutes: f64,
    pub down_minutes: f64,
}

impl OverlapAccumulator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Intersect every status interval with every business window
    pub fn accumulate(intervals: &[StatusInterval], windows: &[BusinessWindow]) -> Self {
        let mut acc = Self::new();
        for window in windows {
            for interval in intervals {
                acc.add(interval, window);
            }
        }
        acc
    }

    pub fn add(&mut self, interval: &StatusInterval, window: &BusinessWindow) {
        let minutes = overlap_minutes(interval.start, interval.end, window.start, window.end);
        if minutes <= 0.0 {
            return;
        }
        if interval.status.is_active() {
            self.up_minutes += minutes;
        } else {
            self.down_minutes += minutes;
        }
    }

    pub fn total_minutes(&self) -> f64 {
        self.up_minutes + self.down_minutes
    }
}

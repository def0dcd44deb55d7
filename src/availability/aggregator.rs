//! Per-store aggregation across the three trailing windows

use super::business_window::{business_minutes_within, materialize_parsed};
use super::overlap::OverlapAccumulator;
use super::timeline::reconstruct;
use crate::errors::AppResult;
use crate::types::store::parse_timezone;
use crate::types::{AvailabilityRecord, BusinessHourRule, ParsedRule, StatusObservation};
use crate::utils::math::round2;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;
use tracing::debug;

/// Trailing windows reported for every store; all end at the report's `now`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrailingWindow {
    Hour,
    Day,
    Week,
}

impl TrailingWindow {
    pub const ALL: [TrailingWindow; 3] =
        [TrailingWindow::Hour, TrailingWindow::Day, TrailingWindow::Week];

    pub fn lookback(&self) -> Duration {
        match self {
            TrailingWindow::Hour => Duration::hours(1),
            TrailingWindow::Day => Duration::days(1),
            TrailingWindow::Week => Duration::weeks(1),
        }
    }

    pub fn start(&self, now: DateTime<Utc>) -> DateTime<Utc> {
        now - self.lookback()
    }

    /// Hour figures are reported in minutes, day and week figures in hours
    fn to_report_units(self, minutes: f64) -> f64 {
        match self {
            TrailingWindow::Hour => round2(minutes),
            TrailingWindow::Day | TrailingWindow::Week => round2(minutes / 60.0),
        }
    }
}

/// Raw minute totals for one window, plus the business minutes it contained
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WindowTotals {
    pub window: TrailingWindow,
    pub up_minutes: f64,
    pub down_minutes: f64,
    pub business_minutes: f64,
}

impl WindowTotals {
    pub fn total(&self) -> f64 {
        self.up_minutes + self.down_minutes
    }
}

/// Compute the availability record of one store.
///
/// Every window is reconstructed and materialized independently over
/// `[now - lookback, now]`. A bad timezone or rule time is an input data error.
pub fn aggregate(
    store_id: &str,
    now: DateTime<Utc>,
    timezone: &str,
    rules: &[BusinessHourRule],
    observations: &[StatusObservation],
) -> AppResult<AvailabilityRecord> {
    let tz = parse_timezone(store_id, timezone)?;
    let parsed = rules
        .iter()
        .map(BusinessHourRule::parse)
        .collect::<AppResult<Vec<_>>>()?;

    let mut record = AvailabilityRecord::empty(store_id);
    for window in TrailingWindow::ALL {
        let totals = window_totals(window, now, &tz, &parsed, observations);
        let up = window.to_report_units(totals.up_minutes);
        let down = window.to_report_units(totals.down_minutes);
        match window {
            TrailingWindow::Hour => {
                record.uptime_last_hour = up;
                record.downtime_last_hour = down;
            }
            TrailingWindow::Day => {
                record.uptime_last_day = up;
                record.downtime_last_day = down;
            }
            TrailingWindow::Week => {
                record.uptime_last_week = up;
                record.downtime_last_week = down;
            }
        }
    }

    debug!(
        "Aggregated store {}: {} observations, {} rules",
        store_id,
        observations.len(),
        rules.len()
    );
    Ok(record)
}

/// Unrounded totals for a single trailing window
pub fn window_totals(
    window: TrailingWindow,
    now: DateTime<Utc>,
    tz: &Tz,
    rules: &[ParsedRule],
    observations: &[StatusObservation],
) -> WindowTotals {
    let start = window.start(now);
    let intervals = reconstruct(observations, start, now);
    let windows = materialize_parsed(rules, tz, start, now);
    let acc = OverlapAccumulator::accumulate(&intervals, &windows);

    WindowTotals {
        window,
        up_minutes: acc.up_minutes,
        down_minutes: acc.down_minutes,
        business_minutes: business_minutes_within(&windows, start, now),
    }
}

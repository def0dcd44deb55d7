//! Weekly business-hour rules expressed in store-local wall-clock time.

use crate::errors::{AppError, AppResult};
use crate::utils::time::parse_time_of_day;
use chrono::{NaiveTime, Weekday};
use serde::{Deserialize, Serialize};

/// Opening time used when a store has no business-hour rules at all
pub const ALL_DAY_START: &str = "00:00:00";
/// Closing time used when a store has no business-hour rules at all
pub const ALL_DAY_END: &str = "23:59:59";

/// A recurring open block for one day of the week (0 = Monday)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHourRule {
    pub store_id: String,
    pub day_of_week: u8,
    pub start_time_local: String,
    pub end_time_local: String,
}

/// A business-hour rule with validated weekday and times
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedRule {
    pub weekday: Weekday,
    pub start: NaiveTime,
    pub end: NaiveTime,
}

impl BusinessHourRule {
    pub fn new(store_id: &str, day_of_week: u8, start: &str, end: &str) -> Self {
        Self {
            store_id: store_id.to_string(),
            day_of_week,
            start_time_local: start.to_string(),
            end_time_local: end.to_string(),
        }
    }

    /// Rules for a store that is open every day, all day
    pub fn all_day(store_id: &str) -> Vec<Self> {
        (0..7)
            .map(|day| Self::new(store_id, day, ALL_DAY_START, ALL_DAY_END))
            .collect()
    }

    /// Validate the weekday and parse both wall-clock times.
    ///
    /// An end time earlier than the start time is kept as given (same-day window,
    /// zero duration); it is not wrapped past midnight.
    pub fn parse(&self) -> AppResult<ParsedRule> {
        let weekday = weekday_from_index(self.day_of_week).ok_or_else(|| {
            AppError::input_data(
                &self.store_id,
                format!("day_of_week {} out of range 0..=6", self.day_of_week),
            )
        })?;

        let start = parse_time_of_day(&self.start_time_local).ok_or_else(|| {
            AppError::input_data(
                &self.store_id,
                format!("unparseable start time '{}'", self.start_time_local),
            )
        })?;
        let end = parse_time_of_day(&self.end_time_local).ok_or_else(|| {
            AppError::input_data(
                &self.store_id,
                format!("unparseable end time '{}'", self.end_time_local),
            )
        })?;

        Ok(ParsedRule {
            weekday,
            start,
            end,
        })
    }
}

/// Map 0 = Monday .. 6 = Sunday onto chrono's weekday
pub fn weekday_from_index(index: u8) -> Option<Weekday> {
    match index {
        0 => Some(Weekday::Mon),
        1 => Some(Weekday::Tue),
        2 => Some(Weekday::Wed),
        3 => Some(Weekday::Thu),
        4 => Some(Weekday::Fri),
        5 => Some(Weekday::Sat),
        6 => Some(Weekday::Sun),
        _ => None,
    }
}

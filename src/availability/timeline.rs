//! Status timeline reconstruction
//!
//! Turns sparse, time-ordered polls into contiguous status intervals covering a
//! window. A polled status holds until the next poll; the last known status
//! (even one recorded before the window) carries forward to the window end.

use crate::types::{StatusInterval, StatusObservation, StoreStatus};
use chrono::{DateTime, Utc};

/// Reconstruct the status step function of one store over `[window_start, window_end]`.
///
/// `observations` must be ordered by timestamp. With no observations the whole
/// window is reported inactive; the span before the first observation is
/// likewise inactive. Pairs entirely outside the window are skipped, so the
/// returned intervals are ordered, non-overlapping and contiguous.
pub fn reconstruct(
    observations: &[StatusObservation],
    window_start: DateTime<Utc>,
    window_end: DateTime<Utc>,
) -> Vec<StatusInterval> {
    let (first, last) = match (observations.first(), observations.last()) {
        (Some(first), Some(last)) => (first, last),
        _ => {
            return vec![StatusInterval::new(
                window_start,
                window_end,
                StoreStatus::Inactive,
            )]
        }
    };

    let mut intervals = Vec::with_capacity(observations.len() + 1);

    if first.timestamp > window_start {
        intervals.push(StatusInterval::new(
            window_start,
            first.timestamp.min(window_end),
            StoreStatus::Inactive,
        ));
    }

    for pair in observations.windows(2) {
        let (current, next) = (&pair[0], &pair[1]);
        if next.timestamp < window_start || current.timestamp > window_end {
            continue;
        }
        intervals.push(StatusInterval::new(
            current.timestamp.max(window_start),
            next.timestamp.min(window_end),
            current.status,
        ));
    }

    if last.timestamp < window_end {
        intervals.push(StatusInterval::new(
            last.timestamp.max(window_start),
            window_end,
            last.status,
        ));
    }

    intervals
}

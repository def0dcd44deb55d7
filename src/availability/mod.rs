//! Availability computation engine
//!
//! ## Pipeline
//!
//! For each store and each trailing window (1 hour, 24 hours, 7 days):
//! 1. `timeline` - reconstruct a contiguous status timeline from sparse polls
//! 2. `business_window` - expand weekly local-time rules into UTC windows
//! 3. `overlap` - intersect the two and accumulate up/down minutes
//! 4. `aggregator` - convert units, round, and merge into one record
//!
//! Everything here is pure; fetching and batching live in `processor`.

pub mod aggregator;
pub mod business_window;
pub mod overlap;
pub mod timeline;

pub use aggregator::{aggregate, window_totals, TrailingWindow, WindowTotals};
pub use business_window::{
    business_minutes_within, materialize, materialize_parsed, BusinessWindow,
};
pub use overlap::{overlap_minutes, OverlapAccumulator};
pub use timeline::reconstruct;

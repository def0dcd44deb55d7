//! Shared utility helpers

pub mod math;
pub mod time;

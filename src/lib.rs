//! Store Uptime Reporter
//!
//! Computes, for every store, how long it was up and down within its local
//! business hours over the trailing hour, day and week, from sparse status polls.

pub mod availability;
pub mod cli;
pub mod config;
pub mod database;
pub mod errors;
pub mod processor;
pub mod types;
pub mod utils;

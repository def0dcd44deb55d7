//! Unit Tests
//!
//! Property checks for the availability engine and focused tests for the
//! bulk loader and report writer.

#[path = "../common/mod.rs"]
mod common;

mod csv_loader;

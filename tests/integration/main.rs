//! Integration Tests
//!
//! End-to-end tests that run the report pipeline against a real SQLite
//! database and through the job lifecycle.

#[path = "../common/mod.rs"]
mod common;

mod report_job;
mod report_pipeline;

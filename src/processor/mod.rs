pub mod base;
pub mod csv_processor;
pub mod report_job;
pub mod report_processor;
pub mod report_writer;

pub use base::*;
pub use csv_processor::CsvLoader;
pub use report_job::{ReportJob, ReportOutcome};
pub use report_processor::ReportProcessor;
pub use report_writer::ReportWriter;

//! Report CSV emission

use crate::errors::{AppError, AppResult};
use crate::types::{AvailabilityRecord, REPORT_COLUMNS};
use csv::WriterBuilder;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes availability records as `report_<id>.csv` files
pub struct ReportWriter {
    reports_dir: PathBuf,
}

impl ReportWriter {
    pub fn new<P: Into<PathBuf>>(reports_dir: P) -> Self {
        Self {
            reports_dir: reports_dir.into(),
        }
    }

    pub fn reports_dir(&self) -> &Path {
        &self.reports_dir
    }

    pub fn report_path(&self, report_id: &str) -> PathBuf {
        self.reports_dir.join(format!("report_{}.csv", report_id))
    }

    /// Write the report file, creating the reports directory if needed
    pub fn write(&self, report_id: &str, records: &[AvailabilityRecord]) -> AppResult<PathBuf> {
        fs::create_dir_all(&self.reports_dir).map_err(AppError::Io)?;

        let path = self.report_path(report_id);
        let file = fs::File::create(&path).map_err(AppError::Io)?;
        Self::write_records(file, records)?;

        info!("Wrote {} rows to {}", records.len(), path.display());
        Ok(path)
    }

    /// Header first, always, then one row per record in the given order
    pub fn write_records<W: Write>(writer: W, records: &[AvailabilityRecord]) -> AppResult<()> {
        let mut csv_writer = WriterBuilder::new().has_headers(false).from_writer(writer);

        csv_writer.write_record(REPORT_COLUMNS)?;
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush().map_err(AppError::Io)?;
        Ok(())
    }
}

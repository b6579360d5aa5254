//! Report artifacts: one text document and one CSV file per run.

pub mod csv;
pub mod text;

use chrono::NaiveDateTime;
use std::path::{Path, PathBuf};

use crate::core::{ChangeRecord, DatePair};
use crate::errors::Result;
use crate::io;

pub use self::csv::render_csv;
pub use text::{render_metric_table, render_report};

/// Timestamped artifact paths for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReportPaths {
    pub text: PathBuf,
    pub csv: PathBuf,
}

impl ReportPaths {
    /// `<dir>/<prefix>_<YYYY-MM-DD_HHMMSS>.{txt,csv}`
    pub fn for_run(dir: &Path, prefix: &str, at: NaiveDateTime) -> Self {
        let stem = format!("{}_{}", prefix, at.format("%Y-%m-%d_%H%M%S"));
        Self {
            text: dir.join(format!("{}.txt", stem)),
            csv: dir.join(format!("{}.csv", stem)),
        }
    }
}

/// Renders and writes both artifacts for one record set.
#[derive(Debug, Clone)]
pub struct ReportWriter {
    directory: PathBuf,
    file_prefix: String,
    top_n: usize,
}

impl ReportWriter {
    pub fn new(directory: impl Into<PathBuf>, file_prefix: impl Into<String>, top_n: usize) -> Self {
        Self {
            directory: directory.into(),
            file_prefix: file_prefix.into(),
            top_n,
        }
    }

    /// Write the text and CSV reports, returning where they landed.
    ///
    /// Both documents are rendered before either is written so a rendering
    /// failure leaves no artifact behind.
    pub fn write(
        &self,
        records: &[ChangeRecord],
        dates: DatePair,
        generated_at: NaiveDateTime,
    ) -> Result<ReportPaths> {
        let paths = ReportPaths::for_run(&self.directory, &self.file_prefix, generated_at);

        let text = render_report(records, dates, generated_at, self.top_n);
        let csv = render_csv(records, dates, generated_at)?;

        io::write_atomic(&paths.text, text.as_bytes())?;
        tracing::info!("Saved TXT report: {}", paths.text.display());

        io::write_atomic(&paths.csv, &csv)?;
        tracing::info!("Saved CSV report: {}", paths.csv.display());

        Ok(paths)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tempfile::TempDir;

    fn at() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(4, 5, 6)
            .unwrap()
    }

    #[test]
    fn test_report_paths_naming() {
        let paths = ReportPaths::for_run(Path::new("/reports"), "domain_analysis", at());
        assert_eq!(
            paths.text,
            PathBuf::from("/reports/domain_analysis_2024-03-09_040506.txt")
        );
        assert_eq!(
            paths.csv,
            PathBuf::from("/reports/domain_analysis_2024-03-09_040506.csv")
        );
    }

    #[test]
    fn test_writer_creates_both_artifacts() {
        let dir = TempDir::new().unwrap();
        let writer = ReportWriter::new(dir.path(), "domain_analysis", 10);
        let dates = DatePair::new(
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap(),
            NaiveDate::from_ymd_opt(2024, 3, 8).unwrap(),
        );

        let paths = writer.write(&[], dates, at()).unwrap();

        assert!(paths.text.is_file());
        assert!(paths.csv.is_file());
        let text = std::fs::read_to_string(&paths.text).unwrap();
        assert!(text.contains("Data Range: 2024-03-07 to 2024-03-08"));
    }
}

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::errors::{ReportError, Result};
use crate::retention::RetentionPolicy;

/// Upper bound for `retention.days` (100 years).
pub const MAX_RETENTION_DAYS: u64 = 36_500;

/// Root configuration structure for domaindiff
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DomaindiffConfig {
    /// Snapshot store settings
    pub source: SourceConfig,
    /// Report destination settings
    pub output: OutputConfig,
    /// Report file retention
    pub retention: RetentionConfig,
    /// Report layout
    pub report: ReportConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// SQLite database holding the daily metrics table
    pub database: PathBuf,
    /// Table with raw per-domain daily rows
    pub table: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            database: PathBuf::from("~/domain_metrics.sqlite"),
            table: "dap_domain".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub directory: PathBuf,
    /// Defaults to `<directory>/logs`
    pub logs_directory: Option<PathBuf>,
    pub file_prefix: String,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("~/Downloads/domain_reports"),
            logs_directory: None,
            file_prefix: "domain_analysis".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RetentionConfig {
    pub days: u64,
}

impl Default for RetentionConfig {
    fn default() -> Self {
        Self { days: 30 }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Rows per ranked table before ties
    pub top_n: usize,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self { top_n: 10 }
    }
}

impl DomaindiffConfig {
    pub fn database_path(&self) -> PathBuf {
        expand_home(&self.source.database)
    }

    pub fn output_dir(&self) -> PathBuf {
        expand_home(&self.output.directory)
    }

    pub fn logs_dir(&self) -> PathBuf {
        match &self.output.logs_directory {
            Some(dir) => expand_home(dir),
            None => self.output_dir().join("logs"),
        }
    }

    pub fn retention_policy(&self) -> RetentionPolicy {
        RetentionPolicy::new(self.retention.days, self.output.file_prefix.clone())
    }

    /// Reject settings that would make a run misbehave.
    pub fn validate(&self) -> Result<()> {
        if self.report.top_n == 0 {
            return Err(ReportError::configuration("report.top_n must be at least 1"));
        }
        if !(1..=MAX_RETENTION_DAYS).contains(&self.retention.days) {
            return Err(ReportError::configuration(format!(
                "retention.days must be between 1 and {}, got {}",
                MAX_RETENTION_DAYS, self.retention.days
            )));
        }
        let prefix = &self.output.file_prefix;
        if prefix.is_empty() || prefix.contains(['/', '\\']) {
            return Err(ReportError::configuration(format!(
                "output.file_prefix must be a non-empty file name, got {:?}",
                prefix
            )));
        }
        if self.source.table.is_empty() {
            return Err(ReportError::configuration("source.table must not be empty"));
        }
        Ok(())
    }
}

/// Expand a leading `~` to the user's home directory.
pub fn expand_home(path: &Path) -> PathBuf {
    match path.strip_prefix("~") {
        Ok(rest) => match dirs::home_dir() {
            Some(home) => home.join(rest),
            None => path.to_path_buf(),
        },
        Err(_) => path.to_path_buf(),
    }
}

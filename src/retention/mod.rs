//! Age-based retention for report artifacts.
//!
//! Only regular files named `<prefix>_*` directly inside the report
//! directory are candidates; everything else is left alone.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, SystemTime};

use crate::errors::{ReportError, Result};

const SECONDS_PER_DAY: u64 = 86_400;

/// Retention policy configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetentionPolicy {
    /// Maximum age for report files in days
    pub max_age_days: u64,
    /// File name prefix that marks a file as a report artifact
    pub file_prefix: String,
}

impl Default for RetentionPolicy {
    fn default() -> Self {
        Self {
            max_age_days: 30,
            file_prefix: "domain_analysis".to_string(),
        }
    }
}

/// Outcome of one sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepStats {
    pub examined: usize,
    pub removed: Vec<PathBuf>,
}

impl std::fmt::Display for SweepStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.removed.len() {
            0 => write!(f, "No old files to remove"),
            n => write!(f, "{} old files removed", n),
        }
    }
}

impl RetentionPolicy {
    pub fn new(max_age_days: u64, file_prefix: impl Into<String>) -> Self {
        Self {
            max_age_days,
            file_prefix: file_prefix.into(),
        }
    }

    // Saturates, so an absurdly long window keeps everything.
    fn max_age(&self) -> Duration {
        Duration::from_secs(self.max_age_days.saturating_mul(SECONDS_PER_DAY))
    }

    /// Whether a file last modified at `modified` has outlived the policy.
    ///
    /// Timestamps in the future are never expired.
    pub fn is_expired(&self, modified: SystemTime, now: SystemTime) -> bool {
        now.duration_since(modified)
            .map(|age| age > self.max_age())
            .unwrap_or(false)
    }

    /// Whether `name` belongs to the report namespace.
    pub fn is_report_file(&self, name: &str) -> bool {
        name.strip_prefix(self.file_prefix.as_str())
            .is_some_and(|rest| rest.starts_with('_'))
    }

    /// Delete expired report files in `dir` as of `now`.
    pub fn sweep(&self, dir: &Path, now: SystemTime) -> Result<SweepStats> {
        let mut stats = SweepStats::default();
        let entries = fs::read_dir(dir).map_err(|e| {
            ReportError::file_system(format!("Failed to list {}", dir.display()), dir, e)
        })?;

        for entry in entries {
            let entry = entry?;
            let name = entry.file_name();
            if !name.to_str().is_some_and(|n| self.is_report_file(n)) {
                continue;
            }
            let metadata = entry.metadata()?;
            if !metadata.is_file() {
                continue;
            }
            stats.examined += 1;

            if self.is_expired(metadata.modified()?, now) {
                let path = entry.path();
                fs::remove_file(&path).map_err(|e| {
                    ReportError::file_system(format!("Failed to delete {}", path.display()), &path, e)
                })?;
                tracing::info!("Deleted old file: {}", name.to_string_lossy());
                stats.removed.push(path);
            }
        }

        tracing::info!("Cleanup complete: {}", stats);
        Ok(stats)
    }
}

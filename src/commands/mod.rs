//! CLI command implementations.
//!
//! Available commands:
//! - **run**: Compare the two newest snapshots and write reports
//! - **sweep**: Delete report files older than the retention window
//! - **init**: Write a default `.domaindiff.toml`

pub mod init;
pub mod run;
pub mod sweep;

pub use run::{execute, run_report, RunOutcome};
pub use sweep::sweep_reports;

use crate::errors::{ErrorKind, ReportError};

/// Log a failed run with a message chosen by error category.
pub fn log_failure(err: &ReportError) {
    match err.kind() {
        ErrorKind::Configuration => tracing::error!("Configuration error: {}", err),
        ErrorKind::InsufficientData => tracing::error!("Data error: {}", err),
        ErrorKind::Unexpected => {
            let mut detail = err.to_string();
            let mut source = std::error::Error::source(err);
            while let Some(cause) = source {
                detail.push_str(&format!("\n  caused by: {}", cause));
                source = cause.source();
            }
            tracing::error!("Unexpected error: {}", detail);
        }
    }
}

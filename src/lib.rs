// Export modules for library usage
pub mod cli;
pub mod commands;
pub mod comparison;
pub mod config;
pub mod core;
pub mod errors;
pub mod formatting;
pub mod io;
pub mod observability;
pub mod output;
pub mod retention;
pub mod source;

// Re-export commonly used types
pub use crate::core::{ChangeRecord, DatePair, Metric, MetricChange, MetricSnapshotRow};

pub use crate::comparison::{compute, rank, ChangeSummary, RankedEntry};

pub use crate::errors::{ErrorKind, ReportError, Result};

pub use crate::source::{select_date_pair, InMemorySource, SnapshotSource, SqliteSnapshotSource};

pub use crate::output::{ReportPaths, ReportWriter};

pub use crate::retention::{RetentionPolicy, SweepStats};

//! Error types for report runs.
//!
//! Every failure a run can hit is a [`ReportError`]. The top-level run
//! boundary only needs to know which of three categories it belongs to,
//! so [`ReportError::kind`] collapses the variants into [`ErrorKind`].

use std::path::PathBuf;
use thiserror::Error;

/// Closed categorization used at the run boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A required external resource or setting is unavailable or invalid.
    Configuration,
    /// The source holds fewer than two distinct snapshot dates.
    InsufficientData,
    /// Anything else: fetch, formatting, or filesystem failures.
    Unexpected,
}

impl std::fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Configuration => write!(f, "configuration"),
            Self::InsufficientData => write!(f, "insufficient_data"),
            Self::Unexpected => write!(f, "unexpected"),
        }
    }
}

/// Main error type for domaindiff operations
#[derive(Debug, Error)]
pub enum ReportError {
    /// Missing credential/resource or an invalid setting
    #[error("{0}")]
    Configuration(String),

    /// Not enough snapshot dates to compare
    #[error("Insufficient data: Found {found} dates, need at least 2 for comparison")]
    InsufficientData { found: usize },

    /// Snapshot store query errors
    #[error("Snapshot source error: {0}")]
    Source(#[from] rusqlite::Error),

    /// Snapshot store returned a value outside the data model
    #[error("Invalid snapshot data: {0}")]
    InvalidData(String),

    /// File system related errors
    #[error("File system error: {message}")]
    FileSystem {
        message: String,
        path: Option<PathBuf>,
        #[source]
        source: Option<std::io::Error>,
    },

    /// CSV encoding errors
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// IO errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Create a configuration error
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    /// Create a file system error with path context
    pub fn file_system(
        message: impl Into<String>,
        path: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        Self::FileSystem {
            message: message.into(),
            path: Some(path.into()),
            source: Some(source),
        }
    }

    /// Category used by the run boundary to pick the log message.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Configuration(_) => ErrorKind::Configuration,
            Self::InsufficientData { .. } => ErrorKind::InsufficientData,
            Self::Source(_)
            | Self::InvalidData(_)
            | Self::FileSystem { .. }
            | Self::Csv(_)
            | Self::Io(_) => ErrorKind::Unexpected,
        }
    }
}

/// Result type alias using our error type
pub type Result<T> = std::result::Result<T, ReportError>;

//! Logging and run context.
//!
//! ## Usage
//!
//! ```ignore
//! use domaindiff::observability::{RunContext, RunLogger, RunPhase};
//!
//! let now = chrono::Local::now();
//! let _logger = RunLogger::init(&logs_dir, now, 0)?;
//! let ctx = RunContext::new(now);
//! let _phase = ctx.enter_phase(RunPhase::Extraction);
//! tracing::info!("Extracting domain data...");
//! ```

pub mod context;
pub mod logging;

pub use context::{PhaseGuard, RunContext, RunPhase};
pub use logging::{monthly_log_path, RunLogFormat, RunLogger};

/// Separator line used around run start/end log messages.
pub const BANNER: &str = "================================================================================";

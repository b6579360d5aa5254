//! Scoped log output for a run.
//!
//! [`RunLogger`] builds a `tracing` subscriber that writes every event to
//! stdout and to a monthly log file, and installs it as the default for the
//! current thread only. Dropping the logger uninstalls it, so nothing
//! outlives the run.

use chrono::{DateTime, Local};
use std::fmt;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::subscriber::DefaultGuard;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{EnvFilter, Registry};

use crate::errors::{ReportError, Result};
use crate::io;

/// Environment variable holding an `EnvFilter` directive.
pub const LOG_FILTER_ENV: &str = "DOMAINDIFF_LOG";

/// `2024-01-02 06:00:00 - INFO - message`
#[derive(Debug, Clone, Copy, Default)]
pub struct RunLogFormat;

impl<S, N> FormatEvent<S, N> for RunLogFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(
            writer,
            "{} - {} - ",
            Local::now().format("%Y-%m-%d %H:%M:%S"),
            event.metadata().level()
        )?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Holds the installed subscriber for the lifetime of a run.
pub struct RunLogger {
    log_file: Option<PathBuf>,
    _guard: DefaultGuard,
}

impl RunLogger {
    /// Log to stdout and `<logs_dir>/cron_log_<YYYY-MM>.log`.
    pub fn init(logs_dir: &Path, now: DateTime<Local>, verbosity: u8) -> Result<Self> {
        io::ensure_dir(logs_dir)?;
        let path = monthly_log_path(logs_dir, now);
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| {
                ReportError::file_system(
                    format!("Failed to open log file {}", path.display()),
                    &path,
                    e,
                )
            })?;

        let subscriber = Registry::default()
            .with(level_filter(verbosity))
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(RunLogFormat)
                    .with_writer(std::io::stdout),
            )
            .with(
                tracing_subscriber::fmt::layer()
                    .event_format(RunLogFormat)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            );

        Ok(Self {
            log_file: Some(path),
            _guard: tracing::subscriber::set_default(subscriber),
        })
    }

    /// Log to stdout only, for failures before the log directory is known.
    pub fn console(verbosity: u8) -> Self {
        let subscriber = Registry::default().with(level_filter(verbosity)).with(
            tracing_subscriber::fmt::layer()
                .event_format(RunLogFormat)
                .with_writer(std::io::stdout),
        );
        Self {
            log_file: None,
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }

    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }
}

/// `cron_log_<YYYY-MM>.log` inside `logs_dir`.
pub fn monthly_log_path(logs_dir: &Path, now: DateTime<Local>) -> PathBuf {
    logs_dir.join(format!("cron_log_{}.log", now.format("%Y-%m")))
}

fn level_filter(verbosity: u8) -> EnvFilter {
    EnvFilter::try_from_env(LOG_FILTER_ENV).unwrap_or_else(|_| {
        EnvFilter::new(match verbosity {
            0 => "info",
            1 => "debug",
            _ => "trace",
        })
    })
}

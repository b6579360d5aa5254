//! Per-run context passed explicitly through the pipeline.
//!
//! A [`RunContext`] carries the run's start timestamp and its root span.
//! Components enter a [`RunPhase`] through [`RunContext::enter_phase`], and
//! the returned guard exits the phase span on drop.

use chrono::{DateTime, Local, NaiveDateTime};
use std::time::{Instant, SystemTime};
use tracing::span::EnteredSpan;
use tracing::Span;

/// Pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunPhase {
    /// Creating directories and opening the snapshot source
    Setup,
    /// Finding the two newest snapshot dates
    DateDiscovery,
    /// Pulling per-domain rows for the two dates
    Extraction,
    /// Aligning snapshots and deriving deltas
    ChangeCalculation,
    /// Rendering and writing report artifacts
    ReportWriting,
    /// Deleting expired report files
    RetentionSweep,
}

impl std::fmt::Display for RunPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Setup => write!(f, "setup"),
            Self::DateDiscovery => write!(f, "date_discovery"),
            Self::Extraction => write!(f, "extraction"),
            Self::ChangeCalculation => write!(f, "change_calculation"),
            Self::ReportWriting => write!(f, "report_writing"),
            Self::RetentionSweep => write!(f, "retention_sweep"),
        }
    }
}

/// Context for a single report run.
#[derive(Debug)]
pub struct RunContext {
    started_at: DateTime<Local>,
    span: Span,
}

impl RunContext {
    /// Create the context for a run starting at `started_at`.
    ///
    /// Create this after the run's [`super::RunLogger`] is installed so the
    /// root span is recorded by it.
    pub fn new(started_at: DateTime<Local>) -> Self {
        let span = tracing::info_span!(
            "run",
            started_at = %started_at.format("%Y-%m-%d %H:%M:%S")
        );
        Self { started_at, span }
    }

    /// Local wall-clock time stamped into report names and contents.
    pub fn generated_at(&self) -> NaiveDateTime {
        self.started_at.naive_local()
    }

    /// Reference instant for retention decisions.
    pub fn now(&self) -> SystemTime {
        SystemTime::from(self.started_at)
    }

    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Enter `phase` until the returned guard drops.
    #[must_use]
    pub fn enter_phase(&self, phase: RunPhase) -> PhaseGuard {
        let entered = tracing::info_span!(parent: &self.span, "phase", phase = %phase).entered();
        tracing::debug!("Entering {} phase", phase);
        PhaseGuard {
            phase,
            entered_at: Instant::now(),
            _entered: entered,
        }
    }
}

/// RAII guard for an entered [`RunPhase`]; logs the phase duration on drop.
pub struct PhaseGuard {
    phase: RunPhase,
    entered_at: Instant,
    _entered: EnteredSpan,
}

impl Drop for PhaseGuard {
    fn drop(&mut self) {
        tracing::debug!(
            "Finished {} phase in {} ms",
            self.phase,
            self.entered_at.elapsed().as_millis()
        );
    }
}

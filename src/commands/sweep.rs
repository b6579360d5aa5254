//! Standalone retention sweep.

use crate::config::DomaindiffConfig;
use crate::errors::Result;
use crate::observability::{RunContext, RunPhase};
use crate::retention::SweepStats;

/// Delete expired report files without producing a new report.
pub fn sweep_reports(ctx: &RunContext, config: &DomaindiffConfig) -> Result<SweepStats> {
    let _phase = ctx.enter_phase(RunPhase::RetentionSweep);

    let output_dir = config.output_dir();
    if !output_dir.is_dir() {
        tracing::info!(
            "Output directory {} does not exist, nothing to sweep",
            output_dir.display()
        );
        return Ok(SweepStats::default());
    }
    config.retention_policy().sweep(&output_dir, ctx.now())
}

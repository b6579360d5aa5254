//! The report pipeline: fetch, compare, write, sweep.

use crate::comparison::compute;
use crate::config::DomaindiffConfig;
use crate::core::DatePair;
use crate::errors::Result;
use crate::io;
use crate::observability::{RunContext, RunPhase};
use crate::output::{ReportPaths, ReportWriter};
use crate::retention::SweepStats;
use crate::source::{select_date_pair, SnapshotSource, SqliteSnapshotSource};

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq)]
pub struct RunOutcome {
    pub dates: DatePair,
    pub domain_count: usize,
    pub paths: ReportPaths,
    pub sweep: SweepStats,
}

/// Run the full pipeline against the configured SQLite store.
///
/// `config` is expected to have passed [`DomaindiffConfig::validate`].
pub fn run_report(ctx: &RunContext, config: &DomaindiffConfig) -> Result<RunOutcome> {
    let source = {
        let _phase = ctx.enter_phase(RunPhase::Setup);
        prepare_directories(config)?;
        SqliteSnapshotSource::open(&config.database_path(), &config.source.table)?
    };
    compare_and_report(ctx, config, &source)
}

/// Run the pipeline against any snapshot source.
///
/// Directories are created if missing. No artifact is written unless two
/// snapshot dates are available.
pub fn execute<S: SnapshotSource>(
    ctx: &RunContext,
    config: &DomaindiffConfig,
    source: &S,
) -> Result<RunOutcome> {
    {
        let _phase = ctx.enter_phase(RunPhase::Setup);
        prepare_directories(config)?;
    }
    compare_and_report(ctx, config, source)
}

fn compare_and_report<S: SnapshotSource>(
    ctx: &RunContext,
    config: &DomaindiffConfig,
    source: &S,
) -> Result<RunOutcome> {
    let dates = {
        let _phase = ctx.enter_phase(RunPhase::DateDiscovery);
        tracing::info!("Querying for most recent dates...");
        let dates = select_date_pair(&source.recent_dates()?)?;
        tracing::info!("Latest date: {}", dates.latest);
        tracing::info!("Previous date: {}", dates.previous);
        dates
    };

    let rows = {
        let _phase = ctx.enter_phase(RunPhase::Extraction);
        tracing::info!("Extracting domain data...");
        let rows = source.fetch_rows(dates)?;
        tracing::info!("Retrieved {} records", rows.len());
        rows
    };

    let records = {
        let _phase = ctx.enter_phase(RunPhase::ChangeCalculation);
        tracing::info!("Calculating day-over-day changes...");
        let records = compute(&rows, dates.previous, dates.latest);
        tracing::info!("Calculated changes for {} domains", records.len());
        records
    };

    let paths = {
        let _phase = ctx.enter_phase(RunPhase::ReportWriting);
        ReportWriter::new(
            config.output_dir(),
            config.output.file_prefix.clone(),
            config.report.top_n,
        )
        .write(&records, dates, ctx.generated_at())?
    };

    let sweep = {
        let _phase = ctx.enter_phase(RunPhase::RetentionSweep);
        config
            .retention_policy()
            .sweep(&config.output_dir(), ctx.now())?
    };

    Ok(RunOutcome {
        dates,
        domain_count: records.len(),
        paths,
        sweep,
    })
}

fn prepare_directories(config: &DomaindiffConfig) -> Result<()> {
    let output_dir = config.output_dir();
    io::ensure_dir(&output_dir)?;
    tracing::info!("Output directory: {}", output_dir.display());
    Ok(())
}

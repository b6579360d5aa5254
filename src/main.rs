use chrono::Local;
use clap::Parser;
use domaindiff::cli::{Cli, Commands, ConfigArgs};
use domaindiff::commands::{log_failure, run_report, sweep_reports};
use domaindiff::config::{load_config, ConfigOverrides, DomaindiffConfig, EnvironmentSnapshot};
use domaindiff::errors::Result;
use domaindiff::observability::{RunContext, RunLogger, BANNER};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    let cli = Cli::parse();

    match cli.command {
        Commands::Run { config, database } => handle_run(&config, database),
        Commands::Sweep { config } => handle_sweep(&config),
        Commands::Init { force } => handle_init(force),
    }
}

// Layer file, environment, and flag settings. The file is validated as it
// loads; overrides only replace paths.
fn resolve_config(args: &ConfigArgs, database: Option<PathBuf>) -> Result<DomaindiffConfig> {
    let overrides = ConfigOverrides {
        database,
        output_dir: args.output_dir.clone(),
    };
    Ok(load_config(args.config.as_deref())?
        .with_overrides(&EnvironmentSnapshot::from_current_env(), &overrides))
}

// Resolve config and install the run's logger; failures are logged to stdout
fn start_run(args: &ConfigArgs, database: Option<PathBuf>) -> Option<(DomaindiffConfig, RunLogger)> {
    let started_at = Local::now();
    let config = match resolve_config(args, database) {
        Ok(config) => config,
        Err(e) => {
            let _logger = RunLogger::console(args.verbosity);
            log_failure(&e);
            return None;
        }
    };
    match RunLogger::init(&config.logs_dir(), started_at, args.verbosity) {
        Ok(logger) => Some((config, logger)),
        Err(e) => {
            let _logger = RunLogger::console(args.verbosity);
            log_failure(&e);
            None
        }
    }
}

fn handle_run(args: &ConfigArgs, database: Option<PathBuf>) -> ExitCode {
    let Some((config, _logger)) = start_run(args, database) else {
        return ExitCode::FAILURE;
    };
    let ctx = RunContext::new(Local::now());
    let _run = ctx.span().enter();

    tracing::info!("{}", BANNER);
    tracing::info!("Domain Analysis Run Started");
    tracing::info!("{}", BANNER);

    match run_report(&ctx, &config) {
        Ok(outcome) => {
            tracing::info!("{}", BANNER);
            tracing::info!("Run completed successfully");
            tracing::info!("TXT Report: {}", outcome.paths.text.display());
            tracing::info!("CSV Report: {}", outcome.paths.csv.display());
            tracing::info!("{}", BANNER);
            ExitCode::SUCCESS
        }
        Err(e) => {
            log_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn handle_sweep(args: &ConfigArgs) -> ExitCode {
    let Some((config, _logger)) = start_run(args, None) else {
        return ExitCode::FAILURE;
    };
    let ctx = RunContext::new(Local::now());
    let _run = ctx.span().enter();

    match sweep_reports(&ctx, &config) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            log_failure(&e);
            ExitCode::FAILURE
        }
    }
}

fn handle_init(force: bool) -> ExitCode {
    let result = std::env::current_dir()
        .map_err(anyhow::Error::from)
        .and_then(|dir| domaindiff::commands::init::init_config(&dir, force));
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "domaindiff")]
#[command(about = "Day-over-day domain traffic comparison reports", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

/// Options shared by commands that load configuration.
#[derive(Args, Debug, Clone, Default)]
pub struct ConfigArgs {
    /// Configuration file (defaults to the nearest .domaindiff.toml)
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Directory for report files
    #[arg(long = "output-dir")]
    pub output_dir: Option<PathBuf>,

    /// Increase log verbosity (-v: debug, -vv: trace)
    #[arg(short = 'v', long = "verbose", action = clap::ArgAction::Count)]
    pub verbosity: u8,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Compare the two most recent snapshots and write TXT and CSV reports
    Run {
        #[command(flatten)]
        config: ConfigArgs,

        /// SQLite database holding the daily metrics table
        #[arg(long)]
        database: Option<PathBuf>,
    },

    /// Delete report files older than the retention window
    Sweep {
        #[command(flatten)]
        config: ConfigArgs,
    },

    /// Initialize a new .domaindiff.toml configuration file
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

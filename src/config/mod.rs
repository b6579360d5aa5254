//! Run configuration.
//!
//! Settings come from `.domaindiff.toml` (see [`loader`]), then
//! `DOMAINDIFF_*` environment variables, then command-line flags, each
//! layer overriding the previous one.

mod core;
pub mod loader;

pub use self::core::{
    DomaindiffConfig, OutputConfig, ReportConfig, RetentionConfig, SourceConfig, MAX_RETENTION_DAYS,
};
pub use loader::{load_config, parse_and_validate_config, CONFIG_FILE_NAME};

use std::collections::HashMap;
use std::path::PathBuf;

/// Environment variable snapshot for configuration resolution
#[derive(Debug, Clone, Default)]
pub struct EnvironmentSnapshot {
    /// Map of environment variable names to values
    pub vars: HashMap<String, String>,
}

impl EnvironmentSnapshot {
    /// Create snapshot of current environment
    pub fn from_current_env() -> Self {
        let vars = std::env::vars()
            .filter(|(key, _)| key.starts_with("DOMAINDIFF_"))
            .collect();
        Self { vars }
    }

    /// Get environment variable value
    pub fn get(&self, key: &str) -> Option<&str> {
        self.vars
            .get(key)
            .map(|s| s.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Values supplied on the command line.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub database: Option<PathBuf>,
    pub output_dir: Option<PathBuf>,
}

impl DomaindiffConfig {
    /// Layer environment variables and CLI flags over file settings.
    pub fn with_overrides(mut self, env: &EnvironmentSnapshot, cli: &ConfigOverrides) -> Self {
        if let Some(database) = env.get("DOMAINDIFF_DATABASE") {
            self.source.database = PathBuf::from(database);
        }
        if let Some(dir) = env.get("DOMAINDIFF_OUTPUT_DIR") {
            self.output.directory = PathBuf::from(dir);
        }
        if let Some(database) = &cli.database {
            self.source.database = database.clone();
        }
        if let Some(dir) = &cli.output_dir {
            self.output.directory = dir.clone();
        }
        self
    }
}

use std::fs;
use std::io::{BufReader, Read};
use std::path::{Path, PathBuf};

use super::core::DomaindiffConfig;
use crate::errors::{ReportError, Result};

pub const CONFIG_FILE_NAME: &str = ".domaindiff.toml";

const MAX_TRAVERSAL_DEPTH: usize = 10;

/// Pure function to read config file contents
pub(crate) fn read_config_file(path: &Path) -> std::result::Result<String, std::io::Error> {
    let file = fs::File::open(path)?;
    let mut reader = BufReader::new(file);
    let mut contents = String::new();
    reader.read_to_string(&mut contents)?;
    Ok(contents)
}

/// Parse and validate config from a TOML string
pub fn parse_and_validate_config(contents: &str) -> Result<DomaindiffConfig> {
    let config = toml::from_str::<DomaindiffConfig>(contents).map_err(|e| {
        ReportError::configuration(format!("Failed to parse {}: {}", CONFIG_FILE_NAME, e))
    })?;
    config.validate()?;
    Ok(config)
}

/// Generate directory ancestors up to a depth limit
pub fn directory_ancestors(start: PathBuf, max_depth: usize) -> impl Iterator<Item = PathBuf> {
    std::iter::successors(Some(start), |dir| {
        let mut parent = dir.clone();
        if parent.pop() {
            Some(parent)
        } else {
            None
        }
    })
    .take(max_depth)
}

fn load_from_path(path: &Path) -> Result<DomaindiffConfig> {
    let contents = read_config_file(path).map_err(|e| {
        ReportError::configuration(format!(
            "Failed to read config file {}: {}",
            path.display(),
            e
        ))
    })?;
    let config = parse_and_validate_config(&contents)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Load configuration.
///
/// An explicit path must exist. Otherwise the nearest `.domaindiff.toml` in
/// the working directory or its ancestors is used, falling back to
/// defaults. A config file that exists but does not parse is an error.
pub fn load_config(explicit: Option<&Path>) -> Result<DomaindiffConfig> {
    if let Some(path) = explicit {
        return load_from_path(path);
    }

    let current = match std::env::current_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::warn!("Failed to get current directory: {}. Using default config.", e);
            return Ok(DomaindiffConfig::default());
        }
    };

    match directory_ancestors(current, MAX_TRAVERSAL_DEPTH)
        .map(|dir| dir.join(CONFIG_FILE_NAME))
        .find(|path| path.is_file())
    {
        Some(path) => load_from_path(&path),
        None => {
            tracing::debug!(
                "No config found after checking {} directories. Using default config.",
                MAX_TRAVERSAL_DEPTH
            );
            Ok(DomaindiffConfig::default())
        }
    }
}

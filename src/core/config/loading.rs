//! Locates and parses the optional TOML configuration file.

use super::file::ConfigFile;
use crate::core::error::{AppError, Result};
use std::fs;
use std::path::{Path, PathBuf};

const LOCAL_CONFIG_NAME: &str = "emaillistverify.toml";

/// Candidate locations searched when no explicit path is given, in order.
fn default_locations() -> Vec<PathBuf> {
    let mut paths = vec![PathBuf::from(LOCAL_CONFIG_NAME)];
    if let Ok(home) = std::env::var("HOME") {
        paths.push(
            PathBuf::from(home)
                .join(".config")
                .join("emaillistverify")
                .join("config.toml"),
        );
    }
    paths
}

/// Parses a configuration file from its TOML text.
pub fn parse_config_file(contents: &str) -> Result<ConfigFile> {
    Ok(toml::from_str(contents)?)
}

/// Loads the configuration file.
///
/// An explicit `path` must exist. Without one, the default locations are
/// searched and `Ok(None)` is returned when none of them exist.
pub fn load_config_file(path: Option<&Path>) -> Result<Option<(ConfigFile, PathBuf)>> {
    if let Some(path) = path {
        if !path.is_file() {
            return Err(AppError::NotFound(format!(
                "config file '{}' does not exist",
                path.display()
            )));
        }
        let file = read_from(path)?;
        return Ok(Some((file, path.to_path_buf())));
    }

    for candidate in default_locations() {
        if candidate.is_file() {
            tracing::debug!("Found configuration file at {}", candidate.display());
            let file = read_from(&candidate)?;
            return Ok(Some((file, candidate)));
        }
    }

    tracing::debug!("No configuration file found, using defaults");
    Ok(None)
}

fn read_from(path: &Path) -> Result<ConfigFile> {
    let contents = fs::read_to_string(path)?;
    parse_config_file(&contents).map_err(|e| {
        tracing::error!("Failed to parse {}: {}", path.display(), e);
        e
    })
}

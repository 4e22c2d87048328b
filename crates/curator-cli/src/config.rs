//! Locating and loading the graph configuration.
//!
//! The vault's own `.curator/graph.json` wins; otherwise the user-wide file in
//! the platform config directory is used; otherwise the built-in example.

use curator_graph::{GraphConfig, GraphError};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

pub const CONFIG_DIR: &str = ".curator";
pub const CONFIG_FILE: &str = "graph.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{path}: {source}")]
    Invalid {
        path: PathBuf,
        #[source]
        source: GraphError,
    },
}

/// `<vault>/.curator/graph.json`
pub fn vault_config_path(vault: &Path) -> PathBuf {
    vault.join(CONFIG_DIR).join(CONFIG_FILE)
}

/// `<config dir>/curator/graph.json`, if the platform has a config directory.
pub fn user_config_path() -> Option<PathBuf> {
    Some(dirs::config_dir()?.join("curator").join(CONFIG_FILE))
}

/// The configuration file that applies to `vault`, if any.
pub fn locate(vault: &Path) -> Option<PathBuf> {
    let local = vault_config_path(vault);
    if local.is_file() {
        return Some(local);
    }
    user_config_path().filter(|path| path.is_file())
}

/// Loads the configuration for `vault`, with the path it came from.
pub fn load_config(vault: &Path) -> Result<(GraphConfig, Option<PathBuf>), ConfigError> {
    let Some(path) = locate(vault) else {
        info!("No configuration found; using defaults");
        return Ok((GraphConfig::example(), None));
    };
    let config = read_config(&path)?;
    Ok((config, Some(path)))
}

pub fn read_config(path: &Path) -> Result<GraphConfig, ConfigError> {
    debug!("Reading configuration from {}", path.display());
    let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = GraphConfig::from_json(&json).map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    // Category names must be unique.
    config.settings().map_err(|source| ConfigError::Invalid {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(config)
}

//! Error types for loading and watching a vault.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WatchError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{0} is not a directory")]
    NotADirectory(PathBuf),

    #[error(transparent)]
    Vault(#[from] curator_vault::VaultError),

    #[error(transparent)]
    Graph(#[from] curator_graph::GraphError),

    #[error("file watcher failed: {0}")]
    Notify(#[from] notify::Error),
}

impl WatchError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}

pub type Result<T> = std::result::Result<T, WatchError>;

//! Curator Watcher - keeping the graph in step with the files
//!
//! Loads a vault from a directory of Markdown files, then watches that
//! directory and feeds every change through the graph's incremental refresh.

mod error;
mod loader;
mod session;
mod watcher;

pub use error::{Result, WatchError};
pub use loader::{load_vault, LoadResult};
pub use session::GraphSession;
pub use watcher::{apply_path_change, watch_vault, WatchConfig};

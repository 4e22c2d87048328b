//! Error types for the graph.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum GraphError {
    /// A node was asked to take over a document with a different name.
    ///
    /// This means the caller routed an event to the wrong node; the index can
    /// no longer be trusted.
    #[error("document name mismatch: node holds {expected:?}, replacement is {found:?}")]
    DocumentMismatch { expected: String, found: String },

    /// Two categories were configured with the same name.
    #[error("duplicate node category: {0}")]
    DuplicateCategory(String),

    /// The graph configuration could not be read.
    #[error("invalid graph configuration: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GraphError>;

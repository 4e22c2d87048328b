//! Error types for the vault model.

use thiserror::Error;

/// Errors raised while parsing documents.
#[derive(Error, Debug)]
pub enum VaultError {
    /// The YAML front matter block is malformed.
    #[error("invalid front matter in {document}: {source}")]
    FrontMatter {
        document: String,
        #[source]
        source: serde_yaml::Error,
    },

    /// The front matter is valid YAML but not a key/value mapping.
    #[error("front matter in {0} is not a mapping")]
    FrontMatterShape(String),
}

pub type Result<T> = std::result::Result<T, VaultError>;

//! Curator Vault - documents, folders and the daily journal
//!
//! This crate holds the in-memory model the relationship graph is derived
//! from. Documents live in a tree of folders (the vault); a subset of them
//! forms the journal: daily entries named after their date, and markers that
//! give lines in those entries a semantic label.
//!
//! # Example
//!
//! ```no_run
//! use curator_vault::{DailyJournal, Document, Journal, JournalSettings, Vault};
//!
//! let mut vault = Vault::new();
//! vault.insert(Document::new("Alice", "People", ""));
//! vault.insert(Document::new("2024-01-05", "Journal", "- [[Meeting]] [[Alice]]"));
//!
//! let journal = DailyJournal::build(&vault, &JournalSettings::default());
//! assert!(journal.markers().is_empty());
//! ```

mod document;
mod error;
mod event;
mod front_matter;
mod journal;
mod links;
mod vault;

pub use document::{normalize_folder, Document};
pub use error::{Result, VaultError};
pub use event::{ChangeKind, DocumentEvent};
pub use front_matter::FrontMatter;
pub use journal::{DailyJournal, Journal, JournalSettings, MarkedLine};
pub use links::{internal_link_targets, InternalLink};
pub use vault::{Folder, Vault, VaultVisitor};

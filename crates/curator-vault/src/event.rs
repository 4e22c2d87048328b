//! Change events emitted when the vault is modified.

use crate::document::Document;
use std::sync::Arc;

/// What happened to a document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeKind {
    Created,
    Modified,
    Deleted,
}

impl std::fmt::Display for ChangeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Created => "created",
            Self::Modified => "modified",
            Self::Deleted => "deleted",
        };
        write!(f, "{}", s)
    }
}

/// A single document change. For deletions `document` is the removed copy.
#[derive(Debug, Clone)]
pub struct DocumentEvent {
    pub kind: ChangeKind,
    pub document: Arc<Document>,
}

impl DocumentEvent {
    pub fn new(kind: ChangeKind, document: Arc<Document>) -> Self {
        Self { kind, document }
    }

    pub fn is_deletion(&self) -> bool {
        self.kind == ChangeKind::Deleted
    }
}

//! Graph nodes.

use crate::category::NodeCategory;
use crate::error::{GraphError, Result};
use curator_vault::Document;
use sha2::{Digest, Sha256};
use std::cmp::Ordering;
use std::sync::Arc;

/// Number of hex characters in a node id.
const ID_LENGTH: usize = 8;

/// Short, stable identifier for a document name.
///
/// Ids are only used as Mermaid vertex names; a collision garbles a diagram
/// but never the index, which is keyed by name.
pub fn short_id(name: &str) -> String {
    let digest = Sha256::digest(name.as_bytes());
    hex::encode(&digest[..ID_LENGTH / 2])
}

/// A document in the graph.
///
/// Nodes are equal when their documents are equal, and ordered by the
/// documents' sortable titles. Neighbours are not stored on the node; ask the
/// graph for them.
#[derive(Debug, Clone)]
pub struct Node {
    id: String,
    category: Arc<NodeCategory>,
    document: Arc<Document>,
    archived: bool,
}

impl Node {
    pub fn new(document: Arc<Document>, category: Arc<NodeCategory>, archived: bool) -> Self {
        Self {
            id: short_id(document.name()),
            category,
            document,
            archived,
        }
    }

    /// Mermaid vertex id.
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Name of the underlying document.
    pub fn name(&self) -> &str {
        self.document.name()
    }

    pub fn category(&self) -> &Arc<NodeCategory> {
        &self.category
    }

    pub fn document(&self) -> &Arc<Document> {
        &self.document
    }

    /// True if the document lives below, not directly in, the category folder.
    pub fn is_archived(&self) -> bool {
        self.archived
    }

    /// The Mermaid class picked by the category's classifier.
    pub fn classify(&self) -> Option<String> {
        self.category.classifier().classify(self)
    }

    /// The Mermaid vertex for this node.
    pub fn to_mermaid(&self) -> String {
        let class = self.classify();
        self.category
            .shape()
            .to_mermaid_node(&self.id, self.name(), class.as_deref())
    }

    /// Swaps in a refreshed copy of the same document.
    ///
    /// Fails if the replacement has a different name: that is a routing bug
    /// in the caller, not bad data.
    pub fn replace_document(&mut self, document: Arc<Document>) -> Result<()> {
        if document.name() != self.document.name() {
            return Err(GraphError::DocumentMismatch {
                expected: self.document.name().to_string(),
                found: document.name().to_string(),
            });
        }
        self.document = document;
        Ok(())
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document
    }
}

impl Eq for Node {}

impl PartialOrd for Node {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Node {
    fn cmp(&self, other: &Self) -> Ordering {
        self.document
            .sortable_title()
            .cmp(&other.document.sortable_title())
            .then_with(|| self.name().cmp(other.name()))
    }
}

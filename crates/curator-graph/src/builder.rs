//! Node collection for full refreshes.
//!
//! Building the graph is a two-pass process:
//! 1. Walk every category folder and turn its documents into nodes
//! 2. Pull the edges out of the journal (see `refresh`)
//!
//! This module is the first pass.

use crate::category::NodeCategory;
use crate::node::Node;
use crate::settings::GraphSettings;
use curator_vault::{Document, Folder, Vault, VaultVisitor};
use std::sync::Arc;
use tracing::debug;

/// Turns every document below a category folder into a node.
struct NodeCollector<'a> {
    category: &'a Arc<NodeCategory>,
    archived: bool,
    nodes: Vec<Node>,
}

impl<'a> NodeCollector<'a> {
    fn new(category: &'a Arc<NodeCategory>) -> Self {
        Self {
            category,
            archived: false,
            nodes: Vec::new(),
        }
    }
}

impl VaultVisitor for NodeCollector<'_> {
    fn visit_folder(&mut self, folder: &Folder) {
        self.archived = folder.path() != self.category.folder();
    }

    fn visit_document(&mut self, document: &Arc<Document>) {
        self.nodes.push(Node::new(
            Arc::clone(document),
            Arc::clone(self.category),
            self.archived,
        ));
    }
}

/// Collects the nodes of all categories, in category order.
///
/// A category whose folder does not exist contributes nothing.
pub(crate) fn collect_nodes(vault: &Vault, settings: &GraphSettings) -> Vec<Node> {
    let mut nodes = Vec::new();
    for category in settings.categories() {
        let Some(folder) = vault.folder(category.folder()) else {
            debug!(
                "No folder {:?} for category {}",
                category.folder(),
                category.name()
            );
            continue;
        };
        let mut collector = NodeCollector::new(category);
        folder.accept(&mut collector);
        nodes.append(&mut collector.nodes);
    }
    nodes
}

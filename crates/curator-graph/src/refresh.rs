//! Keeping the graph in sync with the vault.
//!
//! Every change is handled by the cheapest update that is known to be
//! correct:
//!
//! | Changed document            | Update                                  |
//! |-----------------------------|-----------------------------------------|
//! | marker                      | full refresh (marker selection changed) |
//! | journal entry               | edges for that entry's date only        |
//! | existing node, same folder  | swap the document, edges untouched      |
//! | new, moved or deleted node  | full refresh                            |
//! | anything else               | nothing                                 |
//!
//! A new node may be the target of lines on any date, so finding its edges
//! takes a pass over the whole journal anyway; a full refresh is not
//! meaningfully more expensive.

use crate::builder::collect_nodes;
use crate::error::Result;
use crate::graph::{NodeId, VaultGraph};
use chrono::NaiveDate;
use curator_vault::{internal_link_targets, DocumentEvent, Journal, MarkedLine, Vault};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::debug;

/// Front matter flag on a marker that makes its lines feed the graph.
pub const INCLUDE_IN_GRAPH: &str = "include-in-graph";

/// How the graph reacted to a change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Nodes, edges and marker selection were rebuilt.
    Full,
    /// Edges for a single journal date were rebuilt.
    Date(NaiveDate),
    /// A node's document was swapped in place.
    Replaced,
    /// The change does not affect the graph.
    Ignored,
}

impl VaultGraph {
    /// Rebuilds marker selection, nodes and edges from scratch.
    pub fn full_refresh<J: Journal + ?Sized>(&mut self, vault: &Vault, journal: &J) {
        self.refresh_selected_markers(journal);
        self.refresh_nodes(vault);
        self.refresh_all_edges(journal);
        debug!(
            "Constructed a graph with {} nodes and {} edges",
            self.node_count(),
            self.edge_count()
        );
    }

    /// Applies a single change to the graph.
    ///
    /// `vault` and `journal` must already reflect the change.
    pub fn process_event<J: Journal + ?Sized>(
        &mut self,
        event: &DocumentEvent,
        vault: &Vault,
        journal: &J,
    ) -> Result<RefreshOutcome> {
        let document = &event.document;

        if journal.is_marker_document(document) {
            debug!("Marker {} {}; refreshing graph", document.name(), event.kind);
            self.full_refresh(vault, journal);
            return Ok(RefreshOutcome::Full);
        }

        if let Some(date) = journal.entry_date(document) {
            debug!("Journal entry {} {}", date, event.kind);
            self.refresh_edges_for_date(date, journal);
            return Ok(RefreshOutcome::Date(date));
        }

        if self.settings().category_for(document).is_none() {
            return Ok(RefreshOutcome::Ignored);
        }

        match self.get_index(document.name()) {
            Some(index)
                if !event.is_deletion()
                    && self.graph[index].document().folder() == document.folder() =>
            {
                self.graph[index].replace_document(Arc::clone(document))?;
                Ok(RefreshOutcome::Replaced)
            }
            _ => {
                debug!("Node {} {}; refreshing graph", document.name(), event.kind);
                self.full_refresh(vault, journal);
                Ok(RefreshOutcome::Full)
            }
        }
    }

    /// Re-derives the edges observed on a single date.
    pub fn refresh_edges_for_date<J: Journal + ?Sized>(&mut self, date: NaiveDate, journal: &J) {
        let removed = self.remove_edges_for(date);
        for index in self.node_indexes() {
            let name = self.graph[index].name().to_string();
            let lines = journal.marked_lines_for(&name, &self.selected_markers, Some(date));
            self.process_marked_lines(index, &lines);
        }
        debug!(
            "Refreshed edges for {}: {} dropped, {} in graph",
            date,
            removed,
            self.edge_count()
        );
    }

    fn refresh_selected_markers<J: Journal + ?Sized>(&mut self, journal: &J) {
        self.selected_markers = journal
            .markers()
            .values()
            .filter(|marker| marker.front_matter().bool(INCLUDE_IN_GRAPH, false))
            .map(|marker| marker.name().to_string())
            .collect();
    }

    fn refresh_nodes(&mut self, vault: &Vault) {
        self.clear();
        for node in collect_nodes(vault, self.settings()) {
            let name = node.name().to_string();
            if self.add_node(node).is_none() {
                debug!("Skipping duplicate node {}", name);
            }
        }
    }

    fn refresh_all_edges<J: Journal + ?Sized>(&mut self, journal: &J) {
        for index in self.node_indexes() {
            let name = self.graph[index].name().to_string();
            let lines = journal.marked_lines_for(&name, &self.selected_markers, None);
            self.process_marked_lines(index, &lines);
        }
    }

    fn process_marked_lines(&mut self, source: NodeId, lines: &BTreeMap<String, Vec<MarkedLine>>) {
        for line in lines.values().flatten() {
            for target in internal_link_targets(&line.line) {
                if let Some(target) = self.get_index(&target) {
                    self.add_edge(source, target, line.date);
                }
            }
        }
    }

    fn node_indexes(&self) -> Vec<NodeId> {
        self.graph.node_indices().collect()
    }
}

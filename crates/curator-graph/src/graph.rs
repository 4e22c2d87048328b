//! Core graph data structure.
//!
//! VaultGraph keeps nodes in a petgraph arena and adds a name index for
//! lookups. Edges are undirected and stored once per node pair, so the two
//! endpoints of an edge can never disagree about its dates.

use crate::edge::{EdgeDates, GraphEdge};
use crate::node::Node;
use crate::settings::GraphSettings;
use chrono::NaiveDate;
use petgraph::stable_graph::{NodeIndex, StableUnGraph};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Index of a node in the graph arena.
pub type NodeId = NodeIndex;

/// The relationship graph of a vault.
#[derive(Debug)]
pub struct VaultGraph {
    /// Nodes and their dated edges.
    pub(crate) graph: StableUnGraph<Node, EdgeDates>,

    /// Maps document names to node indexes.
    name_index: HashMap<String, NodeId>,

    /// Markers whose lines feed the edges.
    pub(crate) selected_markers: BTreeSet<String>,

    settings: GraphSettings,
}

impl VaultGraph {
    /// Creates an empty graph. Call `full_refresh` to populate it.
    pub fn new(settings: GraphSettings) -> Self {
        Self {
            graph: StableUnGraph::default(),
            name_index: HashMap::new(),
            selected_markers: BTreeSet::new(),
            settings,
        }
    }

    pub fn settings(&self) -> &GraphSettings {
        &self.settings
    }

    /// Adds a node, unless a node for the same document name exists.
    pub(crate) fn add_node(&mut self, node: Node) -> Option<NodeId> {
        if self.name_index.contains_key(node.name()) {
            return None;
        }
        let name = node.name().to_string();
        let index = self.graph.add_node(node);
        self.name_index.insert(name, index);
        Some(index)
    }

    /// Records that `a` and `b` were related on `date`.
    ///
    /// Self-edges are ignored. Returns true if the date was new for the pair.
    pub(crate) fn add_edge(&mut self, a: NodeId, b: NodeId, date: NaiveDate) -> bool {
        if a == b {
            return false;
        }
        match self.graph.find_edge(a, b) {
            Some(edge) => self.graph[edge].add(date),
            None => {
                self.graph.add_edge(a, b, EdgeDates::on(date));
                true
            }
        }
    }

    /// Takes `date` off every edge and drops edges left without dates.
    ///
    /// Returns the number of edges dropped.
    pub(crate) fn remove_edges_for(&mut self, date: NaiveDate) -> usize {
        let edges: Vec<_> = self.graph.edge_indices().collect();
        let mut removed = 0;
        for edge in edges {
            let weight = &mut self.graph[edge];
            if weight.remove(date) && weight.is_dead() {
                self.graph.remove_edge(edge);
                removed += 1;
            }
        }
        removed
    }

    /// Drops all nodes and edges.
    pub(crate) fn clear(&mut self) {
        self.graph.clear();
        self.name_index.clear();
    }

    /// Gets a node by its index.
    pub fn get(&self, index: NodeId) -> Option<&Node> {
        self.graph.node_weight(index)
    }

    /// Gets the index of the node for a document name.
    pub fn get_index(&self, name: &str) -> Option<NodeId> {
        self.name_index.get(name).copied()
    }

    /// Gets the node for a document name.
    pub fn node(&self, name: &str) -> Option<&Node> {
        self.get(self.get_index(name)?)
    }

    /// All nodes, in node order.
    pub fn nodes(&self) -> Vec<&Node> {
        let mut nodes: Vec<&Node> = self.node_weights().collect();
        nodes.sort();
        nodes
    }

    fn node_weights(&self) -> impl Iterator<Item = &Node> + '_ {
        self.graph.node_indices().map(move |index| &self.graph[index])
    }

    /// Neighbours of a node, in node order.
    pub fn neighbors(&self, index: NodeId) -> Vec<NodeId> {
        let mut neighbors: Vec<NodeId> = self.graph.neighbors(index).collect();
        neighbors.sort_by(|a, b| self.graph[*a].cmp(&self.graph[*b]));
        neighbors.dedup();
        neighbors
    }

    /// Names of the neighbours of a document, in node order.
    pub fn neighbor_names(&self, name: &str) -> Vec<&str> {
        self.get_index(name)
            .map(|index| {
                self.neighbors(index)
                    .into_iter()
                    .map(|n| self.graph[n].name())
                    .collect()
            })
            .unwrap_or_default()
    }

    /// The dates on which two documents were related, if they are.
    pub fn edge_dates(&self, a: &str, b: &str) -> Option<&EdgeDates> {
        let edge = self.graph.find_edge(self.get_index(a)?, self.get_index(b)?)?;
        self.graph.edge_weight(edge)
    }

    /// Markers currently feeding the graph.
    pub fn selected_markers(&self) -> &BTreeSet<String> {
        &self.selected_markers
    }

    /// Returns the number of nodes.
    pub fn node_count(&self) -> usize {
        self.graph.node_count()
    }

    /// Returns the number of edges.
    pub fn edge_count(&self) -> usize {
        self.graph.edge_count()
    }

    /// All edges with endpoint names, sorted by source then target name.
    ///
    /// Within an edge the endpoint that sorts first by name is the source.
    pub fn export_edges(&self) -> Vec<GraphEdge> {
        let mut edges: Vec<GraphEdge> = self
            .graph
            .edge_indices()
            .filter_map(|edge| {
                let (a, b) = self.graph.edge_endpoints(edge)?;
                let (a, b) = (self.graph[a].name(), self.graph[b].name());
                let (source, target) = if a <= b { (a, b) } else { (b, a) };
                Some(GraphEdge {
                    source: source.to_string(),
                    target: target.to_string(),
                    dates: self.graph[edge].iter().collect(),
                })
            })
            .collect();
        edges.sort_by(|x, y| {
            x.source
                .cmp(&y.source)
                .then_with(|| x.target.cmp(&y.target))
        });
        edges
    }
}

/// Graph statistics for status output.
#[derive(Debug, Serialize)]
pub struct GraphStats {
    pub node_count: usize,
    pub edge_count: usize,
    pub archived_count: usize,
    /// Node count per category name.
    pub categories: BTreeMap<String, usize>,
    pub selected_markers: Vec<String>,
}

impl VaultGraph {
    /// Returns graph statistics.
    pub fn stats(&self) -> GraphStats {
        let mut categories: BTreeMap<String, usize> = self
            .settings
            .categories()
            .iter()
            .map(|c| (c.name().to_string(), 0))
            .collect();
        let mut archived_count = 0;
        for node in self.node_weights() {
            *categories
                .entry(node.category().name().to_string())
                .or_default() += 1;
            if node.is_archived() {
                archived_count += 1;
            }
        }

        GraphStats {
            node_count: self.node_count(),
            edge_count: self.edge_count(),
            archived_count,
            categories,
            selected_markers: self.selected_markers.iter().cloned().collect(),
        }
    }

    /// Flattens the graph for JSON export.
    pub fn export(&self) -> GraphExport {
        GraphExport {
            version: EXPORT_VERSION.to_string(),
            stats: self.stats(),
            nodes: self
                .nodes()
                .into_iter()
                .map(|node| ExportedNode {
                    id: node.id().to_string(),
                    name: node.name().to_string(),
                    category: node.category().name().to_string(),
                    folder: node.document().folder().to_string(),
                    archived: node.is_archived(),
                    class: node.classify(),
                })
                .collect(),
            edges: self.export_edges(),
        }
    }
}

const EXPORT_VERSION: &str = "1.0";

/// A node as written to the JSON export.
#[derive(Debug, Serialize)]
pub struct ExportedNode {
    pub id: String,
    pub name: String,
    pub category: String,
    pub folder: String,
    pub archived: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub class: Option<String>,
}

/// The whole graph as written by `curator export`.
#[derive(Debug, Serialize)]
pub struct GraphExport {
    pub version: String,
    pub stats: GraphStats,
    pub nodes: Vec<ExportedNode>,
    pub edges: Vec<GraphEdge>,
}

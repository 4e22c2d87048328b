//! Curator Graph - relationships between vault documents
//!
//! This crate derives a graph from the vault and the journal and renders
//! parts of it as Mermaid diagrams.
//!
//! # Architecture
//!
//! - Documents become nodes when they live under a folder that is configured
//!   as a [`NodeCategory`]. Documents in sub-folders of that folder are
//!   *archived* nodes.
//! - Edges are never taken from document links. They are pulled out of the
//!   journal: lines marked by a marker that sets `include-in-graph` connect
//!   every node they mention, tagged with the date of the entry.
//! - Nodes live in a petgraph arena with a name index next to it. Each
//!   undirected edge carries one [`EdgeDates`] record, so both endpoints
//!   always see the same dates.
//! - Change events are applied one at a time. Most are cheap (a document
//!   swap or a single date), the rest fall back to a full refresh.
//!
//! # Example
//!
//! ```no_run
//! use curator_graph::{GraphConfig, VaultGraph};
//! use curator_vault::{DailyJournal, Vault};
//! use std::collections::BTreeSet;
//!
//! let config = GraphConfig::example();
//! let vault = Vault::new();
//! let journal = DailyJournal::build(&vault, &config.journal);
//!
//! let mut graph = VaultGraph::new(config.settings().unwrap());
//! graph.full_refresh(&vault, &journal);
//!
//! let diagram = graph.render_graph("Alice", 1, &BTreeSet::new());
//! assert!(diagram.is_none());
//! ```

mod builder;
mod category;
mod classifier;
mod config;
mod edge;
mod error;
mod graph;
mod node;
mod refresh;
mod render;
mod settings;

#[cfg(test)]
mod fixtures;

pub use category::{NodeCategory, Shape};
pub use classifier::{ClassifierChain, DefaultClassifier, NodeClassifier, ProjectStatusClassifier};
pub use config::{CategoryConfig, ClassifierKind, GraphConfig};
pub use edge::{EdgeDates, GraphEdge};
pub use error::{GraphError, Result};
pub use graph::{ExportedNode, GraphExport, GraphStats, NodeId, VaultGraph};
pub use node::{short_id, Node};
pub use refresh::{RefreshOutcome, INCLUDE_IN_GRAPH};
pub use render::{Traversal, TraversalStep, INTERNAL_LINK_CLASS};
pub use settings::GraphSettings;

//! Node classifiers: per-node Mermaid classes.
//!
//! A classifier contributes class definitions (`classDef` lines) and picks
//! at most one class for each node it is asked about. Classifiers are
//! composed with [`ClassifierChain`]: the first classifier that returns a
//! class wins.

use crate::node::Node;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Class given to archived nodes.
pub const ARCHIVED_CLASS: &str = "archived";

/// Assigns an optional Mermaid class to a node.
pub trait NodeClassifier: fmt::Debug + Send + Sync {
    /// Class name to Mermaid style, for every class this classifier can return.
    fn class_definitions(&self) -> BTreeMap<String, String> {
        BTreeMap::new()
    }

    /// The class for `node`, if any.
    fn classify(&self, _node: &Node) -> Option<String> {
        None
    }
}

/// Marks archived nodes and nothing else.
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultClassifier;

impl NodeClassifier for DefaultClassifier {
    fn class_definitions(&self) -> BTreeMap<String, String> {
        BTreeMap::from([(ARCHIVED_CLASS.to_string(), "stroke:gray".to_string())])
    }

    fn classify(&self, node: &Node) -> Option<String> {
        node.is_archived().then(|| ARCHIVED_CLASS.to_string())
    }
}

/// Colors project nodes by the `status` property in their front matter.
///
/// On its own this classifier always returns a class; use
/// [`ProjectStatusClassifier::chained`] to let archived projects keep the
/// archived style.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectStatusClassifier;

impl ProjectStatusClassifier {
    /// The default classifier first, then project status.
    pub fn chained() -> ClassifierChain {
        ClassifierChain::new(vec![
            Arc::new(DefaultClassifier),
            Arc::new(ProjectStatusClassifier),
        ])
    }

    fn class_for_status(status: &str) -> &'static str {
        match status.trim().to_lowercase().as_str() {
            "green" | "🟢" => "green",
            "amber" | "🟠" => "amber",
            "red" | "🔴" => "red",
            "on hold" | "on-hold" | "⭕️" | "⭕" => "on-hold",
            _ => "unknown",
        }
    }
}

impl NodeClassifier for ProjectStatusClassifier {
    fn class_definitions(&self) -> BTreeMap<String, String> {
        [
            ("green", "stroke:green"),
            ("amber", "stroke:orange"),
            ("red", "stroke:red"),
            ("on-hold", "stroke:gray"),
            ("unknown", "stroke:purple"),
        ]
        .into_iter()
        .map(|(class, style)| (class.to_string(), style.to_string()))
        .collect()
    }

    fn classify(&self, node: &Node) -> Option<String> {
        let status = node.document().front_matter().string("status", "unknown");
        Some(Self::class_for_status(&status).to_string())
    }
}

/// Runs classifiers in order; the first class returned wins.
#[derive(Debug, Clone, Default)]
pub struct ClassifierChain {
    classifiers: Vec<Arc<dyn NodeClassifier>>,
}

impl ClassifierChain {
    pub fn new(classifiers: Vec<Arc<dyn NodeClassifier>>) -> Self {
        Self { classifiers }
    }

    /// Appends a classifier to the end of the chain.
    pub fn then(mut self, classifier: Arc<dyn NodeClassifier>) -> Self {
        self.classifiers.push(classifier);
        self
    }
}

impl NodeClassifier for ClassifierChain {
    fn class_definitions(&self) -> BTreeMap<String, String> {
        let mut definitions = BTreeMap::new();
        for classifier in &self.classifiers {
            for (class, style) in classifier.class_definitions() {
                definitions.entry(class).or_insert(style);
            }
        }
        definitions
    }

    fn classify(&self, node: &Node) -> Option<String> {
        self.classifiers
            .iter()
            .find_map(|classifier| classifier.classify(node))
    }
}

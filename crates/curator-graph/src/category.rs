//! Node categories: which folders hold nodes and how they are drawn.

use crate::classifier::{DefaultClassifier, NodeClassifier};
use curator_vault::normalize_folder;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// The Mermaid shape of a node.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Shape {
    /// Plain rectangle; Mermaid's default.
    #[default]
    Rectangle,

    /// Rectangle with rounded corners.
    Rounded,

    /// Pill shape.
    Stadium,

    Circle,

    /// Rhombus, normally used for decisions.
    Diamond,

    Hexagon,

    /// Cylinder, normally used for databases.
    Cylinder,

    /// Page with a wavy bottom edge.
    Document,

    /// Rectangle with double vertical edges.
    Subroutine,
}

impl Shape {
    /// The Mermaid shape code, or `None` for the implicit default.
    pub fn code(&self) -> Option<&'static str> {
        match self {
            Self::Rectangle => None,
            Self::Rounded => Some("rounded"),
            Self::Stadium => Some("stadium"),
            Self::Circle => Some("circle"),
            Self::Diamond => Some("diam"),
            Self::Hexagon => Some("hex"),
            Self::Cylinder => Some("cyl"),
            Self::Document => Some("doc"),
            Self::Subroutine => Some("fr-rect"),
        }
    }

    /// Writes a Mermaid vertex: `id:::class@{ label: "...", shape: code }`.
    pub fn to_mermaid_node(&self, id: &str, label: &str, class: Option<&str>) -> String {
        let mut out = String::with_capacity(id.len() + label.len() + 32);
        out.push_str(id);
        if let Some(class) = class {
            out.push_str(":::");
            out.push_str(class);
        }
        out.push_str("@{ label: \"");
        out.push_str(&label.replace('"', "#quot;"));
        out.push('"');
        if let Some(code) = self.code() {
            out.push_str(", shape: ");
            out.push_str(code);
        }
        out.push_str(" }");
        out
    }
}

impl std::fmt::Display for Shape {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code().unwrap_or("rect"))
    }
}

/// A category of nodes, tied to a folder in the vault.
///
/// Documents in the folder, or in any folder below it, become nodes of this
/// category. Folders without a category do not contribute nodes.
#[derive(Debug, Clone)]
pub struct NodeCategory {
    name: String,
    folder: String,
    shape: Shape,
    classifier: Arc<dyn NodeClassifier>,
}

impl NodeCategory {
    /// Creates a category using the default classifier.
    pub fn new(name: impl Into<String>, folder: impl Into<String>, shape: Shape) -> Self {
        Self::with_classifier(name, folder, shape, Arc::new(DefaultClassifier))
    }

    /// Creates a category with a specific classifier.
    pub fn with_classifier(
        name: impl Into<String>,
        folder: impl Into<String>,
        shape: Shape,
        classifier: Arc<dyn NodeClassifier>,
    ) -> Self {
        Self {
            name: name.into(),
            folder: normalize_folder(&folder.into()),
            shape,
            classifier,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Folder holding the nodes of this category.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn classifier(&self) -> &Arc<dyn NodeClassifier> {
        &self.classifier
    }

    /// Returns true if a document in `folder` belongs to this category.
    pub fn contains_folder(&self, folder: &str) -> bool {
        folder == self.folder
            || (folder.len() > self.folder.len()
                && folder.starts_with(&self.folder)
                && folder.as_bytes()[self.folder.len()] == b'/')
    }
}

impl PartialEq for NodeCategory {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for NodeCategory {}

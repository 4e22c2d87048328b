//! JSON configuration for the graph.
//!
//! ```json
//! {
//!   "journal": { "folder": "Journal", "markers": "Markers" },
//!   "categories": [
//!     { "name": "Person", "folder": "People" },
//!     { "name": "Project", "folder": "Projects", "shape": "hexagon",
//!       "classifier": "project-status" }
//!   ]
//! }
//! ```

use crate::category::{NodeCategory, Shape};
use crate::classifier::{DefaultClassifier, NodeClassifier, ProjectStatusClassifier};
use crate::error::Result;
use crate::settings::GraphSettings;
use curator_vault::JournalSettings;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

/// The classifiers that can be named in configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassifierKind {
    /// Archived nodes only.
    #[default]
    Default,
    /// Archived first, then the project `status` front matter property.
    ProjectStatus,
}

impl ClassifierKind {
    fn build(self) -> Arc<dyn NodeClassifier> {
        match self {
            Self::Default => Arc::new(DefaultClassifier),
            Self::ProjectStatus => Arc::new(ProjectStatusClassifier::chained()),
        }
    }
}

/// One configured node category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryConfig {
    pub name: String,
    pub folder: String,
    #[serde(default)]
    pub shape: Shape,
    #[serde(default)]
    pub classifier: ClassifierKind,
}

/// Top-level configuration file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    #[serde(default)]
    pub journal: JournalSettings,
    #[serde(default)]
    pub categories: Vec<CategoryConfig>,
}

impl GraphConfig {
    /// Parses a configuration file.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Serializes this configuration, pretty-printed.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// The configuration written by `curator init`.
    pub fn example() -> Self {
        Self {
            journal: JournalSettings::default(),
            categories: vec![
                CategoryConfig {
                    name: "Person".to_string(),
                    folder: "People".to_string(),
                    shape: Shape::Rectangle,
                    classifier: ClassifierKind::Default,
                },
                CategoryConfig {
                    name: "Project".to_string(),
                    folder: "Projects".to_string(),
                    shape: Shape::Hexagon,
                    classifier: ClassifierKind::ProjectStatus,
                },
                CategoryConfig {
                    name: "Team".to_string(),
                    folder: "Teams".to_string(),
                    shape: Shape::Rounded,
                    classifier: ClassifierKind::Default,
                },
            ],
        }
    }

    /// Builds graph settings. Categories naming the same classifier share
    /// a single instance of it.
    pub fn settings(&self) -> Result<GraphSettings> {
        let mut classifiers: HashMap<ClassifierKind, Arc<dyn NodeClassifier>> = HashMap::new();
        let categories = self
            .categories
            .iter()
            .map(|c| {
                let classifier = classifiers
                    .entry(c.classifier)
                    .or_insert_with(|| c.classifier.build());
                NodeCategory::with_classifier(&c.name, &c.folder, c.shape, Arc::clone(classifier))
            })
            .collect();
        GraphSettings::new(categories)
    }
}

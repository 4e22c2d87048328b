//! Graph settings: the configured node categories.

use crate::category::NodeCategory;
use crate::error::{GraphError, Result};
use curator_vault::Document;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// The node categories of a graph and the merged class definitions of their
/// classifiers. Built once and never changed.
#[derive(Debug, Clone, Default)]
pub struct GraphSettings {
    categories: Vec<Arc<NodeCategory>>,
    class_definitions: BTreeMap<String, String>,
}

impl GraphSettings {
    /// Validates the categories and merges their class definitions.
    ///
    /// Category order matters: when category folders are nested, a document
    /// belongs to the first category that contains it.
    pub fn new(categories: Vec<NodeCategory>) -> Result<Self> {
        let mut names = BTreeSet::new();
        for category in &categories {
            if !names.insert(category.name().to_string()) {
                return Err(GraphError::DuplicateCategory(category.name().to_string()));
            }
        }

        let mut class_definitions = BTreeMap::new();
        for category in &categories {
            class_definitions.extend(category.classifier().class_definitions());
        }

        Ok(Self {
            categories: categories.into_iter().map(Arc::new).collect(),
            class_definitions,
        })
    }

    /// Categories in configuration order.
    pub fn categories(&self) -> &[Arc<NodeCategory>] {
        &self.categories
    }

    /// Looks up a category by name.
    pub fn category(&self, name: &str) -> Option<&Arc<NodeCategory>> {
        self.categories.iter().find(|c| c.name() == name)
    }

    /// The category a document belongs to, based on its folder.
    pub fn category_for(&self, document: &Document) -> Option<&Arc<NodeCategory>> {
        self.categories
            .iter()
            .find(|c| c.contains_folder(document.folder()))
    }

    /// Class name to style, sorted by class name.
    pub fn class_definitions(&self) -> &BTreeMap<String, String> {
        &self.class_definitions
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::Shape;
    use crate::classifier::ProjectStatusClassifier;

    fn categories() -> Vec<NodeCategory> {
        vec![
            NodeCategory::new("Person", "People", Shape::Rectangle),
            NodeCategory::with_classifier(
                "Project",
                "Projects",
                Shape::Hexagon,
                Arc::new(ProjectStatusClassifier::chained()),
            ),
            NodeCategory::new("Team", "Teams", Shape::Rounded),
        ]
    }

    #[test]
    fn test_class_definitions_are_merged_once() {
        let settings = GraphSettings::new(categories()).unwrap();
        let classes: Vec<&str> = settings
            .class_definitions()
            .keys()
            .map(String::as_str)
            .collect();
        assert_eq!(
            classes,
            vec!["amber", "archived", "green", "on-hold", "red", "unknown"]
        );
    }

    #[test]
    fn test_duplicate_category() {
        let mut categories = categories();
        categories.push(NodeCategory::new("Person", "Contacts", Shape::Circle));
        let err = GraphSettings::new(categories).unwrap_err();
        assert!(matches!(err, GraphError::DuplicateCategory(name) if name == "Person"));
    }

    #[test]
    fn test_category_for_document() {
        let settings = GraphSettings::new(categories()).unwrap();

        let archived = Document::new("Old", "Projects/2019", "");
        assert_eq!(settings.category_for(&archived).unwrap().name(), "Project");

        let elsewhere = Document::new("Note", "Inbox", "");
        assert!(settings.category_for(&elsewhere).is_none());
        assert!(settings.category("Team").is_some());
        assert!(settings.category("Nope").is_none());
    }
}

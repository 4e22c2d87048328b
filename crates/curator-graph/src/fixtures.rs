//! Shared vaults for graph tests.

use crate::category::{NodeCategory, Shape};
use crate::classifier::ProjectStatusClassifier;
use crate::graph::VaultGraph;
use crate::refresh::INCLUDE_IN_GRAPH;
use crate::settings::GraphSettings;
use chrono::NaiveDate;
use curator_vault::{DailyJournal, Document, DocumentEvent, FrontMatter, JournalSettings, Vault};
use std::sync::Arc;

pub(crate) fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

pub(crate) fn settings() -> GraphSettings {
    GraphSettings::new(vec![
        NodeCategory::new("Person", "People", Shape::Rectangle),
        NodeCategory::with_classifier(
            "Project",
            "Projects",
            Shape::Hexagon,
            Arc::new(ProjectStatusClassifier::chained()),
        ),
    ])
    .unwrap()
}

pub(crate) struct Fixture {
    pub vault: Vault,
}

impl Fixture {
    /// Alice and Bob met on 2024-01-05.
    pub fn scenario() -> Self {
        let mut fixture = Self {
            vault: Vault::new(),
        };
        fixture.marker("Meetings", true);
        fixture.marker("Private", false);
        fixture.person("Alice");
        fixture.person("Bob");
        fixture.entry("2024-01-05", "- [[Meetings]] [[Alice]] and [[Bob]]");
        fixture
    }

    /// The scenario plus Carol, a project and a few more days.
    ///
    /// ```text
    /// Alice -- Bob      2024-01-05
    /// Alice -- Apollo   2024-01-06, 2024-01-07
    /// Carol -- Apollo   2024-01-06
    /// ```
    pub fn rich() -> Self {
        let mut fixture = Self::scenario();
        fixture.person("Carol");
        fixture.vault.insert(
            Document::new("Apollo", "Projects", "")
                .with_front_matter(FrontMatter::parse("Apollo", "status: green").unwrap()),
        );
        fixture.entry(
            "2024-01-06",
            "## [[Meetings]]\n- [[Alice]] kicked off [[Apollo]]\n- [[Carol]] joined [[Apollo]]\n",
        );
        fixture.entry("2024-01-07", "- [[Meetings]]\n    - [[Alice]] demoed [[Apollo]]\n");
        fixture
    }

    pub fn person(&mut self, name: &str) -> DocumentEvent {
        self.vault.insert(Document::new(name, "People", ""))
    }

    pub fn marker(&mut self, name: &str, included: bool) -> DocumentEvent {
        let yaml = format!("{}: {}", INCLUDE_IN_GRAPH, included);
        self.vault.insert(
            Document::new(name, "Markers", "")
                .with_front_matter(FrontMatter::parse(name, &yaml).unwrap()),
        )
    }

    pub fn entry(&mut self, day: &str, body: &str) -> DocumentEvent {
        self.vault.insert(Document::new(day, "Journal", body))
    }

    pub fn remove_entry(&mut self, day: &str) -> DocumentEvent {
        self.vault.remove("Journal", day).unwrap()
    }

    pub fn journal(&self) -> DailyJournal {
        DailyJournal::build(&self.vault, &JournalSettings::default())
    }

    /// A fully refreshed graph of the current vault.
    pub fn graph(&self) -> VaultGraph {
        let mut graph = VaultGraph::new(settings());
        graph.full_refresh(&self.vault, &self.journal());
        graph
    }

    pub fn assert_symmetric(&self, graph: &VaultGraph) {
        for node in graph.nodes() {
            for neighbor in graph.neighbor_names(node.name()) {
                assert!(
                    graph.neighbor_names(neighbor).contains(&node.name()),
                    "{} -> {} has no way back",
                    node.name(),
                    neighbor
                );
                assert_eq!(
                    graph.edge_dates(node.name(), neighbor),
                    graph.edge_dates(neighbor, node.name())
                );
            }
        }
    }
}

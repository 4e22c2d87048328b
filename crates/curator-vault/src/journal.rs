//! The journal: daily entries and the markers that label their lines.
//!
//! A journal entry is a document named after its date (`2024-01-05`) kept in
//! the journal folder. A marker is a document in the markers folder. A line in
//! an entry is *marked* by a marker when:
//!
//! - the line links to the marker itself,
//! - the line is nested (indented deeper) below a line linking the marker, or
//! - the line sits in the section of a heading linking the marker.
//!
//! ```text
//! ## [[Meetings]]
//! - Coffee with [[Alice]]            <- marked by Meetings
//! - [[Decisions]]
//!     - [[Alice]] hands over to [[Bob]]  <- marked by Meetings and Decisions
//! ```
//!
//! A marked line is attributed to every document it links to.

use crate::document::Document;
use crate::links::internal_link_targets;
use crate::vault::{Vault, VaultVisitor};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::sync::Arc;
use tracing::debug;

const DATE_FORMAT: &str = "%Y-%m-%d";
const TAB_WIDTH: usize = 4;

/// Where the journal lives in the vault.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JournalSettings {
    /// Folder holding the daily entries (searched recursively).
    pub folder: String,
    /// Folder holding the marker documents.
    pub markers: String,
}

impl Default for JournalSettings {
    fn default() -> Self {
        Self {
            folder: "Journal".to_string(),
            markers: "Markers".to_string(),
        }
    }
}

/// A journal line associated with the date of its entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MarkedLine {
    pub date: NaiveDate,
    pub line: String,
}

/// Read access to the journal, as needed by derived indexes.
pub trait Journal {
    /// Returns true if the document is a marker.
    fn is_marker_document(&self, document: &Document) -> bool;

    /// Returns the date of a journal entry, or `None` for any other document.
    fn entry_date(&self, document: &Document) -> Option<NaiveDate>;

    /// Returns true if the document is a daily journal entry.
    fn is_journal_entry(&self, document: &Document) -> bool {
        self.entry_date(document).is_some()
    }

    /// All markers, by name.
    fn markers(&self) -> &BTreeMap<String, Arc<Document>>;

    /// Lines mentioning `document_name` that are marked by any of
    /// `marker_names`, grouped by marker. With a `date`, only lines from the
    /// entry of that day are returned.
    fn marked_lines_for(
        &self,
        document_name: &str,
        marker_names: &BTreeSet<String>,
        date: Option<NaiveDate>,
    ) -> BTreeMap<String, Vec<MarkedLine>>;
}

#[derive(Debug, Clone)]
struct Mention {
    marker: String,
    date: NaiveDate,
    line: String,
}

/// Journal built from the documents in a vault.
///
/// Building scans every entry once and indexes marked lines by the documents
/// they link to. The journal is a snapshot: rebuild it after the vault
/// changes.
#[derive(Debug, Clone, Default)]
pub struct DailyJournal {
    settings: JournalSettings,
    markers: BTreeMap<String, Arc<Document>>,
    entries: BTreeSet<NaiveDate>,
    mentions: HashMap<String, Vec<Mention>>,
}

impl DailyJournal {
    /// Scans the vault and indexes all marked lines.
    pub fn build(vault: &Vault, settings: &JournalSettings) -> Self {
        let mut journal = Self {
            settings: settings.clone(),
            ..Self::default()
        };

        if let Some(folder) = vault.folder(&settings.markers) {
            let mut collector = Collector::default();
            folder.accept(&mut collector);
            journal.markers = collector
                .documents
                .into_iter()
                .map(|doc| (doc.name().to_string(), doc))
                .collect();
        }

        if let Some(folder) = vault.folder(&settings.folder) {
            let mut collector = Collector::default();
            folder.accept(&mut collector);
            let mut entries: Vec<(NaiveDate, Arc<Document>)> = collector
                .documents
                .into_iter()
                .filter_map(|doc| parse_date(doc.name()).map(|date| (date, doc)))
                .collect();
            entries.sort_by_key(|(date, _)| *date);

            for (date, entry) in entries {
                journal.entries.insert(date);
                journal.index_entry(date, entry.body());
            }
        }

        debug!(
            "Journal has {} entries and {} markers",
            journal.entries.len(),
            journal.markers.len()
        );
        journal
    }

    /// Dates of all entries, oldest first.
    pub fn entry_dates(&self) -> impl Iterator<Item = &NaiveDate> {
        self.entries.iter()
    }

    pub fn settings(&self) -> &JournalSettings {
        &self.settings
    }

    fn index_entry(&mut self, date: NaiveDate, body: &str) {
        // (heading level, markers) for enclosing sections
        let mut sections: Vec<(usize, Vec<String>)> = Vec::new();
        // (indentation, markers) for enclosing outline items
        let mut outline: Vec<(usize, Vec<String>)> = Vec::new();

        for raw in body.lines() {
            let text = raw.trim();
            if text.is_empty() {
                continue;
            }

            let targets = internal_link_targets(text);
            let own: Vec<String> = targets
                .iter()
                .filter(|target| self.markers.contains_key(*target))
                .cloned()
                .collect();

            let mut active: BTreeSet<&str> = BTreeSet::new();
            if let Some(level) = heading_level(text) {
                sections.retain(|(l, _)| *l < level);
                sections.push((level, own));
                outline.clear();
            } else {
                let indent = indentation(raw);
                while outline.last().is_some_and(|(i, _)| *i >= indent) {
                    outline.pop();
                }
                outline.push((indent, own));
            }
            for (_, markers) in sections.iter().chain(outline.iter()) {
                active.extend(markers.iter().map(String::as_str));
            }

            if active.is_empty() {
                continue;
            }
            for target in &targets {
                let mentions = self.mentions.entry(target.clone()).or_default();
                for marker in &active {
                    mentions.push(Mention {
                        marker: marker.to_string(),
                        date,
                        line: text.to_string(),
                    });
                }
            }
        }
    }
}

impl Journal for DailyJournal {
    fn is_marker_document(&self, document: &Document) -> bool {
        document.is_in_folder_tree(&self.settings.markers)
    }

    fn entry_date(&self, document: &Document) -> Option<NaiveDate> {
        if !document.is_in_folder_tree(&self.settings.folder) {
            return None;
        }
        parse_date(document.name())
    }

    fn markers(&self) -> &BTreeMap<String, Arc<Document>> {
        &self.markers
    }

    fn marked_lines_for(
        &self,
        document_name: &str,
        marker_names: &BTreeSet<String>,
        date: Option<NaiveDate>,
    ) -> BTreeMap<String, Vec<MarkedLine>> {
        let mut result: BTreeMap<String, Vec<MarkedLine>> = BTreeMap::new();
        let Some(mentions) = self.mentions.get(document_name) else {
            return result;
        };

        for mention in mentions {
            if !marker_names.contains(&mention.marker) {
                continue;
            }
            if date.is_some_and(|d| d != mention.date) {
                continue;
            }
            result
                .entry(mention.marker.clone())
                .or_default()
                .push(MarkedLine {
                    date: mention.date,
                    line: mention.line.clone(),
                });
        }
        result
    }
}

#[derive(Default)]
struct Collector {
    documents: Vec<Arc<Document>>,
}

impl VaultVisitor for Collector {
    fn visit_document(&mut self, document: &Arc<Document>) {
        self.documents.push(Arc::clone(document));
    }
}

fn parse_date(name: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(name, DATE_FORMAT).ok()
}

fn heading_level(text: &str) -> Option<usize> {
    let level = text.chars().take_while(|c| *c == '#').count();
    let rest = &text[level..];
    if (1..=6).contains(&level) && (rest.is_empty() || rest.starts_with(' ')) {
        Some(level)
    } else {
        None
    }
}

fn indentation(line: &str) -> usize {
    line.chars()
        .take_while(|c| c.is_whitespace())
        .map(|c| if c == '\t' { TAB_WIDTH } else { 1 })
        .sum()
}

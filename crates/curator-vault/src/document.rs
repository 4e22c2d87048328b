//! Documents: the leaves of the vault.

use crate::error::Result;
use crate::front_matter::FrontMatter;
use crate::links::{internal_link_targets, InternalLink};
use std::hash::{Hash, Hasher};

/// A single Markdown document.
///
/// Documents are identified by name only; two documents with the same name
/// are equal even when their content differs. This is what allows a refreshed
/// copy of a document to stand in for the old one.
#[derive(Debug, Clone)]
pub struct Document {
    name: String,
    folder: String,
    front_matter: FrontMatter,
    body: String,
}

impl Document {
    /// Creates a document without front matter.
    ///
    /// `folder` is the slash-separated path of the containing folder relative
    /// to the vault root; the empty string is the root itself.
    pub fn new(name: impl Into<String>, folder: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            folder: normalize_folder(&folder.into()),
            front_matter: FrontMatter::new(),
            body: body.into(),
        }
    }

    /// Creates a document from raw file content, splitting off front matter.
    pub fn parse(name: impl Into<String>, folder: impl Into<String>, content: &str) -> Result<Self> {
        let name = name.into();
        let (yaml, body) = FrontMatter::split(content);
        let front_matter = match yaml {
            Some(yaml) => FrontMatter::parse(&name, yaml)?,
            None => FrontMatter::new(),
        };
        Ok(Self {
            name,
            folder: normalize_folder(&folder.into()),
            front_matter,
            body: body.to_string(),
        })
    }

    /// Replaces the front matter.
    pub fn with_front_matter(mut self, front_matter: FrontMatter) -> Self {
        self.front_matter = front_matter;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Path of the folder holding this document.
    pub fn folder(&self) -> &str {
        &self.folder
    }

    pub fn front_matter(&self) -> &FrontMatter {
        &self.front_matter
    }

    /// Document text without the front matter block.
    pub fn body(&self) -> &str {
        &self.body
    }

    /// Title used for sorting: the name without leading emoji, punctuation
    /// or whitespace, lowercased.
    pub fn sortable_title(&self) -> String {
        self.name
            .trim_start_matches(|c: char| !c.is_alphanumeric())
            .to_lowercase()
    }

    /// Returns true if this document lives in `folder` or any folder below it.
    pub fn is_in_folder_tree(&self, folder: &str) -> bool {
        is_in_folder_tree(&self.folder, folder)
    }

    /// All internal links in the body.
    pub fn internal_links(&self) -> Vec<InternalLink> {
        InternalLink::parse_all(&self.body)
    }

    /// Distinct names of documents linked from the body.
    pub fn linked_document_names(&self) -> Vec<String> {
        internal_link_targets(&self.body)
    }
}

impl PartialEq for Document {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
    }
}

impl Eq for Document {}

impl Hash for Document {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.name.hash(state);
    }
}

/// Strips leading, trailing and doubled separators from a folder path.
pub fn normalize_folder(folder: &str) -> String {
    folder
        .split(['/', '\\'])
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Returns true if `path` equals `ancestor` or is nested below it.
pub(crate) fn is_in_folder_tree(path: &str, ancestor: &str) -> bool {
    if ancestor.is_empty() {
        return true;
    }
    path == ancestor
        || (path.len() > ancestor.len()
            && path.starts_with(ancestor)
            && path.as_bytes()[ancestor.len()] == b'/')
}

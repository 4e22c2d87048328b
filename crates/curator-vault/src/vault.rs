//! The vault: a tree of folders holding documents.
//!
//! Documents are stored behind `Arc` so that derived indexes can hold on to
//! them without copying; replacing a document swaps the `Arc`, it never
//! mutates a document in place.

use crate::document::{normalize_folder, Document};
use crate::event::{ChangeKind, DocumentEvent};
use std::collections::{BTreeMap, VecDeque};
use std::sync::Arc;

/// Callbacks for walking a folder tree.
pub trait VaultVisitor {
    /// Called once per folder, before its documents.
    fn visit_folder(&mut self, _folder: &Folder) {}

    /// Called once per document.
    fn visit_document(&mut self, _document: &Arc<Document>) {}
}

/// A folder in the vault.
#[derive(Debug, Clone, Default)]
pub struct Folder {
    name: String,
    path: String,
    folders: BTreeMap<String, Folder>,
    documents: BTreeMap<String, Arc<Document>>,
}

impl Folder {
    fn new(name: &str, path: String) -> Self {
        Self {
            name: name.to_string(),
            path,
            ..Self::default()
        }
    }

    /// Name of the folder; empty for the vault root.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Slash-separated path relative to the vault root.
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Direct sub-folders, sorted by name.
    pub fn folders(&self) -> impl Iterator<Item = &Folder> {
        self.folders.values()
    }

    /// Documents directly in this folder, sorted by name.
    pub fn documents(&self) -> impl Iterator<Item = &Arc<Document>> {
        self.documents.values()
    }

    pub fn document(&self, name: &str) -> Option<&Arc<Document>> {
        self.documents.get(name)
    }

    /// Walks this folder and everything below it, breadth first.
    pub fn accept<V: VaultVisitor + ?Sized>(&self, visitor: &mut V) {
        let mut queue: VecDeque<&Folder> = VecDeque::new();
        queue.push_back(self);

        while let Some(folder) = queue.pop_front() {
            visitor.visit_folder(folder);
            for document in folder.documents.values() {
                visitor.visit_document(document);
            }
            queue.extend(folder.folders.values());
        }
    }

    fn child_path(&self, name: &str) -> String {
        if self.path.is_empty() {
            name.to_string()
        } else {
            format!("{}/{}", self.path, name)
        }
    }
}

/// An in-memory document repository.
#[derive(Debug, Clone, Default)]
pub struct Vault {
    root: Folder,
}

impl Vault {
    /// Creates an empty vault.
    pub fn new() -> Self {
        Self::default()
    }

    /// The root folder.
    pub fn root(&self) -> &Folder {
        &self.root
    }

    /// Looks up a folder by path. The empty path is the root.
    pub fn folder(&self, path: &str) -> Option<&Folder> {
        let path = normalize_folder(path);
        let mut folder = &self.root;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            folder = folder.folders.get(part)?;
        }
        Some(folder)
    }

    /// Looks up a document by folder and name.
    pub fn document(&self, folder: &str, name: &str) -> Option<&Arc<Document>> {
        self.folder(folder)?.document(name)
    }

    /// Adds or replaces a document, creating its folders as needed.
    pub fn insert(&mut self, document: Document) -> DocumentEvent {
        let folder = self.folder_mut_or_create(document.folder());
        let document = Arc::new(document);
        let kind = match folder
            .documents
            .insert(document.name().to_string(), Arc::clone(&document))
        {
            Some(_) => ChangeKind::Modified,
            None => ChangeKind::Created,
        };
        DocumentEvent::new(kind, document)
    }

    /// Removes a document. Returns `None` if it was not in the vault.
    pub fn remove(&mut self, folder: &str, name: &str) -> Option<DocumentEvent> {
        let document = self.folder_mut(folder)?.documents.remove(name)?;
        Some(DocumentEvent::new(ChangeKind::Deleted, document))
    }

    /// Removes a folder with everything below it, returning one deletion per
    /// document in breadth-first order. The root cannot be removed.
    pub fn remove_folder(&mut self, path: &str) -> Vec<DocumentEvent> {
        struct Deletions(Vec<DocumentEvent>);
        impl VaultVisitor for Deletions {
            fn visit_document(&mut self, document: &Arc<Document>) {
                self.0
                    .push(DocumentEvent::new(ChangeKind::Deleted, Arc::clone(document)));
            }
        }

        let path = normalize_folder(path);
        let (parent, name) = path.rsplit_once('/').unwrap_or(("", path.as_str()));
        if name.is_empty() {
            return Vec::new();
        }
        let Some(removed) = self
            .folder_mut(parent)
            .and_then(|folder| folder.folders.remove(name))
        else {
            return Vec::new();
        };

        let mut deletions = Deletions(Vec::new());
        removed.accept(&mut deletions);
        deletions.0
    }

    /// Total number of documents.
    pub fn document_count(&self) -> usize {
        struct Counter(usize);
        impl VaultVisitor for Counter {
            fn visit_document(&mut self, _document: &Arc<Document>) {
                self.0 += 1;
            }
        }
        let mut counter = Counter(0);
        self.root.accept(&mut counter);
        counter.0
    }

    fn folder_mut(&mut self, path: &str) -> Option<&mut Folder> {
        let path = normalize_folder(path);
        let mut folder = &mut self.root;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            folder = folder.folders.get_mut(part)?;
        }
        Some(folder)
    }

    fn folder_mut_or_create(&mut self, path: &str) -> &mut Folder {
        let mut folder = &mut self.root;
        for part in path.split('/').filter(|p| !p.is_empty()) {
            let child_path = folder.child_path(part);
            folder = folder
                .folders
                .entry(part.to_string())
                .or_insert_with(|| Folder::new(part, child_path));
        }
        folder
    }
}

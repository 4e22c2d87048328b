//! Loading a vault from disk.
//!
//! Every Markdown file below the vault root becomes a document. The folder of
//! a document is its parent directory relative to the root, with `/` as the
//! separator; its name is the file name without the `.md` extension. Hidden
//! directories (`.obsidian`, `.curator`, `.git`) and anything matched by a
//! `.gitignore` or `.ignore` file inside the vault are skipped.

use crate::error::{Result, WatchError};
use curator_vault::{Document, Vault};
use ignore::gitignore::Gitignore;
use ignore::{Match, WalkBuilder};
use std::path::{Component, Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

const DOCUMENT_EXTENSION: &str = "md";
const IGNORE_FILES: [&str; 2] = [".gitignore", ".ignore"];

/// Result of loading a vault.
pub struct LoadResult {
    pub vault: Vault,
    pub documents_loaded: usize,
    /// Files that could not be read or parsed: (relative path, error).
    pub errors: Vec<(String, String)>,
    pub duration_ms: u64,
}

/// Reads all documents below `root` into a fresh vault.
///
/// Unreadable files are reported in the result instead of failing the load.
pub fn load_vault(root: &Path) -> Result<LoadResult> {
    if !root.is_dir() {
        return Err(WatchError::NotADirectory(root.to_path_buf()));
    }

    let start = Instant::now();
    let mut vault = Vault::new();
    let mut errors = Vec::new();

    let walker = vault_walker(root).build();

    for entry in walker {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!("Skipping unreadable entry: {}", e);
                continue;
            }
        };
        let path = entry.path();
        if !path.is_file() {
            continue;
        }
        let Some((folder, name)) = document_location(root, path) else {
            continue;
        };

        match read_document(path, &folder, &name) {
            Ok(document) => {
                vault.insert(document);
            }
            Err(e) => {
                warn!("Failed to load {}: {}", path.display(), e);
                errors.push((relative_display(root, path), e.to_string()));
            }
        }
    }

    let documents_loaded = vault.document_count();
    let duration_ms = start.elapsed().as_millis() as u64;
    info!(
        "Loaded {} documents from {} in {}ms",
        documents_loaded,
        root.display(),
        duration_ms
    );

    Ok(LoadResult {
        vault,
        documents_loaded,
        errors,
        duration_ms,
    })
}

/// Reads and parses a single document file.
pub(crate) fn read_document(path: &Path, folder: &str, name: &str) -> Result<Document> {
    let content = std::fs::read_to_string(path).map_err(|e| WatchError::io(path, e))?;
    Ok(Document::parse(name, folder, &content)?)
}

/// Walker over the files of a vault, honouring only the ignore files inside
/// the vault so that loading and watching agree on what a document is.
fn vault_walker(dir: &Path) -> WalkBuilder {
    let mut builder = WalkBuilder::new(dir);
    builder
        .hidden(true)
        .parents(false)
        .git_global(false)
        .git_exclude(false)
        .require_git(false);
    builder
}

/// Maps a file path to the (folder, name) of the document it holds.
///
/// Returns `None` for paths outside `root`, non-Markdown files and files in
/// hidden directories.
pub(crate) fn document_location(root: &Path, path: &Path) -> Option<(String, String)> {
    let relative = path.strip_prefix(root).ok()?;
    if relative.extension()?.to_str()? != DOCUMENT_EXTENSION {
        return None;
    }

    let folder = match relative.parent() {
        Some(parent) => vault_folder(parent)?,
        None => String::new(),
    };
    let name = relative.file_stem()?.to_str()?;
    if name.starts_with('.') {
        return None;
    }
    debug!("{} -> {}/{}", path.display(), folder, name);
    Some((folder, name.to_string()))
}

/// Maps a directory path to the vault folder it holds.
///
/// Returns `None` for the root itself, paths outside it and hidden
/// directories.
pub(crate) fn folder_location(root: &Path, path: &Path) -> Option<String> {
    let folder = vault_folder(path.strip_prefix(root).ok()?)?;
    (!folder.is_empty()).then_some(folder)
}

fn vault_folder(relative: &Path) -> Option<String> {
    let mut folders = Vec::new();
    for component in relative.components() {
        match component {
            Component::Normal(part) => {
                let part = part.to_str()?;
                if part.starts_with('.') {
                    return None;
                }
                folders.push(part);
            }
            Component::CurDir => {}
            _ => return None,
        }
    }
    Some(folders.join("/"))
}

/// Returns true if an ignore file between `root` and `path` excludes `path`
/// or one of its parent directories.
///
/// Deeper ignore files take precedence, as they do for the loader's walk.
/// The files are read on every call, so edits to them apply immediately.
pub(crate) fn is_ignored(root: &Path, path: &Path, is_dir: bool) -> bool {
    let Ok(relative) = path.strip_prefix(root) else {
        return false;
    };

    let mut dir = root.to_path_buf();
    let mut ignored = false;
    let mut parents = relative.parent().map(Path::components).into_iter().flatten();
    loop {
        for file in IGNORE_FILES {
            let ignore_file = dir.join(file);
            if !ignore_file.is_file() {
                continue;
            }
            let (matcher, error) = Gitignore::new(&ignore_file);
            if let Some(e) = error {
                warn!("{}: {}", ignore_file.display(), e);
            }
            match matcher.matched_path_or_any_parents(path, is_dir) {
                Match::Ignore(_) => ignored = true,
                Match::Whitelist(_) => ignored = false,
                Match::None => {}
            }
        }
        match parents.next() {
            Some(component) => dir.push(component),
            None => break,
        }
    }
    ignored
}

/// Document files below `dir`, with their (folder, name), as the loader
/// would find them.
pub(crate) fn document_files(root: &Path, dir: &Path) -> Vec<(PathBuf, String, String)> {
    let mut files = Vec::new();
    for entry in vault_walker(dir).build().flatten() {
        let path = entry.path();
        if !path.is_file() || is_ignored(root, path, false) {
            continue;
        }
        if let Some((folder, name)) = document_location(root, path) {
            files.push((path.to_path_buf(), folder, name));
        }
    }
    files
}

fn relative_display(root: &Path, path: &Path) -> String {
    path.strip_prefix(root)
        .unwrap_or(path)
        .display()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    #[test]
    fn test_document_location() {
        let root = Path::new("/vault");
        assert_eq!(
            document_location(root, Path::new("/vault/People/Alice.md")),
            Some(("People".to_string(), "Alice".to_string()))
        );
        assert_eq!(
            document_location(root, Path::new("/vault/Journal/2024/2024-01-05.md")),
            Some(("Journal/2024".to_string(), "2024-01-05".to_string()))
        );
        assert_eq!(
            document_location(root, Path::new("/vault/Home.md")),
            Some((String::new(), "Home".to_string()))
        );
        assert!(document_location(root, Path::new("/vault/People/photo.png")).is_none());
        assert!(document_location(root, Path::new("/vault/.obsidian/x.md")).is_none());
        assert!(document_location(root, Path::new("/elsewhere/Alice.md")).is_none());
    }

    #[test]
    fn test_load_vault() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "People/Alice.md", "---\nrole: lead\n---\nHello");
        write(dir.path(), "Journal/2024-01-05.md", "- [[Alice]]");
        write(dir.path(), ".obsidian/workspace.md", "ignored");
        write(dir.path(), "People/notes.txt", "ignored");

        let result = load_vault(dir.path()).unwrap();

        assert_eq!(result.documents_loaded, 2);
        assert!(result.errors.is_empty());
        let alice = result.vault.document("People", "Alice").unwrap();
        assert_eq!(alice.front_matter().string("role", ""), "lead");
        assert_eq!(alice.body().trim(), "Hello");
    }

    #[test]
    fn test_broken_front_matter_is_reported() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "People/Alice.md", "---\n: : :\n  - [\n---\n");
        write(dir.path(), "People/Bob.md", "Fine");

        let result = load_vault(dir.path()).unwrap();

        assert_eq!(result.documents_loaded, 1);
        assert_eq!(result.errors.len(), 1);
        assert!(result.errors[0].0.contains("Alice.md"));
    }

    #[test]
    fn test_folder_location() {
        let root = Path::new("/vault");
        assert_eq!(
            folder_location(root, Path::new("/vault/People/Archive")),
            Some("People/Archive".to_string())
        );
        assert!(folder_location(root, root).is_none());
        assert!(folder_location(root, Path::new("/vault/.git/refs")).is_none());
        assert!(folder_location(root, Path::new("/elsewhere/People")).is_none());
    }

    #[test]
    fn test_ignore_files_are_honoured() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), ".gitignore", "People/Secret.md\nDrafts/\n");
        write(dir.path(), "Projects/.ignore", "*.tmp.md\n");
        write(dir.path(), "People/Alice.md", "");
        write(dir.path(), "People/Secret.md", "");
        write(dir.path(), "Drafts/Idea.md", "");
        write(dir.path(), "Projects/Apollo.md", "");
        write(dir.path(), "Projects/Apollo.tmp.md", "");

        let root = dir.path();
        assert!(is_ignored(root, &root.join("People/Secret.md"), false));
        assert!(is_ignored(root, &root.join("Drafts/Idea.md"), false));
        assert!(is_ignored(root, &root.join("Drafts"), true));
        assert!(is_ignored(root, &root.join("Projects/Apollo.tmp.md"), false));
        assert!(!is_ignored(root, &root.join("People/Alice.md"), false));
        assert!(!is_ignored(root, &root.join("Projects/Apollo.md"), false));

        let result = load_vault(root).unwrap();
        let mut names: Vec<String> = document_files(root, root)
            .into_iter()
            .map(|(_, _, name)| name)
            .collect();
        names.sort();
        assert_eq!(names, vec!["Alice", "Apollo"]);
        assert_eq!(result.documents_loaded, 2);
        assert!(result.vault.document("People", "Secret").is_none());
    }

    #[test]
    fn test_missing_root() {
        let dir = TempDir::new().unwrap();
        let err = load_vault(&dir.path().join("nope")).err().unwrap();
        assert!(matches!(err, WatchError::NotADirectory(_)));
    }
}

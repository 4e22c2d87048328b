//! A vault on disk together with its graph.

use crate::error::{Result, WatchError};
use crate::loader::{load_vault, LoadResult};
use crate::watcher::apply_path_change;
use curator_graph::{GraphConfig, RefreshOutcome, VaultGraph};
use curator_vault::{DailyJournal, Journal, JournalSettings, Vault};
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Owns the vault, the journal built from it and the graph derived from both,
/// and keeps the three consistent as files change.
pub struct GraphSession {
    root: PathBuf,
    vault: Vault,
    journal_settings: JournalSettings,
    journal: DailyJournal,
    graph: VaultGraph,
}

impl GraphSession {
    /// Loads the vault at `root` and builds its graph.
    ///
    /// Files that fail to load are logged and left out.
    pub fn open(root: &Path, config: &GraphConfig) -> Result<Self> {
        let LoadResult { vault, errors, .. } = load_vault(root)?;
        for (file, error) in &errors {
            warn!("{}: {}", file, error);
        }
        Self::from_vault(root, vault, config)
    }

    /// Builds the graph for an already loaded vault.
    pub fn from_vault(root: &Path, vault: Vault, config: &GraphConfig) -> Result<Self> {
        let root = root
            .canonicalize()
            .map_err(|e| WatchError::io(root, e))?;
        let journal = DailyJournal::build(&vault, &config.journal);
        let mut graph = VaultGraph::new(config.settings()?);
        graph.full_refresh(&vault, &journal);

        Ok(Self {
            root,
            vault,
            journal_settings: config.journal.clone(),
            journal,
            graph,
        })
    }

    /// The canonical vault root.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn vault(&self) -> &Vault {
        &self.vault
    }

    pub fn journal(&self) -> &DailyJournal {
        &self.journal
    }

    pub fn graph(&self) -> &VaultGraph {
        &self.graph
    }

    /// Re-reads the file or folder at `path` and updates vault, journal and
    /// graph, with one outcome per document that changed.
    pub fn apply(&mut self, path: &Path) -> Result<Vec<RefreshOutcome>> {
        let path = self.resolve(path);
        let events = apply_path_change(&mut self.vault, &self.root, &path)?;

        let journal_changed = events.iter().any(|event| {
            self.journal.is_marker_document(&event.document)
                || self.journal.is_journal_entry(&event.document)
        });
        if journal_changed {
            debug!("Rebuilding journal after {} changes in {}", events.len(), path.display());
            self.journal = DailyJournal::build(&self.vault, &self.journal_settings);
        }

        let mut outcomes = Vec::with_capacity(events.len());
        for event in &events {
            outcomes.push(self.graph.process_event(event, &self.vault, &self.journal)?);
        }
        Ok(outcomes)
    }

    /// Renders the graph around `seed`; see [`VaultGraph::render_graph`].
    ///
    /// A negative depth is treated as zero.
    pub fn render(&self, seed: &str, depth: i64, excluded: &[String]) -> Option<String> {
        let excluded: BTreeSet<String> = excluded.iter().cloned().collect();
        let depth = usize::try_from(depth.max(0)).unwrap_or(usize::MAX);
        self.graph.render_graph(seed, depth, &excluded)
    }

    /// Maps `path` below the canonical root. The file itself may be gone, so
    /// only its parent is canonicalized.
    fn resolve(&self, path: &Path) -> PathBuf {
        if !path.is_absolute() {
            return self.root.join(path);
        }
        if path.starts_with(&self.root) {
            return path.to_path_buf();
        }
        match (path.parent().and_then(|p| p.canonicalize().ok()), path.file_name()) {
            (Some(parent), Some(name)) => parent.join(name),
            _ => path.to_path_buf(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use curator_graph::short_id;
    use std::fs;
    use tempfile::TempDir;

    fn write(root: &Path, relative: &str, content: &str) {
        let path = root.join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn vault_dir() -> TempDir {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "Markers/Meetings.md", "---\ninclude-in-graph: yes\n---\n");
        write(dir.path(), "People/Alice.md", "");
        write(dir.path(), "People/Bob.md", "");
        write(
            dir.path(),
            "Journal/2024/2024-01-05.md",
            "## [[Meetings]]\n- [[Alice]] met [[Bob]]\n",
        );
        dir
    }

    fn open(dir: &TempDir) -> GraphSession {
        GraphSession::open(dir.path(), &GraphConfig::example()).unwrap()
    }

    #[test]
    fn test_open_builds_graph() {
        let dir = vault_dir();
        let session = open(&dir);

        assert_eq!(session.graph().node_count(), 2);
        assert_eq!(session.graph().neighbor_names("Alice"), vec!["Bob"]);

        let diagram = session.render("Alice", 1, &[]).unwrap();
        assert!(diagram.contains(&format!("{} --- {}", short_id("Alice"), short_id("Bob"))));
    }

    #[test]
    fn test_negative_depth_renders_seed_only() {
        let dir = vault_dir();
        let session = open(&dir);

        let diagram = session.render("Alice", -3, &[]).unwrap();
        assert!(!diagram.contains(&short_id("Bob")));
        assert!(session.render("Nobody", 1, &[]).is_none());
    }

    #[test]
    fn test_deleting_entry_removes_edge() {
        let dir = vault_dir();
        let mut session = open(&dir);

        let entry = dir.path().join("Journal/2024/2024-01-05.md");
        fs::remove_file(&entry).unwrap();
        let outcomes = session.apply(&entry).unwrap();

        assert!(matches!(outcomes[..], [RefreshOutcome::Date(_)]));
        assert!(session.graph().neighbor_names("Alice").is_empty());
        let diagram = session.render("Alice", 1, &[]).unwrap();
        assert!(!diagram.contains(&short_id("Bob")));
    }

    #[test]
    fn test_new_entry_adds_edge() {
        let dir = vault_dir();
        let mut session = open(&dir);
        write(dir.path(), "People/Carol.md", "");
        session.apply(Path::new("People/Carol.md")).unwrap();

        write(
            dir.path(),
            "Journal/2024/2024-01-06.md",
            "- [[Meetings]]\n    - [[Carol]] joined [[Alice]]\n",
        );
        session
            .apply(Path::new("Journal/2024/2024-01-06.md"))
            .unwrap();

        assert_eq!(session.graph().neighbor_names("Alice"), vec!["Bob", "Carol"]);
    }

    #[test]
    fn test_unrelated_file_is_ignored() {
        let dir = vault_dir();
        let mut session = open(&dir);
        write(dir.path(), "Inbox/Todo.md", "[[Alice]] [[Bob]]");

        let outcomes = session.apply(Path::new("Inbox/Todo.md")).unwrap();
        assert_eq!(outcomes, vec![RefreshOutcome::Ignored]);
        assert_eq!(session.vault().document_count(), 5);
    }

    #[test]
    fn test_marker_edit_rebuilds_graph() {
        let dir = vault_dir();
        let mut session = open(&dir);
        write(dir.path(), "Markers/Meetings.md", "---\ninclude-in-graph: no\n---\n");

        let outcomes = session.apply(Path::new("Markers/Meetings.md")).unwrap();
        assert_eq!(outcomes, vec![RefreshOutcome::Full]);
        assert_eq!(session.graph().edge_count(), 0);
    }

    #[test]
    fn test_renamed_folder_leaves_graph() {
        let dir = vault_dir();
        write(dir.path(), "People/Archive/Old.md", "");
        write(
            dir.path(),
            "Journal/2024/2024-01-06.md",
            "## [[Meetings]]\n- [[Alice]] and [[Old]]\n",
        );
        let mut session = open(&dir);
        assert!(session.graph().node("Old").unwrap().is_archived());
        assert_eq!(session.graph().neighbor_names("Alice"), vec!["Bob", "Old"]);

        fs::create_dir_all(dir.path().join("Inbox")).unwrap();
        fs::rename(
            dir.path().join("People/Archive"),
            dir.path().join("Inbox/Archive"),
        )
        .unwrap();
        let mut outcomes = session.apply(Path::new("Inbox/Archive")).unwrap();
        outcomes.extend(session.apply(Path::new("People/Archive")).unwrap());

        assert!(outcomes.contains(&RefreshOutcome::Full));
        assert!(session.graph().node("Old").is_none());
        assert_eq!(session.graph().neighbor_names("Alice"), vec!["Bob"]);
        assert!(session.vault().document("Inbox/Archive", "Old").is_some());
    }

    #[test]
    fn test_deleted_folder_removes_nodes() {
        let dir = vault_dir();
        let mut session = open(&dir);

        fs::remove_dir_all(dir.path().join("People")).unwrap();
        let outcomes = session.apply(Path::new("People")).unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(session.graph().node_count(), 0);
        assert_eq!(session.graph().edge_count(), 0);
    }

    #[test]
    fn test_ignored_document_stays_out() {
        let dir = vault_dir();
        write(dir.path(), ".gitignore", "People/Secret.md\n");
        write(dir.path(), "People/Secret.md", "");
        let mut session = open(&dir);
        assert!(session.graph().node("Secret").is_none());

        write(dir.path(), "People/Secret.md", "edited");
        let outcomes = session.apply(Path::new("People/Secret.md")).unwrap();

        assert!(outcomes.is_empty());
        assert!(session.vault().document("People", "Secret").is_none());
        assert!(session.graph().node("Secret").is_none());
    }
}

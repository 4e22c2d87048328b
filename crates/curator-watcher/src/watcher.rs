//! File watching.
//!
//! File-system events are debounced, then each changed path is read back into
//! the vault and applied to the graph, one path at a time and in path order.
//! A changed directory is reconciled with the vault as a whole, which covers
//! folders that were renamed, moved or deleted.

use crate::error::{Result, WatchError};
use crate::loader::{
    document_files, document_location, folder_location, is_ignored, read_document,
};
use crate::session::GraphSession;
use curator_graph::RefreshOutcome;
use curator_vault::{Document, DocumentEvent, Vault, VaultVisitor};
use notify::{RecursiveMode, Watcher};
use notify_debouncer_mini::{new_debouncer, DebounceEventResult};
use std::collections::{BTreeSet, HashSet};
use std::path::{Path, PathBuf};
use std::sync::{mpsc, Arc};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Settings for [`watch_vault`].
#[derive(Debug, Clone)]
pub struct WatchConfig {
    /// Quiet period before a burst of file events is processed.
    pub debounce_ms: u64,
}

impl Default for WatchConfig {
    fn default() -> Self {
        Self { debounce_ms: 250 }
    }
}

/// Brings the vault in line with what is on disk at `path`.
///
/// A document file is read back if it exists and removed from the vault
/// otherwise. A directory is synced as a whole: documents the vault has below
/// it but the disk does not are removed, and files the vault does not know
/// yet are read. A folder that is gone takes all of its documents with it.
/// Ignored files count as absent.
///
/// Returns one event per document that changed; paths that do not hold
/// documents yield none.
pub fn apply_path_change(
    vault: &mut Vault,
    root: &Path,
    path: &Path,
) -> Result<Vec<DocumentEvent>> {
    if path.is_dir() {
        return Ok(sync_folder(vault, root, path));
    }

    let mut events = Vec::new();
    if let Some((folder, name)) = document_location(root, path) {
        if path.is_file() && !is_ignored(root, path, false) {
            let document = read_document(path, &folder, &name)?;
            events.push(vault.insert(document));
            return Ok(events);
        }
        events.extend(vault.remove(&folder, &name));
    }

    if !path.exists() {
        if let Some(folder) = folder_location(root, path) {
            events.extend(vault.remove_folder(&folder));
        }
    }
    Ok(events)
}

fn sync_folder(vault: &mut Vault, root: &Path, dir: &Path) -> Vec<DocumentEvent> {
    struct Locations(Vec<(String, String)>);
    impl VaultVisitor for Locations {
        fn visit_document(&mut self, document: &Arc<Document>) {
            self.0
                .push((document.folder().to_string(), document.name().to_string()));
        }
    }

    let Some(folder) = folder_location(root, dir) else {
        return Vec::new();
    };
    let on_disk = if is_ignored(root, dir, true) {
        Vec::new()
    } else {
        document_files(root, dir)
    };
    let present: HashSet<(&str, &str)> = on_disk
        .iter()
        .map(|(_, folder, name)| (folder.as_str(), name.as_str()))
        .collect();

    let mut known = Locations(Vec::new());
    if let Some(existing) = vault.folder(&folder) {
        existing.accept(&mut known);
    }

    let mut events = Vec::new();
    for (folder, name) in &known.0 {
        if !present.contains(&(folder.as_str(), name.as_str())) {
            events.extend(vault.remove(folder, name));
        }
    }
    for (path, folder, name) in &on_disk {
        if vault.document(folder, name).is_some() {
            continue;
        }
        match read_document(path, folder, name) {
            Ok(document) => events.push(vault.insert(document)),
            Err(e) => warn!("Skipping {}: {}", path.display(), e),
        }
    }

    debug!("Synced folder {}: {} documents changed", folder, events.len());
    events
}

/// Watches the session's vault until the watcher shuts down.
///
/// `on_update` is called after every debounced batch that changed the graph.
/// Errors for single files are logged and skipped.
pub fn watch_vault<F>(session: &mut GraphSession, config: &WatchConfig, mut on_update: F) -> Result<()>
where
    F: FnMut(&GraphSession, &[RefreshOutcome]),
{
    let (tx, rx) = mpsc::channel::<DebounceEventResult>();
    let mut debouncer = new_debouncer(Duration::from_millis(config.debounce_ms), tx)?;
    debouncer
        .watcher()
        .watch(session.root(), RecursiveMode::Recursive)?;
    info!("Watching {}", session.root().display());

    for result in rx {
        let events = match result {
            Ok(events) => events,
            Err(e) => {
                warn!("Watch error: {}", e);
                continue;
            }
        };

        let paths: BTreeSet<PathBuf> = events.into_iter().map(|event| event.path).collect();
        let mut outcomes = Vec::new();
        for path in &paths {
            match session.apply(path) {
                Ok(applied) => {
                    for outcome in applied {
                        if outcome != RefreshOutcome::Ignored {
                            debug!("{} -> {:?}", path.display(), outcome);
                            outcomes.push(outcome);
                        }
                    }
                }
                Err(WatchError::Graph(e)) => return Err(WatchError::Graph(e)),
                Err(e) => warn!("Skipping {}: {}", path.display(), e),
            }
        }

        if !outcomes.is_empty() {
            on_update(session, &outcomes);
        }
    }

    Ok(())
}

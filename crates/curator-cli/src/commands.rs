//! CLI command implementations.

use crate::config::{load_config, vault_config_path};
use colored::Colorize;
use curator_graph::{GraphConfig, GraphStats};
use curator_vault::Journal;
use curator_watcher::{load_vault, watch_vault, GraphSession, LoadResult, WatchConfig};
use indicatif::{ProgressBar, ProgressStyle};
use serde::Serialize;
use std::fs;
use std::path::Path;
use std::time::Duration;

type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;

/// Shown when the seed is not a node.
pub const NO_GRAPH: &str = "No graph available.";

/// Write the default configuration into a vault.
pub fn init(path: &Path) -> Result<()> {
    let config_path = vault_config_path(path);

    if config_path.exists() {
        println!("{} Already initialized", "✓".green());
        return Ok(());
    }

    if let Some(dir) = config_path.parent() {
        fs::create_dir_all(dir)?;
    }
    fs::write(&config_path, GraphConfig::example().to_json()?)?;

    println!("{} Initialized curator in {}", "✓".green(), path.display());
    println!("  Edit {} to match your folders", config_path.display().to_string().cyan());
    println!("  Run {} to draw a graph", "curator graph <document>".cyan());

    Ok(())
}

/// Load the vault and build the graph, with a spinner on stderr.
fn open_session(path: &Path) -> Result<GraphSession> {
    let (config, source) = load_config(path)?;
    if let Some(source) = source {
        tracing::debug!("Using configuration {}", source.display());
    }

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.cyan} {msg}")?);
    spinner.enable_steady_tick(Duration::from_millis(80));
    spinner.set_message("Reading vault...");

    let LoadResult {
        vault,
        documents_loaded,
        errors,
        duration_ms,
    } = load_vault(path)?;

    spinner.set_message("Building graph...");
    let session = GraphSession::from_vault(path, vault, &config)?;
    spinner.finish_and_clear();

    eprintln!(
        "{} Loaded {} documents in {}ms",
        "✓".green(),
        documents_loaded.to_string().cyan(),
        duration_ms
    );
    report_errors(&errors);

    Ok(session)
}

fn report_errors(errors: &[(String, String)]) {
    if errors.is_empty() {
        return;
    }
    eprintln!("\n{} documents could not be read:", "⚠".yellow());
    for (file, error) in errors.iter().take(5) {
        eprintln!("  {} - {}", file.red(), error);
    }
    if errors.len() > 5 {
        eprintln!("  ... and {} more", errors.len() - 5);
    }
}

/// Print the Mermaid graph around a document.
pub fn graph(path: &Path, seed: &str, depth: i64, exclude: &[String]) -> Result<()> {
    let session = open_session(path)?;
    let diagram = session.render(seed, depth, exclude).ok_or(NO_GRAPH)?;
    print!("{}", diagram);
    Ok(())
}

#[derive(Serialize)]
struct StatusReport<'a> {
    vault: String,
    documents: usize,
    journal_entries: usize,
    markers: usize,
    graph: &'a GraphStats,
}

/// Show vault and graph statistics.
pub fn status(path: &Path, json: bool) -> Result<()> {
    let session = open_session(path)?;
    let stats = session.graph().stats();
    let report = StatusReport {
        vault: session.root().display().to_string(),
        documents: session.vault().document_count(),
        journal_entries: session.journal().entry_dates().count(),
        markers: session.journal().markers().len(),
        graph: &stats,
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", "Curator Status".cyan().bold());
    println!();
    println!("  {} {}", "Vault:".dimmed(), report.vault);
    println!("  {} {}", "Documents:".dimmed(), report.documents);
    println!("  {} {}", "Journal:".dimmed(), report.journal_entries);
    println!("  {} {}", "Markers:".dimmed(), report.markers);
    println!("  {} {}", "Nodes:".dimmed(), stats.node_count);
    println!("  {} {}", "Archived:".dimmed(), stats.archived_count);
    println!("  {} {}", "Edges:".dimmed(), stats.edge_count);
    for (category, count) in &stats.categories {
        println!("    {} {}", format!("{}:", category).dimmed(), count);
    }
    if stats.selected_markers.is_empty() {
        println!(
            "  {} none (set {} in a marker)",
            "In graph:".dimmed(),
            curator_graph::INCLUDE_IN_GRAPH.cyan()
        );
    } else {
        println!("  {} {}", "In graph:".dimmed(), stats.selected_markers.join(", "));
    }

    Ok(())
}

/// Export the graph to JSON.
pub fn export(path: &Path, output: &Path) -> Result<()> {
    let session = open_session(path)?;
    let export = session.graph().export();
    fs::write(output, serde_json::to_string_pretty(&export)?)?;
    println!("{} Exported to {}", "✓".green(), output.display());
    Ok(())
}

/// Keep a graph up to date while the vault changes.
///
/// With `output` the diagram is rewritten on every change; otherwise it is
/// printed.
pub fn watch(
    path: &Path,
    seed: &str,
    depth: i64,
    exclude: &[String],
    output: Option<&Path>,
) -> Result<()> {
    let mut session = open_session(path)?;

    let emit = |session: &GraphSession| -> Result<()> {
        let diagram = session
            .render(seed, depth, exclude)
            .unwrap_or_else(|| format!("{}\n", NO_GRAPH));
        match output {
            Some(output) => {
                fs::write(output, &diagram)?;
                eprintln!("{} Wrote {}", "✓".green(), output.display());
            }
            None => print!("{}", diagram),
        }
        Ok(())
    };

    emit(&session)?;
    eprintln!("  Press {} to stop", "Ctrl+C".cyan());

    watch_vault(&mut session, &WatchConfig::default(), |session, outcomes| {
        tracing::info!("Graph updated ({} changes)", outcomes.len());
        if let Err(e) = emit(session) {
            eprintln!("{} {}", "error:".red().bold(), e);
        }
    })?;

    Ok(())
}

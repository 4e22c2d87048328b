//! Curator CLI - relationship graphs for a Markdown vault
//!
//! Loads a vault, derives the relationship graph from its journal and draws
//! parts of it as Mermaid diagrams.

use clap::{Parser, Subcommand};
use colored::Colorize;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;

#[derive(Parser)]
#[command(name = "curator")]
#[command(author = "Vault Curator Contributors")]
#[command(version)]
#[command(about = "Relationship graphs for a Markdown vault", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a default configuration into a vault
    Init {
        /// Vault to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Print the Mermaid graph around a document
    Graph {
        /// Document to start from
        seed: String,

        /// Number of hops to follow from the seed
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        depth: i64,

        /// Leave out nodes of this category (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Vault to read (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },

    /// Show vault and graph statistics
    Status {
        /// Vault to read (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,

        /// Output as JSON instead of formatted text
        #[arg(long)]
        json: bool,
    },

    /// Export the graph to JSON
    Export {
        /// Output file
        #[arg(short, long, default_value = "curator-graph.json")]
        output: PathBuf,

        /// Vault to read (defaults to current directory)
        #[arg(default_value = ".")]
        path: PathBuf,
    },

    /// Redraw the graph around a document whenever the vault changes
    Watch {
        /// Document to start from
        seed: String,

        /// Number of hops to follow from the seed
        #[arg(short, long, default_value = "1", allow_negative_numbers = true)]
        depth: i64,

        /// Leave out nodes of this category (repeatable)
        #[arg(short, long)]
        exclude: Vec<String>,

        /// Write the diagram to this file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Vault to watch (defaults to current directory)
        #[arg(short, long, default_value = ".")]
        path: PathBuf,
    },
}

fn main() {
    let cli = Cli::parse();

    // Set up logging
    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();

    let result = match cli.command {
        Commands::Init { path } => commands::init(&path),
        Commands::Graph {
            seed,
            depth,
            exclude,
            path,
        } => commands::graph(&path, &seed, depth, &exclude),
        Commands::Status { path, json } => commands::status(&path, json),
        Commands::Export { output, path } => commands::export(&path, &output),
        Commands::Watch {
            seed,
            depth,
            exclude,
            output,
            path,
        } => commands::watch(&path, &seed, depth, &exclude, output.as_deref()),
    };

    if let Err(e) = result {
        eprintln!("{} {}", "error:".red().bold(), e);
        std::process::exit(1);
    }
}

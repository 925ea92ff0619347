//! roam CLI tool
//!
//! Command-line interface for inspecting an org-roam collection with roam-graph.
//!
//! ## Commands
//!
//! - `stats`: node, edge, orphan and duplicate title counts
//! - `orphans`: list nodes with no links to or from other nodes
//! - `node <identifier>`: show one node, looked up by ID or title
//! - `tags`: list every tag in the collection
//! - `filter --tag <tag>...`: show the collection left after a tag filter
//! - `export`: write the link graph as JSON
//! - `snippets <identifier>` / `src <identifier>`: LaTeX snippets and source blocks of a node
//!
//! The database location and default filters come from a TOML config (`--config`), see
//! [roam_graph::config::RoamConfig]. `--db` overrides the configured database.

use clap::{Parser, Subcommand};
use roam_graph::{codec::OrgFileReader, config::RoamConfig, roamgraph::RoamGraph, RoamError};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "roam")]
#[command(author, version, about = "Query the knowledge graph of an org-roam collection", long_about = None)]
struct Cli {
    /// Path to the org-roam database (overrides the config file)
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Summarize the collection
    Stats,

    /// List orphaned nodes
    Orphans,

    /// Show a node, looked up by ID or title
    Node {
        identifier: String,
    },

    /// List all tags in the collection
    Tags,

    /// Filter the collection by tag and list the remaining nodes
    Filter {
        /// Tag to filter on (repeatable)
        #[arg(short, long = "tag", required = true)]
        tags: Vec<String>,

        /// Keep nodes with the tags instead of removing them
        #[arg(long)]
        keep: bool,
    },

    /// Export nodes and links as JSON
    Export {
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Print the LaTeX snippets in a node's body
    Snippets {
        identifier: String,
    },

    /// Print the source blocks in a node's body
    Src {
        identifier: String,
    },
}

async fn load_collection(
    db: Option<PathBuf>,
    config: &RoamConfig,
) -> Result<RoamGraph, RoamError> {
    let db_path = db.unwrap_or_else(|| config.db_path());
    let mut collection = RoamGraph::open(&db_path.to_string_lossy()).await?;
    if !config.exclude_tags.is_empty() {
        collection = collection.filter_tags(config.exclude_tags.iter().cloned(), true);
    }
    if config.remove_orphans {
        collection = collection.remove_orphans();
    }
    Ok(collection)
}

fn print_stats(collection: &RoamGraph) {
    let (nodes, edges) = collection.size();
    println!("Nodes: {nodes}");
    println!("Edges: {edges}");
    println!("Orphans: {}", collection.orphans().len());
    println!("Tags: {}", collection.all_tags().len());
    println!("Duplicate titles: {}", collection.duplicate_titles().len());
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => RoamConfig::load(path)?,
        None => RoamConfig::default(),
    };

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    let collection = runtime.block_on(load_collection(cli.db, &config))?;
    let reader = OrgFileReader;

    match cli.command {
        Commands::Stats => {
            if let Some(path) = collection.source_path() {
                println!("=== {path} ===");
            }
            print_stats(&collection);
            for diagnostic in collection.diagnostics() {
                println!("{diagnostic}");
            }
        }

        Commands::Orphans => {
            for id in collection.orphans() {
                println!("{}", collection.node(id)?);
            }
        }

        Commands::Node { identifier } => {
            let node = collection.node(&identifier)?;
            println!("ID:       {}", node.id);
            println!("Title:    {}", node.title);
            println!("Location: {}", node.location);
            let tags: Vec<&str> = node.tags.iter().map(String::as_str).collect();
            println!("Tags:     {}", tags.join(", "));
            println!("Links:");
            for target in node.backlinks.iter() {
                let title = collection.node_title(target)?;
                println!("  {title} ({target})");
            }
            if !node.misc_links.is_empty() {
                println!("Other links:");
                for link in node.misc_links.iter() {
                    println!("  {link}");
                }
            }
        }

        Commands::Tags => {
            for tag in collection.all_tags() {
                println!("{tag}");
            }
        }

        Commands::Filter { tags, keep } => {
            let filtered = collection.filter_tags(tags, !keep);
            print_stats(&filtered);
            println!();
            for node in filtered.nodes() {
                println!("{node}");
            }
        }

        Commands::Export { output } => {
            let json = serde_json::to_string_pretty(&collection.export())?;
            match output {
                Some(path) => {
                    std::fs::write(&path, json)?;
                    println!("✓ Graph written to {}", path.display());
                }
                None => println!("{json}"),
            }
        }

        Commands::Snippets { identifier } => {
            for snippet in collection.get_latex_snippets(&reader, &identifier)? {
                println!("{snippet}");
            }
        }

        Commands::Src { identifier } => {
            for (language, code) in collection.get_src_blocks(&reader, &identifier)? {
                println!("#+begin_src {language}\n{code}\n#+end_src");
            }
        }
    }

    Ok(())
}

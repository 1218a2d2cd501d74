//! # wikigraph CLI
//!
//! Command-line interface for the wikigraph content resolver.

mod commands;

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use wikigraph_core::Config;

#[derive(Parser)]
#[command(name = "wikigraph")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to configuration file
    #[arg(long, default_value = "wikigraph.yml")]
    config: PathBuf,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,

    /// Override the content directory
    #[arg(long, env = "WIKIGRAPH_CONTENT")]
    content: Option<PathBuf>,

    /// Override the output directory
    #[arg(long)]
    output: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the graph and write the node list and health report
    Build,

    /// Run the pipeline without writing and report content health
    Verify {
        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Fail when unresolved or ambiguous mentions, collisions or bad files exist
        #[arg(long)]
        strict: bool,
    },

    /// Render a markdown file with wiki links resolved against a built graph
    Render {
        /// Markdown file to render
        file: PathBuf,

        /// Node-list artifact (defaults to the configured graph file)
        #[arg(long)]
        graph: Option<PathBuf>,
    },

    /// Show a node and its flattened links
    Node {
        /// `collection/slug`, identifier or id
        key: String,

        /// Emit JSON instead of text
        #[arg(long)]
        json: bool,

        /// Node-list artifact (defaults to the configured graph file)
        #[arg(long)]
        graph: Option<PathBuf>,
    },

    /// Show how a wiki-link title resolves
    Resolve {
        /// Title as written inside `[[...]]`
        title: String,

        /// Node-list artifact (defaults to the configured graph file)
        #[arg(long)]
        graph: Option<PathBuf>,
    },
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing
    let subscriber = tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(if cli.verbose {
                tracing::Level::DEBUG.into()
            } else {
                tracing::Level::INFO.into()
            }),
        )
        .finish();
    tracing::subscriber::set_global_default(subscriber)?;

    let config = load_config(&cli)?;

    match cli.command {
        Commands::Build => commands::build_graph(&config),
        Commands::Verify { json, strict } => commands::verify_content(&config, json, strict),
        Commands::Render { file, graph } => {
            commands::render_file(&config, &file, graph.as_deref())
        }
        Commands::Node { key, json, graph } => {
            commands::show_node(&config, &key, json, graph.as_deref())
        }
        Commands::Resolve { title, graph } => {
            commands::resolve_title(&config, &title, graph.as_deref())
        }
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<Config> {
    let mut config = Config::load_or_default(&cli.config).context("Failed to load configuration")?;
    // Overrides are relative to the working directory, not the config file
    let cwd = std::env::current_dir().context("Failed to read working directory")?;
    if let Some(content) = &cli.content {
        config.paths.content = cwd.join(content);
    }
    if let Some(output) = &cli.output {
        config.paths.output = cwd.join(output);
    }
    Ok(config)
}

//! Build command implementation.

use anyhow::{Context, Result};
use wikigraph_core::{Config, GraphBuilder};

/// Build the graph and write both artifacts
pub fn build_graph(config: &Config) -> Result<()> {
    let builder = GraphBuilder::new(config.clone());
    let artifacts = builder
        .build_and_write()
        .context("Failed to build content graph")?;

    let health = &artifacts.health;
    println!(
        "Built {} nodes: {} problems, {} advisories",
        artifacts.nodes.len(),
        health.problem_count(),
        health.advisory_count()
    );
    println!("  graph:  {}", config.graph_path().display());
    println!("  health: {}", config.health_path().display());

    Ok(())
}

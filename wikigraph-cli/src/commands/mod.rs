//! CLI command implementations.

pub mod build;
pub mod node;
pub mod render;
pub mod resolve;
pub mod verify;

pub use build::build_graph;
pub use node::show_node;
pub use render::render_file;
pub use resolve::resolve_title;
pub use verify::verify_content;

use anyhow::{Context, Result};
use std::path::Path;
use wikigraph_core::{Config, NodeGraph};

/// Load the node-list artifact, from `graph` or the configured location
pub(crate) fn load_graph(config: &Config, graph: Option<&Path>) -> Result<NodeGraph> {
    let path = graph
        .map(Path::to_path_buf)
        .unwrap_or_else(|| config.graph_path());
    tracing::debug!("Reading graph from {:?}", path);
    NodeGraph::from_file(&path)
        .with_context(|| format!("Failed to load graph {:?}; run `wikigraph build` first", path))
}

//! Render a single markdown file against a built graph.

use super::load_graph;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use wikigraph_core::{frontmatter::parse_frontmatter, Config, WikilinkTransformer};

pub fn render_file(config: &Config, file: &Path, graph: Option<&Path>) -> Result<()> {
    let content = fs::read_to_string(file).with_context(|| format!("Failed to read {:?}", file))?;
    let (_, body) =
        parse_frontmatter(&content).with_context(|| format!("Invalid front matter in {:?}", file))?;

    let graph = load_graph(config, graph)?;
    let index = graph.resolution_index();
    let transformer = WikilinkTransformer::new(&index, &graph, &config.link_options());

    let rendered = transformer.render_markdown(&body);
    tracing::debug!("{} link warnings", rendered.warnings.len());
    print!("{}", rendered.html);

    Ok(())
}

//! Show a single node in structured form.

use super::load_graph;
use anyhow::Result;
use std::path::Path;
use wikigraph_core::{Config, NodeGraph};

pub fn show_node(config: &Config, key: &str, json: bool, graph: Option<&Path>) -> Result<()> {
    let graph = load_graph(config, graph)?;
    let Some(node) = graph.lookup(key) else {
        anyhow::bail!("Node '{}' not found", key);
    };
    let links = NodeGraph::flatten_links(node);

    if json {
        let payload = serde_json::json!({
            "node": node,
            "url": node.url_with_base(&config.normalized_base_url()),
            "links": links,
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
    } else {
        println!("{} [{}]", node.title, node.id);
        println!("  url: {}", node.url_with_base(&config.normalized_base_url()));
        if let Some(description) = &node.description {
            println!("  {}", description);
        }
        if !node.tags.is_empty() {
            println!("  tags: {}", node.tags.join(", "));
        }
        for link in &links {
            println!(
                "- {} {} {} ({})",
                link.direction.as_str(),
                link.kind,
                link.title,
                link.id
            );
        }
    }

    Ok(())
}

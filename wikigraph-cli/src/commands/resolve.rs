//! Explain how a wiki-link title resolves.

use super::load_graph;
use anyhow::Result;
use std::path::Path;
use wikigraph_core::{Config, Resolution, Resolver};

pub fn resolve_title(config: &Config, title: &str, graph: Option<&Path>) -> Result<()> {
    let graph = load_graph(config, graph)?;
    let index = graph.resolution_index();

    match Resolver::new(&index).resolve(title) {
        Resolution::Resolved(id) => match graph.find_by_id(&id) {
            Some(node) => println!(
                "resolved {} ({})",
                id,
                node.url_with_base(&config.normalized_base_url())
            ),
            None => println!("resolved {}", id),
        },
        Resolution::Ambiguous(candidates) => {
            let ids: Vec<&str> = candidates.iter().map(|id| id.as_str()).collect();
            println!("ambiguous {}", ids.join(", "));
        }
        Resolution::Unresolved => println!("unresolved"),
    }

    Ok(())
}

//! Link graph construction and graph-level diagnostics.

use crate::{
    health::{AliasConflict, ContentHealth, Orphans},
    index::ResolutionIndex,
    loader::Corpus,
    models::ContentNode,
    resolver::Resolver,
};
use std::collections::{HashMap, HashSet};
use wikigraph_types::{LinkKind, NodeId};

/// A resolved mention
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: NodeId,
    pub to: NodeId,
    pub origin: LinkKind,
}

/// Resolve every raw mention in the corpus into edges
///
/// Edges keep the order in which they were first seen while scanning
/// nodes in registration order. Self-references and repeated
/// `(from, to, origin)` triples are dropped.
pub fn collect_edges(
    corpus: &Corpus,
    index: &ResolutionIndex,
    health: &mut ContentHealth,
) -> Vec<Edge> {
    let resolver = Resolver::new(index);
    let mut seen: HashSet<Edge> = HashSet::new();
    let mut edges = Vec::new();

    for loaded in &corpus.nodes {
        for raw in &loaded.raw_links {
            let Some(target) = resolver.resolve_recording(&raw.target_title, health) else {
                continue;
            };
            if target == loaded.node.id {
                tracing::debug!("Dropping self-link in {}", loaded.source_path);
                continue;
            }

            let edge = Edge {
                from: loaded.node.id.clone(),
                to: target,
                origin: raw.origin,
            };
            if seen.insert(edge.clone()) {
                edges.push(edge);
            }
        }
    }

    edges
}

/// Build the final node list from a loaded corpus
///
/// Link arrays are populated once, alias and orphan diagnostics are added
/// to `health`, and nodes come back ordered by collection then slug.
pub fn build_graph(corpus: Corpus, health: &mut ContentHealth) -> Vec<ContentNode> {
    let index = ResolutionIndex::build(&corpus.nodes);
    let edges = collect_edges(&corpus, &index, health);

    let mut nodes: Vec<ContentNode> = corpus.nodes.into_iter().map(|l| l.node).collect();
    apply_edges(&mut nodes, &edges);

    health.alias_conflicts = alias_conflicts(&nodes);

    nodes.sort_by(|a, b| {
        a.collection
            .cmp(&b.collection)
            .then_with(|| a.slug.cmp(&b.slug))
    });
    health.orphans = orphans(&nodes);

    tracing::info!(
        "Built link graph with {} nodes and {} edges",
        nodes.len(),
        edges.len()
    );

    nodes
}

/// Reset and repopulate every node's link arrays from `edges`
pub fn apply_edges(nodes: &mut [ContentNode], edges: &[Edge]) {
    for node in nodes.iter_mut() {
        node.outbound_links.clear();
        node.inbound_links.clear();
        node.chained_links.clear();
    }

    let positions: HashMap<NodeId, usize> = nodes
        .iter()
        .enumerate()
        .map(|(i, n)| (n.id.clone(), i))
        .collect();

    for edge in edges {
        let (Some(&from), Some(&to)) = (positions.get(&edge.from), positions.get(&edge.to)) else {
            continue;
        };

        let target_ref = nodes[to].link_ref(edge.origin);
        let source_ref = nodes[from].link_ref(edge.origin);

        if edge.origin == LinkKind::Chains {
            nodes[from].chained_links.push(target_ref.clone());
        }
        nodes[from].outbound_links.push(target_ref);
        nodes[to].inbound_links.push(source_ref);
    }
}

/// Duplicate aliases and aliases that shadow another node's title
pub fn alias_conflicts(nodes: &[ContentNode]) -> Vec<AliasConflict> {
    let mut conflicts = Vec::new();

    // lowercased alias -> (owner, alias as written), in node order
    let mut owners: Vec<(String, Vec<(NodeId, String)>)> = Vec::new();
    let mut positions: HashMap<String, usize> = HashMap::new();
    for node in nodes {
        for alias in &node.aliases {
            let key = alias.to_lowercase();
            let slot = *positions.entry(key.clone()).or_insert_with(|| {
                owners.push((key, Vec::new()));
                owners.len() - 1
            });
            let list = &mut owners[slot].1;
            if !list.iter().any(|(id, _)| id == &node.id) {
                list.push((node.id.clone(), alias.clone()));
            }
        }
    }

    for (_, list) in &owners {
        for (i, (first, alias)) in list.iter().enumerate() {
            for (second, _) in &list[i + 1..] {
                conflicts.push(AliasConflict::DuplicateAlias {
                    alias: alias.clone(),
                    nodes: [first.clone(), second.clone()],
                });
            }
        }
    }

    let mut titles: HashMap<String, Vec<&NodeId>> = HashMap::new();
    for node in nodes {
        titles
            .entry(node.title.to_lowercase())
            .or_default()
            .push(&node.id);
    }

    for node in nodes {
        for alias in &node.aliases {
            let Some(title_owners) = titles.get(&alias.to_lowercase()) else {
                continue;
            };
            for owner in title_owners.iter().filter(|id| **id != &node.id) {
                conflicts.push(AliasConflict::AliasMatchesTitle {
                    alias: alias.clone(),
                    alias_owner: node.id.clone(),
                    title_owner: (*owner).clone(),
                });
            }
        }
    }

    for conflict in &conflicts {
        tracing::debug!("Alias conflict: {:?}", conflict);
    }

    conflicts
}

/// Classify nodes by missing inbound and outbound links
pub fn orphans(nodes: &[ContentNode]) -> Orphans {
    let mut orphans = Orphans::default();
    for node in nodes {
        let inbound = node.has_inbound();
        let outbound = node.has_outbound();
        if !inbound && !outbound {
            orphans.strict.push(node.id.clone());
        }
        if !inbound {
            orphans.no_inbound.push(node.id.clone());
        }
        if !outbound {
            orphans.no_outbound.push(node.id.clone());
        }
    }
    orphans
}

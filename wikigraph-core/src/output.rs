//! Serialized artifacts of a run and the render-side view over them.

use crate::{
    health::ContentHealth,
    index::ResolutionIndex,
    models::{ContentNode, FlatLink},
};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use wikigraph_types::{LinkDirection, NodeId};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize {path:?}: {source}")]
    Serialize {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Node list and health report produced by one build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GraphArtifacts {
    pub nodes: Vec<ContentNode>,
    pub health: ContentHealth,
}

impl GraphArtifacts {
    /// Write the node list to `graph_path` and the report to `health_path`
    pub fn write(&self, graph_path: &Path, health_path: &Path) -> Result<(), OutputError> {
        write_json(graph_path, &self.nodes)?;
        write_json(health_path, &self.health)?;
        tracing::info!("Wrote {:?} and {:?}", graph_path, health_path);
        Ok(())
    }
}

fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<(), OutputError> {
    let write_err = |source| OutputError::Write {
        path: path.to_path_buf(),
        source,
    };

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(write_err)?;
    }

    let mut json = serde_json::to_string_pretty(value).map_err(|source| OutputError::Serialize {
        path: path.to_path_buf(),
        source,
    })?;
    json.push('\n');

    fs::write(path, json).map_err(write_err)
}

/// Read a node-list artifact written by [`GraphArtifacts::write`]
pub fn read_nodes(path: &Path) -> Result<Vec<ContentNode>, OutputError> {
    let contents = fs::read_to_string(path).map_err(|source| OutputError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| OutputError::Json {
        path: path.to_path_buf(),
        source,
    })
}

/// Read-only lookups over a serialized node list
#[derive(Debug, Clone, Default)]
pub struct NodeGraph {
    nodes: Vec<ContentNode>,
    by_id: HashMap<NodeId, usize>,
    by_identifier: HashMap<String, usize>,
    by_path: HashMap<(String, String), usize>,
}

impl NodeGraph {
    pub fn new(nodes: Vec<ContentNode>) -> Self {
        let mut by_id = HashMap::new();
        let mut by_identifier = HashMap::new();
        let mut by_path = HashMap::new();

        for (i, node) in nodes.iter().enumerate() {
            by_id.entry(node.id.clone()).or_insert(i);
            if let Some(identifier) = &node.identifier {
                by_identifier.entry(identifier.clone()).or_insert(i);
            }
            by_path
                .entry((node.collection.clone(), node.slug.clone()))
                .or_insert(i);
        }

        Self {
            nodes,
            by_id,
            by_identifier,
            by_path,
        }
    }

    pub fn from_file(path: &Path) -> Result<Self, OutputError> {
        Ok(Self::new(read_nodes(path)?))
    }

    pub fn nodes(&self) -> &[ContentNode] {
        &self.nodes
    }

    /// Resolution index rebuilt from the serialized nodes
    pub fn resolution_index(&self) -> ResolutionIndex {
        ResolutionIndex::build(&self.nodes)
    }

    pub fn find_by_id(&self, id: &NodeId) -> Option<&ContentNode> {
        self.by_id.get(id).map(|&i| &self.nodes[i])
    }

    pub fn find_by_identifier(&self, identifier: &str) -> Option<&ContentNode> {
        self.by_identifier.get(identifier).map(|&i| &self.nodes[i])
    }

    pub fn find_by_slug(&self, collection: &str, slug: &str) -> Option<&ContentNode> {
        self.by_path
            .get(&(collection.to_string(), slug.to_string()))
            .map(|&i| &self.nodes[i])
    }

    /// Look a node up by `collection/slug`, then identifier, then id
    pub fn lookup(&self, key: &str) -> Option<&ContentNode> {
        let key = key.trim().trim_matches('/');
        key.split_once('/')
            .and_then(|(collection, slug)| self.find_by_slug(collection, slug))
            .or_else(|| self.find_by_identifier(key))
            .or_else(|| self.find_by_id(&NodeId::new(key)))
    }

    /// Outbound, inbound and chained links of `node` as one sequence
    pub fn flatten_links(node: &ContentNode) -> Vec<FlatLink> {
        let outbound = node
            .outbound_links
            .iter()
            .map(|l| FlatLink::new(l, LinkDirection::Outbound));
        let inbound = node
            .inbound_links
            .iter()
            .map(|l| FlatLink::new(l, LinkDirection::Inbound));
        let chained = node
            .chained_links
            .iter()
            .map(|l| FlatLink::new(l, LinkDirection::Chain));
        outbound.chain(inbound).chain(chained).collect()
    }
}

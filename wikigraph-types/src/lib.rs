//! Shared types for wikigraph
//!
//! This crate provides the vocabulary shared by the graph builder and the
//! render-side consumers: node identifiers, link origins and link directions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stable node identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(pub String);

impl NodeId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Path-derived fallback id (`collection/slug`)
    pub fn derived(collection: &str, slug: &str) -> Self {
        Self(format!("{}/{}", collection, slug))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for NodeId {
    fn from(id: &str) -> Self {
        NodeId(id.to_string())
    }
}

impl From<String> for NodeId {
    fn from(id: String) -> Self {
        NodeId(id)
    }
}

/// Where a wiki-link mention was found in its document
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkKind {
    Body,
    Resources,
    Source,
    Chains,
}

impl LinkKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkKind::Body => "body",
            LinkKind::Resources => "resources",
            LinkKind::Source => "source",
            LinkKind::Chains => "chains",
        }
    }

    /// Front-matter fields scanned for mentions, in scan order
    pub fn frontmatter_fields() -> [LinkKind; 3] {
        [LinkKind::Resources, LinkKind::Source, LinkKind::Chains]
    }
}

impl fmt::Display for LinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of a link relative to the node it is listed on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkDirection {
    Outbound,
    Inbound,
    Chain,
}

impl LinkDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            LinkDirection::Outbound => "outbound",
            LinkDirection::Inbound => "inbound",
            LinkDirection::Chain => "chain",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_derived_id() {
        assert_eq!(NodeId::derived("essays", "atlas").as_str(), "essays/atlas");
    }

    #[test]
    fn test_kind_serializes_lowercase() {
        let json = serde_json::to_string(&LinkKind::Chains).unwrap();
        assert_eq!(json, "\"chains\"");
        let kind: LinkKind = serde_json::from_str("\"resources\"").unwrap();
        assert_eq!(kind, LinkKind::Resources);
    }

    #[test]
    fn test_node_id_is_transparent() {
        let json = serde_json::to_string(&NodeId::new("notes/a")).unwrap();
        assert_eq!(json, "\"notes/a\"");
    }
}

//! Content model structs for nodes, links and the front matter they come from.

use serde::{Deserialize, Serialize};
use wikigraph_types::{LinkDirection, LinkKind, NodeId};

/// Raw value of a front-matter field that accepts several shapes
///
/// `tags: a, b` and `tags: [a, b]` are both valid. Anything else is kept
/// as [`FieldValue::Other`] so that an unexpected shape never fails the
/// whole document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Text(String),
    List(Vec<serde_yaml::Value>),
    Other(serde_yaml::Value),
}

impl FieldValue {
    /// Scalar text; numbers are accepted and rendered as written
    pub fn as_text(&self) -> Option<String> {
        match self {
            FieldValue::Text(s) => Some(s.clone()),
            FieldValue::Other(serde_yaml::Value::Number(n)) => Some(n.to_string()),
            _ => None,
        }
    }

    /// Ordered entries, where a plain string is a single entry
    pub fn entries(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => vec![s.clone()],
            FieldValue::List(items) => string_items(items),
            FieldValue::Other(_) => Vec::new(),
        }
    }

    /// Ordered entries, where a plain string is split on commas
    pub fn comma_entries(&self) -> Vec<String> {
        match self {
            FieldValue::Text(s) => s
                .split(',')
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect(),
            FieldValue::List(items) => string_items(items)
                .into_iter()
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            FieldValue::Other(_) => Vec::new(),
        }
    }
}

fn string_items(items: &[serde_yaml::Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|v| v.as_str().map(str::to_string))
        .collect()
}

/// Frontmatter metadata from markdown files
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Frontmatter {
    #[serde(default)]
    pub identifier: Option<FieldValue>,

    #[serde(default)]
    pub title: Option<FieldValue>,

    #[serde(default)]
    pub description: Option<FieldValue>,

    #[serde(default)]
    pub tags: Option<FieldValue>,

    #[serde(default)]
    pub aliases: Option<FieldValue>,

    #[serde(default)]
    pub resources: Option<FieldValue>,

    #[serde(default)]
    pub source: Option<FieldValue>,

    #[serde(default)]
    pub chains: Option<FieldValue>,
}

impl Frontmatter {
    /// Trimmed, non-empty identifier if the document declares one
    pub fn identifier(&self) -> Option<String> {
        non_empty_text(self.identifier.as_ref())
    }

    /// Trimmed, non-empty title if the document declares one
    pub fn title(&self) -> Option<String> {
        non_empty_text(self.title.as_ref())
    }

    pub fn description(&self) -> Option<String> {
        self.description.as_ref().and_then(FieldValue::as_text)
    }

    pub fn tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self
            .tags
            .as_ref()
            .map(FieldValue::comma_entries)
            .unwrap_or_default()
        {
            if !tags.contains(&tag) {
                tags.push(tag);
            }
        }
        tags
    }

    /// Aliases keep their original spelling but are unique case-insensitively
    pub fn aliases(&self) -> Vec<String> {
        let mut aliases: Vec<String> = Vec::new();
        for alias in self
            .aliases
            .as_ref()
            .map(FieldValue::comma_entries)
            .unwrap_or_default()
        {
            let lowered = alias.to_lowercase();
            if !aliases.iter().any(|a| a.to_lowercase() == lowered) {
                aliases.push(alias);
            }
        }
        aliases
    }

    /// Entries of a link-bearing front-matter field
    pub fn link_field(&self, kind: LinkKind) -> Vec<String> {
        let field = match kind {
            LinkKind::Body => None,
            LinkKind::Resources => self.resources.as_ref(),
            LinkKind::Source => self.source.as_ref(),
            LinkKind::Chains => self.chains.as_ref(),
        };
        field.map(FieldValue::entries).unwrap_or_default()
    }
}

fn non_empty_text(value: Option<&FieldValue>) -> Option<String> {
    value
        .and_then(FieldValue::as_text)
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

/// A wiki-link mention before resolution
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawLink {
    pub target_title: String,
    pub origin: LinkKind,
}

/// Lightweight reference to another node, listed on a node's link arrays
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LinkRef {
    pub id: NodeId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    pub title: String,
    pub slug: String,
    pub collection: String,
    pub kind: LinkKind,
}

/// One content document as published in the node-list artifact
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentNode {
    pub id: NodeId,

    /// Persisted identifier from front matter, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    pub slug: String,
    pub collection: String,
    pub title: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub tags: Vec<String>,

    #[serde(default)]
    pub aliases: Vec<String>,

    #[serde(default)]
    pub outbound_links: Vec<LinkRef>,

    #[serde(default)]
    pub inbound_links: Vec<LinkRef>,

    #[serde(default)]
    pub chained_links: Vec<LinkRef>,
}

impl ContentNode {
    /// Site path of the node (`/{collection}/{slug}/`)
    pub fn url(&self) -> String {
        self.url_with_base("/")
    }

    /// Site path of the node including a base path
    pub fn url_with_base(&self, base_url: &str) -> String {
        format!(
            "{}{}/{}/",
            crate::config::normalize_base_url(base_url),
            self.collection,
            self.slug
        )
    }

    /// Reference to this node as it appears on another node's link arrays
    pub fn link_ref(&self, kind: LinkKind) -> LinkRef {
        LinkRef {
            id: self.id.clone(),
            identifier: self.identifier.clone(),
            title: self.title.clone(),
            slug: self.slug.clone(),
            collection: self.collection.clone(),
            kind,
        }
    }

    pub fn has_inbound(&self) -> bool {
        !self.inbound_links.is_empty()
    }

    pub fn has_outbound(&self) -> bool {
        !self.outbound_links.is_empty()
    }
}

/// Uniform link entry used for display, regardless of direction
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlatLink {
    pub id: NodeId,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub identifier: Option<String>,

    pub slug: String,
    pub collection: String,
    pub title: String,
    pub direction: LinkDirection,
    pub kind: LinkKind,
}

impl FlatLink {
    pub fn new(link: &LinkRef, direction: LinkDirection) -> Self {
        Self {
            id: link.id.clone(),
            identifier: link.identifier.clone(),
            slug: link.slug.clone(),
            collection: link.collection.clone(),
            title: link.title.clone(),
            direction,
            kind: link.kind,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fm(yaml: &str) -> Frontmatter {
        serde_yaml::from_str(yaml).unwrap()
    }

    #[test]
    fn test_tags_accept_string_or_list() {
        assert_eq!(fm("tags: rust, graphs").tags(), vec!["rust", "graphs"]);
        assert_eq!(
            fm("tags: [rust, graphs, rust]").tags(),
            vec!["rust", "graphs"]
        );
    }

    #[test]
    fn test_unsupported_shapes_are_ignored() {
        assert!(fm("tags: 42").tags().is_empty());
        assert!(fm("aliases: {a: b}").aliases().is_empty());
        assert_eq!(fm("tags: [rust, 3, {x: y}]").tags(), vec!["rust"]);
    }

    #[test]
    fn test_aliases_unique_case_insensitively() {
        assert_eq!(
            fm("aliases: [Atlas, atlas, Map]").aliases(),
            vec!["Atlas", "Map"]
        );
    }

    #[test]
    fn test_link_fields_do_not_split_commas() {
        let matter = fm("resources: \"[[A, B]]\"\nchains:\n  - \"[[C]]\"\n  - \"[[D]]\"");
        assert_eq!(matter.link_field(LinkKind::Resources), vec!["[[A, B]]"]);
        assert_eq!(matter.link_field(LinkKind::Chains), vec!["[[C]]", "[[D]]"]);
        assert!(matter.link_field(LinkKind::Source).is_empty());
    }

    #[test]
    fn test_identifier_trimmed_and_numeric() {
        assert_eq!(
            fm("identifier: \"  abc  \"").identifier(),
            Some("abc".into())
        );
        assert_eq!(fm("identifier: \"   \"").identifier(), None);
        assert_eq!(
            fm("identifier: 20240101").identifier(),
            Some("20240101".into())
        );
    }

    #[test]
    fn test_node_url() {
        let node = ContentNode {
            id: NodeId::new("essays/atlas"),
            identifier: None,
            slug: "atlas".into(),
            collection: "essays".into(),
            title: "Atlas".into(),
            description: None,
            tags: vec![],
            aliases: vec![],
            outbound_links: vec![],
            inbound_links: vec![],
            chained_links: vec![],
        };

        assert_eq!(node.url(), "/essays/atlas/");
        assert_eq!(node.url_with_base("/site"), "/site/essays/atlas/");
    }
}

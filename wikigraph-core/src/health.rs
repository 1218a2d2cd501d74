//! Content-health diagnostics collected during a single build.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use wikigraph_types::NodeId;

/// A file that could not become a node
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadFile {
    pub path: String,
    pub message: String,
}

/// A file whose id was already claimed by an earlier file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdCollision {
    pub id: NodeId,
    /// The discarded file
    pub path: String,
    /// The file that keeps the id
    pub kept_path: String,
}

/// A node that fell back to its path-derived id
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingIdentifier {
    pub id: NodeId,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum AliasConflict {
    /// The same alias (case-insensitive) declared by two nodes
    #[serde(rename_all = "camelCase")]
    DuplicateAlias { alias: String, nodes: [NodeId; 2] },

    /// An alias that equals another node's title (case-insensitive)
    #[serde(rename_all = "camelCase")]
    AliasMatchesTitle {
        alias: String,
        alias_owner: NodeId,
        title_owner: NodeId,
    },
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Orphans {
    /// Neither inbound nor outbound links
    pub strict: Vec<NodeId>,
    pub no_inbound: Vec<NodeId>,
    pub no_outbound: Vec<NodeId>,
}

/// Ordered list of messages, de-duplicated by exact text
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MessageLog {
    messages: Vec<String>,
    #[serde(skip)]
    seen: HashSet<String>,
}

impl MessageLog {
    /// Record `message` unless the same text was recorded before
    ///
    /// Returns `true` when the message is new.
    pub fn record(&mut self, message: String) -> bool {
        if self.seen.contains(&message) {
            return false;
        }
        self.seen.insert(message.clone());
        self.messages.push(message);
        true
    }

    pub fn messages(&self) -> &[String] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn contains(&self, message: &str) -> bool {
        self.messages.iter().any(|m| m == message)
    }
}

/// Diagnostic accumulator for one run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentHealth {
    pub bad_files: Vec<BadFile>,
    pub unresolved_mentions: MessageLog,
    pub ambiguous_mentions: MessageLog,
    pub id_collisions: Vec<IdCollision>,
    pub missing_identifiers: Vec<MissingIdentifier>,
    pub alias_conflicts: Vec<AliasConflict>,
    pub orphans: Orphans,
}

impl ContentHealth {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bad_file(&mut self, path: impl Into<String>, message: impl Into<String>) {
        let bad = BadFile {
            path: path.into(),
            message: message.into(),
        };
        tracing::warn!("Skipping {}: {}", bad.path, bad.message);
        self.bad_files.push(bad);
    }

    pub fn unresolved(&mut self, title: &str) {
        let message = unresolved_message(title);
        if self.unresolved_mentions.record(message.clone()) {
            tracing::debug!("{}", message);
        }
    }

    pub fn ambiguous(&mut self, title: &str, candidates: &[NodeId]) {
        let message = ambiguous_message(title, candidates);
        if self.ambiguous_mentions.record(message.clone()) {
            tracing::warn!("{}", message);
        }
    }

    /// Problems that make the graph incomplete (advisory entries excluded)
    pub fn problem_count(&self) -> usize {
        self.bad_files.len()
            + self.unresolved_mentions.len()
            + self.ambiguous_mentions.len()
            + self.id_collisions.len()
    }

    /// Advisory entries that never affect graph correctness
    pub fn advisory_count(&self) -> usize {
        self.missing_identifiers.len() + self.alias_conflicts.len() + self.orphans.strict.len()
    }
}

pub fn unresolved_message(title: &str) -> String {
    format!("Unresolved wiki-link [[{}]]", title)
}

pub fn ambiguous_message(title: &str, candidates: &[NodeId]) -> String {
    let ids: Vec<&str> = candidates.iter().map(NodeId::as_str).collect();
    format!("Ambiguous wiki-link [[{}]] matches: {}", title, ids.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_dedup_by_text() {
        let mut health = ContentHealth::new();
        health.unresolved("Nonexistent Title");
        health.unresolved("Nonexistent Title");
        health.unresolved("nonexistent title");
        assert_eq!(
            health.unresolved_mentions.messages(),
            &[
                "Unresolved wiki-link [[Nonexistent Title]]".to_string(),
                "Unresolved wiki-link [[nonexistent title]]".to_string(),
            ]
        );
    }

    #[test]
    fn test_ambiguous_message_lists_candidates() {
        let mut health = ContentHealth::new();
        let ids = [NodeId::new("notes/draft"), NodeId::new("essays/draft")];
        health.ambiguous("Draft", &ids);
        health.ambiguous("Draft", &ids);
        assert_eq!(
            health.ambiguous_mentions.messages(),
            &["Ambiguous wiki-link [[Draft]] matches: notes/draft, essays/draft".to_string()]
        );
        assert!(health.unresolved_mentions.is_empty());
    }

    #[test]
    fn test_serialized_shape() {
        let mut health = ContentHealth::new();
        health.bad_file("README.md", "missing collection segment");
        health.alias_conflicts.push(AliasConflict::AliasMatchesTitle {
            alias: "Map".into(),
            alias_owner: NodeId::new("a"),
            title_owner: NodeId::new("b"),
        });

        let value = serde_json::to_value(&health).unwrap();
        assert_eq!(value["badFiles"][0]["path"], "README.md");
        assert_eq!(value["unresolvedMentions"], serde_json::json!([]));
        assert_eq!(value["aliasConflicts"][0]["kind"], "aliasMatchesTitle");
        assert_eq!(value["aliasConflicts"][0]["aliasOwner"], "a");
        assert_eq!(value["orphans"]["noInbound"], serde_json::json!([]));
    }
}

//! Wiki-link target resolution.
//!
//! Strategies are tried in a fixed order and the first key that exists
//! decides the outcome:
//!
//! 1. exact title, then lowercased title
//! 2. normalized slug (matched against both normalized titles and slugs)
//!
//! A key with several candidates is ambiguous and resolves to nothing.

use crate::health::ContentHealth;
use crate::index::ResolutionIndex;
use crate::slug::slugify;
use std::collections::BTreeSet;
use wikigraph_types::NodeId;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Resolved(NodeId),
    /// Several nodes share the matched key; candidates are in id order
    Ambiguous(Vec<NodeId>),
    Unresolved,
}

impl Resolution {
    pub fn resolved(&self) -> Option<&NodeId> {
        match self {
            Resolution::Resolved(id) => Some(id),
            _ => None,
        }
    }

    fn from_candidates(candidates: &BTreeSet<NodeId>) -> Self {
        let mut iter = candidates.iter();
        match (iter.next(), iter.next()) {
            (Some(id), None) => Resolution::Resolved(id.clone()),
            (Some(_), Some(_)) => Resolution::Ambiguous(candidates.iter().cloned().collect()),
            (None, _) => Resolution::Unresolved,
        }
    }
}

/// Resolves raw link titles against a [`ResolutionIndex`]
#[derive(Debug, Clone, Copy)]
pub struct Resolver<'a> {
    index: &'a ResolutionIndex,
}

impl<'a> Resolver<'a> {
    pub fn new(index: &'a ResolutionIndex) -> Self {
        Self { index }
    }

    /// Resolve a title without recording anything
    pub fn resolve(&self, raw_title: &str) -> Resolution {
        let lowered = raw_title.to_lowercase();
        let by_title = self
            .index
            .title_candidates(raw_title)
            .or_else(|| self.index.title_candidates(&lowered));
        if let Some(candidates) = by_title {
            return Resolution::from_candidates(candidates);
        }

        let slug = slugify(raw_title);
        if let Some(candidates) = self.index.slug_candidates(&slug) {
            return Resolution::from_candidates(candidates);
        }

        Resolution::Unresolved
    }

    /// Resolve a title, recording ambiguity or failure in `health`
    pub fn resolve_recording(&self, raw_title: &str, health: &mut ContentHealth) -> Option<NodeId> {
        match self.resolve(raw_title) {
            Resolution::Resolved(id) => Some(id),
            Resolution::Ambiguous(candidates) => {
                health.ambiguous(raw_title, &candidates);
                None
            }
            Resolution::Unresolved => {
                health.unresolved(raw_title);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ContentNode;

    fn node(id: &str, collection: &str, slug: &str, title: &str, aliases: &[&str]) -> ContentNode {
        ContentNode {
            id: NodeId::new(id),
            identifier: None,
            slug: slug.into(),
            collection: collection.into(),
            title: title.into(),
            description: None,
            tags: vec![],
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            outbound_links: vec![],
            inbound_links: vec![],
            chained_links: vec![],
        }
    }

    fn sample() -> ResolutionIndex {
        let nodes = vec![
            node("essays/atlas", "essays", "atlas", "Atlas", &["The Map"]),
            node("notes/draft", "notes", "draft", "Draft", &[]),
            node("essays/draft", "essays", "draft", "Draft", &[]),
            node(
                "projects/rust-safety",
                "projects",
                "rust-safety",
                "Rust & Safety",
                &[],
            ),
        ];
        ResolutionIndex::build(&nodes)
    }

    #[test]
    fn test_exact_and_case_insensitive_title() {
        let index = sample();
        let resolver = Resolver::new(&index);
        assert_eq!(
            resolver.resolve("Atlas"),
            Resolution::Resolved("essays/atlas".into())
        );
        assert_eq!(
            resolver.resolve("ATLAS"),
            Resolution::Resolved("essays/atlas".into())
        );
    }

    #[test]
    fn test_slug_fallback() {
        let index = sample();
        let resolver = Resolver::new(&index);
        assert_eq!(
            resolver.resolve("rust safety"),
            Resolution::Resolved("projects/rust-safety".into())
        );
        assert_eq!(
            resolver.resolve("Rust-Safety"),
            Resolution::Resolved("projects/rust-safety".into())
        );
    }

    #[test]
    fn test_ambiguous_title_picks_no_winner() {
        let index = sample();
        let resolver = Resolver::new(&index);
        assert_eq!(
            resolver.resolve("Draft"),
            Resolution::Ambiguous(vec!["essays/draft".into(), "notes/draft".into()])
        );
    }

    #[test]
    fn test_aliases_never_resolve() {
        let index = sample();
        let resolver = Resolver::new(&index);
        assert_eq!(resolver.resolve("The Map"), Resolution::Unresolved);
    }

    #[test]
    fn test_recording_diagnostics() {
        let index = sample();
        let resolver = Resolver::new(&index);
        let mut health = ContentHealth::new();

        for _ in 0..3 {
            assert!(resolver
                .resolve_recording("Nonexistent Title", &mut health)
                .is_none());
        }
        assert!(resolver.resolve_recording("Draft", &mut health).is_none());
        assert_eq!(
            resolver.resolve_recording("atlas", &mut health),
            Some(NodeId::new("essays/atlas"))
        );

        assert_eq!(health.unresolved_mentions.len(), 1);
        assert!(health
            .unresolved_mentions
            .contains("Unresolved wiki-link [[Nonexistent Title]]"));
        assert_eq!(
            health.ambiguous_mentions.messages(),
            &["Ambiguous wiki-link [[Draft]] matches: essays/draft, notes/draft".to_string()]
        );
    }
}

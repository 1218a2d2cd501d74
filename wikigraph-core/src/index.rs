//! Title and slug lookup tables used to resolve wiki-link targets.

use crate::models::ContentNode;
use crate::slug::slugify;
use std::collections::{BTreeSet, HashMap};
use wikigraph_types::NodeId;

/// Anything the index can be built over
pub trait IndexEntry {
    fn node_id(&self) -> &NodeId;
    fn title(&self) -> &str;
    fn slug(&self) -> &str;
}

impl IndexEntry for ContentNode {
    fn node_id(&self) -> &NodeId {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn slug(&self) -> &str {
        &self.slug
    }
}

/// Lookup tables mapping titles and slugs to candidate node ids
///
/// Keys map to sets so that a title claimed by several nodes is detected
/// as ambiguous. Aliases are never indexed.
#[derive(Debug, Clone, Default)]
pub struct ResolutionIndex {
    by_title: HashMap<String, BTreeSet<NodeId>>,
    by_slug: HashMap<String, BTreeSet<NodeId>>,
}

impl ResolutionIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn build<'a, T, I>(entries: I) -> Self
    where
        T: IndexEntry + 'a,
        I: IntoIterator<Item = &'a T>,
    {
        let mut index = Self::new();
        for entry in entries {
            index.insert(entry);
        }
        index
    }

    pub fn insert<T: IndexEntry + ?Sized>(&mut self, entry: &T) {
        let id = entry.node_id();
        let title = entry.title();

        add_key(&mut self.by_title, title.to_string(), id);
        add_key(&mut self.by_title, title.to_lowercase(), id);

        add_key(&mut self.by_slug, slugify(title), id);
        add_key(&mut self.by_slug, slugify(entry.slug()), id);
    }

    pub fn title_candidates(&self, key: &str) -> Option<&BTreeSet<NodeId>> {
        self.by_title.get(key)
    }

    pub fn slug_candidates(&self, key: &str) -> Option<&BTreeSet<NodeId>> {
        self.by_slug.get(key)
    }
}

fn add_key(map: &mut HashMap<String, BTreeSet<NodeId>>, key: String, id: &NodeId) {
    if key.is_empty() {
        return;
    }
    map.entry(key).or_default().insert(id.clone());
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Entry {
        id: NodeId,
        title: String,
        slug: String,
    }

    impl IndexEntry for Entry {
        fn node_id(&self) -> &NodeId {
            &self.id
        }
        fn title(&self) -> &str {
            &self.title
        }
        fn slug(&self) -> &str {
            &self.slug
        }
    }

    fn entry(id: &str, title: &str, slug: &str) -> Entry {
        Entry {
            id: NodeId::new(id),
            title: title.into(),
            slug: slug.into(),
        }
    }

    #[test]
    fn test_title_keys_original_and_lowercase() {
        let entries = [entry("essays/atlas", "Atlas Of Ideas", "atlas")];
        let index = ResolutionIndex::build(&entries);
        assert!(index.title_candidates("Atlas Of Ideas").is_some());
        assert!(index.title_candidates("atlas of ideas").is_some());
        assert!(index.title_candidates("ATLAS OF IDEAS").is_none());
    }

    #[test]
    fn test_slug_keys_from_title_and_slug() {
        let entries = [entry("essays/atlas", "Atlas Of Ideas", "atlas")];
        let index = ResolutionIndex::build(&entries);
        assert!(index.slug_candidates("atlas-of-ideas").is_some());
        assert!(index.slug_candidates("atlas").is_some());
    }

    #[test]
    fn test_shared_title_collects_every_id() {
        let entries = [
            entry("notes/draft", "Draft", "draft"),
            entry("essays/draft", "Draft", "draft"),
        ];
        let index = ResolutionIndex::build(&entries);
        let ids: Vec<&str> = index
            .title_candidates("Draft")
            .unwrap()
            .iter()
            .map(NodeId::as_str)
            .collect();
        assert_eq!(ids, vec!["essays/draft", "notes/draft"]);
    }

    #[test]
    fn test_same_node_under_several_keys_counts_once() {
        let entries = [entry("a", "atlas", "atlas")];
        let index = ResolutionIndex::build(&entries);
        assert_eq!(index.title_candidates("atlas").unwrap().len(), 1);
        assert_eq!(index.slug_candidates("atlas").unwrap().len(), 1);
    }
}

//! Markdown corpus discovery and node registration.

use crate::{
    frontmatter::parse_frontmatter,
    health::{ContentHealth, IdCollision, MissingIdentifier},
    index::IndexEntry,
    mention::mention_titles,
    models::{ContentNode, RawLink},
    slug::slugify_segment,
};
use regex::Regex;
use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;
use wikigraph_types::{LinkKind, NodeId};

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("Failed to read content root {path:?}: {source}")]
    Root {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Content root {0:?} is not a directory")]
    NotADirectory(PathBuf),

    #[error("Failed to enumerate content root {path:?}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },
}

/// Which files the loader picks up
#[derive(Debug, Clone)]
pub struct LoaderOptions {
    pub extensions: Vec<String>,
    pub ignore_patterns: Vec<Regex>,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            extensions: vec!["md".into(), "mdx".into(), "markdown".into()],
            ignore_patterns: Vec::new(),
        }
    }
}

impl LoaderOptions {
    fn accepts_extension(&self, path: &Path) -> bool {
        path.extension()
            .and_then(|e| e.to_str())
            .map(|ext| self.extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
            .unwrap_or(false)
    }

    fn is_ignored(&self, rel: &str) -> bool {
        self.ignore_patterns.iter().any(|re| re.is_match(rel))
    }
}

/// A registered node together with its load-time state
#[derive(Debug, Clone)]
pub struct LoadedNode {
    pub node: ContentNode,
    /// Path relative to the content root, `/`-separated
    pub source_path: String,
    pub raw_links: Vec<RawLink>,
}

impl IndexEntry for LoadedNode {
    fn node_id(&self) -> &NodeId {
        &self.node.id
    }

    fn title(&self) -> &str {
        &self.node.title
    }

    fn slug(&self) -> &str {
        &self.node.slug
    }
}

/// Every node registered during a run, in registration order
#[derive(Debug, Clone, Default)]
pub struct Corpus {
    pub nodes: Vec<LoadedNode>,
}

impl Corpus {
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// Load every markdown document under `root`
///
/// File-level problems are recorded in `health` and the file is skipped.
/// Only a root that cannot be enumerated is an error; a root that does not
/// exist yields an empty corpus.
pub fn load_corpus(
    root: &Path,
    options: &LoaderOptions,
    health: &mut ContentHealth,
) -> Result<Corpus, LoadError> {
    let files = match discover_markdown_files(root, options, health)? {
        Some(files) => files,
        None => {
            tracing::warn!("Content root {:?} does not exist; graph will be empty", root);
            return Ok(Corpus::default());
        }
    };

    tracing::info!("Found {} markdown files", files.len());

    let mut corpus = Corpus::default();
    let mut claimed: HashMap<NodeId, String> = HashMap::new();

    for (rel, path) in &files {
        let Some(loaded) = parse_node(rel, path, health) else {
            continue;
        };

        if loaded.node.identifier.is_none() {
            health.missing_identifiers.push(MissingIdentifier {
                id: loaded.node.id.clone(),
                path: rel.clone(),
            });
        }

        if let Some(kept) = claimed.get(&loaded.node.id) {
            tracing::warn!(
                "Duplicate id {} in {} (already claimed by {})",
                loaded.node.id,
                rel,
                kept
            );
            health.id_collisions.push(IdCollision {
                id: loaded.node.id.clone(),
                path: rel.clone(),
                kept_path: kept.clone(),
            });
            continue;
        }

        claimed.insert(loaded.node.id.clone(), rel.clone());
        corpus.nodes.push(loaded);
    }

    tracing::info!("Registered {} nodes", corpus.len());

    Ok(corpus)
}

/// Discover markdown files sorted by root-relative path
///
/// Returns `None` when the root does not exist.
fn discover_markdown_files(
    root: &Path,
    options: &LoaderOptions,
    health: &mut ContentHealth,
) -> Result<Option<Vec<(String, PathBuf)>>, LoadError> {
    match fs::metadata(root) {
        Ok(meta) if meta.is_dir() => {}
        Ok(_) => return Err(LoadError::NotADirectory(root.to_path_buf())),
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(source) => {
            return Err(LoadError::Root {
                path: root.to_path_buf(),
                source,
            })
        }
    }

    let mut files = Vec::new();

    for entry in WalkDir::new(root) {
        let entry = match entry {
            Ok(entry) => entry,
            Err(source) if source.depth() == 0 => {
                return Err(LoadError::Walk {
                    path: root.to_path_buf(),
                    source,
                })
            }
            Err(err) => {
                let path = err
                    .path()
                    .map(|p| relative_path(root, p))
                    .unwrap_or_default();
                health.bad_file(path, format!("Failed to read directory entry: {}", err));
                continue;
            }
        };

        if !entry.file_type().is_file() || !options.accepts_extension(entry.path()) {
            continue;
        }

        let rel = relative_path(root, entry.path());
        if options.is_ignored(&rel) {
            tracing::debug!("Ignoring {} due to ignore_patterns", rel);
            continue;
        }

        files.push((rel, entry.path().to_path_buf()));
    }

    files.sort_by(|a, b| a.0.cmp(&b.0));
    Ok(Some(files))
}

fn relative_path(root: &Path, path: &Path) -> String {
    let rel = path.strip_prefix(root).unwrap_or(path);
    rel.components()
        .map(|c| c.as_os_str().to_string_lossy().into_owned())
        .collect::<Vec<_>>()
        .join("/")
}

/// Parse a single file into a node, recording why when it cannot be one
fn parse_node(rel: &str, path: &Path, health: &mut ContentHealth) -> Option<LoadedNode> {
    let segments: Vec<&str> = rel.split('/').collect();
    if segments.len() < 2 {
        health.bad_file(rel, "File is not inside a collection directory");
        return None;
    }

    let content = match fs::read_to_string(path) {
        Ok(content) => content,
        Err(err) => {
            health.bad_file(rel, format!("Failed to read file: {}", err));
            return None;
        }
    };

    let (frontmatter, body) = match parse_frontmatter(&content) {
        Ok(parsed) => parsed,
        Err(err) => {
            health.bad_file(rel, format!("Failed to parse frontmatter: {}", err));
            return None;
        }
    };

    let collection = segments[0].to_string();
    let slug = derive_slug(&segments[1..]);
    if slug.is_empty() {
        health.bad_file(rel, "Path does not produce a usable slug");
        return None;
    }

    let identifier = frontmatter.identifier();
    let id = identifier
        .clone()
        .map(NodeId::new)
        .unwrap_or_else(|| NodeId::derived(&collection, &slug));

    let title = frontmatter
        .title()
        .unwrap_or_else(|| title_from_slug(&slug));

    let mut raw_links: Vec<RawLink> = mention_titles(&body)
        .into_iter()
        .map(|target_title| RawLink {
            target_title,
            origin: LinkKind::Body,
        })
        .collect();
    for kind in LinkKind::frontmatter_fields() {
        for entry in frontmatter.link_field(kind) {
            for target_title in mention_titles(&entry) {
                raw_links.push(RawLink {
                    target_title,
                    origin: kind,
                });
            }
        }
    }

    tracing::debug!("Loaded {} as {} ({} mentions)", rel, id, raw_links.len());

    Some(LoadedNode {
        node: ContentNode {
            id,
            identifier,
            slug,
            collection,
            title,
            description: frontmatter.description(),
            tags: frontmatter.tags(),
            aliases: frontmatter.aliases(),
            outbound_links: Vec::new(),
            inbound_links: Vec::new(),
            chained_links: Vec::new(),
        },
        source_path: rel.to_string(),
        raw_links,
    })
}

/// Slug from the path segments below the collection, extension removed
fn derive_slug(rest: &[&str]) -> String {
    let last = rest.len().saturating_sub(1);
    rest.iter()
        .enumerate()
        .map(|(i, segment)| {
            if i == last {
                Path::new(segment)
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .unwrap_or(segment)
                    .to_string()
            } else {
                segment.to_string()
            }
        })
        .map(|segment| slugify_segment(&segment))
        .filter(|segment| !segment.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Title derived from the last slug segment ("my-first-post" -> "My First Post")
fn title_from_slug(slug: &str) -> String {
    let last = slug.rsplit('/').next().unwrap_or(slug);
    last.split('-')
        .filter(|w| !w.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

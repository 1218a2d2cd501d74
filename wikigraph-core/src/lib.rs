//! # wikigraph-core
//!
//! Core library for the wikigraph content resolver.
//!
//! This crate loads a directory of markdown notes, resolves their wiki-link
//! mentions into a bidirectional graph, reports content health, and renders
//! markdown with mentions turned into links against a built graph.

pub mod builder;
pub mod config;
pub mod frontmatter;
pub mod graph;
pub mod health;
pub mod index;
pub mod loader;
pub mod markdown;
pub mod mention;
pub mod models;
pub mod output;
pub mod resolver;
pub mod slug;

pub use builder::{BuildError, GraphBuilder};
pub use config::{Config, ConfigError};
pub use health::ContentHealth;
pub use index::{IndexEntry, ResolutionIndex};
pub use markdown::{LinkOptions, RenderedDocument, WikilinkTransformer};
pub use mention::Mention;
pub use models::{ContentNode, FlatLink, Frontmatter, LinkRef};
pub use output::{GraphArtifacts, NodeGraph};
pub use resolver::{Resolution, Resolver};
pub use slug::{slugify, slugify_segment};

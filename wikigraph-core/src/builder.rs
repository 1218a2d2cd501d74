//! Graph building logic - orchestrates loading, resolution and output.

use crate::{
    config::Config,
    graph::build_graph,
    health::ContentHealth,
    loader::{load_corpus, LoadError},
    output::{GraphArtifacts, OutputError},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum BuildError {
    #[error(transparent)]
    Load(#[from] LoadError),

    #[error(transparent)]
    Output(#[from] OutputError),
}

/// Main graph builder
pub struct GraphBuilder {
    config: Config,
}

impl GraphBuilder {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Recompute the whole graph from the content directory
    pub fn build(&self) -> Result<GraphArtifacts, BuildError> {
        let content_dir = self.config.content_dir();
        tracing::info!("Loading content from {:?}", content_dir);

        let mut health = ContentHealth::new();
        let corpus = load_corpus(&content_dir, &self.config.loader_options(), &mut health)?;
        let nodes = build_graph(corpus, &mut health);

        tracing::info!(
            "Health: {} bad files, {} unresolved, {} ambiguous, {} id collisions",
            health.bad_files.len(),
            health.unresolved_mentions.len(),
            health.ambiguous_mentions.len(),
            health.id_collisions.len()
        );

        Ok(GraphArtifacts { nodes, health })
    }

    /// Build and write both artifacts to the configured output directory
    pub fn build_and_write(&self) -> Result<GraphArtifacts, BuildError> {
        let artifacts = self.build()?;
        artifacts.write(&self.config.graph_path(), &self.config.health_path())?;
        Ok(artifacts)
    }
}

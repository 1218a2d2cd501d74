//! Configuration parsing and management.

use crate::{loader::LoaderOptions, markdown::LinkOptions};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse YAML: {0}")]
    ParseError(#[from] serde_yaml::Error),
}

/// Main configuration struct matching the wikigraph.yml schema
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default = "default_extensions")]
    pub extensions: Vec<String>,

    /// Regexes matched against content-root-relative paths
    #[serde(default)]
    pub ignore_patterns: Vec<String>,

    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Log a warning for every wiki link rendered as missing
    #[serde(default = "default_true")]
    pub warn_missing_links: bool,

    // Internal: path to config file (for relative path resolution)
    #[serde(skip)]
    config_path: Option<PathBuf>,
}

fn default_extensions() -> Vec<String> {
    vec!["md".into(), "mdx".into(), "markdown".into()]
}

fn default_base_url() -> String {
    String::from("/")
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PathsConfig {
    #[serde(default = "default_content")]
    pub content: PathBuf,

    #[serde(default = "default_output")]
    pub output: PathBuf,
}

fn default_content() -> PathBuf {
    PathBuf::from("src/content")
}

fn default_output() -> PathBuf {
    PathBuf::from("dist")
}

impl Default for PathsConfig {
    fn default() -> Self {
        Self {
            content: default_content(),
            output: default_output(),
        }
    }
}

/// File names of the two artifacts written per run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "default_graph_file")]
    pub graph_file: String,

    #[serde(default = "default_health_file")]
    pub health_file: String,
}

fn default_graph_file() -> String {
    String::from("graph.json")
}

fn default_health_file() -> String {
    String::from("health.json")
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            graph_file: default_graph_file(),
            health_file: default_health_file(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            paths: PathsConfig::default(),
            output: OutputConfig::default(),
            extensions: default_extensions(),
            ignore_patterns: Vec::new(),
            base_url: default_base_url(),
            warn_missing_links: true,
            config_path: None,
        }
    }
}

impl Config {
    /// Load configuration from a YAML file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)?;
        let mut config: Config = if contents.trim().is_empty() {
            Config::default()
        } else {
            serde_yaml::from_str(&contents)?
        };

        // Store config file path for relative path resolution
        config.config_path = Some(path.to_path_buf());

        Ok(config)
    }

    /// Load the config file if it exists, otherwise use defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if path.exists() {
            Self::from_file(path)
        } else {
            tracing::info!("No config at {:?}; using defaults", path);
            Ok(Self::default())
        }
    }

    /// Configuration rooted at a content directory, everything else default
    pub fn for_content_dir(content: impl Into<PathBuf>) -> Self {
        Self {
            paths: PathsConfig {
                content: content.into(),
                ..PathsConfig::default()
            },
            ..Self::default()
        }
    }

    /// Get the content directory, resolved relative to config file
    pub fn content_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.content)
    }

    /// Get the output directory, resolved relative to config file
    pub fn output_dir(&self) -> PathBuf {
        self.resolve_path(&self.paths.output)
    }

    pub fn graph_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.graph_file)
    }

    pub fn health_path(&self) -> PathBuf {
        self.output_dir().join(&self.output.health_file)
    }

    /// Loader settings; invalid ignore patterns are skipped with a warning
    pub fn loader_options(&self) -> LoaderOptions {
        LoaderOptions {
            extensions: self.extensions.clone(),
            ignore_patterns: compile_ignore_patterns(&self.ignore_patterns),
        }
    }

    /// Render settings for the wiki-link transformer
    pub fn link_options(&self) -> LinkOptions {
        LinkOptions {
            base_url: self.normalized_base_url(),
            warn_missing: self.warn_missing_links,
        }
    }

    /// Resolve a path relative to the config file location
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(config_path) = &self.config_path {
            if let Some(parent) = config_path.parent() {
                parent.join(path)
            } else {
                path.to_path_buf()
            }
        } else {
            path.to_path_buf()
        }
    }

    /// Normalized base URL with leading and trailing slash ("/foo/" or "/")
    pub fn normalized_base_url(&self) -> String {
        normalize_base_url(&self.base_url)
    }
}

fn compile_ignore_patterns(patterns: &[String]) -> Vec<Regex> {
    let mut compiled = Vec::new();
    for pat in patterns {
        match Regex::new(pat) {
            Ok(re) => compiled.push(re),
            Err(err) => tracing::warn!("Invalid ignore pattern '{}': {}", pat, err),
        }
    }
    compiled
}

/// Ensure base URLs have a leading and trailing slash
pub fn normalize_base_url(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return "/".to_string();
    }

    let mut s = trimmed.to_string();
    if !s.starts_with('/') {
        s.insert(0, '/');
    }
    if !s.ends_with('/') {
        s.push('/');
    }

    // Collapse duplicate slashes
    while s.contains("//") {
        s = s.replace("//", "/");
    }

    s
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let config = Config::default();
        assert_eq!(config.base_url, "/");
        assert_eq!(config.paths.content, PathBuf::from("src/content"));
        assert_eq!(config.graph_path(), PathBuf::from("dist/graph.json"));
        assert_eq!(config.health_path(), PathBuf::from("dist/health.json"));
        assert!(config.warn_missing_links);
        assert!(config.link_options().warn_missing);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wikigraph.yml");
        std::fs::write(
            &path,
            "paths:\n  content: content\nignore_patterns: ['^drafts/', '(']\n",
        )
        .unwrap();

        let config = Config::from_file(&path).unwrap();
        assert_eq!(config.content_dir(), dir.path().join("content"));
        assert_eq!(config.output_dir(), dir.path().join("dist"));
        assert_eq!(config.output.graph_file, "graph.json");
        assert_eq!(config.loader_options().ignore_patterns.len(), 1);
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_or_default(dir.path().join("absent.yml")).unwrap();
        assert_eq!(config.output.health_file, "health.json");
    }

    #[test]
    fn test_for_content_dir_keeps_other_defaults() {
        let config = Config::for_content_dir("notes");
        assert_eq!(config.content_dir(), PathBuf::from("notes"));
        assert_eq!(config.graph_path(), PathBuf::from("dist/graph.json"));
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(normalize_base_url(""), "/");
        assert_eq!(normalize_base_url("blog"), "/blog/");
        assert_eq!(normalize_base_url("//blog//"), "/blog/");
    }
}

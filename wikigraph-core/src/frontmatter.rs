//! Frontmatter parsing from markdown files.

use crate::models::Frontmatter;
use regex::Regex;
use std::sync::OnceLock;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FrontmatterError {
    #[error("Invalid YAML: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

static FRONTMATTER_REGEX: OnceLock<Regex> = OnceLock::new();

fn frontmatter_regex() -> &'static Regex {
    FRONTMATTER_REGEX.get_or_init(|| {
        Regex::new(r"(?s)\A---[ \t]*\r?\n(?:(.*?)\r?\n)?---[ \t]*(?:\r?\n(.*))?\z").unwrap()
    })
}

/// Parse frontmatter from markdown content
///
/// Returns a tuple of (frontmatter, markdown_body).
/// If no frontmatter is present, returns default frontmatter with the full content as body.
///
/// # Example
///
/// ```
/// use wikigraph_core::frontmatter::parse_frontmatter;
///
/// let content = "---\ntitle: Atlas\ntags: maps, history\n---\n# Atlas\n";
///
/// let (fm, body) = parse_frontmatter(content).unwrap();
/// assert_eq!(fm.title(), Some("Atlas".to_string()));
/// assert_eq!(fm.tags(), vec!["maps", "history"]);
/// assert!(body.trim().starts_with("# Atlas"));
/// ```
pub fn parse_frontmatter(content: &str) -> Result<(Frontmatter, String), FrontmatterError> {
    let re = frontmatter_regex();
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    if let Some(captures) = re.captures(content) {
        let yaml = captures.get(1).map(|m| m.as_str()).unwrap_or("");
        let body = captures.get(2).map(|m| m.as_str()).unwrap_or("");

        if yaml.trim().is_empty() {
            return Ok((Frontmatter::default(), body.to_string()));
        }

        let frontmatter: Frontmatter = serde_yaml::from_str(yaml)?;
        Ok((frontmatter, body.to_string()))
    } else {
        Ok((Frontmatter::default(), content.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_leading_bom_is_ignored() {
        let (fm, body) = parse_frontmatter("\u{feff}---\ntitle: Bommed\n---\nbody").unwrap();
        assert_eq!(fm.title(), Some("Bommed".to_string()));
        assert_eq!(body, "body");
    }

    #[test]
    fn test_parse_valid_frontmatter() {
        let content = r#"---
identifier: atlas-01
title: Atlas
description: A map of everything
tags:
  - maps
  - history
---

# Atlas

See [[Origins]]."#;

        let (fm, body) = parse_frontmatter(content).unwrap();
        assert_eq!(fm.identifier(), Some("atlas-01".to_string()));
        assert_eq!(fm.title(), Some("Atlas".to_string()));
        assert_eq!(fm.description(), Some("A map of everything".to_string()));
        assert_eq!(fm.tags(), vec!["maps", "history"]);
        assert!(body.contains("# Atlas"));
        assert!(body.contains("[[Origins]]"));
    }

    #[test]
    fn test_parse_no_frontmatter() {
        let content = "# Just Content\n\nNo frontmatter here.";
        let (fm, body) = parse_frontmatter(content).unwrap();
        assert_eq!(fm.title(), None);
        assert_eq!(body, content);
    }

    #[test]
    fn test_parse_empty_frontmatter() {
        let (fm, body) = parse_frontmatter("---\n---\nBody").unwrap();
        assert_eq!(fm.identifier(), None);
        assert_eq!(body, "Body");
    }

    #[test]
    fn test_frontmatter_without_body() {
        let (fm, body) = parse_frontmatter("---\ntitle: Lonely\n---").unwrap();
        assert_eq!(fm.title(), Some("Lonely".to_string()));
        assert_eq!(body, "");
    }

    #[test]
    fn test_crlf_line_endings() {
        let (fm, body) = parse_frontmatter("---\r\ntitle: Windows\r\n---\r\nText").unwrap();
        assert_eq!(fm.title(), Some("Windows".to_string()));
        assert_eq!(body, "Text");
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let (fm, _) = parse_frontmatter("---\ntitle: T\npubDate: 2024-01-01\n---\n").unwrap();
        assert_eq!(fm.title(), Some("T".to_string()));
    }

    #[test]
    fn test_invalid_yaml() {
        let content = r#"---
title: Test
invalid yaml: [unclosed
---

Content."#;

        assert!(parse_frontmatter(content).is_err());
    }

    #[test]
    fn test_scalar_frontmatter_is_an_error() {
        assert!(parse_frontmatter("---\njust a sentence\n---\nBody").is_err());
    }
}

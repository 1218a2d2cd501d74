//! Slug generation and normalization.
//!
//! Two normalizers share the same shape but treat disallowed characters
//! differently. [`slugify`] strips them and is used for free text (link
//! targets, titles, headings). [`slugify_segment`] replaces them with a
//! hyphen and is used for path segments when a node's slug is derived.
//! Existing identifiers depend on the difference, so the two must not be
//! merged.

use regex::Regex;
use std::sync::OnceLock;

static WHITESPACE_REGEX: OnceLock<Regex> = OnceLock::new();
static HYPHENS_REGEX: OnceLock<Regex> = OnceLock::new();

fn whitespace_regex() -> &'static Regex {
    WHITESPACE_REGEX.get_or_init(|| Regex::new(r"\s+").unwrap())
}

fn hyphens_regex() -> &'static Regex {
    HYPHENS_REGEX.get_or_init(|| Regex::new(r"-+").unwrap())
}

fn is_slug_char(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || c == '-'
}

fn normalize_with(input: &str, disallowed: Option<char>) -> String {
    let lowercased = input.to_lowercase();
    let with_hyphens = whitespace_regex().replace_all(&lowercased, "-");

    let cleaned: String = with_hyphens
        .chars()
        .filter_map(|c| if is_slug_char(c) { Some(c) } else { disallowed })
        .collect();

    let collapsed = hyphens_regex().replace_all(&cleaned, "-");
    collapsed.trim_matches('-').to_string()
}

/// Convert free text to a URL-safe slug
///
/// Rules:
/// - Lowercase
/// - Replace whitespace runs with a hyphen
/// - Remove every character outside `[a-z0-9-]`
/// - Collapse multiple hyphens
/// - Trim leading/trailing hyphens
///
/// # Examples
///
/// ```
/// use wikigraph_core::slugify;
///
/// assert_eq!(slugify("Hello World"), "hello-world");
/// assert_eq!(slugify("Rust & Safety"), "rust-safety");
/// assert_eq!(slugify("What's new?"), "whats-new");
/// ```
pub fn slugify(input: &str) -> String {
    normalize_with(input, None)
}

/// Normalize a single path segment
///
/// Same as [`slugify`] except disallowed characters become hyphens
/// instead of disappearing.
///
/// ```
/// use wikigraph_core::slug::slugify_segment;
///
/// assert_eq!(slugify_segment("What's new?"), "what-s-new");
/// assert_eq!(slugify_segment("Node.js_Tips"), "node-js-tips");
/// ```
pub fn slugify_segment(input: &str) -> String {
    normalize_with(input, Some('-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_slugify() {
        assert_eq!(slugify("Hello World"), "hello-world");
        assert_eq!(slugify("Rust Programming"), "rust-programming");
    }

    #[test]
    fn test_special_characters() {
        assert_eq!(slugify("Rust & Safety"), "rust-safety");
        assert_eq!(slugify("C++ Programming"), "c-programming");
        assert_eq!(slugify("Node.js Tips"), "nodejs-tips");
        assert_eq!(slugify("What's new?"), "whats-new");
    }

    #[test]
    fn test_non_ascii_is_stripped() {
        assert_eq!(slugify("Café"), "caf");
        assert_eq!(slugify("naïve"), "nave");
        assert_eq!(slugify_segment("Café Notes"), "caf-notes");
    }

    #[test]
    fn test_multiple_spaces() {
        assert_eq!(slugify("Hello    World"), "hello-world");
        assert_eq!(slugify("Tabs\tand\nnewlines"), "tabs-and-newlines");
    }

    #[test]
    fn test_leading_trailing_hyphens() {
        assert_eq!(slugify("  Hello World  "), "hello-world");
        assert_eq!(slugify("-Leading Hyphen"), "leading-hyphen");
        assert_eq!(slugify("Trailing Hyphen-"), "trailing-hyphen");
    }

    #[test]
    fn test_underscores_differ_between_normalizers() {
        assert_eq!(slugify("hello_world"), "helloworld");
        assert_eq!(slugify_segment("hello_world"), "hello-world");
    }

    #[test]
    fn test_slash_is_not_a_separator() {
        assert_eq!(slugify("essays/atlas"), "essaysatlas");
        assert_eq!(slugify_segment("essays/atlas"), "essays-atlas");
    }

    #[test]
    fn test_empty_and_special_only() {
        assert_eq!(slugify(""), "");
        assert_eq!(slugify("!!!"), "");
        assert_eq!(slugify("   "), "");
        assert_eq!(slugify_segment("!!!"), "");
    }

    #[test]
    fn test_idempotent() {
        let inputs = [
            "Hello World",
            "  --Weird__ input!! ",
            "C++ / Rust & Go",
            "Ünïcödé tëxt",
            "a - - b",
            "",
        ];
        for input in inputs {
            let once = slugify(input);
            assert_eq!(slugify(&once), once, "slugify({input:?})");
            let once = slugify_segment(input);
            assert_eq!(slugify_segment(&once), once, "slugify_segment({input:?})");
        }
    }
}

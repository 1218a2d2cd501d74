//! Wiki-link mention grammar: `[[Title]]`, `[[Title#Header]]`, `[[Title|Alias]]`.

use regex::Regex;
use std::ops::Range;
use std::sync::OnceLock;

static MENTION_REGEX: OnceLock<Regex> = OnceLock::new();

fn mention_regex() -> &'static Regex {
    MENTION_REGEX.get_or_init(|| Regex::new(r"\[\[([^\[\]]+)\]\]").unwrap())
}

/// Parsed inner text of a `[[...]]` span
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Mention {
    pub title: String,
    pub header: Option<String>,
    pub alias: Option<String>,
}

impl Mention {
    /// Parse the text between the brackets
    ///
    /// Returns `None` when the title is empty, which makes the span inert.
    ///
    /// ```
    /// use wikigraph_core::mention::Mention;
    ///
    /// let m = Mention::parse("Atlas#Origins|The Beginning").unwrap();
    /// assert_eq!(m.title, "Atlas");
    /// assert_eq!(m.header.as_deref(), Some("Origins"));
    /// assert_eq!(m.alias.as_deref(), Some("The Beginning"));
    /// assert!(Mention::parse(" #Only a header").is_none());
    /// ```
    pub fn parse(inner: &str) -> Option<Self> {
        let (target, alias) = match inner.split_once('|') {
            Some((target, alias)) => (target, Some(alias)),
            None => (inner, None),
        };
        let (title, header) = match target.split_once('#') {
            Some((title, header)) => (title, Some(header)),
            None => (target, None),
        };

        let title = title.trim();
        if title.is_empty() {
            return None;
        }

        Some(Self {
            title: title.to_string(),
            header: non_empty(header),
            alias: non_empty(alias),
        })
    }

    /// Display text: alias, else header, else title
    pub fn display_text(&self) -> &str {
        self.alias
            .as_deref()
            .or(self.header.as_deref())
            .unwrap_or(&self.title)
    }
}

fn non_empty(part: Option<&str>) -> Option<String> {
    part.map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

/// A `[[...]]` span located in a text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MentionSpan {
    /// Byte range of the whole span including brackets
    pub range: Range<usize>,
    /// `None` for inert spans
    pub mention: Option<Mention>,
}

/// Locate every mention span in `text`, in order of appearance
pub fn find_mentions(text: &str) -> Vec<MentionSpan> {
    mention_regex()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let inner = caps.get(1)?;
            Some(MentionSpan {
                range: whole.range(),
                mention: Mention::parse(inner.as_str()),
            })
        })
        .collect()
}

/// Titles of every non-inert mention in `text`, in order
pub fn mention_titles(text: &str) -> Vec<String> {
    find_mentions(text)
        .into_iter()
        .filter_map(|span| span.mention.map(|m| m.title))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_mention() {
        let m = Mention::parse("Atlas").unwrap();
        assert_eq!(m.title, "Atlas");
        assert_eq!(m.header, None);
        assert_eq!(m.alias, None);
        assert_eq!(m.display_text(), "Atlas");
    }

    #[test]
    fn test_split_on_first_separator_only() {
        let m = Mention::parse("A#b#c|x|y").unwrap();
        assert_eq!(m.title, "A");
        assert_eq!(m.header.as_deref(), Some("b#c"));
        assert_eq!(m.alias.as_deref(), Some("x|y"));
    }

    #[test]
    fn test_pipe_before_hash_keeps_hash_in_alias() {
        let m = Mention::parse("Atlas|Part #2").unwrap();
        assert_eq!(m.title, "Atlas");
        assert_eq!(m.header, None);
        assert_eq!(m.alias.as_deref(), Some("Part #2"));
    }

    #[test]
    fn test_display_precedence() {
        assert_eq!(Mention::parse("A#Head").unwrap().display_text(), "Head");
        assert_eq!(
            Mention::parse("A#Head|Alias").unwrap().display_text(),
            "Alias"
        );
        assert_eq!(Mention::parse("A# |  ").unwrap().display_text(), "A");
    }

    #[test]
    fn test_empty_title_is_inert() {
        assert!(Mention::parse("   ").is_none());
        assert!(Mention::parse("|alias").is_none());
    }

    #[test]
    fn test_find_mentions_in_order() {
        let text = "See [[One]], then [[ |x]] and [[Two#H]].";
        let spans = find_mentions(text);
        assert_eq!(spans.len(), 3);
        assert_eq!(&text[spans[0].range.clone()], "[[One]]");
        assert!(spans[1].mention.is_none());
        assert_eq!(spans[2].mention.as_ref().unwrap().title, "Two");
        assert_eq!(mention_titles(text), vec!["One", "Two"]);
    }

    #[test]
    fn test_nested_brackets_do_not_match_outer() {
        assert_eq!(mention_titles("[[[Inner]]]"), vec!["Inner"]);
        assert!(find_mentions("[[]] and [[ [x] ]]").is_empty());
    }
}

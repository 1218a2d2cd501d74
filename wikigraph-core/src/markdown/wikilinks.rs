//! Wikilink transformation for [[target]], [[target#header]] and [[target|text]] syntax.

use crate::{
    config::normalize_base_url,
    index::ResolutionIndex,
    mention::{find_mentions, Mention},
    output::NodeGraph,
    resolver::{Resolution, Resolver},
    slug::slugify,
};
use pulldown_cmark::{CowStr, Event, Tag, TagEnd};
use wikigraph_types::NodeId;

/// Tooltip carried by links whose target does not exist
pub const MISSING_LINK_TOOLTIP: &str = "This page does not exist yet";

/// Rendering options for resolved and missing links
#[derive(Debug, Clone)]
pub struct LinkOptions {
    pub base_url: String,
    /// Emit a `tracing` warning for every link rendered as missing
    pub warn_missing: bool,
}

impl Default for LinkOptions {
    fn default() -> Self {
        Self {
            base_url: "/".to_string(),
            warn_missing: false,
        }
    }
}

/// Why a wiki link was rendered as missing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkWarning {
    Missing { title: String },
    Ambiguous { title: String, candidates: Vec<NodeId> },
}

/// Where a wiki link points once resolved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LinkTarget {
    Resolved {
        href: String,
        collection: String,
        slug: String,
    },
    Missing,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WikiLink {
    pub mention: Mention,
    pub target: LinkTarget,
}

impl WikiLink {
    /// Link markup with the attribute contract external renderers rely on
    pub fn to_html(&self) -> String {
        let text = escape_html(self.mention.display_text());
        match &self.target {
            LinkTarget::Missing => format!(
                r#"<a class="wikilink wikilink-missing" data-wikilink-missing="true" data-wikilink-title="{}" aria-disabled="true" title="{}">{}</a>"#,
                escape_html(&self.mention.title),
                MISSING_LINK_TOOLTIP,
                text
            ),
            LinkTarget::Resolved {
                href,
                collection,
                slug,
            } => {
                let mut html = format!(
                    r#"<a class="wikilink" href="{}" data-wikilink-title="{}""#,
                    escape_html(href),
                    escape_html(&self.mention.title)
                );
                if let Some(header) = &self.mention.header {
                    html.push_str(&format!(r#" data-wikilink-header="{}""#, escape_html(header)));
                }
                html.push_str(&format!(
                    r#" data-wikilink-collection="{}" data-wikilink-slug="{}">{}</a>"#,
                    escape_html(collection),
                    escape_html(slug),
                    text
                ));
                html
            }
        }
    }

    pub fn is_missing(&self) -> bool {
        self.target == LinkTarget::Missing
    }
}

/// Piece of a text segment after wiki links were located
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link(WikiLink),
}

/// Result of rendering one markdown document
#[derive(Debug, Clone, Default)]
pub struct RenderedDocument {
    pub html: String,
    pub warnings: Vec<LinkWarning>,
}

/// Transformer for wikilink syntax
pub struct WikilinkTransformer<'a> {
    resolver: Resolver<'a>,
    graph: &'a NodeGraph,
    base_url: String,
    warn_missing: bool,
}

impl<'a> WikilinkTransformer<'a> {
    pub fn new(index: &'a ResolutionIndex, graph: &'a NodeGraph, options: &LinkOptions) -> Self {
        Self {
            resolver: Resolver::new(index),
            graph,
            base_url: normalize_base_url(&options.base_url),
            warn_missing: options.warn_missing,
        }
    }

    /// Render markdown to HTML with wiki links rewritten
    pub fn render_markdown(&self, markdown: &str) -> RenderedDocument {
        let parser = pulldown_cmark::Parser::new_ext(markdown, super::markdown_options());
        let events: Vec<Event> = parser.collect();
        let (events, warnings) = self.transform(events);

        let mut html = String::new();
        pulldown_cmark::html::push_html(&mut html, events.into_iter());

        RenderedDocument { html, warnings }
    }

    /// Transform events, converting [[wikilinks]] to HTML links
    ///
    /// Returns (transformed_events, warnings)
    pub fn transform<'e>(&self, events: Vec<Event<'e>>) -> (Vec<Event<'e>>, Vec<LinkWarning>) {
        let mut result = Vec::with_capacity(events.len());
        let mut warnings = Vec::new();
        let mut in_code_block = false;
        // Links cannot nest, and image alt text is plain text
        let mut link_depth = 0usize;
        let mut events = events.into_iter().peekable();

        while let Some(event) = events.next() {
            match event {
                Event::Start(Tag::CodeBlock(_)) => {
                    in_code_block = true;
                    result.push(event);
                }
                Event::End(TagEnd::CodeBlock) => {
                    in_code_block = false;
                    result.push(event);
                }
                Event::Start(Tag::Link { .. } | Tag::Image { .. }) => {
                    link_depth += 1;
                    result.push(event);
                }
                Event::End(TagEnd::Link | TagEnd::Image) => {
                    link_depth = link_depth.saturating_sub(1);
                    result.push(event);
                }
                Event::Text(text) if !in_code_block && link_depth == 0 => {
                    // Collect all consecutive Text events and merge them
                    let mut merged = text.into_string();
                    while let Some(Event::Text(next)) = events.peek() {
                        merged.push_str(next);
                        events.next();
                    }

                    if merged.contains("[[") && merged.contains("]]") {
                        let (segments, mut link_warnings) = self.split_text(&merged);
                        result.extend(segments.into_iter().map(segment_event));
                        warnings.append(&mut link_warnings);
                    } else {
                        result.push(Event::Text(CowStr::Boxed(merged.into_boxed_str())));
                    }
                }
                other => result.push(other),
            }
        }

        (result, warnings)
    }

    /// Split a text run into literal text and wiki links, in order
    ///
    /// Inert spans (empty title) stay in the surrounding text verbatim.
    pub fn split_text(&self, text: &str) -> (Vec<Segment>, Vec<LinkWarning>) {
        let mut segments = Vec::new();
        let mut warnings = Vec::new();
        let mut pending = String::new();
        let mut cursor = 0;

        for span in find_mentions(text) {
            let Some(mention) = span.mention else {
                continue;
            };

            pending.push_str(&text[cursor..span.range.start]);
            cursor = span.range.end;
            if !pending.is_empty() {
                segments.push(Segment::Text(std::mem::take(&mut pending)));
            }

            let (link, warning) = self.create_link(mention);
            if let Some(warning) = warning {
                warnings.push(warning);
            }
            segments.push(Segment::Link(link));
        }

        pending.push_str(&text[cursor..]);
        if !pending.is_empty() {
            segments.push(Segment::Text(pending));
        }

        (segments, warnings)
    }

    fn create_link(&self, mention: Mention) -> (WikiLink, Option<LinkWarning>) {
        let warning = match self.resolver.resolve(&mention.title) {
            Resolution::Resolved(id) => match self.graph.find_by_id(&id) {
                Some(node) => {
                    let mut href = format!("{}{}/{}/", self.base_url, node.collection, node.slug);
                    if let Some(fragment) = mention.header.as_deref().map(slugify) {
                        if !fragment.is_empty() {
                            href.push('#');
                            href.push_str(&fragment);
                        }
                    }
                    let target = LinkTarget::Resolved {
                        href,
                        collection: node.collection.clone(),
                        slug: node.slug.clone(),
                    };
                    return (WikiLink { mention, target }, None);
                }
                None => LinkWarning::Missing {
                    title: mention.title.clone(),
                },
            },
            Resolution::Ambiguous(candidates) => LinkWarning::Ambiguous {
                title: mention.title.clone(),
                candidates,
            },
            Resolution::Unresolved => LinkWarning::Missing {
                title: mention.title.clone(),
            },
        };

        if self.warn_missing {
            match &warning {
                LinkWarning::Missing { title } => {
                    tracing::warn!("Missing wiki-link target [[{}]]", title)
                }
                LinkWarning::Ambiguous { title, candidates } => {
                    tracing::warn!(
                        "Ambiguous wiki-link target [[{}]] ({} candidates)",
                        title,
                        candidates.len()
                    )
                }
            }
        }

        let link = WikiLink {
            mention,
            target: LinkTarget::Missing,
        };
        (link, Some(warning))
    }
}

fn segment_event<'e>(segment: Segment) -> Event<'e> {
    match segment {
        Segment::Text(text) => Event::Text(CowStr::Boxed(text.into_boxed_str())),
        Segment::Link(link) => Event::InlineHtml(CowStr::Boxed(link.to_html().into_boxed_str())),
    }
}

fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

//! Markdown rendering with wiki links resolved against a built graph.

pub mod wikilinks;

use pulldown_cmark::Options;

pub use wikilinks::{
    LinkOptions, LinkTarget, LinkWarning, RenderedDocument, Segment, WikiLink,
    WikilinkTransformer, MISSING_LINK_TOOLTIP,
};

/// Parser options shared by every render
pub fn markdown_options() -> Options {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);
    options.insert(Options::ENABLE_HEADING_ATTRIBUTES);
    options
}

// ABOUTME: DOM provider abstraction used by text extraction, plus in-place attribute stripping helpers.
// ABOUTME: Defines the DomProvider and DomFragment traits and re-exports the bundled implementations.

//! DOM utilities for text extraction.
//!
//! Text extraction needs a real tree: elements are removed by selector and by
//! attribute value before the remaining text is read. The tree comes from an
//! injected [`DomProvider`] so callers choose the parser, and so a missing
//! provider is an explicit error rather than an environment probe.

mod query_dom;
mod scraper_dom;

use dom_query::{NodeRef, Selection};

use crate::error::CleanError;

pub use query_dom::DomQueryProvider;
pub use scraper_dom::ScraperProvider;

/// Attributes removed by [`strip_presentation`].
const PRESENTATION_ATTRS: &[&str] = &["style", "class"];

/// Parses HTML fragments into mutable trees.
pub trait DomProvider {
    /// Short name used in logs.
    fn name(&self) -> &'static str;

    /// Parses `html` as the content of a container element.
    fn parse_fragment(&self, html: &str) -> Result<Box<dyn DomFragment>, CleanError>;
}

/// A parsed fragment that elements can be removed from.
pub trait DomFragment {
    /// Removes every element matched by the CSS `selector`.
    /// Returns the number of matched elements.
    fn remove_selected(&mut self, selector: &str) -> Result<usize, CleanError>;

    /// Removes every element whose `attr` value satisfies `pred`.
    /// Returns the number of removed elements.
    fn remove_where_attr(&mut self, attr: &str, pred: &dyn Fn(&str) -> bool) -> usize;

    /// Concatenated text of the remaining text nodes, in document order.
    fn text_content(&self) -> String;
}

/// Removes `style` and `class` from every element in `selection` and all of
/// their descendants, in place.
pub fn strip_presentation(selection: &Selection) {
    for node in selection.nodes() {
        strip_node(node);
    }
}

fn strip_node(node: &NodeRef) {
    for attr in PRESENTATION_ATTRS {
        node.remove_attr(attr);
    }
    for child in node.children() {
        if child.is_element() {
            strip_node(&child);
        }
    }
}

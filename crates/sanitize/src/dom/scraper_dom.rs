// ABOUTME: DomProvider backed by scraper; removal marks node ids in a skip set instead of mutating the tree.
// ABOUTME: Text is read by walking the tree and skipping marked subtrees, comments, and doctypes.

use std::collections::HashSet;

use ego_tree::{NodeId, NodeRef};
use scraper::{ElementRef, Html, Node, Selector};

use super::{DomFragment, DomProvider};
use crate::error::CleanError;

/// Parses fragments with `scraper` (html5ever).
#[derive(Debug, Clone, Copy, Default)]
pub struct ScraperProvider;

impl DomProvider for ScraperProvider {
    fn name(&self) -> &'static str {
        "scraper"
    }

    fn parse_fragment(&self, html: &str) -> Result<Box<dyn DomFragment>, CleanError> {
        Ok(Box::new(ScraperFragment {
            html: Html::parse_fragment(html),
            skip: HashSet::new(),
        }))
    }
}

struct ScraperFragment {
    html: Html,
    skip: HashSet<NodeId>,
}

impl DomFragment for ScraperFragment {
    fn remove_selected(&mut self, selector: &str) -> Result<usize, CleanError> {
        let sel = Selector::parse(selector).map_err(|_| CleanError::invalid_selector(selector))?;
        let mut count = 0;
        for el in self.html.select(&sel) {
            self.skip.insert(el.id());
            count += 1;
        }
        Ok(count)
    }

    fn remove_where_attr(&mut self, attr: &str, pred: &dyn Fn(&str) -> bool) -> usize {
        let mut count = 0;
        for node in self.html.tree.root().descendants() {
            if let Some(el) = ElementRef::wrap(node) {
                if el.value().attr(attr).is_some_and(pred) && self.skip.insert(el.id()) {
                    count += 1;
                }
            }
        }
        count
    }

    fn text_content(&self) -> String {
        let mut out = String::new();
        collect_text(self.html.tree.root(), &self.skip, &mut out);
        out
    }
}

fn collect_text(node: NodeRef<Node>, skip: &HashSet<NodeId>, out: &mut String) {
    if skip.contains(&node.id()) {
        return;
    }
    match node.value() {
        Node::Text(t) => out.push_str(t),
        Node::Document | Node::Fragment | Node::Element(_) => {
            for child in node.children() {
                collect_text(child, skip, out);
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_skipped_subtrees_are_excluded() {
        let mut frag = ScraperProvider
            .parse_fragment("<div>a<section>b<p>c</p></section>d</div>")
            .unwrap();
        assert_eq!(frag.text_content(), "abcd");
        assert_eq!(frag.remove_selected("section").unwrap(), 1);
        assert_eq!(frag.text_content(), "ad");
    }

    #[test]
    fn test_attr_removal_counts_each_element_once() {
        let mut frag = ScraperProvider
            .parse_fragment(r#"<p style="visibility:hidden">x</p><p>y</p>"#)
            .unwrap();
        let hidden = |v: &str| v.contains("hidden");
        assert_eq!(frag.remove_where_attr("style", &hidden), 1);
        assert_eq!(frag.remove_where_attr("style", &hidden), 0);
        assert_eq!(frag.text_content(), "y");
    }
}

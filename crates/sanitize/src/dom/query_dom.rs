// ABOUTME: DomProvider backed by dom_query, the default provider for text extraction.
// ABOUTME: Removes matched nodes from the tree directly and reads text from the document root.

use dom_query::{Document, Matcher};

use super::{DomFragment, DomProvider};
use crate::error::CleanError;

/// Parses fragments with `dom_query`.
#[derive(Debug, Clone, Copy, Default)]
pub struct DomQueryProvider;

impl DomProvider for DomQueryProvider {
    fn name(&self) -> &'static str {
        "dom_query"
    }

    fn parse_fragment(&self, html: &str) -> Result<Box<dyn DomFragment>, CleanError> {
        Ok(Box::new(QueryFragment {
            doc: Document::fragment(html),
        }))
    }
}

struct QueryFragment {
    doc: Document,
}

impl DomFragment for QueryFragment {
    fn remove_selected(&mut self, selector: &str) -> Result<usize, CleanError> {
        let matcher = Matcher::new(selector).map_err(|_| CleanError::invalid_selector(selector))?;
        let selection = self.doc.select_matcher(&matcher);
        let count = selection.length();
        selection.remove();
        Ok(count)
    }

    fn remove_where_attr(&mut self, attr: &str, pred: &dyn Fn(&str) -> bool) -> usize {
        let all = self.doc.select("*");
        let doomed: Vec<_> = all
            .nodes()
            .iter()
            .filter(|node| node.attr(attr).is_some_and(|v| pred(&v)))
            .cloned()
            .collect();
        for node in &doomed {
            node.remove_from_parent();
        }
        doomed.len()
    }

    fn text_content(&self) -> String {
        self.doc.root().text().to_string()
    }
}

// ABOUTME: Sanitizer entry point that normalizes newlines and dispatches to markup cleaning or text extraction.
// ABOUTME: Holds immutable options and an optional shared DOM provider; safe to share across threads.

use std::fmt;
use std::sync::Arc;

use crate::dom::DomProvider;
use crate::error::CleanError;
use crate::markup::clean_markup;
use crate::options::{Mode, Options, SanitizerBuilder};
use crate::text::extract_text;

/// A configured sanitizer.
///
/// Construct with [`Sanitizer::builder`]. Each call to [`Sanitizer::clean`]
/// is independent; nothing is cached between calls.
#[derive(Clone)]
pub struct Sanitizer {
    opts: Options,
    provider: Option<Arc<dyn DomProvider + Send + Sync>>,
}

impl Sanitizer {
    pub(crate) fn new(opts: Options, provider: Option<Arc<dyn DomProvider + Send + Sync>>) -> Self {
        Self { opts, provider }
    }

    /// Create a builder with default options and the bundled DOM provider.
    pub fn builder() -> SanitizerBuilder {
        SanitizerBuilder::new()
    }

    /// The options this sanitizer was built with.
    pub fn options(&self) -> &Options {
        &self.opts
    }

    /// Cleans `html` into structural markup, or extracts its text when
    /// `extract_text_only` is set.
    pub fn clean(&self, html: &str) -> Result<String, CleanError> {
        let html = strip_newlines(html);
        let mode = Mode::from(&self.opts);
        tracing::debug!(%mode, input_len = html.len(), "sanitizing fragment");

        match mode {
            Mode::Text => {
                let provider = self.provider.as_deref().map(|p| p as &dyn DomProvider);
                extract_text(&html, provider)
            }
            Mode::Markup => Ok(clean_markup(&html, &self.opts.markup())),
        }
    }
}

impl Default for Sanitizer {
    fn default() -> Self {
        SanitizerBuilder::new().build()
    }
}

impl fmt::Debug for Sanitizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Sanitizer")
            .field("opts", &self.opts)
            .field("provider", &self.provider.as_ref().map(|p| p.name()))
            .finish()
    }
}

/// Removes every `\r\n`, `\n`, and lone `\r`.
pub fn strip_newlines(html: &str) -> String {
    html.chars().filter(|c| !matches!(c, '\n' | '\r')).collect()
}

// ABOUTME: Configuration options for the sanitizer including Options, MarkupOptions, and SanitizerBuilder.
// ABOUTME: SanitizerBuilder provides a fluent API for constructing Sanitizer instances with custom settings.

use std::fmt;
use std::sync::Arc;

use serde::Deserialize;

use crate::dom::{DomProvider, DomQueryProvider};
use crate::error::CleanError;
use crate::sanitizer::Sanitizer;

/// Options accepted by the sanitizer entry point.
///
/// Every field is optional when deserialized; missing fields take the
/// defaults below. Keys are accepted in camelCase or snake_case.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Options {
    /// Strip `<!-- ... -->` comments. Default: true.
    #[serde(alias = "remove_comments")]
    pub remove_comments: bool,
    /// Collapse elements with no content. Default: true.
    #[serde(alias = "remove_empty_elements")]
    pub remove_empty_elements: bool,
    /// Keep `id` attributes. Default: false.
    #[serde(alias = "preserve_structure")]
    pub preserve_structure: bool,
    /// Return plain text instead of cleaned markup. Default: false.
    #[serde(alias = "extract_text_only")]
    pub extract_text_only: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            remove_comments: true,
            remove_empty_elements: true,
            preserve_structure: false,
            extract_text_only: false,
        }
    }
}

impl Options {
    /// Parses an options record from JSON, merging it over the defaults.
    pub fn from_json(json: &str) -> Result<Self, CleanError> {
        serde_json::from_str(json).map_err(CleanError::invalid_options)
    }

    /// The subset of options the markup cleaner reads.
    pub fn markup(&self) -> MarkupOptions {
        MarkupOptions {
            remove_comments: self.remove_comments,
            remove_empty_elements: self.remove_empty_elements,
            preserve_structure: self.preserve_structure,
        }
    }
}

/// Options read by the markup cleaner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkupOptions {
    pub remove_comments: bool,
    pub remove_empty_elements: bool,
    pub preserve_structure: bool,
}

impl Default for MarkupOptions {
    fn default() -> Self {
        Options::default().markup()
    }
}

/// Output mode selected by `Options::extract_text_only`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Markup,
    Text,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Mode::Markup => "markup",
            Mode::Text => "text",
        };
        write!(f, "{}", s)
    }
}

impl From<&Options> for Mode {
    fn from(opts: &Options) -> Self {
        if opts.extract_text_only {
            Mode::Text
        } else {
            Mode::Markup
        }
    }
}

/// Builder for constructing Sanitizer instances with custom configuration.
///
/// Starts from the default options and the bundled `dom_query` provider.
#[derive(Clone)]
pub struct SanitizerBuilder {
    opts: Options,
    provider: Option<Arc<dyn DomProvider + Send + Sync>>,
}

impl SanitizerBuilder {
    /// Create a new SanitizerBuilder with default options.
    pub fn new() -> Self {
        Self {
            opts: Options::default(),
            provider: Some(Arc::new(DomQueryProvider)),
        }
    }

    /// Replace all options at once.
    pub fn options(mut self, opts: Options) -> Self {
        self.opts = opts;
        self
    }

    /// Strip or keep HTML comments.
    pub fn remove_comments(mut self, remove: bool) -> Self {
        self.opts.remove_comments = remove;
        self
    }

    /// Collapse or keep empty elements.
    pub fn remove_empty_elements(mut self, remove: bool) -> Self {
        self.opts.remove_empty_elements = remove;
        self
    }

    /// Keep `id` attributes.
    pub fn preserve_structure(mut self, preserve: bool) -> Self {
        self.opts.preserve_structure = preserve;
        self
    }

    /// Return plain text instead of cleaned markup.
    pub fn extract_text_only(mut self, text_only: bool) -> Self {
        self.opts.extract_text_only = text_only;
        self
    }

    /// Use a custom DOM provider for text extraction.
    pub fn dom_provider<P>(mut self, provider: P) -> Self
    where
        P: DomProvider + Send + Sync + 'static,
    {
        self.provider = Some(Arc::new(provider));
        self
    }

    /// Build without any DOM provider. Text extraction will fail with
    /// `CleanError::MissingDomProvider`.
    pub fn without_dom_provider(mut self) -> Self {
        self.provider = None;
        self
    }

    /// Build the Sanitizer with the configured options.
    pub fn build(self) -> Sanitizer {
        Sanitizer::new(self.opts, self.provider)
    }
}

impl Default for SanitizerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for SanitizerBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SanitizerBuilder")
            .field("opts", &self.opts)
            .field("has_provider", &self.provider.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let opts = Options::default();
        assert!(opts.remove_comments);
        assert!(opts.remove_empty_elements);
        assert!(!opts.preserve_structure);
        assert!(!opts.extract_text_only);
        assert_eq!(Mode::from(&opts), Mode::Markup);
    }

    #[test]
    fn test_from_json_merges_over_defaults() {
        let opts = Options::from_json(r#"{"preserveStructure": true}"#).unwrap();
        assert!(opts.preserve_structure);
        assert!(opts.remove_comments);
        assert!(opts.remove_empty_elements);
        assert!(!opts.extract_text_only);
    }

    #[test]
    fn test_from_json_accepts_snake_case() {
        let opts =
            Options::from_json(r#"{"remove_comments": false, "extract_text_only": true}"#).unwrap();
        assert!(!opts.remove_comments);
        assert!(opts.extract_text_only);
        assert_eq!(Mode::from(&opts), Mode::Text);
    }

    #[test]
    fn test_from_json_rejects_malformed() {
        let err = Options::from_json(r#"{"removeComments": "yes"}"#).unwrap_err();
        assert!(matches!(err, CleanError::InvalidOptions(_)));
    }

    #[test]
    fn test_markup_subset() {
        let opts = Options {
            remove_comments: false,
            remove_empty_elements: true,
            preserve_structure: true,
            extract_text_only: true,
        };
        assert_eq!(
            opts.markup(),
            MarkupOptions {
                remove_comments: false,
                remove_empty_elements: true,
                preserve_structure: true,
            }
        );
    }

    #[test]
    fn test_builder_sets_options() {
        let builder = SanitizerBuilder::new()
            .remove_comments(false)
            .preserve_structure(true)
            .extract_text_only(true);
        assert!(!builder.opts.remove_comments);
        assert!(builder.opts.preserve_structure);
        assert!(builder.opts.extract_text_only);
        assert!(builder.provider.is_some());
        assert!(builder.without_dom_provider().provider.is_none());
    }
}

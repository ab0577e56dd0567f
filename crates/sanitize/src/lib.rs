// ABOUTME: Main library entry point for the tidymail HTML sanitizer.
// ABOUTME: Re-exports the public API: clean_html, Sanitizer, Options, CleanError, and the DOM provider traits.

//! Tidymail - strips presentational and tracking markup from e-mail HTML.
//!
//! Two modes are available:
//! - markup cleaning (default): regex passes remove style, class and id
//!   attributes, inline styles, tracking attributes and pixels, scripts,
//!   style blocks and comments, then collapse empty elements and put one
//!   tag boundary per line;
//! - text extraction (`extract_text_only`): the fragment is parsed by a
//!   [`DomProvider`] and its visible text is returned.
//!
//! # Example
//!
//! ```
//! use tidymail_sanitize::{clean_html, Options};
//!
//! let html = r#"<div id="x" class="y" style="color:red">Hello</div>"#;
//! let cleaned = clean_html(html, &Options::default()).unwrap();
//! assert_eq!(cleaned, "<div>Hello</div>");
//! ```

pub mod dom;
pub mod error;
pub mod markup;
pub mod options;
pub mod sanitizer;
pub mod text;

pub use crate::dom::{
    strip_presentation, DomFragment, DomProvider, DomQueryProvider, ScraperProvider,
};
pub use crate::error::CleanError;
pub use crate::markup::clean_markup;
pub use crate::options::{MarkupOptions, Mode, Options, SanitizerBuilder};
pub use crate::sanitizer::Sanitizer;
pub use crate::text::extract_text;

/// Cleans `html` with `options`, using the bundled `dom_query` provider for
/// text extraction.
pub fn clean_html(html: &str, options: &Options) -> Result<String, CleanError> {
    Sanitizer::builder().options(*options).build().clean(html)
}

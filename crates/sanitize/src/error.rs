// ABOUTME: Error types for HTML sanitization operations.
// ABOUTME: Provides CleanError with MissingDomProvider, InvalidSelector, Dom, and InvalidOptions variants.

use std::fmt;
use thiserror::Error;

/// Errors that can occur while sanitizing a fragment.
///
/// Markup cleaning never fails; every variant here comes from text
/// extraction or from loading configuration.
#[derive(Debug, Error)]
pub enum CleanError {
    /// Text extraction was requested but no DOM provider was configured.
    #[error("text extraction requires a DOM provider, but none was configured")]
    MissingDomProvider,

    /// A DOM provider rejected a CSS selector.
    #[error("invalid selector: {0}")]
    InvalidSelector(String),

    /// The DOM provider failed to build or query the fragment.
    #[error("DOM provider failed: {0}")]
    Dom(String),

    /// An options record could not be parsed.
    #[error("invalid options: {0}")]
    InvalidOptions(String),
}

impl CleanError {
    /// Creates an InvalidSelector error naming the rejected selector.
    pub fn invalid_selector(selector: impl Into<String>) -> Self {
        CleanError::InvalidSelector(selector.into())
    }

    /// Creates a Dom error from an underlying provider failure.
    pub fn dom(err: impl fmt::Display) -> Self {
        CleanError::Dom(err.to_string())
    }

    /// Creates an InvalidOptions error from a deserialization failure.
    pub fn invalid_options(err: impl fmt::Display) -> Self {
        CleanError::InvalidOptions(err.to_string())
    }

    /// Returns true if this is a MissingDomProvider error.
    pub fn is_missing_dom_provider(&self) -> bool {
        matches!(self, CleanError::MissingDomProvider)
    }

    /// Returns true if this error originated in a DOM provider.
    pub fn is_dom(&self) -> bool {
        matches!(self, CleanError::Dom(_) | CleanError::InvalidSelector(_))
    }
}

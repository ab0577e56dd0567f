// ABOUTME: Plain-text extraction from HTML fragments through an injected DOM provider.
// ABOUTME: Drops script, style, and inline-hidden elements, then normalizes whitespace line by line.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::dom::DomProvider;
use crate::error::CleanError;

const SCRIPT_AND_STYLE: &str = "script, style";

static HIDDEN_STYLE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)display\s*:\s*none|visibility\s*:\s*hidden").unwrap());

/// Extracts human-readable text from `html`.
///
/// Fails with `CleanError::MissingDomProvider` when `provider` is `None`.
pub fn extract_text(html: &str, provider: Option<&dyn DomProvider>) -> Result<String, CleanError> {
    let provider = provider.ok_or(CleanError::MissingDomProvider)?;
    let mut fragment = provider.parse_fragment(html)?;

    let scripts = fragment.remove_selected(SCRIPT_AND_STYLE)?;
    let hidden = fragment.remove_where_attr("style", &is_hidden_style);
    let text = normalize_text(&fragment.text_content());

    tracing::debug!(
        provider = provider.name(),
        scripts,
        hidden,
        output_len = text.len(),
        "extracted text"
    );
    Ok(text)
}

/// Returns true if an inline `style` value hides its element.
pub fn is_hidden_style(style: &str) -> bool {
    HIDDEN_STYLE_RE.is_match(style)
}

/// Normalizes extracted text.
///
/// Whitespace inside a line collapses to single spaces and each line is
/// trimmed. Runs of blank lines become one blank line, and blank lines at
/// either end are dropped.
pub fn normalize_text(text: &str) -> String {
    let mut lines: Vec<String> = Vec::new();
    for line in text.lines() {
        let line = line.split_whitespace().collect::<Vec<_>>().join(" ");
        if !line.is_empty() {
            lines.push(line);
        } else if lines.last().is_some_and(|prev| !prev.is_empty()) {
            lines.push(line);
        }
    }
    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines.join("\n")
}

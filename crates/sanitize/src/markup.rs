// ABOUTME: Regex-based markup cleaner that strips presentation, tracking, and scripting from HTML fragments.
// ABOUTME: Runs ordered substitutions, collapses empty elements, and reformats one tag boundary per line.

//! Markup cleaning by pattern substitution.
//!
//! This is deliberately not a parser. Each pass is a regex substitution over
//! the raw string, and later passes depend on the shape left by earlier ones,
//! so the order in [`clean_markup`] matters. Known limitations:
//! - a `>` inside a quoted attribute value ends the tag early;
//! - attribute patterns also match attribute-like text in content;
//! - nested same-name tags are not balanced.

use std::borrow::Cow;

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

use crate::options::MarkupOptions;

/// Elements that never carry a closing tag and are never collapsed.
pub const VOID_ELEMENTS: &[&str] = &[
    "br", "hr", "img", "input", "meta", "link", "area", "base", "col", "embed", "source", "track",
    "wbr",
];

// Quoted attribute value: runs to the next quote of the same kind. Where a
// match may start is checked in `strip_attributes`.
macro_rules! attr_re {
    ($names:literal) => {
        Lazy::new(|| {
            Regex::new(concat!(
                r#"(?i)(?:"#,
                $names,
                r#")\s*=\s*(?:"[^"]*"|'[^']*')"#
            ))
            .unwrap()
        })
    };
}

static STYLE_ATTR_RE: Lazy<Regex> = attr_re!("style");
static CLASS_ATTR_RE: Lazy<Regex> = attr_re!("class");
static ID_ATTR_RE: Lazy<Regex> = attr_re!("id");
static EVENT_ATTR_RE: Lazy<Regex> =
    attr_re!(r#"onclick|onload|onmouseover|onmouseout|data-[^\s=>"']*"#);
static TABLE_ATTR_RE: Lazy<Regex> =
    attr_re!("cellpadding|cellspacing|border|align|valign|width|height|bgcolor");
static FONT_ATTR_RE: Lazy<Regex> = attr_re!("color|face|size");
static LINK_ATTR_RE: Lazy<Regex> = attr_re!("target|rel");

static STYLE_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").unwrap());
static SCRIPT_BLOCK_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").unwrap());
static COMMENT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<!--.*?-->").unwrap());
static TRACKING_IMG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)<img[^>]*tracking[^>]*>").unwrap());
static EMPTY_ATTR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r#"\s*=\s*(?:""|'')"#).unwrap());
static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

// The regex crate has no backreferences, so open/close names are compared in
// the replacement closure. The name must end at whitespace, `/`, or `>`.
static EMPTY_ELEMENT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"<([a-zA-Z][a-zA-Z0-9]*)(?:[\s/][^>]*)?>\s*</([a-zA-Z][a-zA-Z0-9]*)\s*>").unwrap()
});

/// Cleans an HTML fragment down to structural markup.
///
/// Total over any input: malformed markup degrades the output but never
/// fails. Newlines are expected to have been stripped by the caller.
pub fn clean_markup(html: &str, options: &MarkupOptions) -> String {
    let input_len = html.len();

    // Tracking pixels are matched before attribute stripping so that a marker
    // carried in `class` or `id` is still visible.
    let mut cleaned = strip(html, &TRACKING_IMG_RE).into_owned();

    cleaned = strip_attributes(&cleaned, &STYLE_ATTR_RE);
    cleaned = strip_attributes(&cleaned, &CLASS_ATTR_RE);
    if !options.preserve_structure {
        cleaned = strip_attributes(&cleaned, &ID_ATTR_RE);
    }

    cleaned = strip(&cleaned, &STYLE_BLOCK_RE).into_owned();
    cleaned = strip(&cleaned, &SCRIPT_BLOCK_RE).into_owned();

    if options.remove_comments {
        cleaned = strip(&cleaned, &COMMENT_RE).into_owned();
    }

    cleaned = strip_attributes(&cleaned, &EVENT_ATTR_RE);
    cleaned = strip_attributes(&cleaned, &TABLE_ATTR_RE);
    cleaned = strip_attributes(&cleaned, &FONT_ATTR_RE);
    cleaned = strip_attributes(&cleaned, &LINK_ATTR_RE);
    cleaned = strip(&cleaned, &TRACKING_IMG_RE).into_owned();
    cleaned = strip(&cleaned, &EMPTY_ATTR_RE).into_owned();
    cleaned = collapse_whitespace(&cleaned).into_owned();

    if options.remove_empty_elements {
        cleaned = remove_empty_elements(&cleaned);
    }

    let formatted = format_html(&cleaned);
    tracing::debug!(input_len, output_len = formatted.len(), "cleaned markup");
    formatted
}

fn strip<'a>(html: &'a str, re: &Regex) -> Cow<'a, str> {
    re.replace_all(html, "")
}

/// Removes attributes matched by `re` together with the whitespace before them.
///
/// A match only counts when it starts an attribute name: at the start of the
/// input, after whitespace, or right after a closing quote
/// (`<td style="a"width="1">`). When the removed attribute touched the next
/// one, a single space keeps the two names apart.
fn strip_attributes(html: &str, re: &Regex) -> String {
    let mut out = String::with_capacity(html.len());
    let mut last = 0;
    for m in re.find_iter(html) {
        let starts_name = html[..m.start()]
            .chars()
            .next_back()
            .map_or(true, |c| c.is_whitespace() || c == '"' || c == '\'');
        if !starts_name {
            continue;
        }
        out.push_str(&html[last..m.start()]);
        out.truncate(out.trim_end().len());
        let touches_next = html[m.end()..]
            .chars()
            .next()
            .is_some_and(|c| !c.is_whitespace() && c != '>' && c != '/');
        if touches_next {
            out.push(' ');
        }
        last = m.end();
    }
    out.push_str(&html[last..]);
    out
}

fn collapse_whitespace(html: &str) -> Cow<'_, str> {
    WHITESPACE_RE.replace_all(html, " ")
}

/// Returns true if `name` is a void element, ignoring ASCII case.
pub fn is_void_element(name: &str) -> bool {
    VOID_ELEMENTS.iter().any(|v| v.eq_ignore_ascii_case(name))
}

/// Removes `<tag ...></tag>` pairs with only whitespace between them.
///
/// Repeats until nothing changes, so `<div><span></span></div>` goes away
/// entirely, then re-collapses the whitespace the removed elements leave.
pub fn remove_empty_elements(html: &str) -> String {
    let mut current = html.to_string();
    loop {
        let next = EMPTY_ELEMENT_RE
            .replace_all(&current, |caps: &Captures| {
                let open = &caps[1];
                let close = &caps[2];
                if open.eq_ignore_ascii_case(close) && !is_void_element(open) {
                    String::new()
                } else {
                    caps[0].to_string()
                }
            })
            .into_owned();
        if next == current {
            break;
        }
        current = next;
    }
    collapse_whitespace(&current).into_owned()
}

/// Puts each adjacent tag on its own line, trims lines, drops blank ones.
pub fn format_html(html: &str) -> String {
    html.replace("><", ">\n<")
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .collect::<Vec<_>>()
        .join("\n")
}

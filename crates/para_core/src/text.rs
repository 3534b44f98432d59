//! User-text helpers shared by services and presentation adapters.
//!
//! # Responsibility
//! - Normalize titles and tag input before they reach the document.
//! - Escape stored text for HTML renderers.
//!
//! # Invariants
//! - Stored strings are never assumed to be sanitized; escaping happens at
//!   render time through `escape_html`.
//! - Tags are trimmed, lowercased and deduplicated.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::BTreeSet;

static TAG_SEPARATOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[,;#\s]+").expect("valid tag separator regex"));

/// Escapes `& < > " '` for safe interpolation into HTML.
pub fn escape_html(value: &str) -> String {
    let mut escaped = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

/// Trims a title; returns `None` when nothing is left.
pub fn normalize_title(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Normalizes one tag. Returns `None` for blank input.
pub fn normalize_tag(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes a tag list into a sorted, deduplicated set.
pub fn normalize_tags<S: AsRef<str>>(values: &[S]) -> BTreeSet<String> {
    values
        .iter()
        .filter_map(|value| normalize_tag(value.as_ref()))
        .collect()
}

/// Splits free-form tag input (`"work, #urgent home"`) into normalized tags.
pub fn parse_tag_list(input: &str) -> BTreeSet<String> {
    TAG_SEPARATOR_RE
        .split(input)
        .filter_map(normalize_tag)
        .collect()
}

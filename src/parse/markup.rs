//! Token-level scanning of raw HTML.
//!
//! GitHub's class names are generated and change between deploys, so nothing
//! here builds a tree or matches CSS classes. The scanners look for tag-shaped
//! tokens (`<a ... href=...>`, `<span ...>`) with a tolerant attribute grammar:
//! any attribute order, double, single or no quotes, any letter case.

use std::borrow::Cow;
use std::sync::LazyLock;

use regex::Regex;

use crate::error_handling::ParseError;
use crate::utils::{compile_regex_unsafe, decode_html_entities};

const COMMENT_PATTERN: &str = r"(?s)<!--.*?-->";
const TAG_START_PATTERN: &str = r"<[A-Za-z!/]";
// `(?:[^>]*?\s)?` keeps `data-href=` and friends from matching `href=`.
const ANCHOR_HREF_PATTERN: &str =
    r#"(?i)<a\s(?:[^>]*?\s)?href\s*=\s*(?:"([^"<>]*)"|'([^'<>]*)'|([^\s"'<>]+))"#;
const SPAN_TAG_PATTERN: &str = r"(?i)<span\s[^>]*>";

static COMMENT_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(COMMENT_PATTERN, "COMMENT_RE"));
static TAG_START_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(TAG_START_PATTERN, "TAG_START_RE"));
static ANCHOR_HREF_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(ANCHOR_HREF_PATTERN, "ANCHOR_HREF_RE"));
static SPAN_TAG_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(SPAN_TAG_PATTERN, "SPAN_TAG_RE"));

/// Rejects input with no locatable markup and strips HTML comments.
///
/// This is the only hard failure in extraction: everything after it degrades
/// to partial or empty results.
pub(crate) fn prepare_document(html: &str) -> Result<Cow<'_, str>, ParseError> {
    if html.trim().is_empty() {
        return Err(ParseError::EmptyDocument);
    }
    if !TAG_START_RE.is_match(html) {
        return Err(ParseError::NoMarkup);
    }
    Ok(COMMENT_RE.replace_all(html, ""))
}

/// Decoded `href` values of every complete `<a>` tag, in document order.
///
/// An anchor cut off before its closing quote is skipped.
pub(crate) fn anchor_hrefs(html: &str) -> impl Iterator<Item = String> + '_ {
    ANCHOR_HREF_RE.captures_iter(html).filter_map(|caps| {
        caps.get(1)
            .or_else(|| caps.get(2))
            .or_else(|| caps.get(3))
            .map(|m| decode_html_entities(m.as_str().trim()))
            .filter(|href| !href.is_empty())
    })
}

/// Opening `<span ...>` tags (the whole tag text), in document order.
pub(crate) fn span_tags(html: &str) -> impl Iterator<Item = &str> + '_ {
    SPAN_TAG_RE.find_iter(html).map(|m| m.as_str())
}

/// Value of `name` inside a single tag's text, decoded.
///
/// Only quoted values are read; the attribute name must be preceded by
/// whitespace so `data-aria-label` does not count as `aria-label`.
pub(crate) fn attribute_value(tag: &str, name: &str) -> Option<String> {
    let lower = tag.to_ascii_lowercase();
    let needle = name.to_ascii_lowercase();
    let mut search_from = 0;

    while let Some(offset) = lower[search_from..].find(&needle) {
        let start = search_from + offset;
        let end = start + needle.len();
        search_from = end;

        let preceded_by_space = lower[..start]
            .chars()
            .next_back()
            .is_some_and(char::is_whitespace);
        if !preceded_by_space {
            continue;
        }

        let after = tag[end..].trim_start();
        let Some(after_eq) = after.strip_prefix('=') else {
            continue;
        };
        let value_part = after_eq.trim_start();
        let mut chars = value_part.chars();
        let quote = match chars.next() {
            Some(q @ ('"' | '\'')) => q,
            _ => continue,
        };
        let body = &value_part[1..];
        if let Some(close) = body.find(quote) {
            return Some(decode_html_entities(&body[..close]));
        }
    }
    None
}

//! Repository page language-breakdown extraction.
//!
//! GitHub renders the breakdown twice under a "Languages" heading: a bar of
//! `<span aria-label="Python 85.0">` segments and a legend of
//! `<span>Python</span><span>85.0%</span>` pairs. The bar is read first; the
//! legend only when the bar yields nothing.

use std::sync::LazyLock;

use regex::Regex;

use super::markup::{attribute_value, prepare_document, span_tags};
use crate::error_handling::ParseError;
use crate::models::LanguageStats;
use crate::utils::{compile_regex_unsafe, decode_html_entities, normalize_whitespace};

const LANGUAGES_HEADING_PATTERN: &str = r"(?is)<h2\b[^>]*>\s*Languages\s*</h2\s*>";
const NEXT_HEADING_PATTERN: &str = r"(?i)<h2\b";
const LEGEND_ENTRY_PATTERN: &str =
    r"(?is)<span\b[^>]*>\s*([^<>]+?)\s*</span>\s*<span\b[^>]*>\s*([0-9]+(?:\.[0-9]+)?)\s*%\s*</span>";

static LANGUAGES_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(LANGUAGES_HEADING_PATTERN, "LANGUAGES_HEADING_RE"));
static NEXT_HEADING_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(NEXT_HEADING_PATTERN, "NEXT_HEADING_RE"));
static LEGEND_ENTRY_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(LEGEND_ENTRY_PATTERN, "LEGEND_ENTRY_RE"));

/// Extracts the language breakdown from a repository page.
///
/// With a "Languages" heading present, only the markup between it and the next
/// `<h2>` is read. Without one, bar segments carrying `itemprop="keywords"`
/// are collected from the whole page. Duplicate language names keep their
/// first value.
///
/// # Errors
///
/// Returns `ParseError` only when the page has no markup at all. A page
/// without the widget yields an empty map.
pub fn extract_language_stats(html: &str) -> Result<LanguageStats, ParseError> {
    let document = prepare_document(html)?;

    let stats = match languages_section(&document) {
        Some(section) => {
            let from_bar = bar_segments(section, false);
            if from_bar.is_empty() {
                legend_entries(section)
            } else {
                from_bar
            }
        }
        None => bar_segments(&document, true),
    };

    Ok(stats)
}

/// Markup between the "Languages" heading and the next `<h2>` (or the end).
fn languages_section(document: &str) -> Option<&str> {
    let heading = LANGUAGES_HEADING_RE.find(document)?;
    let rest = &document[heading.end()..];
    let end = NEXT_HEADING_RE
        .find(rest)
        .map_or(rest.len(), |next| next.start());
    Some(&rest[..end])
}

fn bar_segments(html: &str, require_itemprop: bool) -> LanguageStats {
    let mut stats = LanguageStats::new();
    for tag in span_tags(html) {
        if require_itemprop
            && !attribute_value(tag, "itemprop").is_some_and(|v| v.eq_ignore_ascii_case("keywords"))
        {
            continue;
        }
        let Some(label) = attribute_value(tag, "aria-label") else {
            continue;
        };
        if let Some((language, share)) = parse_language_label(&label) {
            stats.entry(language).or_insert(share);
        }
    }
    stats
}

fn legend_entries(section: &str) -> LanguageStats {
    let mut stats = LanguageStats::new();
    for caps in LEGEND_ENTRY_RE.captures_iter(section) {
        let language = normalize_whitespace(&decode_html_entities(&caps[1]));
        let Some(share) = parse_share(&caps[2]) else {
            continue;
        };
        if !language.is_empty() {
            stats.entry(language).or_insert(share);
        }
    }
    stats
}

/// Splits `"Jupyter Notebook 12.5"` into the language and its share.
///
/// The share is the last whitespace-separated token, optionally followed by `%`.
pub(crate) fn parse_language_label(label: &str) -> Option<(String, f64)> {
    let label = normalize_whitespace(label);
    let (language, share) = label.rsplit_once(' ')?;
    let share = parse_share(share.trim_end_matches('%'))?;
    let language = language.trim();
    if language.is_empty() {
        return None;
    }
    Some((language.to_string(), share))
}

fn parse_share(raw: &str) -> Option<f64> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|share| share.is_finite() && *share >= 0.0)
}

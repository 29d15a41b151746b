//! Search-results page extraction.
//!
//! A result is any anchor whose href resolves to the base host and whose path
//! has the shape of the requested category. Everything else on the page (nav
//! links, owner profiles, topics, pagination, help links) is noise.

use std::sync::LazyLock;

use regex::Regex;
use url::Url;

use super::markup::{anchor_hrefs, prepare_document};
use crate::config::RESERVED_ROUTES;
use crate::error_handling::ParseError;
use crate::models::SearchType;
use crate::utils::compile_regex_unsafe;

// Owner: GitHub login rules (alphanumerics and hyphens). Repo: alphanumerics, `.`, `_`, `-`.
const REPOSITORY_PATH_PATTERN: &str = r"^/([A-Za-z0-9][A-Za-z0-9-]*)/([A-Za-z0-9_.-]+)$";
const ISSUE_PATH_PATTERN: &str =
    r"^/([A-Za-z0-9][A-Za-z0-9-]*)/([A-Za-z0-9_.-]+)/(?:issues|pull)/[0-9]+$";
const WIKI_PATH_PATTERN: &str = r"^/([A-Za-z0-9][A-Za-z0-9-]*)/([A-Za-z0-9_.-]+)/wiki(?:/[^/]+)*$";

static REPOSITORY_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(REPOSITORY_PATH_PATTERN, "REPOSITORY_PATH_RE"));
static ISSUE_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(ISSUE_PATH_PATTERN, "ISSUE_PATH_RE"));
static WIKI_PATH_RE: LazyLock<Regex> =
    LazyLock::new(|| compile_regex_unsafe(WIKI_PATH_PATTERN, "WIKI_PATH_RE"));

/// Extracts result URLs from a search-results page.
///
/// Each href is resolved against `base`, so relative (`/owner/repo`),
/// protocol-relative and absolute links are all accepted as long as they stay
/// on the base host. Query strings and fragments are dropped and a trailing
/// `/` is trimmed. Results keep document order and are not deduplicated.
///
/// # Errors
///
/// Returns `ParseError` only when the page has no markup at all. A page with
/// no matching anchors yields an empty vector.
pub fn extract_result_urls(
    html: &str,
    search_type: SearchType,
    base: &Url,
) -> Result<Vec<String>, ParseError> {
    let document = prepare_document(html)?;

    Ok(anchor_hrefs(&document)
        .filter_map(|href| resolve_result_url(&href, search_type, base))
        .collect())
}

/// Resolves one href and keeps it if it is a result of `search_type`.
fn resolve_result_url(href: &str, search_type: SearchType, base: &Url) -> Option<String> {
    let mut url = base.join(href).ok()?;
    if !matches!(url.scheme(), "http" | "https")
        || url.host_str() != base.host_str()
        || url.port_or_known_default() != base.port_or_known_default()
    {
        return None;
    }

    url.set_query(None);
    url.set_fragment(None);
    let path = url.path().trim_end_matches('/').to_string();
    if !path_matches(&path, search_type) {
        return None;
    }
    url.set_path(&path);

    Some(url.to_string())
}

fn path_matches(path: &str, search_type: SearchType) -> bool {
    let pattern: &Regex = match search_type {
        SearchType::Repositories => &REPOSITORY_PATH_RE,
        SearchType::Issues => &ISSUE_PATH_RE,
        SearchType::Wikis => &WIKI_PATH_RE,
    };
    let Some(caps) = pattern.captures(path) else {
        return false;
    };

    let owner = &caps[1];
    let repo = &caps[2];
    !is_reserved_route(owner) && repo != "." && repo != ".."
}

fn is_reserved_route(segment: &str) -> bool {
    RESERVED_ROUTES
        .iter()
        .any(|route| route.eq_ignore_ascii_case(segment))
}

/// Owner segment of a repository URL (`https://github.com/<owner>/<repo>`).
pub fn repository_owner(url: &str) -> Option<String> {
    let parsed = Url::parse(url).ok()?;
    parsed
        .path_segments()?
        .find(|segment| !segment.is_empty())
        .map(str::to_string)
}

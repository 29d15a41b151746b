//! Crawl data model: search categories, requests, results and per-keyword records.

use std::collections::BTreeMap;
use std::str::FromStr;

use serde::{Serialize, Serializer};
use strum_macros::{EnumIter, IntoStaticStr};

use crate::error_handling::CrawlError;
use crate::proxy::ProxyAddr;

/// Language name to percentage share, as shown in a repository's language bar.
pub type LanguageStats = BTreeMap<String, f64>;

/// GitHub search result category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIter, IntoStaticStr)]
#[strum(serialize_all = "lowercase")]
pub enum SearchType {
    /// `type=repositories`; results are enriched with language statistics
    Repositories,
    /// `type=issues`
    Issues,
    /// `type=wikis`
    Wikis,
}

impl SearchType {
    /// Value of the `type` query parameter.
    pub fn query_value(&self) -> &'static str {
        self.into()
    }
}

impl FromStr for SearchType {
    type Err = CrawlError;

    /// Parses `Repositories`, `Issues` or `Wikis`, ignoring case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "repositories" => Ok(SearchType::Repositories),
            "issues" => Ok(SearchType::Issues),
            "wikis" => Ok(SearchType::Wikis),
            _ => Err(CrawlError::config(format!("Unknown search_type: {}", s))),
        }
    }
}

/// One keyword's search request. Built fresh per keyword, used once.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    keyword: String,
    search_type: SearchType,
    proxy: Option<ProxyAddr>,
}

impl SearchRequest {
    pub fn new(keyword: impl Into<String>, search_type: SearchType, proxy: Option<ProxyAddr>) -> Self {
        Self {
            keyword: keyword.into(),
            search_type,
            proxy,
        }
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn proxy(&self) -> Option<&ProxyAddr> {
        self.proxy.as_ref()
    }
}

/// Repository metadata attached to Repositories results.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RepositoryDetails {
    /// First path segment of the repository URL
    pub owner: String,
    /// Empty when the language widget is absent or the page could not be fetched
    pub language_stats: LanguageStats,
}

/// A single extracted search result.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchResult {
    /// Absolute GitHub URL
    pub url: String,
    /// Present for Repositories results only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extra: Option<RepositoryDetails>,
}

impl SearchResult {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            extra: None,
        }
    }

    /// Language statistics, when this is an enriched repository result.
    pub fn language_stats(&self) -> Option<&LanguageStats> {
        self.extra.as_ref().map(|extra| &extra.language_stats)
    }
}

/// Outcome of crawling one keyword.
///
/// Serialized as `{"keyword": ..., "results": [...]}` on success and
/// `{"keyword": ..., "error": "..."}` on failure.
#[derive(Debug)]
pub struct KeywordRecord {
    pub keyword: String,
    pub outcome: Result<Vec<SearchResult>, CrawlError>,
}

impl KeywordRecord {
    pub fn is_success(&self) -> bool {
        self.outcome.is_ok()
    }

    /// Results for a successful keyword, `None` for a failed one.
    pub fn results(&self) -> Option<&[SearchResult]> {
        self.outcome.as_ref().ok().map(Vec::as_slice)
    }

    pub fn error(&self) -> Option<&CrawlError> {
        self.outcome.as_ref().err()
    }
}

#[derive(Serialize)]
struct KeywordRecordRepr<'a> {
    keyword: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    results: Option<&'a [SearchResult]>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

impl Serialize for KeywordRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        KeywordRecordRepr {
            keyword: &self.keyword,
            results: self.results(),
            error: self.error().map(ToString::to_string),
        }
        .serialize(serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error_handling::FetchError;
    use strum::IntoEnumIterator;

    #[test]
    fn test_search_type_parse_case_insensitive() {
        assert_eq!("Repositories".parse::<SearchType>().unwrap(), SearchType::Repositories);
        assert_eq!("issues".parse::<SearchType>().unwrap(), SearchType::Issues);
        assert_eq!("WIKIS".parse::<SearchType>().unwrap(), SearchType::Wikis);
    }

    #[test]
    fn test_search_type_parse_unknown_is_configuration_error() {
        let err = "wrong-type".parse::<SearchType>().unwrap_err();
        assert!(matches!(err, CrawlError::Configuration(_)));
        assert!(err.to_string().contains("Unknown search_type: wrong-type"));
    }

    #[test]
    fn test_search_type_query_value_is_lowercase() {
        let values: Vec<&str> = SearchType::iter().map(|t| t.query_value()).collect();
        assert_eq!(values, vec!["repositories", "issues", "wikis"]);
    }

    #[test]
    fn test_keyword_record_serializes_results() {
        let record = KeywordRecord {
            keyword: "openstack".into(),
            outcome: Ok(vec![SearchResult {
                url: "https://github.com/openstack/nova".into(),
                extra: Some(RepositoryDetails {
                    owner: "openstack".into(),
                    language_stats: LanguageStats::from([("Python".to_string(), 85.0)]),
                }),
            }]),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "keyword": "openstack",
                "results": [{
                    "url": "https://github.com/openstack/nova",
                    "extra": {"owner": "openstack", "language_stats": {"Python": 85.0}}
                }]
            })
        );
    }

    #[test]
    fn test_keyword_record_serializes_error() {
        let record = KeywordRecord {
            keyword: "nova".into(),
            outcome: Err(FetchError::status("nova", 404).into()),
        };
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["keyword"], "nova");
        assert!(json.get("results").is_none());
        assert_eq!(json["error"], "Failed to fetch data for 'nova'. HTTP Status Code: 404");
    }

    #[test]
    fn test_plain_result_omits_extra() {
        let json = serde_json::to_value(SearchResult::new("https://github.com/a/b/wiki/Home"))
            .unwrap();
        assert_eq!(json, serde_json::json!({"url": "https://github.com/a/b/wiki/Home"}));
    }
}

//! Crawl input document.

use std::path::Path;

use serde::Deserialize;

use crate::error_handling::CrawlError;

/// Keywords, proxies and search type for one crawl.
///
/// Deserialized from `{"keywords": [...], "proxies": [...], "type": "..."}`.
/// Every key is optional in the document so the command line can supply the
/// missing parts. Values are kept as strings here and validated by the crawler.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CrawlInput {
    /// Search keywords, crawled in this order
    #[serde(default)]
    pub keywords: Vec<String>,

    /// Proxy pool as `host:port` strings; empty means direct requests
    #[serde(default)]
    pub proxies: Vec<String>,

    /// `Repositories`, `Issues` or `Wikis`, any case
    #[serde(rename = "type", default)]
    pub search_type: Option<String>,
}

impl CrawlInput {
    /// Builds an input from in-memory values.
    pub fn new<K, P>(keywords: K, proxies: P, search_type: impl Into<String>) -> Self
    where
        K: IntoIterator,
        K::Item: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        Self {
            keywords: keywords.into_iter().map(Into::into).collect(),
            proxies: proxies.into_iter().map(Into::into).collect(),
            search_type: Some(search_type.into()),
        }
    }

    /// Parses an input document.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Configuration` if the text is not a valid input document.
    pub fn from_json_str(json: &str) -> Result<Self, CrawlError> {
        serde_json::from_str(json)
            .map_err(|e| CrawlError::config(format!("Invalid input document: {}", e)))
    }

    /// Reads and parses an input file.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Configuration` if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, CrawlError> {
        let text = std::fs::read_to_string(path).map_err(|e| {
            CrawlError::config(format!(
                "Failed to read input file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_json_str_full_document() {
        let input = CrawlInput::from_json_str(
            r#"{
                "keywords": ["openstack", "nova", "css"],
                "proxies": ["194.126.37.94:8080", "13.78.125.167:8080"],
                "type": "Repositories"
            }"#,
        )
        .unwrap();

        assert_eq!(input.keywords, vec!["openstack", "nova", "css"]);
        assert_eq!(input.proxies.len(), 2);
        assert_eq!(input.search_type.as_deref(), Some("Repositories"));
    }

    #[test]
    fn test_from_json_str_missing_keys_default() {
        let input = CrawlInput::from_json_str(r#"{"keywords": ["python"]}"#).unwrap();
        assert_eq!(input.keywords, vec!["python"]);
        assert!(input.proxies.is_empty());
        assert!(input.search_type.is_none());
    }

    #[test]
    fn test_from_json_str_rejects_wrong_shape() {
        let err = CrawlInput::from_json_str(r#"{"keywords": "python"}"#).unwrap_err();
        assert!(err.to_string().starts_with("Configuration error: Invalid input document"));

        assert!(CrawlInput::from_json_str("not json").is_err());
    }

    #[test]
    fn test_new_collects_values() {
        let input = CrawlInput::new(["openstack"], Vec::<String>::new(), "Wikis");
        assert_eq!(input.keywords, vec!["openstack"]);
        assert!(input.proxies.is_empty());
        assert_eq!(input.search_type.as_deref(), Some("Wikis"));
    }
}

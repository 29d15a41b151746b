//! HTTP request building.
//!
//! This module turns a [`SearchRequest`] into a fully formed GET description:
//! target URL with encoded query parameters, browser-like headers and the
//! proxy to route through.

use url::Url;

use crate::config::{ACCEPT_HTML, SEARCH_PATH};
use crate::error_handling::CrawlError;
use crate::models::SearchRequest;
use crate::proxy::ProxyAddr;

/// Realistic browser request headers to reduce bot detection.
///
/// These headers mimic a modern Chrome browser navigating to a page. GitHub
/// serves a reduced page (or a challenge) to clients that look automated, so
/// every request, search or repository page, carries the same set.
pub(crate) struct RequestHeaders;

impl RequestHeaders {
    /// Returns headers as (name, value) pairs, User-Agent first.
    pub(crate) fn as_vec(user_agent: &str) -> Vec<(&'static str, String)> {
        vec![
            ("user-agent", user_agent.to_string()),
            ("accept", ACCEPT_HTML.to_string()),
            ("accept-language", "en-US,en;q=0.9".to_string()),
            ("referer", "https://www.google.com/".to_string()),
            ("sec-fetch-dest", "document".to_string()),
            ("sec-fetch-mode", "navigate".to_string()),
            ("sec-fetch-site", "none".to_string()),
            ("sec-fetch-user", "?1".to_string()),
            ("upgrade-insecure-requests", "1".to_string()),
            ("cache-control", "max-age=0".to_string()),
        ]
    }
}

/// A GET request ready to hand to a [`crate::fetch::Transport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub url: Url,
    pub headers: Vec<(&'static str, String)>,
    /// `None` routes the request directly
    pub proxy: Option<ProxyAddr>,
}

impl HttpRequest {
    /// Looks up a header value by (lowercase) name.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

/// Builds search and repository page requests against one GitHub base URL.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    base_url: Url,
    search_url: Url,
    user_agent: String,
}

impl RequestBuilder {
    /// # Errors
    ///
    /// Returns `CrawlError::Configuration` if `base_url` is not an absolute
    /// http(s) URL.
    pub fn new(base_url: &str, user_agent: impl Into<String>) -> Result<Self, CrawlError> {
        let base_url = Url::parse(base_url)
            .map_err(|e| CrawlError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;
        if !matches!(base_url.scheme(), "http" | "https") || base_url.host_str().is_none() {
            return Err(CrawlError::config(format!(
                "Invalid base URL '{}': expected an http(s) URL",
                base_url
            )));
        }
        let search_url = base_url
            .join(SEARCH_PATH)
            .map_err(|e| CrawlError::config(format!("Invalid base URL '{}': {}", base_url, e)))?;

        Ok(Self {
            base_url,
            search_url,
            user_agent: user_agent.into(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds `GET <base>/search?q=<keyword>&type=<type>`.
    ///
    /// The keyword is form-encoded, so spaces become `+` and non-ASCII text is
    /// percent-encoded as UTF-8.
    pub fn build_search(&self, request: &SearchRequest) -> HttpRequest {
        let mut url = self.search_url.clone();
        url.query_pairs_mut()
            .clear()
            .append_pair("q", request.keyword())
            .append_pair("type", request.search_type().query_value());

        HttpRequest {
            url,
            headers: RequestHeaders::as_vec(&self.user_agent),
            proxy: request.proxy().cloned(),
        }
    }

    /// Builds a plain page request (repository detail pages).
    pub fn build_page(&self, url: Url, proxy: Option<&ProxyAddr>) -> HttpRequest {
        HttpRequest {
            url,
            headers: RequestHeaders::as_vec(&self.user_agent),
            proxy: proxy.cloned(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;
    use crate::models::SearchType;

    fn builder() -> RequestBuilder {
        RequestBuilder::new("https://github.com", DEFAULT_USER_AGENT).unwrap()
    }

    fn query_value(request: &HttpRequest, key: &str) -> Option<String> {
        request
            .url
            .query_pairs()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.into_owned())
    }

    #[test]
    fn test_search_request_target_and_params() {
        let request = builder().build_search(&SearchRequest::new(
            "openstack",
            SearchType::Repositories,
            None,
        ));
        assert_eq!(
            request.url.as_str(),
            "https://github.com/search?q=openstack&type=repositories"
        );
        assert_eq!(query_value(&request, "type").as_deref(), Some("repositories"));
    }

    #[test]
    fn test_type_param_is_lowercased() {
        for (search_type, expected) in [
            (SearchType::Issues, "issues"),
            (SearchType::Wikis, "wikis"),
        ] {
            let request = builder().build_search(&SearchRequest::new("nova", search_type, None));
            assert_eq!(query_value(&request, "type").as_deref(), Some(expected));
        }
    }

    #[test]
    fn test_unicode_keyword_is_percent_encoded_and_round_trips() {
        let request = builder().build_search(&SearchRequest::new("日本語", SearchType::Wikis, None));
        let query = request.url.query().unwrap();
        assert!(query.is_ascii());
        assert!(query.contains("q=%E6%97%A5%E6%9C%AC%E8%AA%9E"));
        assert_eq!(query_value(&request, "q").as_deref(), Some("日本語"));
    }

    #[test]
    fn test_reserved_characters_are_encoded() {
        let keyword = "c++ & rust=fast?";
        let request = builder().build_search(&SearchRequest::new(keyword, SearchType::Issues, None));
        assert!(!request.url.query().unwrap().contains(" "));
        assert_eq!(query_value(&request, "q").as_deref(), Some(keyword));
        assert_eq!(request.url.query_pairs().count(), 2);
    }

    #[test]
    fn test_browser_headers_present() {
        let request = builder().build_search(&SearchRequest::new("css", SearchType::Repositories, None));
        assert!(request.header("User-Agent").unwrap().starts_with("Mozilla/5.0"));
        assert!(request.header("accept").unwrap().starts_with("text/html"));
        assert_eq!(request.header("sec-fetch-mode"), Some("navigate"));
    }

    #[test]
    fn test_proxy_is_carried_or_direct() {
        let proxy: ProxyAddr = "13.78.125.167:8080".parse().unwrap();
        let routed = builder().build_search(&SearchRequest::new(
            "css",
            SearchType::Repositories,
            Some(proxy.clone()),
        ));
        assert_eq!(routed.proxy, Some(proxy));

        let direct = builder().build_search(&SearchRequest::new("css", SearchType::Repositories, None));
        assert_eq!(direct.proxy, None);
    }

    #[test]
    fn test_base_url_with_port_is_respected() {
        let builder = RequestBuilder::new("http://127.0.0.1:8081", "test-agent").unwrap();
        let request = builder.build_search(&SearchRequest::new("x", SearchType::Issues, None));
        assert_eq!(request.url.as_str(), "http://127.0.0.1:8081/search?q=x&type=issues");
        assert_eq!(request.header("user-agent"), Some("test-agent"));
    }

    #[test]
    fn test_invalid_base_url_is_configuration_error() {
        for bad in ["not a url", "ftp://github.com", "mailto:someone@example.com"] {
            assert!(matches!(
                RequestBuilder::new(bad, DEFAULT_USER_AGENT),
                Err(CrawlError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_page_request_keeps_url_and_proxy() {
        let url = Url::parse("https://github.com/openstack/nova").unwrap();
        let proxy: ProxyAddr = "1.2.3.4:3128".parse().unwrap();
        let request = builder().build_page(url.clone(), Some(&proxy));
        assert_eq!(request.url, url);
        assert_eq!(request.proxy, Some(proxy));
        assert!(request.header("accept").is_some());
    }
}

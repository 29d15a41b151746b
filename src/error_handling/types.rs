//! Error type definitions.
//!
//! This module defines all error and warning types used throughout the crawler.

use std::fmt;
use std::time::Duration;

use log::SetLoggerError;
use reqwest::Error as ReqwestError;
use strum_macros::EnumIter as EnumIterMacro;
use thiserror::Error;

/// Error types for initialization failures.
#[derive(Error, Debug)]
#[allow(clippy::enum_variant_names)] // All variants end with "Error" by convention
pub enum InitializationError {
    /// Error initializing the logger.
    #[error("Logger initialization error: {0}")]
    LoggerError(#[from] SetLoggerError),

    /// Error initializing an HTTP client.
    #[error("HTTP client initialization error: {0}")]
    HttpClientError(#[from] ReqwestError),
}

/// Errors surfaced by the crawler.
///
/// `Configuration` is fatal and raised before any request is sent. `Fetch` and
/// `Parse` are scoped to a single keyword and stored in that keyword's record.
#[derive(Error, Debug)]
pub enum CrawlError {
    /// Invalid search type, malformed proxy, missing keywords, unreadable input.
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// The keyword's search page could not be fetched.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The keyword's search page could not be parsed at all.
    #[error("Failed to parse results for '{keyword}': {source}")]
    Parse {
        /// Keyword whose page failed to parse
        keyword: String,
        /// Underlying parse failure
        #[source]
        source: ParseError,
    },
}

impl CrawlError {
    /// Shorthand for a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        CrawlError::Configuration(message.into())
    }
}

/// A keyword's search request failed: non-2xx status or transport failure.
#[derive(Error, Debug)]
pub struct FetchError {
    /// Keyword whose search request failed
    pub keyword: String,
    /// HTTP status, when a response was received
    pub status: Option<u16>,
    /// Transport failure description, when no response was received
    pub reason: Option<String>,
}

impl FetchError {
    pub(crate) fn status(keyword: &str, status: u16) -> Self {
        Self {
            keyword: keyword.to_string(),
            status: Some(status),
            reason: None,
        }
    }

    pub(crate) fn transport(keyword: &str, error: &TransportError) -> Self {
        Self {
            keyword: keyword.to_string(),
            status: None,
            reason: Some(error.to_string()),
        }
    }
}

impl fmt::Display for FetchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.status, &self.reason) {
            (Some(status), _) => write!(
                f,
                "Failed to fetch data for '{}'. HTTP Status Code: {}",
                self.keyword, status
            ),
            (None, Some(reason)) => {
                write!(f, "Failed to fetch data for '{}': {}", self.keyword, reason)
            }
            (None, None) => write!(f, "Failed to fetch data for '{}'", self.keyword),
        }
    }
}

/// The document is not well-formed enough to locate any markup.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// Empty or whitespace-only body.
    #[error("document is empty")]
    EmptyDocument,

    /// Body without a single tag.
    #[error("document contains no HTML markup")]
    NoMarkup,
}

/// Failures reported by a [`crate::fetch::Transport`].
#[derive(Error, Debug)]
pub enum TransportError {
    /// The underlying HTTP client failed (connect, timeout, body, ...).
    #[error("HTTP request failed: {0}")]
    Http(#[from] ReqwestError),

    /// The request names a proxy that has no pre-built client.
    #[error("No HTTP client configured for proxy {0}")]
    UnknownProxy(String),

    /// The crawler's outer deadline elapsed before the transport answered.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

/// Types of errors that can occur while crawling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum ErrorType {
    // HTTP/Network errors
    HttpRequestBuilderError,
    HttpRequestTimeoutError,
    HttpRequestConnectError,
    HttpRequestRequestError,
    HttpRequestBodyError,
    HttpRequestDecodeError,
    HttpRequestOtherError,
    HttpRequestTooManyRequests,
    HttpRequestBotDetectionError, // 403 Forbidden - typically bot detection
    HttpRequestNotFound,          // 404 Not Found
    HttpRequestServiceUnavailable, // 503 Service Unavailable
    HttpRequestClientError,       // other 4xx
    HttpRequestServerError,       // other 5xx
    ProxyNotConfigured,
    // Extraction errors
    SearchPageParseError,
    RepositoryPageParseError,
    // Enrichment fetch failures (swallowed, counted only)
    EnrichmentFetchError,
}

/// Types of warnings that can occur while crawling.
///
/// Warnings indicate missing data that doesn't fail a keyword.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, EnumIterMacro)]
pub enum WarningType {
    NoSearchResults,     // Search page had no matching anchors
    MissingLanguageStats, // Repository page had no language widget
}

impl fmt::Display for ErrorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl ErrorType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorType::HttpRequestBuilderError => "HTTP request builder error",
            ErrorType::HttpRequestTimeoutError => "HTTP request timeout error",
            ErrorType::HttpRequestConnectError => "HTTP request connect error",
            ErrorType::HttpRequestRequestError => "HTTP request error",
            ErrorType::HttpRequestBodyError => "HTTP request body error",
            ErrorType::HttpRequestDecodeError => "HTTP request decode error",
            ErrorType::HttpRequestOtherError => "HTTP request other error",
            ErrorType::HttpRequestTooManyRequests => "Too many requests (429)",
            ErrorType::HttpRequestBotDetectionError => "Bot detection (403 Forbidden)",
            ErrorType::HttpRequestNotFound => "Not Found (404)",
            ErrorType::HttpRequestServiceUnavailable => "Service Unavailable (503)",
            ErrorType::HttpRequestClientError => "Other client error (4xx)",
            ErrorType::HttpRequestServerError => "Other server error (5xx)",
            ErrorType::ProxyNotConfigured => "Proxy not configured",
            ErrorType::SearchPageParseError => "Search page parse error",
            ErrorType::RepositoryPageParseError => "Repository page parse error",
            ErrorType::EnrichmentFetchError => "Repository page fetch error",
        }
    }
}

impl fmt::Display for WarningType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl WarningType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WarningType::NoSearchResults => "No search results",
            WarningType::MissingLanguageStats => "Missing language statistics",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fetch_error_display_with_status() {
        let err = FetchError::status("nova", 429);
        assert_eq!(
            err.to_string(),
            "Failed to fetch data for 'nova'. HTTP Status Code: 429"
        );
    }

    #[test]
    fn test_fetch_error_display_with_reason() {
        let err = FetchError::transport("nova", &TransportError::Other("refused".into()));
        assert_eq!(err.to_string(), "Failed to fetch data for 'nova': refused");
        assert_eq!(err.status, None);
    }

    #[test]
    fn test_crawl_error_fetch_is_transparent() {
        let err = CrawlError::from(FetchError::status("css", 404));
        assert_eq!(
            err.to_string(),
            "Failed to fetch data for 'css'. HTTP Status Code: 404"
        );
    }

    #[test]
    fn test_parse_error_display() {
        let err = CrawlError::Parse {
            keyword: "css".into(),
            source: ParseError::EmptyDocument,
        };
        assert_eq!(
            err.to_string(),
            "Failed to parse results for 'css': document is empty"
        );
    }

    #[test]
    fn test_configuration_error_display() {
        let err = CrawlError::config("Unknown search_type: wrong-type");
        assert_eq!(
            err.to_string(),
            "Configuration error: Unknown search_type: wrong-type"
        );
    }
}

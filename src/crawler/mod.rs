//! Keyword crawl orchestration.
//!
//! For every keyword the crawler picks a proxy, fetches the search page,
//! extracts result URLs and, for Repositories searches, enriches each result
//! from its repository page. Keywords run concurrently with ordered
//! buffering, so records come back in input order. A keyword's fetch or parse
//! failure is recorded on that keyword only.

mod enrichment;

use std::time::Duration;

use futures::stream::{self, StreamExt};
use log::{debug, info, warn};
use rand::Rng;

use crate::config::{
    CrawlInput, DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_SECS,
    DEFAULT_USER_AGENT, REQUEST_TIMEOUT_GRACE,
};
use crate::error_handling::{
    categorize_status, update_error_stats, CrawlError, ErrorType, FetchError, ProcessingStats,
    TransportError, WarningType,
};
use crate::fetch::{HttpRequest, HttpResponse, RequestBuilder, Transport};
use crate::models::{KeywordRecord, SearchRequest, SearchResult, SearchType};
use crate::parse::extract_result_urls;
use crate::proxy::ProxyPool;

/// Tunables for a crawl that do not come from the input document.
#[derive(Debug, Clone)]
pub struct CrawlOptions {
    /// Base URL search and repository requests are resolved against
    pub base_url: String,
    /// User-Agent sent with every request
    pub user_agent: String,
    /// In-flight limit for keywords, and separately for each keyword's repository pages
    pub max_concurrency: usize,
    /// Client-side request timeout; the crawler gives up slightly after it
    pub request_timeout: Duration,
}

impl Default for CrawlOptions {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// A validated crawl, ready to run against a [`Transport`].
pub struct Crawler<T: Transport> {
    keywords: Vec<String>,
    search_type: SearchType,
    pool: ProxyPool,
    builder: RequestBuilder,
    transport: T,
    max_concurrency: usize,
    deadline: Duration,
    stats: ProcessingStats,
}

impl<T: Transport> Crawler<T> {
    /// Validates the input and options. Nothing is sent over the network.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Configuration` for a missing or unknown search
    /// type, a malformed proxy, an empty keyword list, an invalid base URL, or
    /// a zero concurrency limit.
    pub fn new(input: CrawlInput, options: CrawlOptions, transport: T) -> Result<Self, CrawlError> {
        let search_type: SearchType = input
            .search_type
            .as_deref()
            .ok_or_else(|| CrawlError::config("Missing search type"))?
            .parse()?;
        let pool = ProxyPool::parse(&input.proxies)?;
        if input.keywords.is_empty() {
            return Err(CrawlError::config("No keywords provided"));
        }
        if options.max_concurrency == 0 {
            return Err(CrawlError::config("max_concurrency must be at least 1"));
        }
        let builder = RequestBuilder::new(&options.base_url, options.user_agent)?;

        Ok(Self {
            keywords: input.keywords,
            search_type,
            pool,
            builder,
            transport,
            max_concurrency: options.max_concurrency,
            deadline: options.request_timeout + REQUEST_TIMEOUT_GRACE,
            stats: ProcessingStats::new(),
        })
    }

    pub fn search_type(&self) -> SearchType {
        self.search_type
    }

    pub fn keywords(&self) -> &[String] {
        &self.keywords
    }

    /// Error and warning counters accumulated by all searches so far.
    pub fn stats(&self) -> &ProcessingStats {
        &self.stats
    }

    /// Crawls every keyword, picking proxies with the thread-local RNG.
    pub async fn search(&self) -> Vec<KeywordRecord> {
        let requests = {
            let mut rng = rand::rng();
            self.plan(&mut rng)
        };
        self.run(requests).await
    }

    /// Crawls every keyword, picking proxies with `rng`.
    ///
    /// All proxies are picked before the first request, in keyword order, so a
    /// seeded RNG gives a reproducible keyword-to-proxy assignment.
    pub async fn search_with_rng<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<KeywordRecord> {
        let requests = self.plan(rng);
        self.run(requests).await
    }

    fn plan<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec<SearchRequest> {
        self.keywords
            .iter()
            .map(|keyword| SearchRequest::new(keyword.clone(), self.search_type, self.pool.select(rng).cloned()))
            .collect()
    }

    async fn run(&self, requests: Vec<SearchRequest>) -> Vec<KeywordRecord> {
        info!(
            "Crawling {} keyword(s) for {} via {} proxy(ies)",
            requests.len(),
            self.search_type.query_value(),
            self.pool.len()
        );

        stream::iter(requests)
            .map(|request| self.process_keyword(request))
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    async fn process_keyword(&self, request: SearchRequest) -> KeywordRecord {
        let outcome = self.crawl_keyword(&request).await;
        match &outcome {
            Ok(results) => info!(
                "Keyword '{}': {} result(s)",
                request.keyword(),
                results.len()
            ),
            Err(e) => warn!("Keyword '{}' failed: {}", request.keyword(), e),
        }

        KeywordRecord {
            keyword: request.keyword().to_string(),
            outcome,
        }
    }

    async fn crawl_keyword(&self, request: &SearchRequest) -> Result<Vec<SearchResult>, CrawlError> {
        let keyword = request.keyword();
        let http_request = self.builder.build_search(request);

        let response = self.fetch(&http_request).await.map_err(|e| {
            update_error_stats(&self.stats, &e);
            FetchError::transport(keyword, &e)
        })?;
        if !response.is_success() {
            self.stats.increment_error(categorize_status(response.status));
            return Err(FetchError::status(keyword, response.status).into());
        }

        let urls = extract_result_urls(&response.body, self.search_type, self.builder.base_url())
            .map_err(|source| {
                self.stats.increment_error(ErrorType::SearchPageParseError);
                CrawlError::Parse {
                    keyword: keyword.to_string(),
                    source,
                }
            })?;
        if urls.is_empty() {
            self.stats.increment_warning(WarningType::NoSearchResults);
        }

        let results = match self.search_type {
            SearchType::Repositories => self.enrich_repositories(urls, request.proxy()).await,
            SearchType::Issues | SearchType::Wikis => urls.into_iter().map(SearchResult::new).collect(),
        };
        Ok(results)
    }

    /// Sends one request, bounded by the crawler's own deadline.
    async fn fetch(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        match &request.proxy {
            Some(proxy) => debug!("GET {} via {}", request.url, proxy),
            None => debug!("GET {} (direct)", request.url),
        }
        tokio::time::timeout(self.deadline, self.transport.get(request))
            .await
            .map_err(|_| TransportError::Timeout(self.deadline))?
    }
}

#[cfg(test)]
mod tests {
    include!("tests.rs");
}

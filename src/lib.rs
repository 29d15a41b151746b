//! github_crawler library: GitHub search-result crawling
//!
//! This library fetches GitHub's search-results page for each keyword in a
//! list, extracts the result URLs for one category (Repositories, Issues or
//! Wikis) and, for repositories, the owner and language breakdown from each
//! repository page. Requests rotate over an optional proxy pool and carry
//! browser-like headers.
//!
//! # Example
//!
//! ```no_run
//! use github_crawler::{run_search, Config};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = Config {
//!     keywords: vec!["openstack".into(), "nova".into()],
//!     proxies: vec!["194.126.37.94:8080".into()],
//!     search_type: Some("Repositories".into()),
//!     ..Default::default()
//! };
//!
//! let report = run_search(config).await?;
//! println!("{}", report.to_json(true)?);
//! # Ok(())
//! # }
//! ```
//!
//! For finer control (custom transports, seeded proxy selection) build a
//! [`Crawler`] directly.
//!
//! # Requirements
//!
//! This library requires a Tokio runtime.

mod app;
pub mod config;
pub mod crawler;
pub mod error_handling;
pub mod fetch;
pub mod initialization;
pub mod models;
pub mod parse;
pub mod proxy;
mod utils;

// Re-export public API
pub use config::{Config, CrawlInput, LogFormat, LogLevel};
pub use crawler::{CrawlOptions, Crawler};
pub use error_handling::{CrawlError, FetchError, ParseError};
pub use fetch::{HttpRequest, HttpResponse, ReqwestTransport, Transport};
pub use models::{KeywordRecord, LanguageStats, RepositoryDetails, SearchResult, SearchType};
pub use run::{run_search, SearchReport};

// Internal run module (wires configuration, transport and crawler together)
mod run {
    use std::time::Instant;

    use anyhow::{Context, Result};
    use log::info;

    use crate::app::print_final_statistics;
    use crate::config::Config;
    use crate::crawler::{CrawlOptions, Crawler};
    use crate::fetch::ReqwestTransport;
    use crate::initialization::ClientSettings;
    use crate::models::KeywordRecord;
    use crate::proxy::ProxyPool;

    /// Results of a crawl run.
    #[derive(Debug)]
    pub struct SearchReport {
        /// One record per keyword, in input order
        pub records: Vec<KeywordRecord>,
        /// Number of keywords crawled
        pub total_keywords: usize,
        /// Keywords whose search page was fetched and parsed
        pub successful: usize,
        /// Keywords that ended with a fetch or parse error
        pub failed: usize,
        /// Elapsed time in seconds
        pub elapsed_seconds: f64,
    }

    impl SearchReport {
        /// Serializes the records as a JSON array.
        ///
        /// # Errors
        ///
        /// Returns the `serde_json` error if serialization fails.
        pub fn to_json(&self, pretty: bool) -> serde_json::Result<String> {
            if pretty {
                serde_json::to_string_pretty(&self.records)
            } else {
                serde_json::to_string(&self.records)
            }
        }
    }

    /// Runs a crawl with the provided configuration.
    ///
    /// Resolves the input (file plus command-line values), builds one HTTP
    /// client per proxy plus a direct client, crawls every keyword and logs
    /// the statistics.
    ///
    /// # Errors
    ///
    /// Returns an error, before any request is sent, if:
    /// - The input file cannot be read or parsed
    /// - The search type is missing or unknown, a proxy is malformed, or no
    ///   keywords were given
    /// - The HTTP clients cannot be built
    ///
    /// Per-keyword fetch and parse failures are not errors here; they are
    /// recorded in the report.
    pub async fn run_search(config: Config) -> Result<SearchReport> {
        let start = Instant::now();

        let input = config
            .resolve_input()
            .context("Failed to resolve crawl input")?;
        let pool = ProxyPool::parse(&input.proxies).context("Invalid proxy list")?;

        let settings = ClientSettings {
            timeout: config.request_timeout(),
            user_agent: config.user_agent.clone(),
        };
        let transport = ReqwestTransport::new(&settings, &pool)
            .context("Failed to initialize HTTP clients")?;

        let options = CrawlOptions {
            base_url: config.base_url.clone(),
            user_agent: config.user_agent.clone(),
            max_concurrency: config.max_concurrency,
            request_timeout: config.request_timeout(),
        };
        let crawler =
            Crawler::new(input, options, transport).context("Invalid crawl configuration")?;

        info!(
            "Starting crawl: {} keyword(s), type {}",
            crawler.keywords().len(),
            crawler.search_type().query_value()
        );
        let records = crawler.search().await;

        let total_keywords = records.len();
        let successful = records.iter().filter(|r| r.is_success()).count();
        let failed = total_keywords - successful;
        let elapsed_seconds = start.elapsed().as_secs_f64();

        print_final_statistics(
            crawler.stats(),
            total_keywords,
            successful,
            failed,
            elapsed_seconds,
        );

        Ok(SearchReport {
            records,
            total_keywords,
            successful,
            failed,
            elapsed_seconds,
        })
    }
}

//! Repository enrichment: owner and language breakdown per result.
//!
//! Best-effort. A repository page that cannot be fetched or parsed leaves that
//! result with an empty language map; it never fails the keyword.

use futures::stream::{self, StreamExt};
use log::debug;
use thiserror::Error;
use url::Url;

use super::Crawler;
use crate::error_handling::{ErrorType, ParseError, TransportError, WarningType};
use crate::fetch::Transport;
use crate::models::{LanguageStats, RepositoryDetails, SearchResult};
use crate::parse::{extract_language_stats, repository_owner};
use crate::proxy::ProxyAddr;

#[derive(Error, Debug)]
enum EnrichmentError {
    #[error("invalid repository URL: {0}")]
    Url(#[from] url::ParseError),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("HTTP Status Code: {0}")]
    Status(u16),

    #[error("unparseable repository page: {0}")]
    Parse(#[from] ParseError),
}

impl<T: Transport> Crawler<T> {
    /// Attaches owner and language stats to every repository URL, in order.
    pub(super) async fn enrich_repositories(
        &self,
        urls: Vec<String>,
        proxy: Option<&ProxyAddr>,
    ) -> Vec<SearchResult> {
        stream::iter(urls)
            .map(|url| async move {
                let details = self.repository_details(&url, proxy).await;
                SearchResult {
                    url,
                    extra: Some(details),
                }
            })
            .buffered(self.max_concurrency)
            .collect()
            .await
    }

    async fn repository_details(&self, url: &str, proxy: Option<&ProxyAddr>) -> RepositoryDetails {
        let language_stats = match self.fetch_language_stats(url, proxy).await {
            Ok(stats) => {
                if stats.is_empty() {
                    self.stats.increment_warning(WarningType::MissingLanguageStats);
                }
                stats
            }
            Err(e) => {
                debug!("Enrichment of {} failed, keeping empty stats: {}", url, e);
                self.stats.increment_error(match e {
                    EnrichmentError::Parse(_) => ErrorType::RepositoryPageParseError,
                    _ => ErrorType::EnrichmentFetchError,
                });
                LanguageStats::new()
            }
        };

        RepositoryDetails {
            owner: repository_owner(url).unwrap_or_default(),
            language_stats,
        }
    }

    async fn fetch_language_stats(
        &self,
        url: &str,
        proxy: Option<&ProxyAddr>,
    ) -> Result<LanguageStats, EnrichmentError> {
        let request = self.builder.build_page(Url::parse(url)?, proxy);
        let response = self.fetch(&request).await?;
        if !response.is_success() {
            return Err(EnrichmentError::Status(response.status));
        }
        Ok(extract_language_stats(&response.body)?)
    }
}

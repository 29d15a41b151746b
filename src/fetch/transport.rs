//! Transport abstraction over "perform GET, return status and body".
//!
//! The crawler only talks to [`Transport`]. [`ReqwestTransport`] is the
//! production implementation; tests substitute in-memory transports.

use std::collections::HashMap;

use async_trait::async_trait;

use super::request::HttpRequest;
use crate::error_handling::{InitializationError, TransportError};
use crate::initialization::{init_client, ClientSettings};
use crate::proxy::{ProxyAddr, ProxyPool};

/// Status and body of a completed GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Performs a GET described by an [`HttpRequest`].
///
/// Implementations must not retry; a non-2xx status is a normal response, not
/// an error.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `reqwest`-backed transport.
///
/// Proxies are configured per client in `reqwest`, so one client is built per
/// pool entry up front, plus one direct client. The map is read-only after
/// construction.
pub struct ReqwestTransport {
    direct: reqwest::Client,
    proxied: HashMap<ProxyAddr, reqwest::Client>,
}

impl ReqwestTransport {
    /// # Errors
    ///
    /// Returns `InitializationError::HttpClientError` if any client fails to build.
    pub fn new(settings: &ClientSettings, pool: &ProxyPool) -> Result<Self, InitializationError> {
        let direct = init_client(settings, None)?;
        let mut proxied = HashMap::with_capacity(pool.len());
        for proxy in pool.iter() {
            if !proxied.contains_key(proxy) {
                proxied.insert(proxy.clone(), init_client(settings, Some(proxy))?);
            }
        }
        log::debug!(
            "HTTP transport ready: direct client + {} proxied client(s)",
            proxied.len()
        );
        Ok(Self { direct, proxied })
    }

    fn client_for(&self, proxy: Option<&ProxyAddr>) -> Result<&reqwest::Client, TransportError> {
        match proxy {
            None => Ok(&self.direct),
            Some(proxy) => self
                .proxied
                .get(proxy)
                .ok_or_else(|| TransportError::UnknownProxy(proxy.to_string())),
        }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn get(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        let client = self.client_for(request.proxy.as_ref())?;

        let mut builder = client.get(request.url.clone());
        for (name, value) in &request.headers {
            builder = builder.header(*name, value);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(HttpResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use url::Url;

    fn settings() -> ClientSettings {
        ClientSettings {
            timeout: Duration::from_secs(2),
            user_agent: "test-agent".to_string(),
        }
    }

    #[test]
    fn test_http_response_success_range() {
        let ok = HttpResponse { status: 204, body: String::new() };
        let not_found = HttpResponse { status: 404, body: String::new() };
        let redirect = HttpResponse { status: 301, body: String::new() };
        assert!(ok.is_success());
        assert!(!not_found.is_success());
        assert!(!redirect.is_success());
    }

    #[test]
    fn test_transport_builds_one_client_per_distinct_proxy() {
        let pool = ProxyPool::parse(&["10.0.0.1:80", "10.0.0.2:80", "10.0.0.1:80"]).unwrap();
        let transport = ReqwestTransport::new(&settings(), &pool).unwrap();
        assert_eq!(transport.proxied.len(), 2);
    }

    #[tokio::test]
    async fn test_unknown_proxy_is_rejected_without_network() {
        let transport = ReqwestTransport::new(&settings(), &ProxyPool::default()).unwrap();
        let request = HttpRequest {
            url: Url::parse("https://github.com/search?q=x&type=issues").unwrap(),
            headers: Vec::new(),
            proxy: Some("10.9.9.9:8080".parse().unwrap()),
        };
        let err = transport.get(&request).await.unwrap_err();
        assert!(matches!(err, TransportError::UnknownProxy(p) if p == "10.9.9.9:8080"));
    }
}

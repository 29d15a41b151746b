//! HTTP client initialization.
//!
//! This module builds the `reqwest` clients used by the transport: one client
//! per configured proxy and one for direct requests.

use std::time::Duration;

use reqwest::{ClientBuilder, Proxy};

use crate::config::TCP_CONNECT_TIMEOUT_SECS;
use crate::error_handling::InitializationError;
use crate::proxy::ProxyAddr;

/// Client settings shared by every client the transport builds.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Global per-request timeout
    pub timeout: Duration,
    /// Default User-Agent (requests also set it explicitly)
    pub user_agent: String,
}

/// Initializes an HTTP client, optionally routed through a proxy.
///
/// Creates a `reqwest::Client` configured with:
/// - User-Agent header from settings
/// - Global timeout from settings plus a TCP connect timeout, so an
///   unreachable proxy fails fast
/// - Redirect following (GitHub redirects renamed repositories)
///
/// A direct client ignores `HTTP_PROXY`/`HTTPS_PROXY` from the environment,
/// so "no proxy" always means a direct connection.
///
/// # Errors
///
/// Returns `InitializationError::HttpClientError` if the proxy URL is rejected
/// or client creation fails.
pub fn init_client(
    settings: &ClientSettings,
    proxy: Option<&ProxyAddr>,
) -> Result<reqwest::Client, InitializationError> {
    let mut builder = ClientBuilder::new()
        .timeout(settings.timeout)
        .connect_timeout(Duration::from_secs(TCP_CONNECT_TIMEOUT_SECS))
        .user_agent(settings.user_agent.clone());

    builder = match proxy {
        Some(proxy) => builder.proxy(Proxy::all(proxy.to_url())?),
        None => builder.no_proxy(),
    };

    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::DEFAULT_USER_AGENT;

    fn settings() -> ClientSettings {
        ClientSettings {
            timeout: Duration::from_secs(5),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }

    #[test]
    fn test_init_direct_client() {
        assert!(init_client(&settings(), None).is_ok());
    }

    #[test]
    fn test_init_proxied_client() {
        let proxy: ProxyAddr = "127.0.0.1:3128".parse().unwrap();
        assert!(init_client(&settings(), Some(&proxy)).is_ok());
    }
}

//! Proxy pool and per-request proxy selection.
//!
//! Proxies are plain `host:port` strings (IPv6 hosts in brackets). They are
//! validated once when the
//! pool is built, then selected uniformly at random for every keyword. The
//! pool is never mutated, so it can be shared freely between concurrent
//! requests.

use std::fmt;
use std::str::FromStr;

use rand::seq::IndexedRandom;
use rand::Rng;
use url::Url;

use crate::error_handling::CrawlError;

/// A validated `host:port` proxy address.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ProxyAddr {
    host: String,
    port: u16,
}

impl ProxyAddr {
    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Proxy URL understood by the HTTP client (`http://host:port`).
    pub fn to_url(&self) -> String {
        format!("http://{}", self)
    }
}

impl fmt::Display for ProxyAddr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl FromStr for ProxyAddr {
    type Err = CrawlError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let malformed = || CrawlError::config(format!("Malformed proxy '{}': expected host:port", s));

        let trimmed = s.trim();
        let (host, port) = trimmed.rsplit_once(':').ok_or_else(malformed)?;
        if host.is_empty()
            || host.contains('/')
            || host.chars().any(char::is_whitespace)
        {
            return Err(malformed());
        }
        let port: u16 = port.parse().map_err(|_| malformed())?;
        if port == 0 {
            return Err(malformed());
        }

        // The host must survive URL parsing as-is: no userinfo, path, query or fragment
        let url = Url::parse(&format!("http://{}:{}", host, port)).map_err(|_| malformed())?;
        let host_matches = url
            .host_str()
            .is_some_and(|parsed| parsed.eq_ignore_ascii_case(host));
        if !host_matches
            || !url.username().is_empty()
            || url.password().is_some()
            || url.path() != "/"
            || url.query().is_some()
            || url.fragment().is_some()
            || url.port_or_known_default() != Some(port)
        {
            return Err(malformed());
        }

        Ok(Self {
            host: host.to_string(),
            port,
        })
    }
}

/// Ordered, immutable pool of proxies. May be empty (direct requests).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProxyPool {
    proxies: Vec<ProxyAddr>,
}

impl ProxyPool {
    /// Validates every entry; the first malformed one is a configuration error.
    pub fn parse<S: AsRef<str>>(entries: &[S]) -> Result<Self, CrawlError> {
        let proxies = entries
            .iter()
            .map(|entry| entry.as_ref().parse())
            .collect::<Result<Vec<ProxyAddr>, _>>()?;
        Ok(Self { proxies })
    }

    pub fn is_empty(&self) -> bool {
        self.proxies.is_empty()
    }

    pub fn len(&self) -> usize {
        self.proxies.len()
    }

    pub fn as_slice(&self) -> &[ProxyAddr] {
        &self.proxies
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProxyAddr> {
        self.proxies.iter()
    }

    /// Picks a proxy for the next request; see [`select_proxy`].
    pub fn select<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<&ProxyAddr> {
        select_proxy(&self.proxies, rng)
    }
}

/// Chooses one proxy uniformly at random.
///
/// An empty pool yields `None`, meaning the request goes out directly. No state
/// is carried between calls, so the same proxy may be picked repeatedly.
pub fn select_proxy<'a, R: Rng + ?Sized>(pool: &'a [ProxyAddr], rng: &mut R) -> Option<&'a ProxyAddr> {
    pool.choose(rng)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::collections::HashSet;

    fn pool(entries: &[&str]) -> ProxyPool {
        ProxyPool::parse(entries).unwrap()
    }

    #[test]
    fn test_parse_valid_proxy() {
        let proxy: ProxyAddr = "194.126.37.94:8080".parse().unwrap();
        assert_eq!(proxy.host(), "194.126.37.94");
        assert_eq!(proxy.port(), 8080);
        assert_eq!(proxy.to_string(), "194.126.37.94:8080");
        assert_eq!(proxy.to_url(), "http://194.126.37.94:8080");
    }

    #[test]
    fn test_parse_hostname_proxy() {
        let proxy: ProxyAddr = "proxy.internal:3128".parse().unwrap();
        assert_eq!(proxy.host(), "proxy.internal");
    }

    #[test]
    fn test_parse_bracketed_ipv6_proxy() {
        let proxy: ProxyAddr = "[::1]:8080".parse().unwrap();
        assert_eq!(proxy.host(), "[::1]");
        assert_eq!(proxy.port(), 8080);
        assert_eq!(proxy.to_url(), "http://[::1]:8080");
    }

    #[test]
    fn test_parse_default_http_port_and_mixed_case_host() {
        let proxy: ProxyAddr = " Proxy.Internal:80 ".parse().unwrap();
        assert_eq!(proxy.host(), "Proxy.Internal");
        assert_eq!(proxy.port(), 80);
    }

    #[test]
    fn test_parse_malformed_proxies() {
        let bad_entries = [
            "",
            "no-port",
            ":8080",
            "host:",
            "host:http",
            "host:70000",
            "host:0",
            "http://h:80",
            "a b:80",
            "ho#st:80",
            "a?b:80",
            "::1:80",
            "a%zz:80",
            "[::1:80",
            "user@host:80",
        ];
        for bad in bad_entries {
            let result = bad.parse::<ProxyAddr>();
            assert!(
                matches!(result, Err(CrawlError::Configuration(_))),
                "'{}' should be rejected",
                bad
            );
        }
    }

    #[test]
    fn test_pool_rejects_first_malformed_entry() {
        let err = ProxyPool::parse(&["1.2.3.4:80", "broken"]).unwrap_err();
        assert!(err.to_string().contains("broken"));
    }

    #[test]
    fn test_empty_pool_selects_nothing() {
        let empty = ProxyPool::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..100 {
            assert!(empty.select(&mut rng).is_none());
        }
    }

    #[test]
    fn test_selection_covers_whole_pool() {
        let pool = pool(&["10.0.0.1:80", "10.0.0.2:80", "10.0.0.3:80", "10.0.0.4:80"]);
        let mut rng = StdRng::seed_from_u64(42);
        let mut seen = HashSet::new();
        for _ in 0..1000 {
            let picked = pool.select(&mut rng).unwrap();
            assert!(pool.as_slice().contains(picked), "selected proxy outside the pool");
            seen.insert(picked.clone());
        }
        assert_eq!(seen.len(), pool.len());
    }

    #[test]
    fn test_selection_is_deterministic_under_seed() {
        let pool = pool(&["10.0.0.1:80", "10.0.0.2:80", "10.0.0.3:80"]);
        let picks = |seed| {
            let mut rng = StdRng::seed_from_u64(seed);
            (0..20)
                .map(|_| pool.select(&mut rng).cloned())
                .collect::<Vec<_>>()
        };
        assert_eq!(picks(3), picks(3));
    }

    #[test]
    fn test_single_entry_pool_always_selected() {
        let pool = pool(&["51.91.109.83:80"]);
        let mut rng = rand::rng();
        for _ in 0..10 {
            assert_eq!(pool.select(&mut rng).unwrap().to_string(), "51.91.109.83:80");
        }
    }
}

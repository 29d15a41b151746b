//! Configuration constants.
//!
//! This module defines the constants used throughout the crawler, including
//! the GitHub endpoint, timeouts, worker limits and the route names that can
//! never be a repository owner.

use std::time::Duration;

/// Base URL all search and repository requests are resolved against.
pub const DEFAULT_BASE_URL: &str = "https://github.com";

/// Path of the search endpoint, relative to the base URL.
pub const SEARCH_PATH: &str = "search";

/// Maximum concurrent requests per stage (keywords, repository enrichment).
///
/// Each stage buffers up to this many in-flight requests, so a Repositories
/// crawl can have at most `DEFAULT_MAX_CONCURRENCY²` requests outstanding.
pub const DEFAULT_MAX_CONCURRENCY: usize = 10;

/// Per-request timeout in seconds (applied by the HTTP client)
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// TCP connection timeout in seconds
///
/// A dead proxy usually fails here, well before the global request timeout.
pub const TCP_CONNECT_TIMEOUT_SECS: u64 = 5;

/// Extra time granted on top of the client timeout before the crawler gives up
/// on a request future.
pub const REQUEST_TIMEOUT_GRACE: Duration = Duration::from_secs(2);

/// Default User-Agent string for HTTP requests.
///
/// Mimics a current desktop Chrome on macOS. Users can override this via the
/// `--user-agent` CLI flag.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/131.0.0.0 Safari/537.36";

/// Accept header sent with every request (HTML preferred).
pub const ACCEPT_HTML: &str = "text/html,application/xhtml+xml,application/xml;q=0.9,image/avif,image/webp,image/apng,*/*;q=0.8,application/signed-exchange;v=b3;q=0.7";

/// First path segments that GitHub reserves for its own pages.
///
/// A link such as `/topics/python` has the `/owner/repo` shape but is not a
/// repository. Compared case-insensitively.
pub const RESERVED_ROUTES: &[&str] = &[
    "about",
    "apps",
    "codespaces",
    "collections",
    "contact",
    "customer-stories",
    "enterprise",
    "events",
    "explore",
    "features",
    "github-copilot",
    "issues",
    "login",
    "logout",
    "marketplace",
    "new",
    "notifications",
    "organizations",
    "orgs",
    "pricing",
    "pulls",
    "readme",
    "resources",
    "search",
    "security",
    "sessions",
    "settings",
    "signup",
    "site",
    "solutions",
    "sponsors",
    "team",
    "topics",
    "trending",
    "users",
];

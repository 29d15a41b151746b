//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Parser, ValueEnum};

use super::input::CrawlInput;
use crate::config::constants::{
    DEFAULT_BASE_URL, DEFAULT_MAX_CONCURRENCY, DEFAULT_TIMEOUT_SECS, DEFAULT_USER_AGENT,
};
use crate::error_handling::CrawlError;

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Crawler configuration, parsed from the command line.
///
/// Keywords, proxies and the search type can come from an input JSON file
/// (`--input`), from flags, or both. Flags win over the file.
///
/// # Examples
///
/// ```bash
/// # Everything from a file
/// github_crawler --input input.json
///
/// # Everything from flags
/// github_crawler --keyword openstack --keyword nova --type Repositories \
///     --proxy 194.126.37.94:8080 --proxy 13.78.125.167:8080
///
/// # File, with the search type overridden and pretty output to a file
/// github_crawler --input input.json --type Wikis --pretty --output results.json
/// ```
#[derive(Debug, Clone, Parser)]
#[command(
    name = "github_crawler",
    version,
    about = "Crawls GitHub search results for a list of keywords."
)]
pub struct Config {
    /// Input JSON file: {"keywords": [...], "proxies": [...], "type": "..."}
    #[arg(long, short = 'i', value_parser)]
    pub input: Option<PathBuf>,

    /// Search keyword (repeatable). Replaces the file's keywords when given.
    #[arg(long = "keyword", short = 'k', value_name = "KEYWORD")]
    pub keywords: Vec<String>,

    /// Proxy as host:port (repeatable). Replaces the file's proxies when given.
    #[arg(long = "proxy", short = 'p', value_name = "HOST:PORT")]
    pub proxies: Vec<String>,

    /// Search type: Repositories|Issues|Wikis (case-insensitive)
    #[arg(long = "type", short = 't', value_name = "TYPE")]
    pub search_type: Option<String>,

    /// Log level: error|warn|info|debug|trace
    #[arg(long, value_enum, default_value_t = LogLevel::Info)]
    pub log_level: LogLevel,

    /// Log format: plain|json
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,

    /// Per-request timeout in seconds
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Maximum concurrent requests per stage (keywords, repository pages)
    #[arg(long, default_value_t = DEFAULT_MAX_CONCURRENCY)]
    pub max_concurrency: usize,

    /// HTTP User-Agent header value
    #[arg(long, env = "GITHUB_CRAWLER_USER_AGENT", default_value = DEFAULT_USER_AGENT)]
    pub user_agent: String,

    /// Base URL requests are sent to
    #[arg(long, env = "GITHUB_CRAWLER_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Write the JSON results here instead of stdout
    #[arg(long, short = 'o', value_parser)]
    pub output: Option<PathBuf>,

    /// Pretty-print the JSON results
    #[arg(long)]
    pub pretty: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            input: None,
            keywords: Vec::new(),
            proxies: Vec::new(),
            search_type: None,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
            timeout_seconds: DEFAULT_TIMEOUT_SECS,
            max_concurrency: DEFAULT_MAX_CONCURRENCY,
            user_agent: DEFAULT_USER_AGENT.to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            output: None,
            pretty: false,
        }
    }
}

impl Config {
    /// Combines the input file (if any) with the command-line values.
    ///
    /// Non-empty `--keyword`/`--proxy` lists replace the file's lists, and
    /// `--type` replaces the file's type. Nothing is validated here beyond
    /// reading the file; the crawler validates the merged input.
    ///
    /// # Errors
    ///
    /// Returns `CrawlError::Configuration` if the input file cannot be read or
    /// is not valid input JSON.
    pub fn resolve_input(&self) -> Result<CrawlInput, CrawlError> {
        let mut input = match &self.input {
            Some(path) => CrawlInput::from_file(path)?,
            None => CrawlInput::default(),
        };

        if !self.keywords.is_empty() {
            input.keywords = self.keywords.clone();
        }
        if !self.proxies.is_empty() {
            input.proxies = self.proxies.clone();
        }
        if let Some(search_type) = &self.search_type {
            input.search_type = Some(search_type.clone());
        }

        Ok(input)
    }

    /// Per-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_log_level_conversion() {
        assert_eq!(log::LevelFilter::from(LogLevel::Error), log::LevelFilter::Error);
        assert_eq!(log::LevelFilter::from(LogLevel::Warn), log::LevelFilter::Warn);
        assert_eq!(log::LevelFilter::from(LogLevel::Info), log::LevelFilter::Info);
        assert_eq!(log::LevelFilter::from(LogLevel::Debug), log::LevelFilter::Debug);
        assert_eq!(log::LevelFilter::from(LogLevel::Trace), log::LevelFilter::Trace);
    }

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.max_concurrency, 10);
        assert_eq!(config.timeout_seconds, 10);
        assert_eq!(config.base_url, "https://github.com");
        assert_eq!(config.user_agent, DEFAULT_USER_AGENT);
        assert!(config.keywords.is_empty());
        assert!(config.search_type.is_none());
        assert!(!config.pretty);
        assert_eq!(config.request_timeout(), Duration::from_secs(10));
    }

    #[test]
    fn test_resolve_input_without_file_uses_flags() {
        let config = Config {
            keywords: vec!["openstack".into(), "css".into()],
            proxies: vec!["194.126.37.94:8080".into()],
            search_type: Some("Repositories".into()),
            ..Default::default()
        };

        let input = config.resolve_input().unwrap();
        assert_eq!(input.keywords, vec!["openstack", "css"]);
        assert_eq!(input.proxies, vec!["194.126.37.94:8080"]);
        assert_eq!(input.search_type.as_deref(), Some("Repositories"));
    }

    #[test]
    fn test_resolve_input_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"keywords": ["openstack", "nova"], "proxies": ["13.78.125.167:8080"], "type": "Issues"}}"#
        )
        .unwrap();

        let config = Config {
            input: Some(file.path().to_path_buf()),
            search_type: Some("wikis".into()),
            ..Default::default()
        };

        let input = config.resolve_input().unwrap();
        // Lists not given on the command line come from the file
        assert_eq!(input.keywords, vec!["openstack", "nova"]);
        assert_eq!(input.proxies, vec!["13.78.125.167:8080"]);
        assert_eq!(input.search_type.as_deref(), Some("wikis"));
    }

    #[test]
    fn test_resolve_input_missing_file_is_configuration_error() {
        let config = Config {
            input: Some(PathBuf::from("/nonexistent/github_crawler/input.json")),
            ..Default::default()
        };

        let err = config.resolve_input().unwrap_err();
        assert!(matches!(err, CrawlError::Configuration(_)));
    }
}

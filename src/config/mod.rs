//! Application configuration and constants.
//!
//! This module provides:
//! - Configuration constants (endpoint, timeouts, limits, reserved routes)
//! - The crawl input document
//! - CLI option types and parsing

mod constants;
mod input;
mod types;

// Re-export all constants
pub use constants::*;
pub use input::CrawlInput;
pub use types::{Config, LogFormat, LogLevel};

//! Error handling and processing statistics.
//!
//! This module provides:
//! - Error type definitions (`CrawlError`, `FetchError`, `ParseError`, ...)
//! - Processing statistics tracking (errors, warnings)
//! - Error categorization for status codes and transport failures
//!
//! Error types are categorized into:
//! - **Errors**: failed requests or unparseable pages
//! - **Warnings**: pages that parsed but had nothing to extract

mod categorization;
mod stats;
mod types;

// Re-export public API
pub use categorization::{
    categorize_reqwest_error, categorize_status, categorize_transport_error, update_error_stats,
};
pub use stats::ProcessingStats;
pub use types::{
    CrawlError, ErrorType, FetchError, InitializationError, ParseError, TransportError,
    WarningType,
};

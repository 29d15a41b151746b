//! Application initialization and resource setup.
//!
//! This module provides functions to initialize shared resources:
//! - HTTP clients (direct and per-proxy, with timeouts)
//! - The logger

mod client;
mod logger;

// Re-export public API
pub use client::{init_client, ClientSettings};
pub use logger::init_logger_with;

//! Shared helpers for the extraction code.
//!
//! This module provides:
//! - Regex compilation for static patterns
//! - Character-reference decoding and whitespace cleanup

mod pattern;
mod text;

pub use pattern::compile_regex_unsafe;
pub use text::{decode_html_entities, normalize_whitespace};

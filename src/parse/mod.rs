//! HTML extraction for search-result and repository pages.
//!
//! This module extracts:
//! - Result URLs from a search-results page, filtered by category path shape
//! - The language breakdown from a repository page
//!
//! Extraction is a pattern pass over tag-shaped tokens in the raw source (see
//! `markup`), not a DOM walk: GitHub's generated class names change often,
//! while its route shapes do not. All functions are pure.

mod languages;
mod markup;
mod search;

// Re-export public API
pub use languages::extract_language_stats;
pub use search::{extract_result_urls, repository_owner};

#[cfg(test)]
mod tests {
    include!("tests.rs");
}

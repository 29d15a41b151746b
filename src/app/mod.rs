//! Application-level helpers used by the run loop.

pub mod statistics;

// Re-export public API
pub use statistics::print_final_statistics;

//! Regex compilation utilities.

use regex::Regex;

/// Compiles a regex pattern that must succeed (for compile-time constants).
///
/// This function panics if compilation fails, which is appropriate for static
/// patterns held in `LazyLock`s: a bad pattern is a programming error and is
/// caught by the first test that touches it.
///
/// # Arguments
///
/// * `pattern` - The regex source
/// * `context` - Name of the static, for the panic message
///
/// # Panics
///
/// Panics if the pattern cannot be compiled.
pub fn compile_regex_unsafe(pattern: &str, context: &str) -> Regex {
    Regex::new(pattern).unwrap_or_else(|e| {
        panic!(
            "Failed to compile regex pattern '{}' in {}: {}. This is a programming error.",
            pattern, context, e
        )
    })
}

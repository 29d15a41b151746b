//! End-of-run statistics printing.

use log::info;
use strum::IntoEnumIterator;

use crate::error_handling::{ErrorType, ProcessingStats, WarningType};

/// Prints the run summary and the error and warning counters to the log.
pub fn print_final_statistics(
    stats: &ProcessingStats,
    total_keywords: usize,
    successful: usize,
    failed: usize,
    elapsed_seconds: f64,
) {
    print_error_statistics(stats);
    print_simple_summary(total_keywords, successful, failed, elapsed_seconds);
}

/// Prints a one-line summary of the run.
fn print_simple_summary(total_keywords: usize, successful: usize, failed: usize, elapsed_seconds: f64) {
    info!(
        "✅ Crawled {} keyword{} ({} succeeded, {} failed) in {:.1}s",
        total_keywords,
        if total_keywords == 1 { "" } else { "s" },
        successful,
        failed,
        elapsed_seconds
    );
}

/// Prints error and warning counts, skipping categories that never occurred.
pub fn print_error_statistics(stats: &ProcessingStats) {
    for line in statistics_lines(stats) {
        info!("{}", line);
    }
}

fn statistics_lines(stats: &ProcessingStats) -> Vec<String> {
    let mut lines = Vec::new();

    let total_errors = stats.total_errors();
    if total_errors > 0 {
        lines.push(format!("Error Counts ({} total):", total_errors));
        for error_type in ErrorType::iter() {
            let count = stats.get_error_count(error_type);
            if count > 0 {
                lines.push(format!("   {}: {}", error_type.as_str(), count));
            }
        }
    }

    let total_warnings = stats.total_warnings();
    if total_warnings > 0 {
        lines.push(format!("Warning Counts ({} total):", total_warnings));
        for warning_type in WarningType::iter() {
            let count = stats.get_warning_count(warning_type);
            if count > 0 {
                lines.push(format!("   {}: {}", warning_type.as_str(), count));
            }
        }
    }

    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_statistics_lines_empty_stats() {
        assert!(statistics_lines(&ProcessingStats::new()).is_empty());
    }

    #[test]
    fn test_statistics_lines_only_nonzero_categories() {
        let stats = ProcessingStats::new();
        stats.increment_error(ErrorType::HttpRequestNotFound);
        stats.increment_error(ErrorType::HttpRequestNotFound);
        stats.increment_error(ErrorType::EnrichmentFetchError);
        stats.increment_warning(WarningType::NoSearchResults);

        let lines = statistics_lines(&stats);
        assert_eq!(lines[0], "Error Counts (3 total):");
        assert!(lines.contains(&format!("   {}: 2", ErrorType::HttpRequestNotFound.as_str())));
        assert!(lines.contains(&format!("   {}: 1", ErrorType::EnrichmentFetchError.as_str())));
        assert!(lines.contains(&"Warning Counts (1 total):".to_string()));
        // 2 headers + 2 error categories + 1 warning category
        assert_eq!(lines.len(), 5);
    }

    #[test]
    fn test_print_final_statistics_does_not_panic() {
        let stats = ProcessingStats::new();
        stats.increment_warning(WarningType::MissingLanguageStats);
        print_final_statistics(&stats, 3, 2, 1, 1.25);
    }
}

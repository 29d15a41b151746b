//! Error categorization.
//!
//! Maps HTTP status codes and transport failures onto [`ErrorType`] so they can
//! be counted in [`ProcessingStats`].

use super::stats::ProcessingStats;
use super::types::{ErrorType, TransportError};

/// Categorizes a non-success HTTP status code into an `ErrorType`.
pub fn categorize_status(status: u16) -> ErrorType {
    match status {
        403 => ErrorType::HttpRequestBotDetectionError,
        404 => ErrorType::HttpRequestNotFound,
        429 => ErrorType::HttpRequestTooManyRequests,
        503 => ErrorType::HttpRequestServiceUnavailable,
        400..=499 => ErrorType::HttpRequestClientError,
        500..=599 => ErrorType::HttpRequestServerError,
        _ => ErrorType::HttpRequestOtherError,
    }
}

/// Categorizes a `reqwest::Error` into an `ErrorType`.
///
/// Status codes are checked first, then reqwest's error kinds.
pub fn categorize_reqwest_error(error: &reqwest::Error) -> ErrorType {
    if let Some(status) = error.status() {
        return categorize_status(status.as_u16());
    }

    if error.is_builder() {
        ErrorType::HttpRequestBuilderError
    } else if error.is_timeout() {
        ErrorType::HttpRequestTimeoutError
    } else if error.is_connect() {
        ErrorType::HttpRequestConnectError
    } else if error.is_request() {
        ErrorType::HttpRequestRequestError
    } else if error.is_body() {
        ErrorType::HttpRequestBodyError
    } else if error.is_decode() {
        ErrorType::HttpRequestDecodeError
    } else {
        ErrorType::HttpRequestOtherError
    }
}

/// Categorizes any transport failure into an `ErrorType`.
pub fn categorize_transport_error(error: &TransportError) -> ErrorType {
    match error {
        TransportError::Http(e) => categorize_reqwest_error(e),
        TransportError::UnknownProxy(_) => ErrorType::ProxyNotConfigured,
        TransportError::Timeout(_) => ErrorType::HttpRequestTimeoutError,
        TransportError::Other(_) => ErrorType::HttpRequestOtherError,
    }
}

/// Records a transport failure in the processing statistics.
pub fn update_error_stats(stats: &ProcessingStats, error: &TransportError) {
    stats.increment_error(categorize_transport_error(error));
}

//! Transit error types

use thiserror::Error;

/// Errors that can occur during SL API calls
#[derive(Debug, Error)]
pub enum TransitError {
    /// Connection to the API failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Non-success HTTP status
    #[error("Request failed: {0}")]
    RequestFailed(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded, retry after {retry_after_secs:?} seconds")]
    RateLimitExceeded {
        /// Seconds to wait before retrying (if provided by API)
        retry_after_secs: Option<u64>,
    },

    /// Response body did not match the expected shape
    #[error("Parse error: {0}")]
    ParseError(String),

    /// The API answered with an error payload
    #[error("API error {code}: {message}")]
    ApiError {
        /// Planner `errorCode` or typeahead `StatusCode`
        code: String,
        message: String,
    },

    /// Configuration error (e.g. missing API key)
    #[error("Configuration error: {0}")]
    ConfigurationError(String),

    /// Query rejected before sending
    #[error("Invalid query: {0}")]
    InvalidQuery(String),
}

impl TransitError {
    /// Returns true if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_)
                | Self::RequestFailed(_)
                | Self::Timeout { .. }
                | Self::RateLimitExceeded { .. }
        )
    }
}

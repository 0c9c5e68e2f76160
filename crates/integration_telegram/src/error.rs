//! Error types for the Telegram integration

use thiserror::Error;

/// Errors that can occur during Bot API calls
#[derive(Debug, Error)]
pub enum TelegramError {
    /// Connection to the Bot API failed
    #[error("Connection failed: {0}")]
    Connection(String),

    /// Request timed out
    #[error("Request timed out")]
    Timeout,

    /// The Bot API answered `ok: false`
    #[error("Bot API error (code {code}): {description}")]
    Api {
        /// HTTP-like error code reported by the API
        code: i64,
        /// Human-readable description
        description: String,
    },

    /// Response body could not be decoded
    #[error("Parse error: {0}")]
    Parse(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl TelegramError {
    /// Create an API error
    #[must_use]
    pub fn api(code: i64, description: impl Into<String>) -> Self {
        Self::Api {
            code,
            description: description.into(),
        }
    }

    /// The API rejected the message's Markdown entities
    #[must_use]
    pub fn is_markdown_parse_error(&self) -> bool {
        matches!(self, Self::Api { code: 400, description } if description.contains("can't parse entities"))
    }

    /// Check if this error is retryable
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        match self {
            Self::Connection(_) | Self::Timeout => true,
            Self::Api { code, .. } => *code == 429 || *code >= 500,
            Self::Parse(_) | Self::Configuration(_) => false,
        }
    }
}

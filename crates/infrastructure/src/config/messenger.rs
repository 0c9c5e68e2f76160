//! Telegram messenger configuration.

use integration_telegram::TelegramClientConfig;
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Telegram Bot API configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TelegramConfig {
    /// Bot token from @BotFather (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub token: Option<SecretString>,

    /// Bot API base URL
    #[serde(default = "default_api_base_url")]
    pub api_base_url: String,

    /// Long-poll timeout for `getUpdates`, in seconds
    #[serde(default = "default_poll_timeout_secs")]
    pub poll_timeout_secs: u64,

    /// Timeout for other Bot API calls, in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

impl std::fmt::Debug for TelegramConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramConfig")
            .field(
                "token",
                &if self.token.is_some() {
                    Some("[REDACTED]")
                } else {
                    None
                },
            )
            .field("api_base_url", &self.api_base_url)
            .field("poll_timeout_secs", &self.poll_timeout_secs)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .finish()
    }
}

fn default_api_base_url() -> String {
    TelegramClientConfig::DEFAULT_API_BASE_URL.to_string()
}

const fn default_poll_timeout_secs() -> u64 {
    TelegramClientConfig::DEFAULT_POLL_TIMEOUT_SECS
}

const fn default_request_timeout_secs() -> u64 {
    TelegramClientConfig::DEFAULT_REQUEST_TIMEOUT_SECS
}

impl Default for TelegramConfig {
    fn default() -> Self {
        Self {
            token: None,
            api_base_url: default_api_base_url(),
            poll_timeout_secs: default_poll_timeout_secs(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl TelegramConfig {
    /// Get the bot token as a string reference (for API calls)
    #[must_use]
    pub fn token_str(&self) -> Option<&str> {
        self.token
            .as_ref()
            .map(ExposeSecret::expose_secret)
            .filter(|t| !t.trim().is_empty())
    }

    /// Convert to `integration_telegram::TelegramClientConfig`
    ///
    /// Returns `None` when no token is configured.
    #[must_use]
    pub fn to_client_config(&self) -> Option<TelegramClientConfig> {
        self.token_str().map(|token| {
            TelegramClientConfig::new(token)
                .with_api_base_url(self.api_base_url.clone())
                .with_poll_timeout(self.poll_timeout_secs)
                .with_request_timeout(self.request_timeout_secs)
        })
    }
}

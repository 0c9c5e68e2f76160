//! Telegram Bot API client
//!
//! Every call is a JSON POST to `{api_base_url}/bot{token}/{method}`. The
//! token is part of the URL, so transport errors are stripped of their URL
//! before they are rendered.

use std::time::Duration;

use reqwest::Client;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::error::TelegramError;
use crate::types::{
    AnswerCallbackParams, ApiResponse, GetUpdatesParams, Message, SendMessageParams,
    TelegramClientConfig, Update,
};

/// Client for the Telegram Bot API
#[derive(Clone)]
pub struct TelegramClient {
    client: Client,
    config: TelegramClientConfig,
}

impl std::fmt::Debug for TelegramClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl TelegramClient {
    /// Create a new Telegram client
    ///
    /// The HTTP timeout covers the long-poll window plus the regular request
    /// timeout so `getUpdates` is never cut off by the client itself.
    pub fn new(config: TelegramClientConfig) -> Result<Self, TelegramError> {
        if config.token.trim().is_empty() {
            return Err(TelegramError::Configuration(
                "bot token is required".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(
                config.poll_timeout_secs + config.request_timeout_secs,
            ))
            .build()
            .map_err(|e| TelegramError::Connection(e.without_url().to_string()))?;

        Ok(Self { client, config })
    }

    fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{method}",
            self.config.api_base_url.trim_end_matches('/'),
            self.config.token
        )
    }

    async fn call<P, T>(&self, method: &str, params: &P) -> Result<T, TelegramError>
    where
        P: Serialize + Sync,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.method_url(method))
            .json(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TelegramError::Timeout
                } else {
                    TelegramError::Connection(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| TelegramError::Connection(e.without_url().to_string()))?;

        let envelope: ApiResponse<T> = serde_json::from_str(&body).map_err(|e| {
            warn!(%status, method, "Undecodable Bot API response");
            TelegramError::Parse(e.to_string())
        })?;

        if !envelope.ok {
            return Err(TelegramError::api(
                envelope.error_code.unwrap_or_else(|| i64::from(status.as_u16())),
                envelope.description.unwrap_or_default(),
            ));
        }

        envelope
            .result
            .ok_or_else(|| TelegramError::Parse(format!("{method} returned ok without result")))
    }

    /// Long-poll for updates with `update_id >= offset`
    #[instrument(skip(self))]
    pub async fn get_updates(&self, offset: i64) -> Result<Vec<Update>, TelegramError> {
        let params = GetUpdatesParams {
            offset,
            timeout: self.config.poll_timeout_secs,
            allowed_updates: ["message", "callback_query"],
        };
        let updates: Vec<Update> = self.call("getUpdates", &params).await?;
        if !updates.is_empty() {
            debug!(count = updates.len(), "Received updates");
        }
        Ok(updates)
    }

    /// Send a message
    #[instrument(skip(self, params), fields(chat_id = params.chat_id, markdown = params.parse_mode.is_some()))]
    pub async fn send_message(&self, params: &SendMessageParams) -> Result<Message, TelegramError> {
        let message: Message = self.call("sendMessage", params).await?;
        debug!(message_id = message.message_id, "Message sent");
        Ok(message)
    }

    /// Answer a callback query so the client stops its loading indicator
    #[instrument(skip(self, text))]
    pub async fn answer_callback_query(
        &self,
        callback_query_id: &str,
        text: Option<String>,
    ) -> Result<(), TelegramError> {
        let params = AnswerCallbackParams {
            callback_query_id: callback_query_id.to_string(),
            text,
        };
        let _: bool = self.call("answerCallbackQuery", &params).await?;
        Ok(())
    }
}

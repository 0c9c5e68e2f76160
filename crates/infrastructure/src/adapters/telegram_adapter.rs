//! Telegram adapter - Implements ChatTransport using integration_telegram

use std::sync::atomic::{AtomicI64, Ordering};

use application::ApplicationError;
use application::ports::{ChatTransport, IncomingUpdate, OutgoingMessage};
use async_trait::async_trait;
use domain::{ChatId, ChatIdentity, ChatUserId};
use integration_telegram::{
    InlineKeyboardButton, InlineKeyboardMarkup, SendMessageParams, TelegramClient,
    TelegramClientConfig, TelegramError, Update, User,
};
use tracing::{debug, instrument, warn};

/// Adapter that implements `ChatTransport` over the Telegram Bot API
///
/// Tracks the `getUpdates` offset so every update is handed out once.
pub struct TelegramAdapter {
    client: TelegramClient,
    offset: AtomicI64,
}

impl std::fmt::Debug for TelegramAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TelegramAdapter")
            .field("offset", &self.offset.load(Ordering::Relaxed))
            .finish_non_exhaustive()
    }
}

impl TelegramAdapter {
    /// Create a new Telegram adapter
    pub fn new(config: TelegramClientConfig) -> Result<Self, ApplicationError> {
        let client = TelegramClient::new(config).map_err(map_telegram_error)?;
        Ok(Self::with_client(client))
    }

    /// Wrap an existing client
    #[must_use]
    pub const fn with_client(client: TelegramClient) -> Self {
        Self {
            client,
            offset: AtomicI64::new(0),
        }
    }

    /// Next `update_id` that will be requested
    #[must_use]
    pub fn offset(&self) -> i64 {
        self.offset.load(Ordering::Acquire)
    }
}

/// Log a failed Bot API call and convert the error
fn request_failed(method: &'static str, err: TelegramError) -> ApplicationError {
    warn!(error = %err, method, retryable = err.is_retryable(), "Telegram request failed");
    map_telegram_error(err)
}

fn map_telegram_error(err: TelegramError) -> ApplicationError {
    match err {
        TelegramError::Api { code: 429, .. } => ApplicationError::RateLimited,
        TelegramError::Configuration(msg) => ApplicationError::Configuration(msg),
        other => ApplicationError::ExternalService(other.to_string()),
    }
}

fn identity(user: &User, chat_id: i64) -> ChatIdentity {
    ChatIdentity::new(
        ChatUserId::new(user.id),
        ChatId::new(chat_id),
        user.first_name.clone(),
    )
}

/// Translate a raw update into what the bot acts on
///
/// Messages from bots, messages without text and callbacks without data
/// are dropped.
fn to_incoming(update: Update) -> Option<IncomingUpdate> {
    if let Some(query) = update.callback_query {
        let payload = query.data?;
        // In a private chat the sender id is the chat id
        let chat_id = query.message.map_or(query.from.id, |m| m.chat.id);
        return Some(IncomingUpdate::Selection {
            from: identity(&query.from, chat_id),
            selection_id: query.id,
            payload,
        });
    }

    let message = update.message?;
    let from = message.from.filter(|u| !u.is_bot)?;
    let text = message.text.filter(|t| !t.trim().is_empty())?;
    Some(IncomingUpdate::Message {
        from: identity(&from, message.chat.id),
        text,
    })
}

fn to_params(message: &OutgoingMessage) -> SendMessageParams {
    let mut params = SendMessageParams::text(message.chat_id.as_i64(), message.text.clone());
    if message.markdown {
        params = params.markdown();
    }
    if !message.options.is_empty() {
        let buttons = message
            .options
            .iter()
            .map(|option| InlineKeyboardButton {
                text: option.label.clone(),
                callback_data: option.payload.clone(),
            })
            .collect();
        params = params.with_keyboard(InlineKeyboardMarkup::single_column(buttons));
    }
    params
}

#[async_trait]
impl ChatTransport for TelegramAdapter {
    #[instrument(skip(self), fields(offset = self.offset()))]
    async fn next_updates(&self) -> Result<Vec<IncomingUpdate>, ApplicationError> {
        let updates = self
            .client
            .get_updates(self.offset())
            .await
            .map_err(|e| request_failed("getUpdates", e))?;

        if let Some(last) = updates.iter().map(|u| u.update_id).max() {
            self.offset.fetch_max(last + 1, Ordering::AcqRel);
        }

        let received = updates.len();
        let incoming: Vec<IncomingUpdate> = updates.into_iter().filter_map(to_incoming).collect();
        if received > 0 {
            debug!(received, accepted = incoming.len(), "Polled updates");
        }
        Ok(incoming)
    }

    #[instrument(skip(self, message), fields(chat_id = %message.chat_id, markdown = message.markdown, options = message.options.len()))]
    async fn send(&self, message: &OutgoingMessage) -> Result<(), ApplicationError> {
        let params = to_params(message);

        match self.client.send_message(&params).await {
            Ok(_) => Ok(()),
            Err(e) if params.parse_mode.is_some() && e.is_markdown_parse_error() => {
                warn!(error = %e, "Markdown rejected, resending as plain text");
                let plain = SendMessageParams {
                    parse_mode: None,
                    ..params
                };
                self.client
                    .send_message(&plain)
                    .await
                    .map(|_| ())
                    .map_err(|e| request_failed("sendMessage", e))
            },
            Err(e) => Err(request_failed("sendMessage", e)),
        }
    }

    #[instrument(skip(self, text))]
    async fn acknowledge_selection(
        &self,
        selection_id: &str,
        text: Option<String>,
    ) -> Result<(), ApplicationError> {
        self.client
            .answer_callback_query(selection_id, text)
            .await
            .map_err(|e| request_failed("answerCallbackQuery", e))
    }
}

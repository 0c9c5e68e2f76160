//! Telegram Bot API integration
//!
//! A small client covering what the commute bot needs: long polling with
//! `getUpdates`, `sendMessage` with optional Markdown and inline keyboards,
//! and `answerCallbackQuery`.
//!
//! # Example
//!
//! ```no_run
//! use integration_telegram::{SendMessageParams, TelegramClient, TelegramClientConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = TelegramClient::new(TelegramClientConfig::new("123:token"))?;
//!
//! let mut offset = 0;
//! for update in client.get_updates(offset).await? {
//!     offset = update.update_id + 1;
//!     if let Some(message) = update.message {
//!         client
//!             .send_message(&SendMessageParams::text(message.chat.id, "Hi"))
//!             .await?;
//!     }
//! }
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]

mod client;
mod error;
mod types;

pub use client::TelegramClient;
pub use error::TelegramError;
pub use types::{
    AnswerCallbackParams, ApiResponse, CallbackQuery, Chat, InlineKeyboardButton,
    InlineKeyboardMarkup, Message, SendMessageParams, TelegramClientConfig, Update, User,
};

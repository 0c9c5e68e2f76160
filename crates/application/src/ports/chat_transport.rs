//! Chat transport port
//!
//! Abstracts the chat platform: receiving commands and option selections,
//! sending text with optional selectable options, and acknowledging a
//! selection.

use async_trait::async_trait;
use domain::{ChatId, ChatIdentity};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// A selectable option attached to an outgoing message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyOption {
    /// Text shown on the option
    pub label: String,
    /// Opaque payload returned when the option is chosen
    pub payload: String,
}

impl ReplyOption {
    #[must_use]
    pub fn new(label: impl Into<String>, payload: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            payload: payload.into(),
        }
    }
}

/// An outgoing chat message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutgoingMessage {
    pub chat_id: ChatId,
    pub text: String,
    /// Render `text` with the platform's Markdown dialect
    pub markdown: bool,
    /// Options shown under the message, one per row
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<ReplyOption>,
}

impl OutgoingMessage {
    /// Plain text message
    #[must_use]
    pub fn text(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            chat_id,
            text: text.into(),
            markdown: false,
            options: Vec::new(),
        }
    }

    /// Markdown formatted message
    #[must_use]
    pub fn markdown(chat_id: ChatId, text: impl Into<String>) -> Self {
        Self {
            markdown: true,
            ..Self::text(chat_id, text)
        }
    }

    /// Attach selectable options
    #[must_use]
    pub fn with_options(mut self, options: Vec<ReplyOption>) -> Self {
        self.options = options;
        self
    }
}

/// Something a user did in a chat
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum IncomingUpdate {
    /// A text message (command or plain text)
    Message { from: ChatIdentity, text: String },
    /// A previously offered option was chosen
    Selection {
        from: ChatIdentity,
        /// Platform id used to acknowledge the selection
        selection_id: String,
        payload: String,
    },
}

impl IncomingUpdate {
    /// Who triggered the update
    #[must_use]
    pub const fn from(&self) -> &ChatIdentity {
        match self {
            Self::Message { from, .. } | Self::Selection { from, .. } => from,
        }
    }
}

/// Port for the chat platform
#[cfg_attr(test, automock)]
#[async_trait]
pub trait ChatTransport: Send + Sync {
    /// Wait for the next batch of updates
    ///
    /// Long-polls the platform; an empty batch means the poll timed out.
    async fn next_updates(&self) -> Result<Vec<IncomingUpdate>, ApplicationError>;

    /// Send a message
    async fn send(&self, message: &OutgoingMessage) -> Result<(), ApplicationError>;

    /// Acknowledge that a selection was handled
    async fn acknowledge_selection(
        &self,
        selection_id: &str,
        text: Option<String>,
    ) -> Result<(), ApplicationError>;
}

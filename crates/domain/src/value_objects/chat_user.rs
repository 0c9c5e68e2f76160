//! Chat identity value objects
//!
//! Telegram-style numeric identifiers for the person talking to the bot and
//! the chat that replies are delivered to.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Numeric identifier of a chat user (the sender of a command)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatUserId(i64);

impl ChatUserId {
    /// Wrap a raw platform user id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw id
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatUserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatUserId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Numeric identifier of the chat that outbound messages go to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ChatId(i64);

impl ChatId {
    /// Wrap a raw platform chat id
    #[must_use]
    pub const fn new(id: i64) -> Self {
        Self(id)
    }

    /// Get the raw id
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        Self(id)
    }
}

/// Who sent an inbound message and where to answer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatIdentity {
    /// Sender's user id
    pub user_id: ChatUserId,
    /// Chat the message arrived in
    pub chat_id: ChatId,
    /// Sender's display name (first name on Telegram)
    pub display_name: String,
}

impl ChatIdentity {
    /// Create a new chat identity
    #[must_use]
    pub fn new(user_id: ChatUserId, chat_id: ChatId, display_name: impl Into<String>) -> Self {
        Self {
            user_id,
            chat_id,
            display_name: display_name.into(),
        }
    }
}

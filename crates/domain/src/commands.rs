//! Bot commands - Strongly typed representations of chat input

use serde::{Deserialize, Serialize};

use crate::value_objects::CommuteTarget;

/// Everything a user can ask the bot to do
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BotCommand {
    /// `/start`
    Start,

    /// `/help`
    Help,

    /// `/home` or `/work`: list trips towards the target
    Trips { target: CommuteTarget },

    /// `/set_home <query>` or `/set_work <query>`: search a stop to save
    SetStop {
        target: CommuteTarget,
        /// Free-text station query (may be blank)
        query: String,
    },

    /// `/set_home_reminder <time>` or `/set_work_reminder <time>`
    SetReminder {
        target: CommuteTarget,
        /// Raw time argument as typed
        input: String,
    },

    /// Anything else, including plain text
    Unknown { text: String },
}

impl BotCommand {
    /// Parse a chat message
    ///
    /// The command token is case-insensitive and may carry an `@botname`
    /// suffix as sent in group chats. Everything after the first whitespace
    /// is the argument.
    #[must_use]
    pub fn parse(text: &str) -> Self {
        let text = text.trim();
        let (token, argument) = text
            .split_once(char::is_whitespace)
            .map_or((text, ""), |(token, rest)| (token, rest.trim()));

        if !token.starts_with('/') {
            return Self::Unknown {
                text: text.to_string(),
            };
        }

        let command = token
            .split_once('@')
            .map_or(token, |(command, _bot)| command)
            .to_ascii_lowercase();

        match command.as_str() {
            "/start" => Self::Start,
            "/help" => Self::Help,
            "/home" => Self::Trips {
                target: CommuteTarget::Home,
            },
            "/work" => Self::Trips {
                target: CommuteTarget::Work,
            },
            "/set_home" => Self::set_stop(CommuteTarget::Home, argument),
            "/set_work" => Self::set_stop(CommuteTarget::Work, argument),
            "/set_home_reminder" => Self::set_reminder(CommuteTarget::Home, argument),
            "/set_work_reminder" => Self::set_reminder(CommuteTarget::Work, argument),
            _ => Self::Unknown {
                text: text.to_string(),
            },
        }
    }

    fn set_stop(target: CommuteTarget, query: &str) -> Self {
        Self::SetStop {
            target,
            query: query.to_string(),
        }
    }

    fn set_reminder(target: CommuteTarget, input: &str) -> Self {
        Self::SetReminder {
            target,
            input: input.to_string(),
        }
    }

    /// Short name for log fields
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::Help => "help",
            Self::Trips { .. } => "trips",
            Self::SetStop { .. } => "set_stop",
            Self::SetReminder { .. } => "set_reminder",
            Self::Unknown { .. } => "unknown",
        }
    }
}

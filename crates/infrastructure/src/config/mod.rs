//! Application configuration
//!
//! Split into focused sub-modules:
//! - `messenger`: Telegram Bot API
//! - `integrations`: SL journey planner and station lookup
//! - `database`: SQLite database settings
//! - `reminder`: timezone, selection TTL
//!
//! Everything is read from the environment. Nested keys use `__`, e.g.
//! `COMMUTE_BOT__TRANSIT__TIMEOUT_SECS=15`. The historical variable names
//! `TELEGRAM_TOKEN`, `SL_PLANNING_API_KEY` and `SL_LOOKUP_API_KEY` are still
//! honoured and win over their prefixed equivalents.

mod database;
mod integrations;
mod messenger;
mod reminder;

use std::collections::HashMap;

use application::ApplicationError;
use serde::{Deserialize, Serialize};
use tracing::debug;

pub use database::DatabaseConfig;
pub use integrations::TransitAppConfig;
pub use messenger::TelegramConfig;
pub use reminder::ReminderAppConfig;

use crate::telemetry::TelemetryConfig;

/// Prefix of all structured environment variables
pub const ENV_PREFIX: &str = "COMMUTE_BOT";

/// Separator between prefix and nested keys
pub const ENV_SEPARATOR: &str = "__";

/// Legacy variable names mapped onto config keys
const LEGACY_OVERRIDES: [(&str, &str); 3] = [
    ("TELEGRAM_TOKEN", "telegram.token"),
    ("SL_PLANNING_API_KEY", "transit.planning_api_key"),
    ("SL_LOOKUP_API_KEY", "transit.lookup_api_key"),
];

/// Shared default for boolean `true` fields across config structs
pub(crate) const fn default_true() -> bool {
    true
}

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Telegram configuration
    #[serde(default)]
    pub telegram: TelegramConfig,

    /// SL transit configuration
    #[serde(default)]
    pub transit: TransitAppConfig,

    /// Database configuration
    #[serde(default)]
    pub database: DatabaseConfig,

    /// Reminder scheduler configuration
    #[serde(default)]
    pub reminder: ReminderAppConfig,

    /// Log filter and output format
    #[serde(default)]
    pub logging: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from the process environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::from_vars(std::env::vars().collect())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars(vars: HashMap<String, String>) -> Result<Self, config::ConfigError> {
        let mut builder = config::Config::builder().add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator(ENV_SEPARATOR)
                .separator(ENV_SEPARATOR)
                .try_parsing(true)
                .source(Some(vars.clone())),
        );

        for (legacy, key) in LEGACY_OVERRIDES {
            let value = vars
                .get(legacy)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty());
            if value.is_some() {
                debug!(variable = legacy, key, "Applying legacy environment override");
            }
            builder = builder.set_override_option(key, value)?;
        }

        builder.build()?.try_deserialize()
    }

    /// Check that everything needed to run the bot is present
    pub fn validate(&self) -> Result<(), ApplicationError> {
        let mut problems = Vec::new();

        if self.telegram.token_str().is_none() {
            problems.push("Telegram bot token is missing (TELEGRAM_TOKEN)".to_string());
        }
        if !self.transit.has_keys() {
            problems.push(
                "SL API keys are missing (SL_PLANNING_API_KEY, SL_LOOKUP_API_KEY)".to_string(),
            );
        }
        if let Err(e) = self.reminder.timezone() {
            problems.push(e.to_string());
        }
        if self.database.max_connections == 0 {
            problems.push("database.max_connections must be positive".to_string());
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(ApplicationError::Configuration(problems.join("; ")))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::LogFormat;

    fn vars(pairs: &[(&str, &str)]) -> HashMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    fn complete() -> HashMap<String, String> {
        vars(&[
            ("TELEGRAM_TOKEN", "123:abc"),
            ("SL_PLANNING_API_KEY", "plan"),
            ("SL_LOOKUP_API_KEY", "look"),
        ])
    }

    #[test]
    fn empty_environment_yields_defaults() {
        let config = AppConfig::from_vars(HashMap::new()).unwrap();
        assert!(config.telegram.token.is_none());
        assert_eq!(config.transit.base_url, "http://api.sl.se/api2");
        assert_eq!(config.transit.timeout_secs, 10);
        assert_eq!(config.database.path, "commute-bot.db");
        assert_eq!(config.reminder.timezone, "Europe/Stockholm");
        assert_eq!(config.logging.format, LogFormat::Pretty);
    }

    #[test]
    fn legacy_variables_fill_secrets() {
        let config = AppConfig::from_vars(complete()).unwrap();
        assert_eq!(config.telegram.token_str(), Some("123:abc"));
        assert_eq!(config.transit.to_transit_config().planning_api_key, "plan");
        assert_eq!(config.transit.to_transit_config().lookup_api_key, "look");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn prefixed_nested_keys_are_parsed() {
        let config = AppConfig::from_vars(vars(&[
            ("COMMUTE_BOT__TRANSIT__TIMEOUT_SECS", "15"),
            ("COMMUTE_BOT__TRANSIT__SHOW_LINE_BADGES", "true"),
            ("COMMUTE_BOT__DATABASE__PATH", "/var/lib/commute/bot.db"),
            ("COMMUTE_BOT__REMINDER__TIMEZONE", "UTC"),
            ("COMMUTE_BOT__LOGGING__FORMAT", "json"),
        ]))
        .unwrap();
        assert_eq!(config.transit.timeout_secs, 15);
        assert!(config.transit.show_line_badges);
        assert_eq!(config.database.path, "/var/lib/commute/bot.db");
        assert_eq!(config.reminder.timezone, "UTC");
        assert_eq!(config.logging.format, LogFormat::Json);
    }

    #[test]
    fn legacy_names_win_over_prefixed() {
        let mut env = complete();
        env.insert("COMMUTE_BOT__TELEGRAM__TOKEN".to_string(), "999:old".to_string());
        let config = AppConfig::from_vars(env).unwrap();
        assert_eq!(config.telegram.token_str(), Some("123:abc"));
    }

    #[test]
    fn validate_lists_every_problem() {
        let mut env = vars(&[("COMMUTE_BOT__REMINDER__TIMEZONE", "Mars/Base")]);
        env.insert("SL_PLANNING_API_KEY".to_string(), "plan".to_string());
        let config = AppConfig::from_vars(env).unwrap();

        let err = config.validate().unwrap_err().to_string();
        assert!(err.contains("TELEGRAM_TOKEN"));
        assert!(err.contains("SL_LOOKUP_API_KEY"));
        assert!(err.contains("Mars/Base"));
    }

    #[test]
    fn debug_output_never_contains_secrets() {
        let config = AppConfig::from_vars(complete()).unwrap();
        let debug = format!("{config:?}");
        assert!(!debug.contains("123:abc"));
        assert!(!debug.contains("plan\""));
    }
}

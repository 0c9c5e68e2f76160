//! Transit integration configuration.

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// SL journey planner and station lookup configuration
#[derive(Clone, Serialize, Deserialize)]
pub struct TransitAppConfig {
    /// Base URL shared by both SL APIs
    #[serde(default = "default_transit_base_url")]
    pub base_url: String,

    /// Travel Planner v3 key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub planning_api_key: Option<SecretString>,

    /// Typeahead key (sensitive - uses SecretString)
    #[serde(default, skip_serializing)]
    pub lookup_api_key: Option<SecretString>,

    /// Request timeout in seconds (default: 10)
    #[serde(default = "default_transit_timeout")]
    pub timeout_secs: u64,

    /// Response language (default: en)
    #[serde(default = "default_transit_language")]
    pub language: String,

    /// Prefix trip segments with mode and line badges (default: false)
    #[serde(default)]
    pub show_line_badges: bool,
}

impl std::fmt::Debug for TransitAppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAppConfig")
            .field("base_url", &self.base_url)
            .field(
                "planning_api_key",
                &self.planning_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field(
                "lookup_api_key",
                &self.lookup_api_key.as_ref().map(|_| "[REDACTED]"),
            )
            .field("timeout_secs", &self.timeout_secs)
            .field("language", &self.language)
            .field("show_line_badges", &self.show_line_badges)
            .finish()
    }
}

fn default_transit_base_url() -> String {
    "http://api.sl.se/api2".to_string()
}

const fn default_transit_timeout() -> u64 {
    10
}

fn default_transit_language() -> String {
    "en".to_string()
}

impl Default for TransitAppConfig {
    fn default() -> Self {
        Self {
            base_url: default_transit_base_url(),
            planning_api_key: None,
            lookup_api_key: None,
            timeout_secs: default_transit_timeout(),
            language: default_transit_language(),
            show_line_badges: false,
        }
    }
}

fn exposed(secret: Option<&SecretString>) -> String {
    secret
        .map(|s| s.expose_secret().trim().to_string())
        .unwrap_or_default()
}

impl TransitAppConfig {
    /// Convert to `integration_transit::TransitConfig`
    #[must_use]
    pub fn to_transit_config(&self) -> integration_transit::TransitConfig {
        integration_transit::TransitConfig {
            base_url: self.base_url.clone(),
            planning_api_key: exposed(self.planning_api_key.as_ref()),
            lookup_api_key: exposed(self.lookup_api_key.as_ref()),
            timeout_secs: self.timeout_secs,
            language: self.language.clone(),
        }
    }

    /// Whether both API keys are present and non-blank
    #[must_use]
    pub fn has_keys(&self) -> bool {
        !exposed(self.planning_api_key.as_ref()).is_empty()
            && !exposed(self.lookup_api_key.as_ref()).is_empty()
    }
}

//! Transit service configuration

use std::fmt;

use serde::{Deserialize, Serialize};

/// Configuration for the SL journey planner and station lookup
#[derive(Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL shared by both APIs
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Key for Travel Planner v3
    #[serde(default, skip_serializing)]
    pub planning_api_key: String,

    /// Key for the typeahead station lookup
    #[serde(default, skip_serializing)]
    pub lookup_api_key: String,

    /// Overall request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// Response language (`lang` query parameter)
    #[serde(default = "default_language")]
    pub language: String,
}

impl fmt::Debug for TransitConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransitConfig")
            .field("base_url", &self.base_url)
            .field("planning_api_key", &redacted(&self.planning_api_key))
            .field("lookup_api_key", &redacted(&self.lookup_api_key))
            .field("timeout_secs", &self.timeout_secs)
            .field("language", &self.language)
            .finish()
    }
}

fn redacted(key: &str) -> Option<&'static str> {
    (!key.is_empty()).then_some("[REDACTED]")
}

fn default_base_url() -> String {
    "http://api.sl.se/api2".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_language() -> String {
    "en".to_string()
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            planning_api_key: String::new(),
            lookup_api_key: String::new(),
            timeout_secs: default_timeout_secs(),
            language: default_language(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration suitable for testing
    #[must_use]
    pub fn for_testing() -> Self {
        Self {
            planning_api_key: "test-planning-key".to_string(),
            lookup_api_key: "test-lookup-key".to_string(),
            timeout_secs: 5,
            ..Default::default()
        }
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.planning_api_key.trim().is_empty() {
            return Err("planning_api_key must be set".to_string());
        }

        if self.lookup_api_key.trim().is_empty() {
            return Err("lookup_api_key must be set".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        Ok(())
    }
}

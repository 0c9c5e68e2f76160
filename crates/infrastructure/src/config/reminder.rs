//! Reminder timezone and stop selection settings.

use domain::Timezone;
use serde::{Deserialize, Serialize};

/// Reminder configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReminderAppConfig {
    /// IANA zone reminder times are entered and matched in
    #[serde(default = "default_timezone")]
    pub timezone: String,

    /// How long a `/set_home` / `/set_work` choice stays selectable, in seconds
    #[serde(default = "default_selection_ttl_secs")]
    pub selection_ttl_secs: u64,
}

fn default_timezone() -> String {
    Timezone::default().name().to_string()
}

const fn default_selection_ttl_secs() -> u64 {
    600
}

impl Default for ReminderAppConfig {
    fn default() -> Self {
        Self {
            timezone: default_timezone(),
            selection_ttl_secs: default_selection_ttl_secs(),
        }
    }
}

impl ReminderAppConfig {
    /// Parse the configured zone
    pub fn timezone(&self) -> Result<Timezone, domain::DomainError> {
        Timezone::try_new(&self.timezone)
    }
}

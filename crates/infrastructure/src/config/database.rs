//! Preference database settings

use serde::{Deserialize, Serialize};

use super::default_true;

/// Path that selects a private in-memory SQLite database
pub const IN_MEMORY_PATH: &str = ":memory:";

/// Where user preferences are stored and how the pool is sized
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseConfig {
    /// SQLite file, created with its parent directories on first start
    #[serde(default = "default_db_path")]
    pub path: String,

    /// Pool size (ignored for in-memory databases, which use one connection)
    #[serde(default = "default_max_connections")]
    pub max_connections: u32,

    /// Apply the embedded schema migrations when the pool is created
    #[serde(default = "default_true")]
    pub run_migrations: bool,

    /// How long a writer waits on a locked database, in milliseconds
    #[serde(default = "default_busy_timeout_ms")]
    pub busy_timeout_ms: u32,
}

fn default_db_path() -> String {
    "commute-bot.db".to_string()
}

const fn default_max_connections() -> u32 {
    4
}

const fn default_busy_timeout_ms() -> u32 {
    5000
}

impl Default for DatabaseConfig {
    fn default() -> Self {
        Self {
            path: default_db_path(),
            max_connections: default_max_connections(),
            run_migrations: true,
            busy_timeout_ms: default_busy_timeout_ms(),
        }
    }
}

impl DatabaseConfig {
    /// Migrated in-memory database, for tests
    #[must_use]
    pub fn in_memory() -> Self {
        Self {
            path: IN_MEMORY_PATH.to_string(),
            max_connections: 1,
            ..Self::default()
        }
    }

    #[must_use]
    pub fn is_in_memory(&self) -> bool {
        self.path == IN_MEMORY_PATH
    }

    /// Effective pool size
    #[must_use]
    pub fn pool_size(&self) -> u32 {
        // Each in-memory connection is its own database
        if self.is_in_memory() {
            1
        } else {
            self.max_connections.max(1)
        }
    }
}

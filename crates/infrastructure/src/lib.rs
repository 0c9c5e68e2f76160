//! Infrastructure layer - Adapters for external systems
//!
//! Implements the application ports: SQLite preference storage, the moka
//! selection cache, the SL transit client and the Telegram transport. Also
//! owns configuration loading and logging setup.

pub mod adapters;
pub mod cache;
pub mod config;
pub mod persistence;
pub mod telemetry;

pub use adapters::*;
pub use cache::{MokaSelectionStore, SelectionStoreConfig};
pub use config::{
    AppConfig, DatabaseConfig, ReminderAppConfig, TelegramConfig, TransitAppConfig,
};
pub use persistence::{ConnectionPool, DatabaseError, SqlitePreferenceStore, create_pool};
pub use telemetry::{LogFormat, TelemetryConfig, TelemetryError, init_telemetry};

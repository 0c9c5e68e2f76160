//! Persistence module
//!
//! SQLite storage for user preferences.

pub mod connection;
pub mod migrations;
pub mod preference_store;

pub use connection::{ConnectionPool, DatabaseError, create_pool};
pub use preference_store::SqlitePreferenceStore;

//! Domain layer for the commute bot
//!
//! Contains trips, stops, user preferences, reminder times and the typed
//! bot commands. No I/O happens here.

pub mod commands;
pub mod entities;
pub mod errors;
pub mod value_objects;

pub use commands::BotCommand;
pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;

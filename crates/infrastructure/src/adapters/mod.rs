//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod telegram_adapter;
mod transit_adapter;

pub use telegram_adapter::TelegramAdapter;
pub use transit_adapter::TransitAdapter;

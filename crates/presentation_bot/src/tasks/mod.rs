//! Background tasks for the bot

mod reminder_ticker;
mod update_polling;

pub use reminder_ticker::{TICK_INTERVAL, next_boundary, spawn_reminder_ticker};
pub use update_polling::{pause_after, poll_backoff, spawn_update_polling};

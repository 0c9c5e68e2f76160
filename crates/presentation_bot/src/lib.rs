//! Commute bot runtime
//!
//! Background tasks that connect the application services to the outside
//! world: the Telegram long-poll loop and the once-a-minute reminder ticker.

pub mod tasks;

pub use tasks::{spawn_reminder_ticker, spawn_update_polling};

//! Application services - Use case implementations

mod command_service;
mod reminder_service;
mod trip_formatter;

pub use command_service::{CommandService, messages};
pub use reminder_service::{ReminderService, TickReport};
pub use trip_formatter::{TripFormatOptions, TripFormatter, format_duration, mode_letter};

//! Reminder time value object
//!
//! Reminder times are stored and compared as plain strings in the "kitchen"
//! clock layout: hour without leading zero, two-digit minute, upper-case
//! meridiem and no separator (`7:05AM`, `12:30PM`). Matching is exact
//! lexical equality, so every producer of a `ReminderTime` must go through
//! [`ReminderTime::from_clock`] to land on the same spelling.

use std::fmt;

use chrono::{DateTime, NaiveTime, TimeZone, Timelike};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A daily clock time at which a commute reminder fires
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReminderTime(String);

impl ReminderTime {
    /// Render a clock time in the canonical kitchen layout
    #[must_use]
    pub fn from_clock(time: NaiveTime) -> Self {
        Self(time.format("%-I:%M%p").to_string())
    }

    /// Render the wall-clock time of an instant, in the instant's own zone
    #[must_use]
    pub fn at<Tz: TimeZone>(instant: &DateTime<Tz>) -> Self {
        let time = instant.time();
        // Seconds are dropped so a tick at 17:30:59 still reads 5:30PM
        let minute = time.with_second(0).and_then(|t| t.with_nanosecond(0));
        Self::from_clock(minute.unwrap_or(time))
    }

    /// Restore a previously stored value without re-normalizing it
    #[must_use]
    pub fn from_stored(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Parse user input such as `7:54am`, `7:54 PM`, `07:54` or `19:54`
    pub fn parse(input: &str) -> Result<Self, DomainError> {
        parse_clock(input)
            .map(Self::from_clock)
            .ok_or_else(|| DomainError::InvalidReminderTime(input.trim().to_string()))
    }

    /// Get the stored string
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ReminderTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parse a 12h (`h:mm am/pm`) or 24h (`hh:mm`) clock string
fn parse_clock(input: &str) -> Option<NaiveTime> {
    let normalized: String = input
        .chars()
        .filter(|c| !c.is_whitespace())
        .collect::<String>()
        .to_ascii_lowercase();

    let (clock, meridiem) = if let Some(rest) = normalized.strip_suffix("am") {
        (rest, Some(false))
    } else if let Some(rest) = normalized.strip_suffix("pm") {
        (rest, Some(true))
    } else {
        (normalized.as_str(), None)
    };

    let (hour, minute) = clock.split_once(':')?;
    if hour.is_empty()
        || hour.len() > 2
        || minute.len() != 2
        || !hour.chars().all(|c| c.is_ascii_digit())
        || !minute.chars().all(|c| c.is_ascii_digit())
    {
        return None;
    }

    let hour: u32 = hour.parse().ok()?;
    let minute: u32 = minute.parse().ok()?;

    let hour = match meridiem {
        Some(is_pm) => {
            if !(1..=12).contains(&hour) {
                return None;
            }
            match (hour, is_pm) {
                (12, false) => 0,
                (12, true) => 12,
                (h, false) => h,
                (h, true) => h + 12,
            }
        },
        None => hour,
    };

    NaiveTime::from_hms_opt(hour, minute, 0)
}

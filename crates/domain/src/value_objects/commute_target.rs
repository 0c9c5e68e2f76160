//! Commute target (home or work)

use std::fmt;

use serde::{Deserialize, Serialize};

/// One of the two saved endpoints of a commute
///
/// A trip "to home" departs from work and arrives at home; a trip "to work"
/// goes the other way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CommuteTarget {
    Home,
    Work,
}

impl CommuteTarget {
    /// Both targets in the order reminders are processed
    pub const ALL: [Self; 2] = [Self::Home, Self::Work];

    /// Lower-case label used in messages and log fields
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Home => "home",
            Self::Work => "work",
        }
    }

    /// The opposite endpoint
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::Home => Self::Work,
            Self::Work => Self::Home,
        }
    }

    /// Command that saves this target's stop
    #[must_use]
    pub const fn set_command(self) -> &'static str {
        match self {
            Self::Home => "/set_home",
            Self::Work => "/set_work",
        }
    }

    /// Command that saves this target's reminder time
    #[must_use]
    pub const fn set_reminder_command(self) -> &'static str {
        match self {
            Self::Home => "/set_home_reminder",
            Self::Work => "/set_work_reminder",
        }
    }

    /// Command that asks for trips towards this target
    #[must_use]
    pub const fn trips_command(self) -> &'static str {
        match self {
            Self::Home => "/home",
            Self::Work => "/work",
        }
    }
}

impl fmt::Display for CommuteTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

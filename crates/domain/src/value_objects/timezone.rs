//! Timezone value object

use std::fmt;

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A validated IANA timezone
///
/// The bot uses exactly one of these as its reference zone: reminder times
/// typed by users are read in it, and scheduler ticks are rendered in it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Timezone(Tz);

impl Timezone {
    /// Parse and validate an IANA timezone name
    pub fn try_new(name: &str) -> Result<Self, DomainError> {
        name.trim()
            .parse::<Tz>()
            .map(Self)
            .map_err(|_| DomainError::InvalidTimezone(name.to_string()))
    }

    /// Get the underlying chrono-tz zone
    #[must_use]
    pub const fn tz(&self) -> Tz {
        self.0
    }

    /// Get the IANA name
    #[must_use]
    pub fn name(&self) -> &'static str {
        self.0.name()
    }

    /// Convert a UTC instant to wall-clock time in this zone
    #[must_use]
    pub fn localize(&self, instant: DateTime<Utc>) -> DateTime<Tz> {
        instant.with_timezone(&self.0)
    }

    /// UTC timezone
    #[must_use]
    pub const fn utc() -> Self {
        Self(Tz::UTC)
    }

    /// Europe/Stockholm timezone
    #[must_use]
    pub const fn stockholm() -> Self {
        Self(Tz::Europe__Stockholm)
    }
}

impl Default for Timezone {
    fn default() -> Self {
        Self::stockholm()
    }
}

impl fmt::Display for Timezone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.name())
    }
}

impl TryFrom<String> for Timezone {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::try_new(&value)
    }
}

impl From<Timezone> for String {
    fn from(tz: Timezone) -> Self {
        tz.name().to_string()
    }
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Timelike};

    use super::*;

    #[test]
    fn valid_names_parse() {
        assert_eq!(Timezone::try_new("Europe/Stockholm").unwrap().name(), "Europe/Stockholm");
        assert_eq!(Timezone::try_new(" UTC ").unwrap(), Timezone::utc());
    }

    #[test]
    fn invalid_names_are_rejected() {
        assert!(Timezone::try_new("Mars/Olympus").is_err());
        assert!(Timezone::try_new("").is_err());
    }

    #[test]
    fn default_is_stockholm() {
        assert_eq!(Timezone::default().to_string(), "Europe/Stockholm");
    }

    #[test]
    fn localize_applies_daylight_saving() {
        let tz = Timezone::stockholm();
        let winter = Utc.with_ymd_and_hms(2026, 1, 10, 7, 0, 0).unwrap();
        let summer = Utc.with_ymd_and_hms(2026, 7, 10, 7, 0, 0).unwrap();
        assert_eq!(tz.localize(winter).hour(), 8);
        assert_eq!(tz.localize(summer).hour(), 9);
    }

    #[test]
    fn serializes_as_name() {
        let json = serde_json::to_string(&Timezone::stockholm()).unwrap();
        assert_eq!(json, "\"Europe/Stockholm\"");
        let back: Timezone = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Timezone::stockholm());
        assert!(serde_json::from_str::<Timezone>("\"Nowhere/Land\"").is_err());
    }
}

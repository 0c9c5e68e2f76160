//! Transit stop entity

use serde::{Deserialize, Serialize};

use crate::value_objects::StopId;

/// WGS84 coordinates of a stop
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    #[must_use]
    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// A stop returned by the station lookup
///
/// Immutable once constructed; the bot only ever reads it to offer a choice
/// and then persists its id and name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stop {
    name: String,
    site_id: StopId,
    external_id: Option<String>,
    kind: Option<String>,
    coordinates: Option<Coordinates>,
    track: Option<String>,
}

impl Stop {
    /// Create a stop with just a name and id
    #[must_use]
    pub fn new(site_id: StopId, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            site_id,
            external_id: None,
            kind: None,
            coordinates: None,
            track: None,
        }
    }

    /// Set the planner's external id
    #[must_use]
    pub fn with_external_id(mut self, external_id: impl Into<String>) -> Self {
        self.external_id = Some(external_id.into());
        self
    }

    /// Set the stop kind (e.g. `Station`)
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = Some(kind.into());
        self
    }

    #[must_use]
    pub const fn with_coordinates(mut self, coordinates: Coordinates) -> Self {
        self.coordinates = Some(coordinates);
        self
    }

    #[must_use]
    pub fn with_track(mut self, track: impl Into<String>) -> Self {
        self.track = Some(track.into());
        self
    }

    /// Identifier used for trip searches
    #[must_use]
    pub const fn id(&self) -> &StopId {
        &self.site_id
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn external_id(&self) -> Option<&str> {
        self.external_id.as_deref()
    }

    #[must_use]
    pub fn kind(&self) -> Option<&str> {
        self.kind.as_deref()
    }

    #[must_use]
    pub const fn coordinates(&self) -> Option<Coordinates> {
        self.coordinates
    }

    #[must_use]
    pub fn track(&self) -> Option<&str> {
        self.track.as_deref()
    }

    /// The id/name pair that gets saved to a user's preferences
    #[must_use]
    pub fn to_ref(&self) -> StopRef {
        StopRef::new(self.site_id.clone(), self.name.clone())
    }
}

/// A saved reference to a stop: the id used for searches plus its display name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopRef {
    pub id: StopId,
    pub name: String,
}

impl StopRef {
    #[must_use]
    pub fn new(id: StopId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_sets_optional_fields() {
        let stop = Stop::new(StopId::new("9192").unwrap(), "Slussen")
            .with_external_id("300109192")
            .with_kind("Station")
            .with_coordinates(Coordinates::new(59.319_533, 18.072_287))
            .with_track("2");

        assert_eq!(stop.id().as_str(), "9192");
        assert_eq!(stop.name(), "Slussen");
        assert_eq!(stop.external_id(), Some("300109192"));
        assert_eq!(stop.kind(), Some("Station"));
        assert_eq!(stop.track(), Some("2"));
        assert!(stop.coordinates().is_some());
    }

    #[test]
    fn to_ref_keeps_id_and_name() {
        let stop = Stop::new(StopId::new("9001").unwrap(), "T-Centralen");
        let saved = stop.to_ref();
        assert_eq!(saved.id.as_str(), "9001");
        assert_eq!(saved.name, "T-Centralen");
    }
}

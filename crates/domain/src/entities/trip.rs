//! Trip entities as returned by the journey planner

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::errors::DomainError;

/// A stop call: a stop name plus the scheduled time the leg is there
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StopCall {
    pub name: String,
    /// Planner id of the stop, when reported
    pub stop_id: Option<String>,
    /// Scheduled time as reported (`HH:MM:SS`)
    pub time: String,
    /// Service date as reported (`YYYY-MM-DD`)
    pub date: Option<String>,
    pub track: Option<String>,
}

impl StopCall {
    /// Create a stop call with a name and time only
    #[must_use]
    pub fn new(name: impl Into<String>, time: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            stop_id: None,
            time: time.into(),
            date: None,
            track: None,
        }
    }

    /// Attach the service date
    #[must_use]
    pub fn on(mut self, date: impl Into<String>) -> Self {
        self.date = Some(date.into());
        self
    }

    /// Parse the scheduled time of day
    #[must_use]
    pub fn clock_time(&self) -> Option<NaiveTime> {
        let time = self.time.trim();
        NaiveTime::parse_from_str(time, "%H:%M:%S")
            .or_else(|_| NaiveTime::parse_from_str(time, "%H:%M"))
            .ok()
    }

    /// Parse the full scheduled date-time, when both parts are present
    #[must_use]
    pub fn date_time(&self) -> Option<NaiveDateTime> {
        let date = NaiveDate::parse_from_str(self.date.as_deref()?.trim(), "%Y-%m-%d").ok()?;
        Some(date.and_time(self.clock_time()?))
    }
}

/// A service alert attached to a leg
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceAlert {
    pub headline: String,
    pub body: String,
}

impl ServiceAlert {
    #[must_use]
    pub fn new(headline: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            headline: headline.into(),
            body: body.into(),
        }
    }
}

/// One ride (or walk) between two stop calls
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Leg {
    pub origin: StopCall,
    pub destination: StopCall,
    /// Line designation (e.g. `14`, `43`)
    pub line: Option<String>,
    /// Short transport category code (`BUS`, `MET`, `TRM`, `TRN`, `SHP`)
    pub category_code: Option<String>,
    /// Alerts in the order the planner reported them
    pub alerts: Vec<ServiceAlert>,
}

impl Leg {
    #[must_use]
    pub const fn new(origin: StopCall, destination: StopCall) -> Self {
        Self {
            origin,
            destination,
            line: None,
            category_code: None,
            alerts: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_line(mut self, line: impl Into<String>, category_code: impl Into<String>) -> Self {
        self.line = Some(line.into());
        self.category_code = Some(category_code.into());
        self
    }

    #[must_use]
    pub fn with_alert(mut self, alert: ServiceAlert) -> Self {
        self.alerts.push(alert);
        self
    }

    /// First reported alert, the only one shown to users
    #[must_use]
    pub fn first_alert(&self) -> Option<&ServiceAlert> {
        self.alerts.first()
    }
}

/// A complete journey suggestion: a non-empty, ordered list of legs
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Trip {
    id: Option<String>,
    checksum: Option<String>,
    legs: Vec<Leg>,
}

impl Trip {
    /// Create a trip; a trip without legs is rejected
    pub fn new(legs: Vec<Leg>) -> Result<Self, DomainError> {
        if legs.is_empty() {
            return Err(DomainError::MalformedTrip("trip has no legs".to_string()));
        }
        Ok(Self {
            id: None,
            checksum: None,
            legs,
        })
    }

    /// Attach the planner's trip id and checksum
    #[must_use]
    pub fn with_identity(mut self, id: Option<String>, checksum: Option<String>) -> Self {
        self.id = id;
        self.checksum = checksum;
        self
    }

    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    #[must_use]
    pub fn checksum(&self) -> Option<&str> {
        self.checksum.as_deref()
    }

    #[must_use]
    pub fn legs(&self) -> &[Leg] {
        &self.legs
    }

    /// Where the trip starts
    #[must_use]
    pub fn departure(&self) -> &StopCall {
        // Non-empty by construction
        &self.legs[0].origin
    }

    /// Where the trip ends
    #[must_use]
    pub fn arrival(&self) -> &StopCall {
        &self.legs[self.legs.len() - 1].destination
    }
}

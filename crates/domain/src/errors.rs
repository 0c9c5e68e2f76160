//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Error)]
pub enum DomainError {
    /// Reminder time could not be parsed from user input
    #[error("Invalid reminder time: {0}")]
    InvalidReminderTime(String),

    /// Timezone name is not a known IANA zone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Stop identifier is empty or malformed
    #[error("Invalid stop id: {0}")]
    InvalidStopId(String),

    /// Trip data violates an invariant (e.g. no legs)
    #[error("Malformed trip: {0}")]
    MalformedTrip(String),

    /// Invalid command format or parameters
    #[error("Invalid command: {0}")]
    InvalidCommand(String),

    /// Entity not found
    #[error("{entity_type} not found: {id}")]
    NotFound { entity_type: String, id: String },

    /// Validation failed
    #[error("Validation failed: {0}")]
    ValidationError(String),
}

impl DomainError {
    /// Create a not found error
    pub fn not_found(entity_type: impl Into<String>, id: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: entity_type.into(),
            id: id.into(),
        }
    }
}

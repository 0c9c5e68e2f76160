//! Pending stop selection port
//!
//! When a user searches for a stop, the candidates are parked here under a
//! correlation id and the chat options only carry `{correlation_id}:{index}`.
//! Entries expire after a TTL.

use std::fmt;

use async_trait::async_trait;
use domain::{ChatUserId, CommuteTarget, StopRef};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};

use crate::error::ApplicationError;

/// Candidates offered to a user for one target
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingSelection {
    /// User the options were offered to
    pub user_id: ChatUserId,
    pub target: CommuteTarget,
    pub stops: Vec<StopRef>,
}

/// Payload carried by a selectable option
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectionPayload {
    pub correlation_id: String,
    pub index: usize,
}

impl SelectionPayload {
    #[must_use]
    pub fn new(correlation_id: impl Into<String>, index: usize) -> Self {
        Self {
            correlation_id: correlation_id.into(),
            index,
        }
    }

    /// Parse `{correlation_id}:{index}`
    #[must_use]
    pub fn parse(payload: &str) -> Option<Self> {
        let (correlation_id, index) = payload.rsplit_once(':')?;
        if correlation_id.is_empty() {
            return None;
        }
        Some(Self::new(correlation_id, index.parse().ok()?))
    }
}

impl fmt::Display for SelectionPayload {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.correlation_id, self.index)
    }
}

/// Port for parking pending selections
#[cfg_attr(test, automock)]
#[async_trait]
pub trait SelectionStore: Send + Sync {
    /// Park a selection and return its correlation id
    async fn put(&self, selection: PendingSelection) -> Result<String, ApplicationError>;

    /// Look up a parked selection that has not expired
    async fn get(&self, correlation_id: &str) -> Result<Option<PendingSelection>, ApplicationError>;

    /// Drop a parked selection
    async fn remove(&self, correlation_id: &str) -> Result<(), ApplicationError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payload_formats_and_parses() {
        let payload = SelectionPayload::new("3f2a", 4);
        assert_eq!(payload.to_string(), "3f2a:4");
        assert_eq!(SelectionPayload::parse("3f2a:4"), Some(payload));
    }

    #[test]
    fn malformed_payloads_rejected() {
        for raw in ["", "3f2a", ":1", "3f2a:", "3f2a:x", "3f2a:-1"] {
            assert!(SelectionPayload::parse(raw).is_none(), "accepted {raw:?}");
        }
    }

    #[test]
    fn trait_is_send_sync() {
        fn assert_send_sync<T: Send + Sync + ?Sized>() {}
        assert_send_sync::<dyn SelectionStore>();
    }
}

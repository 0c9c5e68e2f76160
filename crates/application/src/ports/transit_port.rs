//! Journey planner port
//!
//! Trip search between two saved stops and free-text station lookup.
//! Adapters in the infrastructure layer implement this port using the SL APIs.

use async_trait::async_trait;
use domain::{Stop, StopId, Trip};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the journey planner
///
/// An empty `Ok` list means the planner answered with nothing; failures are
/// always `Err` so callers can tell the two apart.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitPort: Send + Sync {
    /// Search trips from `origin` to `destination`, departing now
    async fn search_trips(
        &self,
        origin: &StopId,
        destination: &StopId,
    ) -> Result<Vec<Trip>, ApplicationError>;

    /// Look up stations matching a free-text query
    async fn lookup_stops(&self, query: &str) -> Result<Vec<Stop>, ApplicationError>;
}

//! Transit adapter - Implements TransitPort using integration_transit

use std::sync::Arc;

use application::ApplicationError;
use application::ports::TransitPort;
use async_trait::async_trait;
use domain::{Stop, StopId, Trip};
use integration_transit::{SlTransitClient, TransitClient, TransitConfig, TransitError};
use tracing::{debug, instrument, warn};

/// Adapter for the SL journey planner and station lookup
pub struct TransitAdapter {
    client: Arc<dyn TransitClient>,
}

impl std::fmt::Debug for TransitAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAdapter").finish_non_exhaustive()
    }
}

impl TransitAdapter {
    /// Wrap an existing transit client
    #[must_use]
    pub fn new(client: Arc<dyn TransitClient>) -> Self {
        Self { client }
    }

    /// Build the SL client from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn from_config(config: &TransitConfig) -> Result<Self, ApplicationError> {
        let client = SlTransitClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client)))
    }
}

fn map_transit_error(err: TransitError) -> ApplicationError {
    match err {
        TransitError::RateLimitExceeded { .. } => ApplicationError::RateLimited,
        TransitError::ConfigurationError(msg) => ApplicationError::Configuration(msg),
        TransitError::InvalidQuery(msg) => ApplicationError::InvalidOperation(msg),
        other => ApplicationError::ExternalService(other.to_string()),
    }
}

#[async_trait]
impl TransitPort for TransitAdapter {
    #[instrument(skip(self), fields(origin = %origin, destination = %destination))]
    async fn search_trips(
        &self,
        origin: &StopId,
        destination: &StopId,
    ) -> Result<Vec<Trip>, ApplicationError> {
        let trips = self
            .client
            .search_trips(origin.as_str(), destination.as_str())
            .await
            .map_err(|e| {
                warn!(error = %e, retryable = e.is_retryable(), "Trip search failed");
                map_transit_error(e)
            })?;

        debug!(count = trips.len(), "Trip search completed");
        Ok(trips)
    }

    #[instrument(skip(self))]
    async fn lookup_stops(&self, query: &str) -> Result<Vec<Stop>, ApplicationError> {
        let stops = self.client.lookup_stops(query).await.map_err(|e| {
            warn!(error = %e, retryable = e.is_retryable(), "Stop lookup failed");
            map_transit_error(e)
        })?;

        debug!(count = stops.len(), "Stop lookup completed");
        Ok(stops)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use domain::{Leg, StopCall};

    use super::*;

    #[derive(Default)]
    struct FakeClient {
        calls: Mutex<Vec<(String, String)>>,
        fail_with: Mutex<Option<TransitError>>,
    }

    #[async_trait]
    impl TransitClient for FakeClient {
        async fn search_trips(
            &self,
            origin: &str,
            destination: &str,
        ) -> Result<Vec<Trip>, TransitError> {
            self.calls
                .lock()
                .unwrap()
                .push((origin.to_string(), destination.to_string()));
            if let Some(err) = self.fail_with.lock().unwrap().take() {
                return Err(err);
            }
            let leg = Leg::new(StopCall::new("A", "08:00:00"), StopCall::new("B", "08:20:00"));
            Ok(vec![Trip::new(vec![leg]).unwrap()])
        }

        async fn lookup_stops(&self, query: &str) -> Result<Vec<Stop>, TransitError> {
            if let Some(err) = self.fail_with.lock().unwrap().take() {
                return Err(err);
            }
            Ok(vec![Stop::new(StopId::new("9192").unwrap(), format!("{query}sen"))])
        }
    }

    fn id(raw: &str) -> StopId {
        StopId::new(raw).unwrap()
    }

    #[tokio::test]
    async fn search_passes_ids_through() {
        let fake = Arc::new(FakeClient::default());
        let adapter = TransitAdapter::new(Arc::clone(&fake) as Arc<dyn TransitClient>);

        let trips = adapter.search_trips(&id("9002"), &id("9001")).await.unwrap();

        assert_eq!(trips.len(), 1);
        assert_eq!(
            fake.calls.lock().unwrap().as_slice(),
            &[("9002".to_string(), "9001".to_string())]
        );
    }

    #[tokio::test]
    async fn lookup_returns_domain_stops() {
        let adapter = TransitAdapter::new(Arc::new(FakeClient::default()));
        let stops = adapter.lookup_stops("Slus").await.unwrap();
        assert_eq!(stops[0].name(), "Slussen");
    }

    #[tokio::test]
    async fn upstream_failures_become_external_service_errors() {
        let fake = FakeClient::default();
        *fake.fail_with.lock().unwrap() = Some(TransitError::Timeout { timeout_secs: 10 });
        let adapter = TransitAdapter::new(Arc::new(fake));

        let err = adapter.search_trips(&id("1"), &id("2")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::ExternalService(_)));
    }

    #[test]
    fn error_mapping() {
        assert!(matches!(
            map_transit_error(TransitError::RateLimitExceeded {
                retry_after_secs: Some(3)
            }),
            ApplicationError::RateLimited
        ));
        assert!(matches!(
            map_transit_error(TransitError::ConfigurationError("key".to_string())),
            ApplicationError::Configuration(_)
        ));
        assert!(matches!(
            map_transit_error(TransitError::InvalidQuery("blank".to_string())),
            ApplicationError::InvalidOperation(_)
        ));
        assert!(matches!(
            map_transit_error(TransitError::ApiError {
                code: "H890".to_string(),
                message: "no connection".to_string()
            }),
            ApplicationError::ExternalService(_)
        ));
    }
}

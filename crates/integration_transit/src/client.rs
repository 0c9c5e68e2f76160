//! SL transit client
//!
//! Trip search via Travel Planner v3 and station lookup via the typeahead
//! API. One GET per call, fixed overall timeout, no retry and no caching.

use std::time::Duration;

use async_trait::async_trait;
use domain::{Coordinates, Leg, ServiceAlert, Stop, StopCall, StopId, Trip};
use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::{RawLeg, RawLookupResponse, RawSite, RawStopCall, RawTrip, RawTripResponse};

/// Most stations a lookup ever returns
pub const MAX_STOP_RESULTS: usize = 6;

/// Trait for journey planner clients
#[async_trait]
pub trait TransitClient: Send + Sync {
    /// Search trips departing now from `origin` to `destination`
    async fn search_trips(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<Trip>, TransitError>;

    /// Look up stations by free text
    async fn lookup_stops(&self, query: &str) -> Result<Vec<Stop>, TransitError>;
}

/// Client for the SL Travel Planner v3 and typeahead APIs
#[derive(Debug)]
pub struct SlTransitClient {
    client: Client,
    config: TransitConfig,
}

impl SlTransitClient {
    /// Create a new SL transit client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!("commute-bot/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| TransitError::ConnectionFailed(e.to_string()))?;

        Ok(Self {
            client,
            config: config.clone(),
        })
    }

    fn require_key<'a>(key: &'a str, name: &str) -> Result<&'a str, TransitError> {
        if key.trim().is_empty() {
            return Err(TransitError::ConfigurationError(format!("{name} is not set")));
        }
        Ok(key)
    }

    /// GET `{base_url}/{endpoint}` and decode the JSON body
    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, &str)],
    ) -> Result<T, TransitError> {
        let url = format!("{}/{endpoint}", self.config.base_url.trim_end_matches('/'));
        debug!(%url, "Calling SL API");

        let response = self
            .client
            .get(&url)
            .query(params)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    TransitError::Timeout {
                        timeout_secs: self.config.timeout_secs,
                    }
                } else {
                    TransitError::ConnectionFailed(e.without_url().to_string())
                }
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(TransitError::RateLimitExceeded {
                retry_after_secs: response
                    .headers()
                    .get("retry-after")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok()),
            });
        }

        if !status.is_success() {
            return Err(TransitError::RequestFailed(format!("HTTP {status}")));
        }

        let body = response.text().await.map_err(|e| {
            if e.is_timeout() {
                TransitError::Timeout {
                    timeout_secs: self.config.timeout_secs,
                }
            } else {
                TransitError::ParseError(e.without_url().to_string())
            }
        })?;

        serde_json::from_str(&body).map_err(|e| TransitError::ParseError(e.to_string()))
    }

    /// Decode a trip search body into trips
    ///
    /// Trips without legs are dropped with a warning.
    fn parse_trips_response(raw: RawTripResponse) -> Result<Vec<Trip>, TransitError> {
        if let Some(code) = raw.error_code {
            return Err(TransitError::ApiError {
                code,
                message: raw.error_text.unwrap_or_default(),
            });
        }

        Ok(raw
            .trips
            .into_iter()
            .filter_map(|trip| {
                let id = trip.trip_id.clone();
                match Self::convert_trip(trip) {
                    Ok(trip) => Some(trip),
                    Err(e) => {
                        warn!(error = %e, trip_id = ?id, "Skipping malformed trip");
                        None
                    },
                }
            })
            .collect())
    }

    fn convert_trip(raw: RawTrip) -> Result<Trip, domain::DomainError> {
        let legs = raw
            .leg_list
            .unwrap_or_default()
            .legs
            .into_iter()
            .map(Self::convert_leg)
            .collect();
        Ok(Trip::new(legs)?.with_identity(raw.trip_id, raw.checksum))
    }

    fn convert_leg(raw: RawLeg) -> Leg {
        let product = raw.product.unwrap_or_default();
        let alerts = raw
            .messages
            .unwrap_or_default()
            .messages
            .into_iter()
            .map(|m| ServiceAlert::new(m.head, m.text))
            .collect();

        Leg {
            origin: Self::convert_stop_call(raw.origin),
            destination: Self::convert_stop_call(raw.destination),
            line: product.line.filter(|l| !l.is_empty()),
            category_code: product.cat_out_s.filter(|c| !c.is_empty()),
            alerts,
        }
    }

    fn convert_stop_call(raw: RawStopCall) -> StopCall {
        StopCall {
            name: raw.name,
            stop_id: raw.ext_id.or(raw.id),
            time: raw.time,
            date: raw.date.filter(|d| !d.is_empty()),
            track: raw.track.filter(|t| !t.is_empty()),
        }
    }

    /// Decode a typeahead body into stops
    fn parse_lookup_response(raw: RawLookupResponse) -> Result<Vec<Stop>, TransitError> {
        if raw.status_code != 0 {
            let message = raw
                .message
                .as_ref()
                .and_then(|m| m.as_str())
                .unwrap_or_default()
                .to_string();
            return Err(TransitError::ApiError {
                code: raw.status_code.to_string(),
                message,
            });
        }

        Ok(raw
            .response_data
            .unwrap_or_default()
            .into_iter()
            .filter_map(Self::convert_site)
            .take(MAX_STOP_RESULTS)
            .collect())
    }

    fn convert_site(raw: RawSite) -> Option<Stop> {
        let Ok(id) = StopId::new(raw.site_id) else {
            debug!(name = %raw.name, "Skipping site without id");
            return None;
        };

        let mut stop = Stop::new(id, raw.name);
        if let Some(kind) = raw.kind {
            stop = stop.with_kind(kind);
        }
        if let (Some(lat), Some(lon)) = (
            raw.y.as_deref().and_then(micro_degrees),
            raw.x.as_deref().and_then(micro_degrees),
        ) {
            stop = stop.with_coordinates(Coordinates::new(lat, lon));
        }
        Some(stop)
    }
}

/// Convert a micro-degree string (`"59320284"`) to degrees
#[allow(clippy::cast_precision_loss)]
fn micro_degrees(value: &str) -> Option<f64> {
    value.trim().parse::<i64>().ok().map(|v| v as f64 / 1_000_000.0)
}

#[async_trait]
impl TransitClient for SlTransitClient {
    #[instrument(skip(self))]
    async fn search_trips(
        &self,
        origin: &str,
        destination: &str,
    ) -> Result<Vec<Trip>, TransitError> {
        let key = Self::require_key(&self.config.planning_api_key, "planning_api_key")?;

        let params = [
            ("key", key),
            ("originID", origin),
            ("destID", destination),
            ("lang", self.config.language.as_str()),
        ];

        let raw: RawTripResponse = self.get_json("TravelplannerV3/trip.json", &params).await?;
        let trips = Self::parse_trips_response(raw)?;

        debug!(count = trips.len(), "Trips found");
        Ok(trips)
    }

    #[instrument(skip(self))]
    async fn lookup_stops(&self, query: &str) -> Result<Vec<Stop>, TransitError> {
        if query.trim().is_empty() {
            return Err(TransitError::InvalidQuery(
                "Search string must not be empty".to_string(),
            ));
        }
        let key = Self::require_key(&self.config.lookup_api_key, "lookup_api_key")?;
        let max_results = MAX_STOP_RESULTS.to_string();

        let params = [
            ("key", key),
            ("SearchString", query.trim()),
            ("StationOnly", "True"),
            ("MaxResults", max_results.as_str()),
            ("lang", self.config.language.as_str()),
        ];

        let raw: RawLookupResponse = self.get_json("typeahead.json", &params).await?;
        let stops = Self::parse_lookup_response(raw)?;

        debug!(count = stops.len(), "Stations found");
        Ok(stops)
    }
}

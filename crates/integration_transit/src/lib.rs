//! SL public transit integration
//!
//! Provides trip search via SL Travel Planner v3 (HAFAS) and station lookup
//! via the SL typeahead API, decoding both into the domain's [`Trip`] and
//! [`Stop`] types.
//!
//! # Example
//!
//! ```rust,ignore
//! use integration_transit::{SlTransitClient, TransitClient, TransitConfig};
//!
//! let client = SlTransitClient::new(&config)?;
//! let trips = client.search_trips("9001", "9192").await?;
//! ```
//!
//! [`Trip`]: domain::Trip
//! [`Stop`]: domain::Stop

mod client;
mod config;
mod error;
pub mod models;

pub use client::{MAX_STOP_RESULTS, SlTransitClient, TransitClient};
pub use config::TransitConfig;
pub use error::TransitError;

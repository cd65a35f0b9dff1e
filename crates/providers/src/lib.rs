//! Upstream provider clients for the morning brief.
//!
//! Three independent providers feed the composite response:
//!
//! - [`market`]: daily close and headlines per tracked index (Yahoo Finance)
//! - [`air_quality`]: city air quality index (WAQI)
//! - [`weather`]: current conditions (WeatherAPI)
//!
//! The [`Aggregator`] fans out to all of them concurrently and joins the
//! results. Every failure is caught at the smallest scope (per index, per
//! provider) and turned into an error payload, so aggregation itself never
//! fails.
//!
//! # Modules
//!
//! - [`config`]: credentials, endpoints and timeouts, read once at startup
//! - [`error`]: [`FetchError`], the failure type of a single upstream call
//! - [`aggregator`]: concurrent fan-out and fan-in

pub mod aggregator;
pub mod air_quality;
pub mod config;
pub mod error;
mod http;
pub mod market;
pub mod weather;

pub use aggregator::Aggregator;
pub use air_quality::AirQualityClient;
pub use config::{Endpoints, ProviderConfig};
pub use error::FetchError;
pub use market::MarketClient;
pub use weather::WeatherClient;

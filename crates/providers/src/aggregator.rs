//! Concurrent fan-out to every provider and fan-in into one response.
//!
//! ```text
//!                   ┌── market ──┬── index 1: quote ∥ news ──┐
//!                   │            ├── index 2: quote ∥ news ──┤
//!  aggregate() ─────┤            └── index n: quote ∥ news ──┤
//!                   ├── air quality ─────────────────────────┼──► CompositeResponse
//!                   └── weather ─────────────────────────────┘
//! ```
//!
//! Each branch has its own deadline and converts its own failure into an
//! error payload before the join, so a failing or slow branch never cancels
//! or blocks its siblings beyond that deadline.

use std::sync::Arc;
use std::time::Instant;

use tracing::info;
use types::CompositeResponse;

use crate::air_quality::AirQualityClient;
use crate::config::ProviderConfig;
use crate::error::FetchError;
use crate::http::build_client;
use crate::market::MarketClient;
use crate::weather::WeatherClient;

/// Owns the provider clients; cheap to share behind an `Arc`.
pub struct Aggregator {
    market: MarketClient,
    air_quality: AirQualityClient,
    weather: WeatherClient,
}

impl Aggregator {
    /// Build the shared HTTP client and the three provider clients.
    pub fn new(config: ProviderConfig) -> Result<Self, FetchError> {
        let client = build_client(&config)?;
        let config = Arc::new(config);

        Ok(Self {
            market: MarketClient::new(client.clone(), Arc::clone(&config)),
            air_quality: AirQualityClient::new(client.clone(), Arc::clone(&config)),
            weather: WeatherClient::new(client, config),
        })
    }

    /// Query every provider and merge the results. Never fails.
    pub async fn aggregate(&self) -> CompositeResponse {
        let started = Instant::now();

        let (market_summary, air_quality, weather) = tokio::join!(
            self.market.summary(),
            self.air_quality.fetch(),
            self.weather.fetch(),
        );

        let failures = market_summary.values().filter(|r| r.is_failure()).count()
            + usize::from(air_quality.is_failure())
            + usize::from(weather.is_failure());
        info!(
            elapsed_ms = started.elapsed().as_millis() as u64,
            indices = market_summary.len(),
            failures,
            "aggregated provider results"
        );

        CompositeResponse {
            market_summary,
            air_quality,
            weather,
        }
    }
}

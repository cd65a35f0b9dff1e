//! Provider configuration.
//!
//! Credentials and tunables are loaded once at process start into an
//! immutable [`ProviderConfig`] and shared read-only by every fetch. Endpoint
//! URLs and the tracked index table are static; tests swap them out through
//! the builder setters.

use std::fmt;
use std::time::Duration;

use types::{TrackedIndex, default_indices};

/// Yahoo Finance chart endpoint; the symbol is appended as a path segment.
pub const CHART_URL: &str = "https://query1.finance.yahoo.com/v8/finance/chart";
/// Yahoo Finance search endpoint, used for headlines.
pub const NEWS_URL: &str = "https://query1.finance.yahoo.com/v1/finance/search";
/// WAQI city feed.
pub const AQI_URL: &str = "https://api.waqi.info/feed/chennai/";
/// WeatherAPI current conditions.
pub const WEATHER_URL: &str = "https://api.weatherapi.com/v1/current.json";
/// Location passed to the weather provider.
pub const WEATHER_LOCATION: &str = "Chennai";
/// Default ceiling for a single provider fetch.
pub const DEFAULT_FETCH_TIMEOUT: Duration = Duration::from_secs(10);

/// Upstream URLs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub chart_url: String,
    pub news_url: String,
    pub aqi_url: String,
    pub weather_url: String,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            chart_url: CHART_URL.into(),
            news_url: NEWS_URL.into(),
            aqi_url: AQI_URL.into(),
            weather_url: WEATHER_URL.into(),
        }
    }
}

impl Endpoints {
    /// All endpoints rooted at one base URL, keeping the upstream paths.
    ///
    /// Lets a single mock server stand in for every provider.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self {
            chart_url: format!("{base}/v8/finance/chart"),
            news_url: format!("{base}/v1/finance/search"),
            aqi_url: format!("{base}/feed/chennai/"),
            weather_url: format!("{base}/v1/current.json"),
        }
    }
}

/// Everything the provider clients need, shared read-only across fetches.
#[derive(Clone)]
pub struct ProviderConfig {
    /// WAQI token. `None` short-circuits the AQI fetch.
    pub aqi_api_key: Option<String>,
    /// WeatherAPI key. `None` short-circuits the weather fetch.
    pub weather_api_key: Option<String>,
    /// Indices reported in the market summary.
    pub indices: Vec<TrackedIndex>,
    pub endpoints: Endpoints,
    pub weather_location: String,
    /// Ceiling applied independently to each fetch.
    pub fetch_timeout: Duration,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            aqi_api_key: None,
            weather_api_key: None,
            indices: default_indices(),
            endpoints: Endpoints::default(),
            weather_location: WEATHER_LOCATION.into(),
            fetch_timeout: DEFAULT_FETCH_TIMEOUT,
        }
    }
}

impl ProviderConfig {
    pub fn new() -> Self {
        Self::default()
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Builder-style setters
    // ─────────────────────────────────────────────────────────────────────────

    /// Set the AQI token. Blank keys count as missing.
    pub fn aqi_api_key(mut self, key: Option<String>) -> Self {
        self.aqi_api_key = non_blank(key);
        self
    }

    /// Set the weather key. Blank keys count as missing.
    pub fn weather_api_key(mut self, key: Option<String>) -> Self {
        self.weather_api_key = non_blank(key);
        self
    }

    pub fn indices(mut self, indices: Vec<TrackedIndex>) -> Self {
        self.indices = indices;
        self
    }

    pub fn endpoints(mut self, endpoints: Endpoints) -> Self {
        self.endpoints = endpoints;
        self
    }

    pub fn fetch_timeout(mut self, timeout: Duration) -> Self {
        self.fetch_timeout = timeout;
        self
    }
}

impl fmt::Debug for ProviderConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderConfig")
            .field("aqi_api_key", &redacted(&self.aqi_api_key))
            .field("weather_api_key", &redacted(&self.weather_api_key))
            .field("indices", &self.indices)
            .field("endpoints", &self.endpoints)
            .field("weather_location", &self.weather_location)
            .field("fetch_timeout", &self.fetch_timeout)
            .finish()
    }
}

fn non_blank(key: Option<String>) -> Option<String> {
    key.map(|k| k.trim().to_string()).filter(|k| !k.is_empty())
}

fn redacted(key: &Option<String>) -> &'static str {
    match key {
        Some(_) => "<set>",
        None => "<missing>",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ProviderConfig::default();
        assert!(config.aqi_api_key.is_none());
        assert!(config.weather_api_key.is_none());
        assert_eq!(config.indices.len(), 3);
        assert_eq!(config.endpoints.aqi_url, AQI_URL);
        assert_eq!(config.weather_location, "Chennai");
        assert_eq!(config.fetch_timeout, Duration::from_secs(10));
    }

    #[test]
    fn test_blank_keys_are_missing() {
        let config = ProviderConfig::new()
            .aqi_api_key(Some("   ".into()))
            .weather_api_key(Some(String::new()));
        assert!(config.aqi_api_key.is_none());
        assert!(config.weather_api_key.is_none());

        let config = ProviderConfig::new().aqi_api_key(Some("token".into()));
        assert_eq!(config.aqi_api_key.as_deref(), Some("token"));
    }

    #[test]
    fn test_debug_redacts_keys() {
        let config = ProviderConfig::new()
            .aqi_api_key(Some("super-secret".into()))
            .weather_api_key(None);
        let printed = format!("{config:?}");
        assert!(!printed.contains("super-secret"));
        assert!(printed.contains("<set>"));
        assert!(printed.contains("<missing>"));
    }

    #[test]
    fn test_endpoints_with_base() {
        let endpoints = Endpoints::with_base("http://127.0.0.1:1234/");
        assert_eq!(endpoints.chart_url, "http://127.0.0.1:1234/v8/finance/chart");
        assert_eq!(endpoints.news_url, "http://127.0.0.1:1234/v1/finance/search");
        assert_eq!(endpoints.aqi_url, "http://127.0.0.1:1234/feed/chennai/");
        assert_eq!(endpoints.weather_url, "http://127.0.0.1:1234/v1/current.json");
    }
}

//! Core types for the morning brief.
//!
//! This crate provides the data model shared by the provider clients and the
//! HTTP server: the per-provider result type, the payload shapes returned by
//! each provider, and the composite response served on `GET /`.
//!
//! Every leaf of the composite response is a [`ProviderResult`], so the JSON
//! document always carries all three top-level keys, each holding either the
//! provider's payload or an `{"error": "..."}` object.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

// =============================================================================
// Constants
// =============================================================================

/// Maximum number of news items reported per index.
pub const MAX_NEWS_ITEMS: usize = 3;

/// Title used when a news item has none.
pub const NO_TITLE: &str = "No title";

/// Summary used when a news item has none.
pub const NO_SUMMARY: &str = "No summary";

/// Indices tracked by default: (symbol, display name).
pub const DEFAULT_INDICES: [(&str, &str); 3] = [
    ("^NSEI", "Nifty 50"),
    ("^BSESN", "Sensex"),
    ("^IXIC", "NASDAQ"),
];

// =============================================================================
// Tracked indices
// =============================================================================

/// A market index identified by its quote symbol and a human-readable name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TrackedIndex {
    /// Quote symbol as understood by the market provider (e.g. `^NSEI`).
    pub symbol: String,
    /// Name used as the key in the market summary (e.g. `Nifty 50`).
    pub display_name: String,
}

impl TrackedIndex {
    pub fn new(symbol: impl Into<String>, display_name: impl Into<String>) -> Self {
        Self {
            symbol: symbol.into(),
            display_name: display_name.into(),
        }
    }
}

impl fmt::Display for TrackedIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.display_name, self.symbol)
    }
}

/// The static index table as owned values.
pub fn default_indices() -> Vec<TrackedIndex> {
    DEFAULT_INDICES
        .iter()
        .map(|(symbol, name)| TrackedIndex::new(*symbol, *name))
        .collect()
}

// =============================================================================
// ProviderResult
// =============================================================================

/// Outcome of a single provider (or single index) fetch.
///
/// Serializes untagged: a success is the bare payload, a failure is
/// `{"error": "<message>"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProviderResult<T> {
    // Listed first so untagged deserialization tries the error shape before
    // payloads whose fields are all optional.
    /// The fetch failed; `error` describes why.
    Failure { error: String },
    /// The fetch succeeded.
    Success(T),
}

impl<T> ProviderResult<T> {
    pub fn success(value: T) -> Self {
        ProviderResult::Success(value)
    }

    pub fn failure(error: impl Into<String>) -> Self {
        ProviderResult::Failure {
            error: error.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ProviderResult::Success(_))
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    /// The success payload, if any.
    pub fn as_success(&self) -> Option<&T> {
        match self {
            ProviderResult::Success(value) => Some(value),
            ProviderResult::Failure { .. } => None,
        }
    }

    /// The failure message, if any.
    pub fn error(&self) -> Option<&str> {
        match self {
            ProviderResult::Success(_) => None,
            ProviderResult::Failure { error } => Some(error),
        }
    }
}

// =============================================================================
// Market
// =============================================================================

/// A news headline attached to an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItem {
    pub title: String,
    pub summary: String,
}

impl NewsItem {
    /// Build an item, substituting the fallback literals for missing fields.
    pub fn from_parts(title: Option<String>, summary: Option<String>) -> Self {
        Self {
            title: title.unwrap_or_else(|| NO_TITLE.to_string()),
            summary: summary.unwrap_or_else(|| NO_SUMMARY.to_string()),
        }
    }
}

/// Latest close and related news for one index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketEntry {
    /// Last daily close, or `null` when the provider had no data.
    #[serde(rename = "Closing Price")]
    pub closing_price: Option<f64>,
    /// At most [`MAX_NEWS_ITEMS`] headlines.
    #[serde(rename = "Related News")]
    pub related_news: Vec<NewsItem>,
}

/// Market results keyed by index display name.
pub type MarketSummary = BTreeMap<String, ProviderResult<MarketEntry>>;

// =============================================================================
// Air quality & weather
// =============================================================================

/// Air quality index reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AirQuality {
    #[serde(rename = "AQI")]
    pub aqi: i64,
}

/// Current weather conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Weather {
    /// Temperature in degrees Celsius.
    pub temperature: f64,
    /// Apparent temperature in degrees Celsius.
    #[serde(rename = "feels like")]
    pub feels_like: f64,
    /// Condition text, e.g. "Sunny".
    pub description: String,
}

// =============================================================================
// CompositeResponse
// =============================================================================

/// The document served on `GET /`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompositeResponse {
    #[serde(rename = "Market Summary")]
    pub market_summary: MarketSummary,
    #[serde(rename = "AQI")]
    pub air_quality: ProviderResult<AirQuality>,
    #[serde(rename = "Weather")]
    pub weather: ProviderResult<Weather>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_default_indices() {
        let indices = default_indices();
        assert_eq!(indices.len(), 3);
        assert_eq!(indices[0], TrackedIndex::new("^NSEI", "Nifty 50"));
        assert_eq!(indices[2].to_string(), "NASDAQ (^IXIC)");
    }

    #[test]
    fn test_failure_serializes_as_error_object() {
        let result: ProviderResult<AirQuality> = ProviderResult::failure("API key missing");
        assert_eq!(
            serde_json::to_value(&result).unwrap(),
            json!({"error": "API key missing"})
        );
        assert!(result.is_failure());
        assert_eq!(result.error(), Some("API key missing"));
    }

    #[test]
    fn test_success_serializes_as_bare_payload() {
        let result = ProviderResult::success(AirQuality { aqi: 42 });
        assert_eq!(serde_json::to_value(&result).unwrap(), json!({"AQI": 42}));
        assert_eq!(result.as_success(), Some(&AirQuality { aqi: 42 }));
    }

    #[test]
    fn test_weather_field_names() {
        let weather = Weather {
            temperature: 30.5,
            feels_like: 33.0,
            description: "Sunny".into(),
        };
        assert_eq!(
            serde_json::to_value(&weather).unwrap(),
            json!({"temperature": 30.5, "feels like": 33.0, "description": "Sunny"})
        );
    }

    #[test]
    fn test_news_item_fallbacks() {
        let item = NewsItem::from_parts(None, Some("Markets rally".into()));
        assert_eq!(item.title, NO_TITLE);
        assert_eq!(item.summary, "Markets rally");

        let item = NewsItem::from_parts(Some("Headline".into()), None);
        assert_eq!(item.summary, NO_SUMMARY);
    }

    #[test]
    fn test_market_entry_with_null_price() {
        let entry = MarketEntry {
            closing_price: None,
            related_news: vec![],
        };
        assert_eq!(
            serde_json::to_value(&entry).unwrap(),
            json!({"Closing Price": null, "Related News": []})
        );
    }

    #[test]
    fn test_composite_response_keys() {
        let mut market_summary = MarketSummary::new();
        market_summary.insert(
            "Sensex".into(),
            ProviderResult::success(MarketEntry {
                closing_price: Some(73_500.25),
                related_news: vec![NewsItem::from_parts(Some("Up".into()), None)],
            }),
        );
        market_summary.insert(
            "NASDAQ".into(),
            ProviderResult::failure("Failed to fetch stock data: boom"),
        );

        let response = CompositeResponse {
            market_summary,
            air_quality: ProviderResult::success(AirQuality { aqi: 87 }),
            weather: ProviderResult::failure("Weather API key missing"),
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(
            value,
            json!({
                "Market Summary": {
                    "NASDAQ": {"error": "Failed to fetch stock data: boom"},
                    "Sensex": {
                        "Closing Price": 73500.25,
                        "Related News": [{"title": "Up", "summary": "No summary"}]
                    }
                },
                "AQI": {"AQI": 87},
                "Weather": {"error": "Weather API key missing"}
            })
        );
    }

    #[test]
    fn test_composite_response_parses_back() {
        let body = json!({
            "Market Summary": {
                "Nifty 50": {"Closing Price": 22000.5, "Related News": []},
                "Sensex": {"error": "Failed to fetch stock data: timed out after 10s"}
            },
            "AQI": {"error": "Invalid key"},
            "Weather": {"temperature": 31.0, "feels like": 36.2, "description": "Mist"}
        });

        let response: CompositeResponse = serde_json::from_value(body).unwrap();
        assert!(response.market_summary["Nifty 50"].is_success());
        assert!(response.market_summary["Sensex"].is_failure());
        assert_eq!(response.air_quality.error(), Some("Invalid key"));
        assert_eq!(
            response.weather.as_success().map(|w| w.description.as_str()),
            Some("Mist")
        );
    }
}

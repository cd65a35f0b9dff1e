//! Current conditions from WeatherAPI.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use tracing::warn;
use types::{ProviderResult, Weather};

use crate::config::ProviderConfig;
use crate::error::FetchError;
use crate::http::{get_json, with_timeout};

/// Payload returned when no key is configured.
pub const MISSING_KEY: &str = "Weather API key missing";
/// Prefix for every fetch failure, including missing payload fields.
pub const FAILURE_PREFIX: &str = "Failed to fetch weather";

pub struct WeatherClient {
    client: Client,
    config: Arc<ProviderConfig>,
}

impl WeatherClient {
    pub fn new(client: Client, config: Arc<ProviderConfig>) -> Self {
        Self { client, config }
    }

    /// Current conditions for the configured location, or an error payload.
    pub async fn fetch(&self) -> ProviderResult<Weather> {
        let Some(key) = self.config.weather_api_key.as_deref() else {
            warn!(provider = "weather", "API key missing, skipping fetch");
            return ProviderResult::failure(MISSING_KEY);
        };

        let outcome = with_timeout(self.config.fetch_timeout, async {
            self.request(key).await?.into_weather()
        })
        .await;

        match outcome {
            Ok(weather) => ProviderResult::success(weather),
            Err(e) => {
                warn!(provider = "weather", error = %e, "fetch failed");
                ProviderResult::failure(format!("{FAILURE_PREFIX}: {e}"))
            }
        }
    }

    async fn request(&self, key: &str) -> Result<CurrentPayload, FetchError> {
        get_json(
            &self.client,
            &self.config.endpoints.weather_url,
            &[("q", self.config.weather_location.as_str()), ("key", key)],
        )
        .await
    }
}

// Every field is optional so a gap can be reported by its full path.

#[derive(Debug, Deserialize)]
struct CurrentPayload {
    #[serde(default)]
    current: Option<Current>,
}

#[derive(Debug, Deserialize)]
struct Current {
    #[serde(default)]
    temp_c: Option<f64>,
    #[serde(default)]
    feelslike_c: Option<f64>,
    #[serde(default)]
    condition: Option<Condition>,
}

#[derive(Debug, Deserialize)]
struct Condition {
    #[serde(default)]
    text: Option<String>,
}

impl CurrentPayload {
    fn into_weather(self) -> Result<Weather, FetchError> {
        let current = self.current.ok_or(FetchError::MissingField("current"))?;

        Ok(Weather {
            temperature: current
                .temp_c
                .ok_or(FetchError::MissingField("current.temp_c"))?,
            feels_like: current
                .feelslike_c
                .ok_or(FetchError::MissingField("current.feelslike_c"))?,
            description: current
                .condition
                .and_then(|c| c.text)
                .ok_or(FetchError::MissingField("current.condition.text"))?,
        })
    }
}

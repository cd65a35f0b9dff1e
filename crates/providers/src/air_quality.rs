//! Air quality index from the WAQI city feed.

use std::sync::Arc;

use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::warn;
use types::{AirQuality, ProviderResult};

use crate::config::ProviderConfig;
use crate::error::FetchError;
use crate::http::{get_json, with_timeout};

/// Payload returned when no token is configured.
pub const MISSING_KEY: &str = "API key missing";
/// Prefix for transport and decode failures.
pub const FAILURE_PREFIX: &str = "Failed to fetch AQI";
/// Payload returned when the feed omits its status.
pub const UNKNOWN_STATUS: &str = "unknown status";

pub struct AirQualityClient {
    client: Client,
    config: Arc<ProviderConfig>,
}

impl AirQualityClient {
    pub fn new(client: Client, config: Arc<ProviderConfig>) -> Self {
        Self { client, config }
    }

    /// Current AQI, or an error payload. Never calls out without a token.
    pub async fn fetch(&self) -> ProviderResult<AirQuality> {
        let Some(token) = self.config.aqi_api_key.as_deref() else {
            warn!(provider = "aqi", "API key missing, skipping fetch");
            return ProviderResult::failure(MISSING_KEY);
        };

        let outcome = with_timeout(self.config.fetch_timeout, async {
            self.request(token).await?.interpret()
        })
        .await;

        match outcome {
            Ok(result) => {
                if let Some(status) = result.error() {
                    warn!(provider = "aqi", status, "feed reported failure");
                }
                result
            }
            Err(e) => {
                warn!(provider = "aqi", error = %e, "fetch failed");
                ProviderResult::failure(format!("{FAILURE_PREFIX}: {e}"))
            }
        }
    }

    async fn request(&self, token: &str) -> Result<AqiFeed, FetchError> {
        get_json(
            &self.client,
            &self.config.endpoints.aqi_url,
            &[("token", token)],
        )
        .await
    }
}

/// WAQI feed envelope. `data` is an object on success and a message string
/// on failure.
#[derive(Debug, Deserialize)]
struct AqiFeed {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    data: Option<Value>,
}

impl AqiFeed {
    /// `Err` only when the feed claims success but carries no usable reading.
    fn interpret(self) -> Result<ProviderResult<AirQuality>, FetchError> {
        match self.status.as_deref() {
            Some("ok") => Ok(ProviderResult::success(AirQuality {
                aqi: self.reading()?,
            })),
            Some(status) => Ok(ProviderResult::failure(status)),
            None => Ok(ProviderResult::failure(UNKNOWN_STATUS)),
        }
    }

    fn reading(&self) -> Result<i64, FetchError> {
        let value = self
            .data
            .as_ref()
            .and_then(|data| data.get("aqi"))
            .ok_or(FetchError::MissingField("data.aqi"))?;

        // Stations without a current reading report "-".
        value
            .as_i64()
            .ok_or_else(|| FetchError::Upstream(format!("no AQI reading available (got {value})")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Endpoints;
    use crate::http::build_client;
    use mockito::{Matcher, Server};
    use serde_json::json;
    use std::time::Duration;

    fn client_with(base: &str, key: Option<&str>) -> AirQualityClient {
        let config = ProviderConfig::new()
            .endpoints(Endpoints::with_base(base))
            .aqi_api_key(key.map(String::from))
            .fetch_timeout(Duration::from_secs(5));
        let client = build_client(&config).unwrap();
        AirQualityClient::new(client, Arc::new(config))
    }

    fn feed(value: serde_json::Value) -> AqiFeed {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_ok_status_yields_reading() {
        let result = feed(json!({"status": "ok", "data": {"aqi": 42, "idx": 11276}}))
            .interpret()
            .unwrap();
        assert_eq!(result, ProviderResult::success(AirQuality { aqi: 42 }));
    }

    #[test]
    fn test_non_ok_status_is_error_payload() {
        let result = feed(json!({"status": "error", "data": "Invalid key"}))
            .interpret()
            .unwrap();
        assert_eq!(result, ProviderResult::failure("error"));

        let result = feed(json!({"data": {"aqi": 10}})).interpret().unwrap();
        assert_eq!(result.error(), Some(UNKNOWN_STATUS));
    }

    #[test]
    fn test_ok_status_without_reading_is_fetch_error() {
        let err = feed(json!({"status": "ok", "data": {}})).interpret().unwrap_err();
        assert!(matches!(err, FetchError::MissingField("data.aqi")));

        let err = feed(json!({"status": "ok", "data": {"aqi": "-"}}))
            .interpret()
            .unwrap_err();
        assert_eq!(err.to_string(), r#"no AQI reading available (got "-")"#);
    }

    #[tokio::test]
    async fn test_missing_key_makes_no_request() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", Matcher::Any)
            .expect(0)
            .create_async()
            .await;

        let result = client_with(&server.url(), None).fetch().await;

        assert_eq!(result, ProviderResult::failure("API key missing"));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_fetch_sends_token() {
        let mut server = Server::new_async().await;
        let mock = server
            .mock("GET", "/feed/chennai/")
            .match_query(Matcher::UrlEncoded("token".into(), "secret".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(json!({"status": "ok", "data": {"aqi": 42}}).to_string())
            .expect(1)
            .create_async()
            .await;

        let result = client_with(&server.url(), Some("secret")).fetch().await;

        assert_eq!(result, ProviderResult::success(AirQuality { aqi: 42 }));
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_http_error_is_prefixed() {
        let mut server = Server::new_async().await;
        let _mock = server
            .mock("GET", "/feed/chennai/")
            .match_query(Matcher::Any)
            .with_status(502)
            .create_async()
            .await;

        let result = client_with(&server.url(), Some("secret")).fetch().await;

        let error = result.error().expect("should fail");
        assert!(error.starts_with("Failed to fetch AQI: "), "{error}");
        assert!(error.contains("502"), "{error}");
        assert!(!error.contains("secret"), "{error}");
    }

    #[tokio::test]
    async fn test_connection_refused_is_prefixed() {
        // Nothing listens on port 1.
        let result = client_with("http://127.0.0.1:1", Some("secret")).fetch().await;

        let error = result.error().expect("should fail");
        assert!(error.starts_with("Failed to fetch AQI: "), "{error}");
        assert!(error.contains("Connection refused"), "{error}");
        assert!(!error.contains("secret"), "{error}");
    }
}

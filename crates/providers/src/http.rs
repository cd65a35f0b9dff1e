//! Shared plumbing for upstream calls: client construction, JSON GETs and
//! per-fetch deadlines.

use std::future::Future;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::debug;

use crate::config::ProviderConfig;
use crate::error::FetchError;

const USER_AGENT: &str = concat!(
    "Mozilla/5.0 (compatible; morning-brief/",
    env!("CARGO_PKG_VERSION"),
    ")"
);

/// Build the pooled client shared by all providers.
pub(crate) fn build_client(config: &ProviderConfig) -> Result<Client, FetchError> {
    Client::builder()
        .user_agent(USER_AGENT)
        .connect_timeout(config.fetch_timeout)
        .build()
        .map_err(|e| FetchError::Client(e.to_string()))
}

/// GET `url` with `query`, reject non-2xx statuses, and decode the JSON body.
pub(crate) async fn get_json<T: DeserializeOwned>(
    client: &Client,
    url: &str,
    query: &[(&str, &str)],
) -> Result<T, FetchError> {
    // Query values are not logged: they may hold API keys.
    debug!(url, "GET");

    let response = client.get(url).query(query).send().await?.error_for_status()?;
    let body = response.text().await?;

    Ok(serde_json::from_str(&body)?)
}

/// Run `fetch` under its own deadline.
pub(crate) async fn with_timeout<T, F>(limit: Duration, fetch: F) -> Result<T, FetchError>
where
    F: Future<Output = Result<T, FetchError>>,
{
    tokio::time::timeout(limit, fetch)
        .await
        .unwrap_or_else(|_| Err(FetchError::Timeout(limit)))
}

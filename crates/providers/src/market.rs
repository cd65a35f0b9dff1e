//! Market summary: daily close and headlines for each tracked index.
//!
//! Each index is fetched independently. The quote and the news search for one
//! index run concurrently, and a failure in either turns only that index into
//! an error payload. Missing data is not a failure: an empty price series
//! gives a `null` close and an absent news list gives no headlines.

use std::sync::Arc;

use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;
use tracing::{debug, warn};
use types::{MAX_NEWS_ITEMS, MarketEntry, MarketSummary, NewsItem, ProviderResult, TrackedIndex};

use crate::config::ProviderConfig;
use crate::error::FetchError;
use crate::http::{get_json, with_timeout};

/// Prefix for per-index failures.
pub const FAILURE_PREFIX: &str = "Failed to fetch stock data";

/// Client for quotes and headlines.
pub struct MarketClient {
    client: Client,
    config: Arc<ProviderConfig>,
}

impl MarketClient {
    pub fn new(client: Client, config: Arc<ProviderConfig>) -> Self {
        Self { client, config }
    }

    /// Fetch every tracked index concurrently, keyed by display name.
    ///
    /// Always holds one entry per distinct display name.
    pub async fn summary(&self) -> MarketSummary {
        let fetches = self.config.indices.iter().map(|index| self.entry_result(index));

        join_all(fetches).await.into_iter().collect()
    }

    async fn entry_result(&self, index: &TrackedIndex) -> (String, ProviderResult<MarketEntry>) {
        let result = match with_timeout(self.config.fetch_timeout, self.entry(&index.symbol)).await
        {
            Ok(entry) => ProviderResult::success(entry),
            Err(e) => {
                warn!(index = %index, error = %e, "market fetch failed");
                ProviderResult::failure(format!("{FAILURE_PREFIX}: {e}"))
            }
        };

        (index.display_name.clone(), result)
    }

    /// Latest close and up to three headlines for `symbol`.
    pub async fn entry(&self, symbol: &str) -> Result<MarketEntry, FetchError> {
        let (closing_price, related_news) =
            tokio::try_join!(self.closing_price(symbol), self.news(symbol))?;

        debug!(symbol, ?closing_price, news = related_news.len(), "market entry");

        Ok(MarketEntry {
            closing_price,
            related_news,
        })
    }

    /// Last daily close rounded to cents, or `None` if the series is empty.
    pub async fn closing_price(&self, symbol: &str) -> Result<Option<f64>, FetchError> {
        let url = format!(
            "{}/{}",
            self.config.endpoints.chart_url.trim_end_matches('/'),
            symbol
        );
        let chart: ChartEnvelope =
            get_json(&self.client, &url, &[("range", "1d"), ("interval", "1d")]).await?;

        chart.closing_price()
    }

    /// Most recent headlines for `symbol`, at most [`MAX_NEWS_ITEMS`].
    pub async fn news(&self, symbol: &str) -> Result<Vec<NewsItem>, FetchError> {
        let count = MAX_NEWS_ITEMS.to_string();
        let search: SearchResponse = get_json(
            &self.client,
            &self.config.endpoints.news_url,
            &[("q", symbol), ("quotesCount", "0"), ("newsCount", &count)],
        )
        .await?;

        Ok(search.headlines())
    }
}

// =============================================================================
// Chart payload
// =============================================================================

#[derive(Debug, Deserialize)]
struct ChartEnvelope {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    #[serde(default)]
    result: Option<Vec<ChartResult>>,
    #[serde(default)]
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct ChartResult {
    #[serde(default)]
    indicators: Indicators,
}

#[derive(Debug, Default, Deserialize)]
struct Indicators {
    #[serde(default)]
    quote: Vec<QuoteSeries>,
}

#[derive(Debug, Default, Deserialize)]
struct QuoteSeries {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

impl ChartEnvelope {
    fn closing_price(self) -> Result<Option<f64>, FetchError> {
        if let Some(err) = self.chart.error {
            let message = err
                .description
                .or(err.code)
                .unwrap_or_else(|| "chart request rejected".into());
            return Err(FetchError::Upstream(message));
        }

        let close = self
            .chart
            .result
            .unwrap_or_default()
            .into_iter()
            .next()
            .and_then(|result| result.indicators.quote.into_iter().next())
            .and_then(|series| series.close.into_iter().rev().flatten().next());

        Ok(close.map(round_to_cents))
    }
}

fn round_to_cents(price: f64) -> f64 {
    (price * 100.0).round() / 100.0
}

// =============================================================================
// News payload
// =============================================================================

#[derive(Debug, Default, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    news: Option<Vec<RawNewsItem>>,
}

/// A headline as sent upstream: either flat or wrapped in `content`.
#[derive(Debug, Default, Deserialize)]
struct RawNewsItem {
    #[serde(default)]
    content: Option<RawNewsContent>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
struct RawNewsContent {
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    summary: Option<String>,
}

impl SearchResponse {
    fn headlines(self) -> Vec<NewsItem> {
        self.news
            .unwrap_or_default()
            .into_iter()
            .take(MAX_NEWS_ITEMS)
            .map(RawNewsItem::into_news_item)
            .collect()
    }
}

impl RawNewsItem {
    fn into_news_item(self) -> NewsItem {
        let (title, summary) = self
            .content
            .map(|c| (c.title, c.summary))
            .unwrap_or_default();

        NewsItem::from_parts(title.or(self.title), summary.or(self.summary))
    }
}

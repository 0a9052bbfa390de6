//! EXMO v1 public REST client
//!
//! Issues one GET per call, checks for a 200 status, then decodes the body
//! into the types in [`super::types`].

use super::types::{CandlesHistory, Currencies, JsonCodec, OrderBook, Ticker, Trades};
use super::{ExchangeError, Exchanger};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{Client, StatusCode};
use std::time::Duration;

/// EXMO public API base URL
pub const EXMO_API_URL: &str = "https://api.exmo.com/v1";

/// Configuration for the EXMO client
#[derive(Debug, Clone)]
pub struct ExmoConfig {
    /// Base URL, without trailing slash
    pub base_url: String,
    /// Request timeout; `None` leaves it to the transport
    pub timeout: Option<Duration>,
}

impl Default for ExmoConfig {
    fn default() -> Self {
        Self {
            base_url: EXMO_API_URL.to_string(),
            timeout: None,
        }
    }
}

impl ExmoConfig {
    /// Create a config pointing at the given base URL
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            ..Default::default()
        }
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Strip trailing slashes from a base URL set through the public field
    fn normalized(mut self) -> Self {
        let trimmed = self.base_url.trim_end_matches('/').len();
        self.base_url.truncate(trimmed);
        self
    }
}

/// How a non-200 status is reported for an endpoint
#[derive(Debug, Clone, Copy)]
enum StatusReport {
    /// `server returned status <code>`
    Code,
    /// `server returned non-200 status`
    NonOk,
}

impl StatusReport {
    fn error(self, status: StatusCode) -> ExchangeError {
        match self {
            StatusReport::Code => ExchangeError::Status(status.as_u16()),
            StatusReport::NonOk => ExchangeError::NonOkStatus(status.as_u16()),
        }
    }
}

/// Client for EXMO's public API
#[derive(Debug, Clone)]
pub struct ExmoClient {
    config: ExmoConfig,
    client: Client,
}

impl ExmoClient {
    /// Create a client against the public API with default configuration
    pub fn new() -> Result<Self, ExchangeError> {
        Self::with_config(ExmoConfig::default())
    }

    /// Create a client with custom configuration
    pub fn with_config(config: ExmoConfig) -> Result<Self, ExchangeError> {
        let config = config.normalized();
        let mut builder = Client::builder();
        if let Some(timeout) = config.timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(ExchangeError::Client)?;

        Ok(Self { config, client })
    }

    /// Create a client that sends requests through an existing HTTP client
    pub fn with_http_client(config: ExmoConfig, client: Client) -> Self {
        Self {
            config: config.normalized(),
            client,
        }
    }

    /// Get the configured base URL
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url, path)
    }

    /// GET `url` and decode a 200 body as `T`
    ///
    /// The status is checked before the body is read, so a non-200 response
    /// reports its status even when the body cannot be read. The body is
    /// still drained on every path so the connection goes back to the pool.
    async fn get_json<T: JsonCodec>(
        &self,
        url: &str,
        report: StatusReport,
    ) -> Result<T, ExchangeError> {
        tracing::debug!(url = %url, "Requesting EXMO endpoint");

        let response = self.client.get(url).send().await?;
        let status = response.status();

        if status != StatusCode::OK {
            let body = response.bytes().await.unwrap_or_default();
            tracing::warn!(
                url = %url,
                status = status.as_u16(),
                body = %String::from_utf8_lossy(&body).chars().take(200).collect::<String>(),
                "EXMO returned non-200 status"
            );
            return Err(report.error(status));
        }

        let body = response.bytes().await?;
        T::decode(&body).map_err(|e| {
            tracing::debug!(url = %url, error = %e, "Failed to decode EXMO response");
            ExchangeError::Decode(e)
        })
    }
}

/// Join pairs into one comma-separated `pair=` value, rejecting an empty list
fn join_pairs(pairs: &[&str]) -> Result<String, ExchangeError> {
    if pairs.is_empty() {
        return Err(ExchangeError::MissingPair);
    }
    Ok(pairs.join(","))
}

#[async_trait]
impl Exchanger for ExmoClient {
    async fn get_currencies(&self) -> Result<Currencies, ExchangeError> {
        let url = self.endpoint("/currency");
        let currencies: Currencies = self.get_json(&url, StatusReport::Code).await?;

        tracing::debug!(count = currencies.len(), "Fetched currencies");
        Ok(currencies)
    }

    async fn get_ticker(&self) -> Result<Ticker, ExchangeError> {
        let url = self.endpoint("/ticker");
        let ticker: Ticker = self.get_json(&url, StatusReport::NonOk).await?;

        tracing::debug!(pairs = ticker.len(), "Fetched ticker");
        Ok(ticker)
    }

    async fn get_order_book(
        &self,
        limit: u32,
        pairs: &[&str],
    ) -> Result<OrderBook, ExchangeError> {
        let pair = join_pairs(pairs)?;
        let url = format!("{}?limit={}&pair={}", self.endpoint("/order_book"), limit, pair);
        let book: OrderBook = self.get_json(&url, StatusReport::Code).await?;

        if book.is_empty() {
            tracing::warn!(pair = %pair, "EXMO returned an empty order book");
            return Err(ExchangeError::EmptyOrderBook);
        }

        tracing::debug!(pairs = book.len(), limit, "Fetched order book");
        Ok(book)
    }

    async fn get_trades(&self, pairs: &[&str]) -> Result<Trades, ExchangeError> {
        let pair = join_pairs(pairs)?;
        let url = format!("{}?pair={}", self.endpoint("/trades"), pair);
        let trades: Trades = self.get_json(&url, StatusReport::Code).await?;

        tracing::debug!(
            pairs = trades.len(),
            trades = trades.values().map(Vec::len).sum::<usize>(),
            "Fetched trades"
        );
        Ok(trades)
    }

    async fn get_candles_history(
        &self,
        pair: &str,
        period: u32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<CandlesHistory, ExchangeError> {
        // period and range are not sent; the endpoint is queried by pair only
        let url = format!("{}?pair={}", self.endpoint("/candles_history"), pair);
        tracing::debug!(pair, period, %from, %to, "Fetching candle history");

        let history: CandlesHistory = self.get_json(&url, StatusReport::Code).await?;

        tracing::debug!(candles = history.candles.len(), "Fetched candle history");
        Ok(history)
    }

    async fn get_close_price(
        &self,
        pair: &str,
        resolution: u32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<f64>, ExchangeError> {
        let url = format!("{}?pair={}", self.endpoint("/candles_history"), pair);
        tracing::debug!(pair, resolution, %from, %to, "Fetching close prices");

        let history: CandlesHistory = self.get_json(&url, StatusReport::NonOk).await?;
        Ok(history.close_prices())
    }
}

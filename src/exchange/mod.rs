//! Exchange module
//!
//! Typed access to the public EXMO v1 REST endpoints

mod client;
mod error;
mod types;

pub use client::{ExmoClient, ExmoConfig, EXMO_API_URL};
pub use error::ExchangeError;
pub use types::{
    Candle, CandlesHistory, Currencies, JsonCodec, OrderBook, OrderBookEntry, PriceLevel, Ticker,
    TickerEntry, Trade, TradeSide, Trades,
};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// Trait for exchange API implementations
///
/// Every call is a single request/response round trip. On error no partial
/// data is returned.
#[async_trait]
pub trait Exchanger: Send + Sync {
    /// Ticker snapshot for all pairs
    async fn get_ticker(&self) -> Result<Ticker, ExchangeError>;
    /// Recent trades for one or more pairs
    async fn get_trades(&self, pairs: &[&str]) -> Result<Trades, ExchangeError>;
    /// Order book for one or more pairs, at most `limit` levels per side
    async fn get_order_book(&self, limit: u32, pairs: &[&str])
        -> Result<OrderBook, ExchangeError>;
    /// All currency symbols listed on the exchange
    async fn get_currencies(&self) -> Result<Currencies, ExchangeError>;
    /// Full candle history for a pair
    async fn get_candles_history(
        &self,
        pair: &str,
        period: u32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<CandlesHistory, ExchangeError>;
    /// Close price of every candle for a pair
    async fn get_close_price(
        &self,
        pair: &str,
        resolution: u32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<f64>, ExchangeError>;
}

#[async_trait]
impl<T: Exchanger + ?Sized> Exchanger for Arc<T> {
    async fn get_ticker(&self) -> Result<Ticker, ExchangeError> {
        (**self).get_ticker().await
    }

    async fn get_trades(&self, pairs: &[&str]) -> Result<Trades, ExchangeError> {
        (**self).get_trades(pairs).await
    }

    async fn get_order_book(
        &self,
        limit: u32,
        pairs: &[&str],
    ) -> Result<OrderBook, ExchangeError> {
        (**self).get_order_book(limit, pairs).await
    }

    async fn get_currencies(&self) -> Result<Currencies, ExchangeError> {
        (**self).get_currencies().await
    }

    async fn get_candles_history(
        &self,
        pair: &str,
        period: u32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<CandlesHistory, ExchangeError> {
        (**self).get_candles_history(pair, period, from, to).await
    }

    async fn get_close_price(
        &self,
        pair: &str,
        resolution: u32,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<f64>, ExchangeError> {
        (**self).get_close_price(pair, resolution, from, to).await
    }
}

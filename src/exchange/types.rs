//! EXMO public API domain types
//!
//! Prices and volumes that arrive as quoted strings stay strings here.
//! Use the `*_decimal` accessors to parse them without going through `f64`.

use chrono::{DateTime, TimeZone, Utc};
use rust_decimal::Decimal;
use serde::de::{self, DeserializeOwned};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, BTreeSet};
use std::str::FromStr;

/// Set of currency symbols, e.g. "BTC", "USD"
pub type Currencies = BTreeSet<String>;

/// Ticker snapshot keyed by trading pair
pub type Ticker = BTreeMap<String, TickerEntry>;

/// Order book keyed by trading pair
pub type OrderBook = BTreeMap<String, OrderBookEntry>;

/// Recent trades keyed by trading pair
pub type Trades = BTreeMap<String, Vec<Trade>>;

/// Ticker data for a single pair
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerEntry {
    /// Highest current buy price
    #[serde(default)]
    pub buy_price: String,
    /// Lowest current sell price
    #[serde(default)]
    pub sell_price: String,
}

impl TickerEntry {
    /// Sell price minus buy price, if both parse as decimals
    pub fn spread(&self) -> Option<Decimal> {
        let buy = Decimal::from_str(&self.buy_price).ok()?;
        let sell = Decimal::from_str(&self.sell_price).ok()?;
        Some(sell - buy)
    }
}

/// A `[price, volume]` level in the order book
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PriceLevel {
    /// Price at this level
    pub price: String,
    /// Volume available at this price
    pub volume: String,
}

impl PriceLevel {
    /// Create a level from price and volume strings
    pub fn new(price: impl Into<String>, volume: impl Into<String>) -> Self {
        Self {
            price: price.into(),
            volume: volume.into(),
        }
    }

    /// Parse the price as a decimal
    pub fn price_decimal(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.price)
    }

    /// Parse the volume as a decimal
    pub fn volume_decimal(&self) -> Result<Decimal, rust_decimal::Error> {
        Decimal::from_str(&self.volume)
    }
}

impl Serialize for PriceLevel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (&self.price, &self.volume).serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for PriceLevel {
    // The live API appends an amount column; anything past volume is dropped.
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<String>::deserialize(deserializer)?;
        let len = values.len();
        let mut values = values.into_iter();
        match (values.next(), values.next()) {
            (Some(price), Some(volume)) => Ok(Self { price, volume }),
            _ => Err(de::Error::invalid_length(len, &"a [price, volume] array")),
        }
    }
}

/// Both sides of the book for one pair, in server order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderBookEntry {
    /// Sell offers
    #[serde(default)]
    pub ask: Vec<PriceLevel>,
    /// Buy offers
    #[serde(default)]
    pub bid: Vec<PriceLevel>,
}

impl OrderBookEntry {
    /// First ask level as returned by the server
    pub fn best_ask(&self) -> Option<&PriceLevel> {
        self.ask.first()
    }

    /// First bid level as returned by the server
    pub fn best_bid(&self) -> Option<&PriceLevel> {
        self.bid.first()
    }
}

/// Trade direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

impl std::fmt::Display for TradeSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TradeSide::Buy => write!(f, "buy"),
            TradeSide::Sell => write!(f, "sell"),
        }
    }
}

/// A single executed trade
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trade {
    /// Exchange trade identifier, 0 when absent
    #[serde(default)]
    pub trade_id: i64,
    /// Direction, sent as `type` on the wire
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub side: Option<TradeSide>,
    /// Execution price
    #[serde(default)]
    pub price: String,
    /// Quantity in the base currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantity: Option<String>,
    /// Amount in the quote currency
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<String>,
    /// Execution time (unix seconds)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<i64>,
}

/// OHLCV bar, positional `[ts, open, high, low, close, volume]` on the wire
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Candle {
    /// Bar start, epoch milliseconds
    pub timestamp: i64,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    /// Build a candle from positional values; missing positions default to zero
    pub fn from_values(values: &[f64]) -> Self {
        let at = |i: usize| values.get(i).copied().unwrap_or_default();
        Self {
            timestamp: at(0) as i64,
            open: at(1),
            high: at(2),
            low: at(3),
            close: at(4),
            volume: at(5),
        }
    }

    /// Bar start as a UTC datetime
    pub fn time(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.timestamp).single()
    }
}

impl Serialize for Candle {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        (
            self.timestamp,
            self.open,
            self.high,
            self.low,
            self.close,
            self.volume,
        )
            .serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Candle {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let values = Vec::<f64>::deserialize(deserializer)?;
        Ok(Self::from_values(&values))
    }
}

/// Response of `/candles_history`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CandlesHistory {
    #[serde(default)]
    pub candles: Vec<Candle>,
}

impl CandlesHistory {
    /// Close price of every candle, aligned with `candles`
    pub fn close_prices(&self) -> Vec<f64> {
        self.candles.iter().map(|c| c.close).collect()
    }
}

/// Symmetric JSON encode/decode over the wire form
pub trait JsonCodec: Serialize + DeserializeOwned {
    /// Decode from a JSON body; unknown fields are ignored
    fn decode(bytes: &[u8]) -> Result<Self, serde_json::Error> {
        serde_json::from_slice(bytes)
    }

    /// Encode to JSON with exactly the documented fields
    fn encode(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

impl JsonCodec for Currencies {}
impl JsonCodec for Ticker {}
impl JsonCodec for OrderBook {}
impl JsonCodec for Trades {}
impl JsonCodec for CandlesHistory {}

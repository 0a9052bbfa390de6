//! CLI interface for exmo-indicator
//!
//! Provides subcommands for:
//! - `indicators`: Print SMA and EMA of a pair's close prices
//! - `ticker`: Show buy/sell prices
//! - `order-book`: Show the top of the book for pairs
//! - `trades`: List recent trades for pairs
//! - `currencies`: List currency symbols
//! - `candles`: Show candle history for a pair
//! - `config`: Show configuration

mod indicators;
mod market;

pub use indicators::{render_indicators, IndicatorParams, IndicatorsArgs};
pub use market::{print_currencies, CandlesArgs, OrderBookArgs, TickerArgs, TradesArgs};

use chrono::{DateTime, Duration, Utc};
use clap::{Parser, Subcommand};

/// Start of a range that ends at `now` and reaches back `days` days
///
/// Rejects negative counts and counts that leave chrono's date range.
pub fn lookback_start(now: DateTime<Utc>, days: i64) -> anyhow::Result<DateTime<Utc>> {
    if days < 0 {
        anyhow::bail!("lookback days must not be negative, got {}", days);
    }
    Duration::try_days(days)
        .and_then(|lookback| now.checked_sub_signed(lookback))
        .ok_or_else(|| anyhow::anyhow!("lookback of {} days is out of range", days))
}

#[derive(Parser, Debug)]
#[command(name = "exmo-indicator")]
#[command(about = "EXMO public market data and moving averages")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to configuration file
    #[arg(short, long, default_value = "config.toml")]
    pub config: String,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print SMA and EMA of close prices
    Indicators(IndicatorsArgs),
    /// Show buy/sell prices
    Ticker(TickerArgs),
    /// Show the top of the order book
    OrderBook(OrderBookArgs),
    /// List recent trades
    Trades(TradesArgs),
    /// List currency symbols
    Currencies,
    /// Show candle history
    Candles(CandlesArgs),
    /// Show configuration
    Config,
}

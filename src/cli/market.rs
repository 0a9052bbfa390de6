//! Market data commands

use super::lookback_start;
use crate::exchange::{Exchanger, OrderBookEntry, PriceLevel};
use chrono::Utc;
use clap::Args;
use std::io::Write;

#[derive(Args, Debug)]
pub struct TickerArgs {
    /// Only show this pair
    #[arg(long)]
    pub pair: Option<String>,
}

impl TickerArgs {
    pub async fn execute<E: Exchanger + ?Sized>(
        &self,
        exchange: &E,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let ticker = exchange.get_ticker().await?;

        let entries = ticker
            .iter()
            .filter(|(pair, _)| self.pair.as_deref().map_or(true, |p| p == pair.as_str()));

        let mut shown = 0;
        for (pair, entry) in entries {
            let spread = entry
                .spread()
                .map(|s| s.to_string())
                .unwrap_or_else(|| "-".to_string());
            writeln!(
                out,
                "{pair}: buy={} sell={} spread={spread}",
                entry.buy_price, entry.sell_price
            )?;
            shown += 1;
        }

        if shown == 0 {
            if let Some(pair) = &self.pair {
                anyhow::bail!("pair {} not found in ticker", pair);
            }
        }

        Ok(())
    }
}

#[derive(Args, Debug)]
pub struct OrderBookArgs {
    /// Levels per side
    #[arg(short, long, default_value_t = 10)]
    pub limit: u32,
    /// Trading pairs, e.g. BTC_USD ETH_USD
    #[arg(required = true)]
    pub pairs: Vec<String>,
}

impl OrderBookArgs {
    pub async fn execute<E: Exchanger + ?Sized>(
        &self,
        exchange: &E,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let pairs: Vec<&str> = self.pairs.iter().map(String::as_str).collect();
        let book = exchange.get_order_book(self.limit, &pairs).await?;

        for (pair, entry) in &book {
            writeln!(out, "{pair}: {}", summarize_book(entry))?;
        }

        Ok(())
    }
}

fn format_level(level: Option<&PriceLevel>) -> String {
    match level {
        Some(level) => format!("{} x {}", level.price, level.volume),
        None => "-".to_string(),
    }
}

fn summarize_book(entry: &OrderBookEntry) -> String {
    format!(
        "best ask {} ({} levels), best bid {} ({} levels)",
        format_level(entry.best_ask()),
        entry.ask.len(),
        format_level(entry.best_bid()),
        entry.bid.len()
    )
}

#[derive(Args, Debug)]
pub struct TradesArgs {
    /// Trading pairs, e.g. BTC_USD ETH_USD
    #[arg(required = true)]
    pub pairs: Vec<String>,
}

impl TradesArgs {
    pub async fn execute<E: Exchanger + ?Sized>(
        &self,
        exchange: &E,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let pairs: Vec<&str> = self.pairs.iter().map(String::as_str).collect();
        let trades = exchange.get_trades(&pairs).await?;

        for (pair, list) in &trades {
            writeln!(out, "{pair}: {} trades", list.len())?;
            for trade in list {
                let side = trade
                    .side
                    .map(|s| s.to_string())
                    .unwrap_or_else(|| "?".to_string());
                writeln!(
                    out,
                    "  #{} {side} {} qty={}",
                    trade.trade_id,
                    trade.price,
                    trade.quantity.as_deref().unwrap_or("-")
                )?;
            }
        }

        Ok(())
    }
}

/// Write one currency symbol per line
pub async fn print_currencies<E: Exchanger + ?Sized>(
    exchange: &E,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let currencies = exchange.get_currencies().await?;
    for currency in &currencies {
        writeln!(out, "{currency}")?;
    }
    Ok(())
}

#[derive(Args, Debug)]
pub struct CandlesArgs {
    /// Trading pair, e.g. BTC_USD
    #[arg(long, default_value = "BTC_USD")]
    pub pair: String,
    /// Candle resolution in minutes
    #[arg(long, default_value_t = 30)]
    pub resolution: u32,
    /// Start of the range, in days before now
    #[arg(long, default_value_t = 2)]
    pub lookback_days: i64,
}

impl CandlesArgs {
    pub async fn execute<E: Exchanger + ?Sized>(
        &self,
        exchange: &E,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let to = Utc::now();
        let from = lookback_start(to, self.lookback_days)?;
        let history = exchange
            .get_candles_history(&self.pair, self.resolution, from, to)
            .await?;

        for candle in &history.candles {
            let time = candle
                .time()
                .map(|t| t.to_rfc3339())
                .unwrap_or_else(|| candle.timestamp.to_string());
            writeln!(
                out,
                "{time} o={} h={} l={} c={} v={}",
                candle.open, candle.high, candle.low, candle.close, candle.volume
            )?;
        }

        Ok(())
    }
}

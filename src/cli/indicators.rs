//! Indicators command implementation

use crate::config::IndicatorConfig;
use crate::exchange::Exchanger;
use crate::indicator::{Indicator, MovingAverages};
use anyhow::Context;
use super::lookback_start;
use chrono::{DateTime, Utc};
use clap::Args;
use std::io::Write;

#[derive(Args, Debug)]
pub struct IndicatorsArgs {
    /// Trading pair, e.g. BTC_USD
    #[arg(long)]
    pub pair: Option<String>,
    /// Candle resolution in minutes
    #[arg(long)]
    pub resolution: Option<u32>,
    /// Moving average window
    #[arg(long)]
    pub period: Option<usize>,
    /// Start of the range, in days before now
    #[arg(long)]
    pub lookback_days: Option<i64>,
}

/// Resolved inputs for one SMA/EMA run
#[derive(Debug, Clone)]
pub struct IndicatorParams {
    pub pair: String,
    pub resolution: u32,
    pub period: usize,
    pub from: DateTime<Utc>,
    pub to: DateTime<Utc>,
}

impl IndicatorsArgs {
    /// Fill unset flags from configuration, ending the range at `now`
    pub fn params(
        &self,
        defaults: &IndicatorConfig,
        now: DateTime<Utc>,
    ) -> anyhow::Result<IndicatorParams> {
        let lookback_days = self.lookback_days.unwrap_or(defaults.lookback_days);
        Ok(IndicatorParams {
            pair: self.pair.clone().unwrap_or_else(|| defaults.pair.clone()),
            resolution: self.resolution.unwrap_or(defaults.resolution),
            period: self.period.unwrap_or(defaults.period),
            from: lookback_start(now, lookback_days)?,
            to: now,
        })
    }

    pub async fn execute<E: Exchanger>(
        &self,
        exchange: E,
        defaults: &IndicatorConfig,
        out: &mut impl Write,
    ) -> anyhow::Result<()> {
        let params = self.params(defaults, Utc::now())?;
        tracing::info!(
            pair = %params.pair,
            resolution = params.resolution,
            period = params.period,
            "Calculating moving averages"
        );

        let indicator = Indicator::new(exchange);
        render_indicators(&indicator, &params, out).await
    }
}

/// Write `SMA: [..]` and `EMA: [..]` lines for `params`
///
/// Stops at the first failure; nothing is written for the failed series.
pub async fn render_indicators<M: MovingAverages + ?Sized>(
    indicator: &M,
    params: &IndicatorParams,
    out: &mut impl Write,
) -> anyhow::Result<()> {
    let sma = indicator
        .sma(
            &params.pair,
            params.resolution,
            params.period,
            params.from,
            params.to,
        )
        .await
        .context("failed to calculate SMA")?;
    writeln!(out, "SMA: {:?}", sma)?;

    let ema = indicator
        .ema(
            &params.pair,
            params.resolution,
            params.period,
            params.from,
            params.to,
        )
        .await
        .context("failed to calculate EMA")?;
    writeln!(out, "EMA: {:?}", ema)?;

    Ok(())
}

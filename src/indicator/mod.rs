//! Indicator module
//!
//! Moving averages over candle close prices fetched from an [`Exchanger`]

mod calc;

pub use calc::{calculate_ema, calculate_sma, ema, sma};

use crate::exchange::{ExchangeError, Exchanger};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;

/// A moving average calculator: `(data, period) -> series`
pub type Calculator = Arc<dyn Fn(&[f64], usize) -> Vec<f64> + Send + Sync>;

/// Trait for moving-average sources
#[async_trait]
pub trait MovingAverages: Send + Sync {
    /// Simple moving average of close prices
    async fn sma(
        &self,
        pair: &str,
        resolution: u32,
        period: usize,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<f64>, ExchangeError>;

    /// Exponential moving average of close prices
    async fn ema(
        &self,
        pair: &str,
        resolution: u32,
        period: usize,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<f64>, ExchangeError>;
}

/// Computes moving averages of an exchange's close prices
pub struct Indicator<E> {
    exchange: E,
    sma_fn: Calculator,
    ema_fn: Calculator,
}

impl<E: Exchanger> Indicator<E> {
    /// Create an indicator using the built-in calculators
    pub fn new(exchange: E) -> Self {
        Self {
            exchange,
            sma_fn: Arc::new(calculate_sma),
            ema_fn: Arc::new(calculate_ema),
        }
    }

    /// Replace the SMA calculator
    pub fn with_sma<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64], usize) -> Vec<f64> + Send + Sync + 'static,
    {
        self.sma_fn = Arc::new(f);
        self
    }

    /// Replace the EMA calculator
    pub fn with_ema<F>(mut self, f: F) -> Self
    where
        F: Fn(&[f64], usize) -> Vec<f64> + Send + Sync + 'static,
    {
        self.ema_fn = Arc::new(f);
        self
    }

    /// The exchange this indicator reads from
    pub fn exchange(&self) -> &E {
        &self.exchange
    }

    async fn apply(
        &self,
        calculator: &Calculator,
        pair: &str,
        resolution: u32,
        period: usize,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<f64>, ExchangeError> {
        let data = self
            .exchange
            .get_close_price(pair, resolution, from, to)
            .await?;
        let series = calculator(&data, period);

        tracing::debug!(
            pair,
            period,
            samples = data.len(),
            values = series.len(),
            "Calculated moving average"
        );
        Ok(series)
    }
}

#[async_trait]
impl<E: Exchanger> MovingAverages for Indicator<E> {
    async fn sma(
        &self,
        pair: &str,
        resolution: u32,
        period: usize,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<f64>, ExchangeError> {
        self.apply(&self.sma_fn, pair, resolution, period, from, to)
            .await
    }

    async fn ema(
        &self,
        pair: &str,
        resolution: u32,
        period: usize,
        from: DateTime<Utc>,
        to: DateTime<Utc>,
    ) -> Result<Vec<f64>, ExchangeError> {
        self.apply(&self.ema_fn, pair, resolution, period, from, to)
            .await
    }
}

//! Moving average calculators
//!
//! `sma` and `ema` produce one output per input. The `calculate_*` wrappers
//! apply the length rules used by [`super::Indicator`].

/// Simple moving average over a running window
///
/// Until `period` samples have been seen, each value is the mean of the
/// samples so far.
pub fn sma(period: usize, values: &[f64]) -> Vec<f64> {
    let mut result = Vec::with_capacity(values.len());
    let mut sum = 0.0;

    for (i, value) in values.iter().enumerate() {
        sum += value;
        let mut count = i + 1;
        if i >= period {
            sum -= values[i - period];
            count = period;
        }
        result.push(sum / count as f64);
    }

    result
}

/// Exponential moving average seeded with the first value
///
/// `k = 2 / (period + 1)`, `ema_t = value_t * k + ema_{t-1} * (1 - k)`.
pub fn ema(period: usize, values: &[f64]) -> Vec<f64> {
    let k = 2.0 / (period as f64 + 1.0);
    let mut result = Vec::with_capacity(values.len());

    for &value in values {
        let next = match result.last() {
            Some(&prev) => value * k + prev * (1.0 - k),
            None => value,
        };
        result.push(next);
    }

    result
}

/// SMA values once a full window is available
///
/// Empty when `period == 0` or there are fewer than `period` samples,
/// otherwise `data.len() - period + 1` values.
pub fn calculate_sma(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return Vec::new();
    }
    sma(period, data).split_off(period - 1)
}

/// EMA aligned with the input
///
/// Empty when `period == 0` or there are fewer than `period` samples,
/// otherwise one value per sample.
pub fn calculate_ema(data: &[f64], period: usize) -> Vec<f64> {
    if period == 0 || data.len() < period {
        return Vec::new();
    }
    ema(period, data)
}

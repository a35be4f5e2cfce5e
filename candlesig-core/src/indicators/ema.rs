//! Exponential Moving Average (EMA).
//!
//! Recursive: EMA[t] = alpha * x[t] + (1 - alpha) * EMA[t-1], alpha = 2 / (span + 1).
//! Seed: EMA[0] = x[0]; no bias correction.
//! The recursion runs from the first candle but values before index span-1
//! are reported as NaN, so an EMA is never read over fewer than `span` candles.
//! Lookback: span - 1.

use crate::components::indicator::Indicator;
use crate::domain::Candle;

use super::PriceSource;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    source: PriceSource,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        Self::on(span, PriceSource::Close)
    }

    pub fn on(span: usize, source: PriceSource) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            source,
            name: format!("{}ema_{span}", source.prefix()),
        }
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.span.saturating_sub(1)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        ema_of_series(&self.source.values(candles), self.span)
    }
}

/// Compute EMA values from a pre-extracted f64 slice.
pub fn ema_of_series(values: &[f64], span: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < span || span == 0 {
        return result;
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let mut prev = values[0];
    for (i, &v) in values.iter().enumerate() {
        if v.is_nan() {
            // NaN taints the recursion from here on
            return result;
        }
        let ema = if i == 0 { v } else { alpha * v + (1.0 - alpha) * prev };
        if i + 1 >= span {
            result[i] = ema;
        }
        prev = ema;
    }

    result
}

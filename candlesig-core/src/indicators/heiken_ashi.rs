//! Heiken-Ashi transform.
//!
//! HA close = (open + high + low + close) / 4
//! HA open  = (HA open[t-1] + HA close[t-1]) / 2, seeded with (open[0] + close[0]) / 2
//! HA high  = max(high, HA open, HA close)
//! HA low   = min(low, HA open, HA close)
//!
//! Strategies only consume the HA close, which depends on a single candle
//! (lookback 0). The full candle transform is exposed for presentation.

use crate::components::indicator::Indicator;
use crate::domain::Candle;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Synthetic close of one candle.
///
/// Each price is quartered before summing so finite prices near `f64::MAX`
/// stay finite.
pub fn ha_close(candle: &Candle) -> f64 {
    candle.open / 4.0 + candle.high / 4.0 + candle.low / 4.0 + candle.close / 4.0
}

/// Smoothed Heiken-Ashi candle.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HeikenAshiCandle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl HeikenAshiCandle {
    pub fn is_bullish(&self) -> bool {
        self.close > self.open
    }
}

/// Transform a candle series into Heiken-Ashi candles, index for index.
pub fn heiken_ashi(candles: &[Candle]) -> Vec<HeikenAshiCandle> {
    let mut result = Vec::with_capacity(candles.len());
    let mut prev: Option<(f64, f64)> = None;

    for candle in candles {
        let close = ha_close(candle);
        let open = match prev {
            Some((prev_open, prev_close)) => prev_open / 2.0 + prev_close / 2.0,
            None => candle.open / 2.0 + candle.close / 2.0,
        };
        result.push(HeikenAshiCandle {
            time: candle.time,
            open,
            high: candle.high.max(open).max(close),
            low: candle.low.min(open).min(close),
            close,
        });
        prev = Some((open, close));
    }

    result
}

/// Heiken-Ashi close as an indicator series.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeikenAshiClose;

impl HeikenAshiClose {
    pub const NAME: &'static str = "ha_close";
}

impl Indicator for HeikenAshiClose {
    fn name(&self) -> &str {
        Self::NAME
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        candles.iter().map(ha_close).collect()
    }
}

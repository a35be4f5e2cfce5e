//! Concrete indicator implementations.
//!
//! All indicators implement the `Indicator` trait from `components::indicator`.
//! Moving averages and rate of change can be computed on either the raw close
//! or the synthetic Heiken-Ashi close, selected with [`PriceSource`].

pub mod ema;
pub mod heiken_ashi;
pub mod roc;
pub mod rsi;
pub mod sma;

pub use ema::Ema;
pub use heiken_ashi::{heiken_ashi, HeikenAshiCandle, HeikenAshiClose};
pub use roc::Roc;
pub use rsi::{Rsi, RsiSmoothing};
pub use sma::Sma;

use crate::domain::Candle;
use serde::{Deserialize, Serialize};

/// Price series an indicator is computed on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PriceSource {
    #[default]
    Close,
    /// `(open + high + low + close) / 4` per candle.
    HeikenAshi,
}

impl PriceSource {
    /// Extract the source price for every candle.
    pub fn values(&self, candles: &[Candle]) -> Vec<f64> {
        match self {
            PriceSource::Close => candles.iter().map(|c| c.close).collect(),
            PriceSource::HeikenAshi => candles.iter().map(heiken_ashi::ha_close).collect(),
        }
    }

    /// Series key prefix, so `sma_10` and `ha_sma_10` never collide.
    pub fn prefix(&self) -> &'static str {
        match self {
            PriceSource::Close => "",
            PriceSource::HeikenAshi => "ha_",
        }
    }
}

/// Create synthetic one-minute candles from close prices for testing.
///
/// open = prev_close (or close for the first candle),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_candles(closes: &[f64]) -> Vec<Candle> {
    use chrono::TimeZone;
    let base = chrono::Utc.with_ymd_and_hms(2024, 1, 2, 9, 30, 0).unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Candle {
                time: base + chrono::Duration::minutes(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000.0,
            }
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

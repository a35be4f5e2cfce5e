//! Candle: the fundamental market data unit.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::InputError;

/// OHLCV candle for a single interval.
///
/// A series of candles is expected to be strictly increasing in `time` with a
/// fixed interval. The engine never mutates candles it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Candle {
    pub time: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: f64,
}

impl Candle {
    pub fn new(time: DateTime<Utc>, open: f64, high: f64, low: f64, close: f64, volume: f64) -> Self {
        Self {
            time,
            open,
            high,
            low,
            close,
            volume,
        }
    }

    /// Returns the name of the first OHLC field that is NaN or infinite.
    pub fn non_finite_field(&self) -> Option<&'static str> {
        [
            ("open", self.open),
            ("high", self.high),
            ("low", self.low),
            ("close", self.close),
        ]
        .into_iter()
        .find(|(_, v)| !v.is_finite())
        .map(|(name, _)| name)
    }
}

/// Check that a candle series is usable by the engine.
///
/// Rejects an empty series, any candle whose time does not strictly follow its
/// predecessor, and any candle with a non-finite OHLC field. OHLC ordering
/// (`high >= low` etc.) is not enforced; feeds routinely round prices.
pub fn validate_series(candles: &[Candle]) -> Result<(), InputError> {
    if candles.is_empty() {
        return Err(InputError::Empty);
    }

    for (index, candle) in candles.iter().enumerate() {
        if let Some(field) = candle.non_finite_field() {
            return Err(InputError::NonFinite { index, field });
        }
        if index > 0 && candle.time <= candles[index - 1].time {
            return Err(InputError::Unsorted { index });
        }
    }

    Ok(())
}

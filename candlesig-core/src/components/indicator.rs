//! Indicator trait and precomputed indicator values container.
//!
//! Indicators are pure functions: candle history in, numeric series out.
//! A strategy's indicators are computed once per evaluation and then queried
//! by candle index.

use crate::domain::Candle;
use std::collections::{BTreeMap, HashMap};

/// Trait for indicators.
///
/// Indicators take a full candle series and produce a numeric output series of
/// the same length. The first `lookback()` values are `f64::NAN` (warm-up).
///
/// # Look-ahead contamination guard
/// No indicator value at candle t may depend on price data from candle t+1 or
/// later. Appending candles must never change already-computed values.
pub trait Indicator: Send + Sync {
    /// Series key (e.g., "ema_5", "ha_sma_10").
    fn name(&self) -> &str;

    /// Number of leading NaN values before the indicator is defined.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire candle series.
    fn compute(&self, candles: &[Candle]) -> Vec<f64>;
}

/// Container for precomputed indicator values.
#[derive(Debug, Clone, Default)]
pub struct IndicatorValues {
    series: HashMap<String, Vec<f64>>,
}

impl IndicatorValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Compute every indicator over `candles`.
    pub fn compute_all(indicators: &[Box<dyn Indicator>], candles: &[Candle]) -> Self {
        let mut values = Self::new();
        for indicator in indicators {
            values.insert(indicator.name(), indicator.compute(candles));
        }
        values
    }

    /// Insert a named indicator series.
    pub fn insert(&mut self, name: impl Into<String>, values: Vec<f64>) {
        self.series.insert(name.into(), values);
    }

    /// Get the indicator value at a specific candle index.
    pub fn get(&self, name: &str, index: usize) -> Option<f64> {
        self.series.get(name).and_then(|v| v.get(index).copied())
    }

    /// Get the value only if it is defined (present and not NaN).
    pub fn defined(&self, name: &str, index: usize) -> Option<f64> {
        self.get(name, index).filter(|v| !v.is_nan())
    }

    /// Every series' value at `index`, keyed by name in sorted order.
    pub fn snapshot(&self, index: usize) -> BTreeMap<String, f64> {
        self.series
            .iter()
            .filter_map(|(name, values)| values.get(index).map(|v| (name.clone(), *v)))
            .collect()
    }

    /// Number of indicator series stored.
    pub fn len(&self) -> usize {
        self.series.len()
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }
}

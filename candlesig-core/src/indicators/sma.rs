//! Simple Moving Average (SMA).
//!
//! Rolling mean over a lookback window.
//! Lookback: window - 1 (first valid value at index window-1).

use crate::components::indicator::Indicator;
use crate::domain::Candle;

use super::PriceSource;

#[derive(Debug, Clone)]
pub struct Sma {
    window: usize,
    source: PriceSource,
    name: String,
}

impl Sma {
    pub fn new(window: usize) -> Self {
        Self::on(window, PriceSource::Close)
    }

    pub fn on(window: usize, source: PriceSource) -> Self {
        assert!(window >= 1, "SMA window must be >= 1");
        Self {
            window,
            source,
            name: format!("{}sma_{window}", source.prefix()),
        }
    }

    pub fn window(&self) -> usize {
        self.window
    }
}

impl Indicator for Sma {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.window.saturating_sub(1)
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        sma_of_series(&self.source.values(candles), self.window)
    }
}

/// Rolling mean of an arbitrary series; NaN anywhere in a window yields NaN.
///
/// Each value is divided by the window before it is summed, so a window of
/// prices near `f64::MAX` cannot overflow the running sum.
pub fn sma_of_series(values: &[f64], window: usize) -> Vec<f64> {
    let n = values.len();
    let mut result = vec![f64::NAN; n];

    if n < window || window == 0 {
        return result;
    }

    let w = window as f64;
    let mut sum = 0.0;
    let mut nan_in_window = false;
    for &v in values.iter().take(window) {
        if v.is_nan() {
            nan_in_window = true;
        }
        sum += v / w;
    }

    if !nan_in_window {
        result[window - 1] = sum;
    }

    for i in window..n {
        let leaving = values[i - window];
        let entering = values[i];
        sum = sum - leaving / w + entering / w;

        // A NaN poisons the running sum, so rescan the window instead.
        if entering.is_nan() || leaving.is_nan() || nan_in_window {
            nan_in_window = false;
            sum = 0.0;
            for &v in &values[(i + 1 - window)..=i] {
                if v.is_nan() {
                    nan_in_window = true;
                }
                sum += v / w;
            }
            if nan_in_window {
                continue;
            }
        }

        result[i] = sum;
    }

    result
}

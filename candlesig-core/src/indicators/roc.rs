//! Rate of Change (ROC).
//!
//! Percentage price change over N candles.
//! ROC[t] = (x[t] - x[t-lag]) / x[t-lag] * 100
//! Lookback: lag.

use crate::components::indicator::Indicator;
use crate::domain::Candle;

use super::PriceSource;

#[derive(Debug, Clone)]
pub struct Roc {
    lag: usize,
    source: PriceSource,
    name: String,
}

impl Roc {
    pub fn new(lag: usize) -> Self {
        Self::on(lag, PriceSource::Close)
    }

    pub fn on(lag: usize, source: PriceSource) -> Self {
        assert!(lag >= 1, "ROC lag must be >= 1");
        Self {
            lag,
            source,
            name: format!("{}roc_{lag}", source.prefix()),
        }
    }

    pub fn lag(&self) -> usize {
        self.lag
    }
}

impl Indicator for Roc {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.lag
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let values = self.source.values(candles);
        let n = values.len();
        let mut result = vec![f64::NAN; n];

        for i in self.lag..n {
            let prev = values[i - self.lag];
            let curr = values[i];
            if prev.is_nan() || curr.is_nan() || prev == 0.0 {
                continue;
            }
            result[i] = (curr - prev) / prev * 100.0;
        }

        result
    }
}

//! Relative Strength Index (RSI).
//!
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss), over close-to-close changes.
//! Averaging is either a plain rolling mean of the last `period` changes
//! ([`RsiSmoothing::Simple`]) or Wilder's recursive smoothing seeded from the
//! first rolling mean ([`RsiSmoothing::Wilder`]).
//! Lookback: period (the first change needs two candles).
//! Edge cases: avg_loss == 0 and avg_gain == 0 → 50; avg_loss == 0 → 100;
//! avg_gain == 0 → 0.

use crate::components::indicator::Indicator;
use crate::domain::Candle;
use serde::{Deserialize, Serialize};

/// How average gain and average loss are formed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RsiSmoothing {
    #[default]
    Simple,
    Wilder,
}

#[derive(Debug, Clone)]
pub struct Rsi {
    period: usize,
    smoothing: RsiSmoothing,
    name: String,
}

impl Rsi {
    pub fn new(period: usize) -> Self {
        Self::with_smoothing(period, RsiSmoothing::Simple)
    }

    pub fn with_smoothing(period: usize, smoothing: RsiSmoothing) -> Self {
        assert!(period >= 1, "RSI period must be >= 1");
        let name = match smoothing {
            RsiSmoothing::Simple => format!("rsi_{period}"),
            RsiSmoothing::Wilder => format!("wilder_rsi_{period}"),
        };
        Self {
            period,
            smoothing,
            name,
        }
    }

    pub fn period(&self) -> usize {
        self.period
    }
}

impl Indicator for Rsi {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period
    }

    fn compute(&self, candles: &[Candle]) -> Vec<f64> {
        let n = candles.len();
        let mut result = vec![f64::NAN; n];

        if n < self.period + 1 {
            return result;
        }

        // gains[i] / losses[i] describe the change from candle i-1 to i.
        let mut gains = vec![f64::NAN; n];
        let mut losses = vec![f64::NAN; n];
        for i in 1..n {
            let change = candles[i].close - candles[i - 1].close;
            if change.is_nan() {
                continue;
            }
            gains[i] = change.max(0.0);
            losses[i] = (-change).max(0.0);
        }

        match self.smoothing {
            RsiSmoothing::Simple => {
                for i in self.period..n {
                    let window = (i + 1 - self.period)..=i;
                    let gain_window = &gains[window.clone()];
                    let loss_window = &losses[window];
                    if gain_window.iter().any(|v| v.is_nan()) {
                        continue;
                    }
                    let avg_gain = gain_window.iter().sum::<f64>() / self.period as f64;
                    let avg_loss = loss_window.iter().sum::<f64>() / self.period as f64;
                    result[i] = rsi_from_averages(avg_gain, avg_loss);
                }
            }
            RsiSmoothing::Wilder => {
                let seed = 1..=self.period;
                if gains[seed.clone()].iter().any(|v| v.is_nan()) {
                    return result;
                }
                let mut avg_gain = gains[seed.clone()].iter().sum::<f64>() / self.period as f64;
                let mut avg_loss = losses[seed].iter().sum::<f64>() / self.period as f64;
                result[self.period] = rsi_from_averages(avg_gain, avg_loss);

                let alpha = 1.0 / self.period as f64;
                for i in (self.period + 1)..n {
                    if gains[i].is_nan() {
                        // NaN taints the smoothing from here on
                        return result;
                    }
                    avg_gain = alpha * gains[i] + (1.0 - alpha) * avg_gain;
                    avg_loss = alpha * losses[i] + (1.0 - alpha) * avg_loss;
                    result[i] = rsi_from_averages(avg_gain, avg_loss);
                }
            }
        }

        result
    }
}

/// RSI from average gain and loss; never divides by zero.
pub fn rsi_from_averages(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 && avg_gain == 0.0 {
        50.0 // no movement
    } else if avg_loss == 0.0 {
        100.0
    } else if avg_gain == 0.0 {
        0.0
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}

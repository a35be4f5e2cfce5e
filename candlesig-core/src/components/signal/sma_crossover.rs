//! Moving average crossover signal: golden cross and death cross detection.
//!
//! Fires Buy only on the candle where the short SMA crosses above the long SMA,
//! and Sell only on the candle where it crosses below. A state that persists
//! after the cross does not fire again.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{Candle, Signal, Vocabulary};
use crate::indicators::Sma;

use super::SignalGenerator;

/// Moving average crossover signal generator.
///
/// # Indicator dependencies
/// - Short: `sma_{short_window}` (e.g., `sma_5`)
/// - Long: `sma_{long_window}` (e.g., `sma_20`)
#[derive(Debug, Clone)]
pub struct SmaCrossover {
    pub short_window: usize,
    pub long_window: usize,
    short_key: String,
    long_key: String,
}

impl SmaCrossover {
    pub fn new(short_window: usize, long_window: usize) -> Self {
        assert!(short_window >= 1, "short_window must be >= 1");
        assert!(
            long_window > short_window,
            "long_window must be > short_window"
        );
        Self {
            short_window,
            long_window,
            short_key: Sma::new(short_window).name().to_string(),
            long_key: Sma::new(long_window).name().to_string(),
        }
    }

    pub fn default_params() -> Self {
        Self::new(5, 20)
    }
}

impl SignalGenerator for SmaCrossover {
    fn name(&self) -> &str {
        "sma_crossover"
    }

    fn vocabulary(&self) -> Vocabulary {
        Vocabulary::BuySell
    }

    /// Two defined values of the long SMA: the current and the previous one.
    fn warmup_bars(&self) -> usize {
        self.long_window + 1
    }

    fn evaluate(&self, candles: &[Candle], index: usize, indicators: &IndicatorValues) -> Signal {
        if index == 0 || !self.is_warm(candles, index) {
            return Signal::None;
        }

        let (Some(short_cur), Some(long_cur), Some(short_prev), Some(long_prev)) = (
            indicators.defined(&self.short_key, index),
            indicators.defined(&self.long_key, index),
            indicators.defined(&self.short_key, index - 1),
            indicators.defined(&self.long_key, index - 1),
        ) else {
            return Signal::None;
        };

        if short_cur > long_cur && short_prev <= long_prev {
            Signal::Call
        } else if short_cur < long_cur && short_prev >= long_prev {
            Signal::Put
        } else {
            Signal::None
        }
    }
}

//! EMA cross: level comparison of a fast and a slow EMA.
//!
//! Fires Call while the fast EMA is above the slow EMA, Put while below.
//! This is a level rule: it fires on every candle the condition holds.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{Candle, Signal};
use crate::indicators::Ema;

use super::{compare_levels, SignalGenerator};

#[derive(Debug, Clone)]
pub struct EmaCross {
    pub fast_span: usize,
    pub slow_span: usize,
    fast_key: String,
    slow_key: String,
}

impl EmaCross {
    pub fn new(fast_span: usize, slow_span: usize) -> Self {
        assert!(fast_span >= 1, "fast_span must be >= 1");
        assert!(slow_span > fast_span, "slow_span must be > fast_span");
        Self {
            fast_span,
            slow_span,
            fast_key: Ema::new(fast_span).name().to_string(),
            slow_key: Ema::new(slow_span).name().to_string(),
        }
    }

    pub fn default_params() -> Self {
        Self::new(5, 20)
    }
}

impl SignalGenerator for EmaCross {
    fn name(&self) -> &str {
        "ema_cross"
    }

    fn warmup_bars(&self) -> usize {
        self.slow_span
    }

    fn evaluate(&self, candles: &[Candle], index: usize, indicators: &IndicatorValues) -> Signal {
        if !self.is_warm(candles, index) {
            return Signal::None;
        }

        match (
            indicators.defined(&self.fast_key, index),
            indicators.defined(&self.slow_key, index),
        ) {
            (Some(fast), Some(slow)) => compare_levels(fast, slow),
            _ => Signal::None,
        }
    }
}

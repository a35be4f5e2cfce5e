//! Heiken-Ashi momentum: smoothed price against its mean, confirmed by ROC.
//!
//! Buy when the HA close is above its moving average and its rate of change
//! is positive; Sell when below and negative.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{Candle, Signal, Vocabulary};
use crate::indicators::{HeikenAshiClose, PriceSource, Roc, Sma};

use super::{compare_levels, SignalGenerator};

#[derive(Debug, Clone)]
pub struct HeikenAshiMomentum {
    pub ma_window: usize,
    pub roc_lag: usize,
    ma_key: String,
    roc_key: String,
}

impl HeikenAshiMomentum {
    pub fn new(ma_window: usize, roc_lag: usize) -> Self {
        assert!(ma_window >= 1, "ma_window must be >= 1");
        assert!(roc_lag >= 1, "roc_lag must be >= 1");
        Self {
            ma_window,
            roc_lag,
            ma_key: Sma::on(ma_window, PriceSource::HeikenAshi).name().to_string(),
            roc_key: Roc::on(roc_lag, PriceSource::HeikenAshi).name().to_string(),
        }
    }

    pub fn default_params() -> Self {
        Self::new(10, 5)
    }
}

impl SignalGenerator for HeikenAshiMomentum {
    fn name(&self) -> &str {
        "heiken_ashi_momentum"
    }

    fn vocabulary(&self) -> Vocabulary {
        Vocabulary::BuySell
    }

    fn warmup_bars(&self) -> usize {
        self.ma_window.max(self.roc_lag + 1)
    }

    fn evaluate(&self, candles: &[Candle], index: usize, indicators: &IndicatorValues) -> Signal {
        if !self.is_warm(candles, index) {
            return Signal::None;
        }

        let (Some(ha), Some(ma), Some(roc)) = (
            indicators.defined(HeikenAshiClose::NAME, index),
            indicators.defined(&self.ma_key, index),
            indicators.defined(&self.roc_key, index),
        ) else {
            return Signal::None;
        };

        let position = compare_levels(ha, ma);
        let momentum = compare_levels(roc, 0.0);
        if position == momentum {
            position
        } else {
            Signal::None
        }
    }
}

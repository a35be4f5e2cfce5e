//! RSI threshold: oversold/overbought rule.
//!
//! Call when RSI is below the oversold level, Put when above the overbought
//! level. Dashboards list this strategy as "RSI Divergence"; it does not look
//! for price/RSI divergence.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{Candle, Signal};
use crate::indicators::{Rsi, RsiSmoothing};

use super::SignalGenerator;

#[derive(Debug, Clone)]
pub struct RsiThreshold {
    pub period: usize,
    pub oversold: f64,
    pub overbought: f64,
    rsi_key: String,
}

impl RsiThreshold {
    pub fn new(period: usize, smoothing: RsiSmoothing, oversold: f64, overbought: f64) -> Self {
        assert!(period >= 1, "period must be >= 1");
        assert!(
            (0.0..=100.0).contains(&oversold) && (0.0..=100.0).contains(&overbought),
            "thresholds must be within [0, 100]"
        );
        assert!(oversold < overbought, "oversold must be < overbought");
        Self {
            period,
            oversold,
            overbought,
            rsi_key: Rsi::with_smoothing(period, smoothing).name().to_string(),
        }
    }

    pub fn default_params() -> Self {
        Self::new(14, RsiSmoothing::Simple, 30.0, 70.0)
    }
}

impl SignalGenerator for RsiThreshold {
    fn name(&self) -> &str {
        "rsi_threshold"
    }

    fn warmup_bars(&self) -> usize {
        self.period + 1
    }

    fn evaluate(&self, candles: &[Candle], index: usize, indicators: &IndicatorValues) -> Signal {
        if !self.is_warm(candles, index) {
            return Signal::None;
        }

        match indicators.defined(&self.rsi_key, index) {
            Some(rsi) if rsi < self.oversold => Signal::Call,
            Some(rsi) if rsi > self.overbought => Signal::Put,
            _ => Signal::None,
        }
    }
}

//! EMA cross confirmed by RSI momentum.
//!
//! Call when the fast EMA is above the slow EMA and RSI is above the midline.
//! Put when the fast EMA is below the slow EMA and RSI is below the midline.
//! Anything else, including RSI exactly on the midline, is no signal.

use crate::components::indicator::{Indicator, IndicatorValues};
use crate::domain::{Candle, Signal};
use crate::indicators::{Ema, Rsi, RsiSmoothing};

use super::{compare_levels, SignalGenerator};

#[derive(Debug, Clone)]
pub struct EmaRsi {
    pub fast_span: usize,
    pub slow_span: usize,
    pub rsi_period: usize,
    pub rsi_midline: f64,
    fast_key: String,
    slow_key: String,
    rsi_key: String,
}

impl EmaRsi {
    pub fn new(
        fast_span: usize,
        slow_span: usize,
        rsi_period: usize,
        smoothing: RsiSmoothing,
        rsi_midline: f64,
    ) -> Self {
        assert!(fast_span >= 1, "fast_span must be >= 1");
        assert!(slow_span > fast_span, "slow_span must be > fast_span");
        assert!(
            (0.0..=100.0).contains(&rsi_midline),
            "rsi_midline must be within [0, 100]"
        );
        Self {
            fast_span,
            slow_span,
            rsi_period,
            rsi_midline,
            fast_key: Ema::new(fast_span).name().to_string(),
            slow_key: Ema::new(slow_span).name().to_string(),
            rsi_key: Rsi::with_smoothing(rsi_period, smoothing).name().to_string(),
        }
    }

    pub fn default_params() -> Self {
        Self::new(5, 20, 14, RsiSmoothing::Simple, 50.0)
    }
}

impl SignalGenerator for EmaRsi {
    fn name(&self) -> &str {
        "ema_rsi"
    }

    fn warmup_bars(&self) -> usize {
        self.slow_span.max(self.rsi_period + 1)
    }

    fn evaluate(&self, candles: &[Candle], index: usize, indicators: &IndicatorValues) -> Signal {
        if !self.is_warm(candles, index) {
            return Signal::None;
        }

        let (Some(fast), Some(slow), Some(rsi)) = (
            indicators.defined(&self.fast_key, index),
            indicators.defined(&self.slow_key, index),
            indicators.defined(&self.rsi_key, index),
        ) else {
            return Signal::None;
        };

        let trend = compare_levels(fast, slow);
        let momentum = compare_levels(rsi, self.rsi_midline);
        if trend == momentum {
            trend
        } else {
            Signal::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::make_candles;

    fn values(fast: f64, slow: f64, rsi: f64) -> IndicatorValues {
        let mut iv = IndicatorValues::new();
        iv.insert("ema_5", vec![fast]);
        iv.insert("ema_20", vec![slow]);
        iv.insert("rsi_14", vec![rsi]);
        iv
    }

    /// Single-candle evaluation with warm-up disabled via tiny spans.
    fn eval(fast: f64, slow: f64, rsi: f64) -> Signal {
        let sig = EmaRsi {
            fast_span: 1,
            slow_span: 1,
            rsi_period: 0,
            ..EmaRsi::default_params()
        };
        let candles = make_candles(&[100.0]);
        sig.evaluate(&candles, 0, &values(fast, slow, rsi))
    }

    #[test]
    fn trend_and_momentum_agree_up() {
        assert_eq!(eval(11.0, 10.0, 60.0), Signal::Call);
    }

    #[test]
    fn trend_and_momentum_agree_down() {
        assert_eq!(eval(9.0, 10.0, 40.0), Signal::Put);
    }

    #[test]
    fn disagreement_is_none() {
        assert_eq!(eval(11.0, 10.0, 40.0), Signal::None);
        assert_eq!(eval(9.0, 10.0, 60.0), Signal::None);
    }

    #[test]
    fn rsi_on_midline_is_none() {
        assert_eq!(eval(11.0, 10.0, 50.0), Signal::None);
    }

    #[test]
    fn undefined_rsi_is_none() {
        assert_eq!(eval(11.0, 10.0, f64::NAN), Signal::None);
    }

    #[test]
    fn warmup_covers_rsi() {
        assert_eq!(EmaRsi::default_params().warmup_bars(), 20);
        let sig = EmaRsi::new(5, 10, 14, RsiSmoothing::Simple, 50.0);
        assert_eq!(sig.warmup_bars(), 15);
    }

    #[test]
    fn rising_series_fires_call() {
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + i as f64).collect();
        let candles = make_candles(&closes);
        let sig = EmaRsi::default_params();
        let mut iv = IndicatorValues::new();
        iv.insert("ema_5", Ema::new(5).compute(&candles));
        iv.insert("ema_20", Ema::new(20).compute(&candles));
        iv.insert("rsi_14", Rsi::new(14).compute(&candles));
        assert_eq!(sig.evaluate(&candles, 29, &iv), Signal::Call);
        assert_eq!(sig.evaluate(&candles, 18, &iv), Signal::None);
    }
}

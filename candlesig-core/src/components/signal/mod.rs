//! Signal generation: maps candle history plus indicator values to a trade decision.
//!
//! Generators are stateless: they receive the candle history and precomputed
//! indicator values and read only data up to the index they are asked about.
//! Level-based rules inspect the latest value; crossover rules also inspect
//! the previous one.

pub mod ema_cross;
pub mod ema_rsi;
pub mod heiken_ashi_momentum;
pub mod rsi_threshold;
pub mod sma_crossover;

use crate::domain::{Candle, Signal, Vocabulary};

use super::indicator::IndicatorValues;

/// Trait for signal generators.
pub trait SignalGenerator: Send + Sync {
    /// Strategy tag (e.g., "ema_cross").
    fn name(&self) -> &str;

    /// Vocabulary the strategy's callers label signals with.
    fn vocabulary(&self) -> Vocabulary {
        Vocabulary::CallPut
    }

    /// Number of candles needed before this generator can produce output.
    fn warmup_bars(&self) -> usize;

    /// Evaluate the generator at candle `index`.
    ///
    /// Returns `Signal::None` below warm-up or when any indicator the rule
    /// depends on is undefined at `index`. Must only use `candles[0..=index]`.
    fn evaluate(&self, candles: &[Candle], index: usize, indicators: &IndicatorValues) -> Signal;

    /// True when `index` is past warm-up and inside the series.
    fn is_warm(&self, candles: &[Candle], index: usize) -> bool {
        index < candles.len() && index + 1 >= self.warmup_bars()
    }
}

/// Level comparison shared by the two-line rules: `Call` above, `Put` below.
pub(crate) fn compare_levels(a: f64, b: f64) -> Signal {
    if a > b {
        Signal::Call
    } else if a < b {
        Signal::Put
    } else {
        Signal::None
    }
}

pub use ema_cross::EmaCross;
pub use ema_rsi::EmaRsi;
pub use heiken_ashi_momentum::HeikenAshiMomentum;
pub use rsi_threshold::RsiThreshold;
pub use sma_crossover::SmaCrossover;

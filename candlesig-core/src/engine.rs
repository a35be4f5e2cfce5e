//! Signal engine: validates a candle snapshot, computes the strategy's
//! indicators and asks the strategy for a decision.
//!
//! The engine holds no state between calls. `SignalEngine` only caches the
//! generator and indicator set built from a config, so a caller polling on a
//! schedule does not rebuild them for every batch of candles.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use tracing::{debug, trace};

use crate::components::factory::{create_strategy, required_indicators};
use crate::components::indicator::{Indicator, IndicatorValues};
use crate::components::signal::SignalGenerator;
use crate::config::StrategyConfig;
use crate::domain::{validate_series, Candle, Signal, Vocabulary};
use crate::error::SignalError;

/// A strategy ready to evaluate candle snapshots.
pub struct SignalEngine {
    config: StrategyConfig,
    fingerprint: String,
    generator: Box<dyn SignalGenerator>,
    indicators: Vec<Box<dyn Indicator>>,
}

/// Decision at the latest candle plus the values it was derived from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    pub strategy: String,
    pub fingerprint: String,
    pub signal: Signal,
    /// `signal` in the strategy's own vocabulary.
    pub label: String,
    pub vocabulary: Vocabulary,
    pub time: DateTime<Utc>,
    pub index: usize,
    pub candles: usize,
    pub warmup: usize,
    /// Indicator values at `index`; `None` while an indicator is warming up.
    pub indicators: BTreeMap<String, Option<f64>>,
}

impl Evaluation {
    pub fn is_warm(&self) -> bool {
        self.candles >= self.warmup
    }
}

impl SignalEngine {
    /// Validate `config` and build its generator and indicators.
    pub fn new(config: &StrategyConfig) -> Result<Self, SignalError> {
        let generator = create_strategy(config)?;
        let indicators = required_indicators(config);
        Ok(Self {
            config: config.clone(),
            fingerprint: config.fingerprint(),
            generator,
            indicators,
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Candles required before a non-`None` signal is possible.
    pub fn warmup(&self) -> usize {
        self.generator.warmup_bars()
    }

    pub fn vocabulary(&self) -> Vocabulary {
        self.generator.vocabulary()
    }

    /// Decision for the latest candle.
    pub fn evaluate(&self, candles: &[Candle]) -> Result<Signal, SignalError> {
        self.evaluate_detailed(candles).map(|e| e.signal)
    }

    /// Decision for the latest candle with an indicator snapshot.
    pub fn evaluate_detailed(&self, candles: &[Candle]) -> Result<Evaluation, SignalError> {
        validate_series(candles)?;

        let index = candles.len() - 1;
        let values = IndicatorValues::compute_all(&self.indicators, candles);
        let signal = self.generator.evaluate(candles, index, &values);

        let snapshot: BTreeMap<String, Option<f64>> = values
            .snapshot(index)
            .into_iter()
            .map(|(name, v)| (name, (!v.is_nan()).then_some(v)))
            .collect();

        if candles.len() < self.warmup() {
            debug!(
                strategy = self.generator.name(),
                candles = candles.len(),
                warmup = self.warmup(),
                "not enough candles to evaluate"
            );
        } else {
            trace!(strategy = self.generator.name(), indicators = ?snapshot, "indicator snapshot");
            debug!(
                strategy = self.generator.name(),
                candles = candles.len(),
                signal = %signal,
                "evaluated"
            );
        }

        Ok(Evaluation {
            strategy: self.generator.name().to_string(),
            fingerprint: self.fingerprint.clone(),
            signal,
            label: signal.label(self.vocabulary()).to_string(),
            vocabulary: self.vocabulary(),
            time: candles[index].time,
            index,
            candles: candles.len(),
            warmup: self.warmup(),
            indicators: snapshot,
        })
    }

    /// The decision the strategy produces at every candle, each using only
    /// the candles up to and including it.
    pub fn evaluate_series(&self, candles: &[Candle]) -> Result<Vec<Signal>, SignalError> {
        validate_series(candles)?;

        let values = IndicatorValues::compute_all(&self.indicators, candles);
        let signals: Vec<Signal> = (0..candles.len())
            .map(|i| self.generator.evaluate(candles, i, &values))
            .collect();

        debug!(
            strategy = self.generator.name(),
            candles = candles.len(),
            fired = signals.iter().filter(|s| !s.is_none()).count(),
            "evaluated series"
        );

        Ok(signals)
    }
}

impl fmt::Debug for SignalEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SignalEngine")
            .field("config", &self.config)
            .field("fingerprint", &self.fingerprint)
            .field(
                "indicators",
                &self.indicators.iter().map(|i| i.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}

/// Decision for the latest candle under `strategy`.
pub fn evaluate(candles: &[Candle], strategy: &StrategyConfig) -> Result<Signal, SignalError> {
    SignalEngine::new(strategy)?.evaluate(candles)
}

/// Decision for the latest candle with an indicator snapshot.
pub fn evaluate_detailed(
    candles: &[Candle],
    strategy: &StrategyConfig,
) -> Result<Evaluation, SignalError> {
    SignalEngine::new(strategy)?.evaluate_detailed(candles)
}

/// Per-candle decisions over the whole series.
pub fn evaluate_series(
    candles: &[Candle],
    strategy: &StrategyConfig,
) -> Result<Vec<Signal>, SignalError> {
    SignalEngine::new(strategy)?.evaluate_series(candles)
}

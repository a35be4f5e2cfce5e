//! Factory system: converts `StrategyConfig` into runtime trait objects.
//!
//! `create_strategy` builds the signal generator and `required_indicators`
//! resolves the indicator series it reads. Both match `StrategyConfig`
//! exhaustively, so a new strategy variant fails to compile until it is wired
//! in here.

use std::collections::HashSet;

use crate::config::StrategyConfig;
use crate::error::SignalError;
use crate::indicators::{Ema, HeikenAshiClose, PriceSource, Roc, Rsi, Sma};

use super::indicator::Indicator;
use super::signal::{
    EmaCross, EmaRsi, HeikenAshiMomentum, RsiThreshold, SignalGenerator, SmaCrossover,
};

// ─── Signal factory ──────────────────────────────────────────────────

/// Create a signal generator from a validated `StrategyConfig`.
pub fn create_strategy(config: &StrategyConfig) -> Result<Box<dyn SignalGenerator>, SignalError> {
    config.validate()?;

    let generator: Box<dyn SignalGenerator> = match config {
        StrategyConfig::EmaRsi(p) => Box::new(EmaRsi::new(
            p.fast_span,
            p.slow_span,
            p.rsi_period,
            p.rsi_smoothing,
            p.rsi_midline,
        )),
        StrategyConfig::EmaCross(p) => Box::new(EmaCross::new(p.fast_span, p.slow_span)),
        StrategyConfig::RsiThreshold(p) => Box::new(RsiThreshold::new(
            p.rsi_period,
            p.rsi_smoothing,
            p.oversold,
            p.overbought,
        )),
        StrategyConfig::HeikenAshiMomentum(p) => {
            Box::new(HeikenAshiMomentum::new(p.ma_window, p.roc_lag))
        }
        StrategyConfig::SmaCrossover(p) => {
            Box::new(SmaCrossover::new(p.short_window, p.long_window))
        }
    };

    Ok(generator)
}

// ─── Required indicators resolver ───────────────────────────────────

/// Determine which indicators a strategy reads, deduplicated by series name.
pub fn required_indicators(config: &StrategyConfig) -> Vec<Box<dyn Indicator>> {
    let mut seen = HashSet::new();
    let mut indicators: Vec<Box<dyn Indicator>> = Vec::new();

    let mut add = |ind: Box<dyn Indicator>| {
        let key = ind.name().to_string();
        if seen.insert(key) {
            indicators.push(ind);
        }
    };

    match config {
        StrategyConfig::EmaRsi(p) => {
            add(Box::new(Ema::new(p.fast_span)));
            add(Box::new(Ema::new(p.slow_span)));
            add(Box::new(Rsi::with_smoothing(p.rsi_period, p.rsi_smoothing)));
        }
        StrategyConfig::EmaCross(p) => {
            add(Box::new(Ema::new(p.fast_span)));
            add(Box::new(Ema::new(p.slow_span)));
        }
        StrategyConfig::RsiThreshold(p) => {
            add(Box::new(Rsi::with_smoothing(p.rsi_period, p.rsi_smoothing)));
        }
        StrategyConfig::HeikenAshiMomentum(p) => {
            add(Box::new(HeikenAshiClose));
            add(Box::new(Sma::on(p.ma_window, PriceSource::HeikenAshi)));
            add(Box::new(Roc::on(p.roc_lag, PriceSource::HeikenAshi)));
        }
        StrategyConfig::SmaCrossover(p) => {
            add(Box::new(Sma::new(p.short_window)));
            add(Box::new(Sma::new(p.long_window)));
        }
    }

    indicators
}

// ─── Tests ───────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{EmaCrossParams, EmaRsiParams};

    fn names(config: &StrategyConfig) -> Vec<String> {
        required_indicators(config)
            .iter()
            .map(|i| i.name().to_string())
            .collect()
    }

    #[test]
    fn every_default_builds() {
        for config in StrategyConfig::all_defaults() {
            let sig = create_strategy(&config).unwrap();
            assert_eq!(sig.name(), config.name());
        }
    }

    #[test]
    fn generator_warmup_matches_config_warmup() {
        for config in StrategyConfig::all_defaults() {
            let sig = create_strategy(&config).unwrap();
            assert_eq!(sig.warmup_bars(), config.warmup(), "{}", config.name());
        }
    }

    #[test]
    fn invalid_config_is_refused() {
        let config = StrategyConfig::EmaCross(EmaCrossParams {
            fast_span: 20,
            slow_span: 20,
        });
        assert!(matches!(
            create_strategy(&config),
            Err(SignalError::InvalidConfig(_))
        ));
    }

    #[test]
    fn ema_rsi_indicators() {
        let config = StrategyConfig::EmaRsi(EmaRsiParams::default());
        assert_eq!(names(&config), vec!["ema_5", "ema_20", "rsi_14"]);
    }

    #[test]
    fn heiken_ashi_indicators() {
        let config: StrategyConfig = "magic strategy".parse().unwrap();
        assert_eq!(names(&config), vec!["ha_close", "ha_sma_10", "ha_roc_5"]);
    }

    #[test]
    fn sma_crossover_indicators() {
        let config: StrategyConfig = "sma_crossover".parse().unwrap();
        assert_eq!(names(&config), vec!["sma_5", "sma_20"]);
    }

    #[test]
    fn indicator_lookbacks_fit_inside_warmup() {
        for config in StrategyConfig::all_defaults() {
            for ind in required_indicators(&config) {
                assert!(
                    ind.lookback() < config.warmup(),
                    "{}: {} lookback {} >= warmup {}",
                    config.name(),
                    ind.name(),
                    ind.lookback(),
                    config.warmup()
                );
            }
        }
    }
}

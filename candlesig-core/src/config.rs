//! Serializable strategy configuration.
//!
//! `StrategyConfig` is a closed enum: every strategy and its parameters are
//! known at compile time, and the factory matches it exhaustively. Configs
//! load from TOML with `type` as the tag:
//!
//! ```toml
//! type = "ema_rsi"
//! fast_span = 5
//! slow_span = 20
//! rsi_period = 14
//! ```
//!
//! Omitted parameters take their defaults; unknown keys are rejected.

use serde::{Deserialize, Serialize};
use std::path::Path;
use std::str::FromStr;

use crate::error::SignalError;
use crate::indicators::RsiSmoothing;

/// Strategy selector plus parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StrategyConfig {
    /// EMA cross confirmed by RSI ("Magic Secret").
    EmaRsi(EmaRsiParams),
    /// EMA cross alone.
    EmaCross(EmaCrossParams),
    /// RSI oversold/overbought ("RSI Divergence").
    RsiThreshold(RsiThresholdParams),
    /// Heiken-Ashi close vs its SMA, confirmed by ROC ("Magic Strategy").
    HeikenAshiMomentum(HeikenAshiMomentumParams),
    /// SMA crossover, fires on the transition candle only.
    SmaCrossover(SmaCrossoverParams),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmaRsiParams {
    pub fast_span: usize,
    pub slow_span: usize,
    pub rsi_period: usize,
    pub rsi_smoothing: RsiSmoothing,
    pub rsi_midline: f64,
}

impl Default for EmaRsiParams {
    fn default() -> Self {
        Self {
            fast_span: 5,
            slow_span: 20,
            rsi_period: 14,
            rsi_smoothing: RsiSmoothing::Simple,
            rsi_midline: 50.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EmaCrossParams {
    pub fast_span: usize,
    pub slow_span: usize,
}

impl Default for EmaCrossParams {
    fn default() -> Self {
        Self {
            fast_span: 5,
            slow_span: 20,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RsiThresholdParams {
    pub rsi_period: usize,
    pub rsi_smoothing: RsiSmoothing,
    pub oversold: f64,
    pub overbought: f64,
}

impl Default for RsiThresholdParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_smoothing: RsiSmoothing::Simple,
            oversold: 30.0,
            overbought: 70.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HeikenAshiMomentumParams {
    pub ma_window: usize,
    pub roc_lag: usize,
}

impl Default for HeikenAshiMomentumParams {
    fn default() -> Self {
        Self {
            ma_window: 10,
            roc_lag: 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SmaCrossoverParams {
    pub short_window: usize,
    pub long_window: usize,
}

impl Default for SmaCrossoverParams {
    fn default() -> Self {
        Self {
            short_window: 5,
            long_window: 20,
        }
    }
}

impl StrategyConfig {
    /// Default-parameter config for every strategy, in menu order.
    pub fn all_defaults() -> Vec<StrategyConfig> {
        vec![
            StrategyConfig::EmaRsi(EmaRsiParams::default()),
            StrategyConfig::EmaCross(EmaCrossParams::default()),
            StrategyConfig::RsiThreshold(RsiThresholdParams::default()),
            StrategyConfig::HeikenAshiMomentum(HeikenAshiMomentumParams::default()),
            StrategyConfig::SmaCrossover(SmaCrossoverParams::default()),
        ]
    }

    /// Serialized tag, e.g. `ema_rsi`.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyConfig::EmaRsi(_) => "ema_rsi",
            StrategyConfig::EmaCross(_) => "ema_cross",
            StrategyConfig::RsiThreshold(_) => "rsi_threshold",
            StrategyConfig::HeikenAshiMomentum(_) => "heiken_ashi_momentum",
            StrategyConfig::SmaCrossover(_) => "sma_crossover",
        }
    }

    /// Name shown on the dashboards.
    pub fn display_name(&self) -> &'static str {
        match self {
            StrategyConfig::EmaRsi(_) => "Magic Secret",
            StrategyConfig::EmaCross(_) => "EMA Cross",
            StrategyConfig::RsiThreshold(_) => "RSI Divergence",
            StrategyConfig::HeikenAshiMomentum(_) => "Magic Strategy",
            StrategyConfig::SmaCrossover(_) => "SMA Crossover",
        }
    }

    /// Candles required before the strategy can emit anything but `None`.
    pub fn warmup(&self) -> usize {
        match self {
            StrategyConfig::EmaRsi(p) => p.slow_span.max(p.rsi_period + 1),
            StrategyConfig::EmaCross(p) => p.slow_span,
            StrategyConfig::RsiThreshold(p) => p.rsi_period + 1,
            StrategyConfig::HeikenAshiMomentum(p) => p.ma_window.max(p.roc_lag + 1),
            StrategyConfig::SmaCrossover(p) => p.long_window + 1,
        }
    }

    /// Check parameter ranges. The factory refuses configs that fail this.
    pub fn validate(&self) -> Result<(), SignalError> {
        match self {
            StrategyConfig::EmaRsi(p) => {
                check_fast_slow("fast_span", p.fast_span, "slow_span", p.slow_span)?;
                check_window("rsi_period", p.rsi_period)?;
                check_level("rsi_midline", p.rsi_midline)
            }
            StrategyConfig::EmaCross(p) => {
                check_fast_slow("fast_span", p.fast_span, "slow_span", p.slow_span)
            }
            StrategyConfig::RsiThreshold(p) => {
                check_window("rsi_period", p.rsi_period)?;
                check_level("oversold", p.oversold)?;
                check_level("overbought", p.overbought)?;
                if p.oversold >= p.overbought {
                    return Err(SignalError::InvalidConfig(format!(
                        "oversold ({}) must be below overbought ({})",
                        p.oversold, p.overbought
                    )));
                }
                Ok(())
            }
            StrategyConfig::HeikenAshiMomentum(p) => {
                check_window("ma_window", p.ma_window)?;
                check_window("roc_lag", p.roc_lag)
            }
            StrategyConfig::SmaCrossover(p) => check_fast_slow(
                "short_window",
                p.short_window,
                "long_window",
                p.long_window,
            ),
        }
    }

    /// Parse a TOML document and validate it.
    pub fn from_toml_str(s: &str) -> Result<Self, SignalError> {
        let config: StrategyConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a TOML file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, SignalError> {
        let contents = std::fs::read_to_string(path)?;
        Self::from_toml_str(&contents)
    }

    /// Exact identity of the configuration: blake3 over the canonical JSON.
    ///
    /// Two configs share a fingerprint iff they select the same strategy with
    /// the same parameters.
    pub fn fingerprint(&self) -> String {
        // Only integers, floats and unit enums reach the serializer; serde_json
        // writes non-finite floats as `null`, so this cannot fail.
        let json = serde_json::to_string(self).expect("StrategyConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}

impl FromStr for StrategyConfig {
    type Err = SignalError;

    /// Accepts the snake_case tags and the dashboard names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_ascii_lowercase().replace(|c: char| c == ' ' || c == '-', "_");
        let config = match key.as_str() {
            "ema_rsi" | "magic_secret" => StrategyConfig::EmaRsi(EmaRsiParams::default()),
            "ema_cross" => StrategyConfig::EmaCross(EmaCrossParams::default()),
            "rsi_threshold" | "rsi_divergence" => {
                StrategyConfig::RsiThreshold(RsiThresholdParams::default())
            }
            "heiken_ashi_momentum" | "magic_strategy" => {
                StrategyConfig::HeikenAshiMomentum(HeikenAshiMomentumParams::default())
            }
            "sma_crossover" => StrategyConfig::SmaCrossover(SmaCrossoverParams::default()),
            _ => {
                return Err(SignalError::InvalidConfig(format!(
                    "unknown strategy: {s}"
                )))
            }
        };
        Ok(config)
    }
}

fn check_window(name: &str, value: usize) -> Result<(), SignalError> {
    if value == 0 {
        return Err(SignalError::InvalidConfig(format!("{name} must be >= 1")));
    }
    Ok(())
}

fn check_fast_slow(
    fast_name: &str,
    fast: usize,
    slow_name: &str,
    slow: usize,
) -> Result<(), SignalError> {
    check_window(fast_name, fast)?;
    if slow <= fast {
        return Err(SignalError::InvalidConfig(format!(
            "{slow_name} ({slow}) must be greater than {fast_name} ({fast})"
        )));
    }
    Ok(())
}

fn check_level(name: &str, value: f64) -> Result<(), SignalError> {
    if !(0.0..=100.0).contains(&value) {
        return Err(SignalError::InvalidConfig(format!(
            "{name} ({value}) must be within [0, 100]"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minimal_toml_with_defaults() {
        let config = StrategyConfig::from_toml_str(r#"type = "ema_cross""#).unwrap();
        assert_eq!(config, StrategyConfig::EmaCross(EmaCrossParams::default()));
    }

    #[test]
    fn parses_full_toml() {
        let toml = r#"
            type = "rsi_threshold"
            rsi_period = 9
            rsi_smoothing = "wilder"
            oversold = 25
            overbought = 75.5
        "#;
        let config = StrategyConfig::from_toml_str(toml).unwrap();
        assert_eq!(
            config,
            StrategyConfig::RsiThreshold(RsiThresholdParams {
                rsi_period: 9,
                rsi_smoothing: RsiSmoothing::Wilder,
                oversold: 25.0,
                overbought: 75.5,
            })
        );
        assert_eq!(config.warmup(), 10);
    }

    #[test]
    fn unknown_type_is_parse_error() {
        let err = StrategyConfig::from_toml_str(r#"type = "macd""#).unwrap_err();
        assert!(matches!(err, SignalError::ConfigParse(_)));
    }

    #[test]
    fn misspelled_param_is_parse_error() {
        let err = StrategyConfig::from_toml_str("type = \"ema_cross\"\nslow = 30").unwrap_err();
        assert!(matches!(err, SignalError::ConfigParse(_)));
    }

    #[test]
    fn validation_rejects_inverted_spans() {
        let toml = "type = \"ema_rsi\"\nfast_span = 20\nslow_span = 5";
        let err = StrategyConfig::from_toml_str(toml).unwrap_err();
        assert!(matches!(err, SignalError::InvalidConfig(_)));
    }

    #[test]
    fn validation_rejects_bad_thresholds() {
        let inverted = StrategyConfig::RsiThreshold(RsiThresholdParams {
            oversold: 80.0,
            overbought: 20.0,
            ..Default::default()
        });
        assert!(inverted.validate().is_err());

        let out_of_range = StrategyConfig::RsiThreshold(RsiThresholdParams {
            overbought: 120.0,
            ..Default::default()
        });
        assert!(out_of_range.validate().is_err());

        let nan_midline = StrategyConfig::EmaRsi(EmaRsiParams {
            rsi_midline: f64::NAN,
            ..Default::default()
        });
        assert!(nan_midline.validate().is_err());
    }

    #[test]
    fn validation_rejects_zero_windows() {
        let config = StrategyConfig::HeikenAshiMomentum(HeikenAshiMomentumParams {
            ma_window: 0,
            roc_lag: 5,
        });
        assert!(config.validate().is_err());
    }

    #[test]
    fn defaults_are_valid() {
        for config in StrategyConfig::all_defaults() {
            assert!(config.validate().is_ok(), "{} invalid", config.name());
        }
    }

    #[test]
    fn from_str_accepts_dashboard_names() {
        let cases = [
            ("Magic Secret", "ema_rsi"),
            ("EMA Cross", "ema_cross"),
            ("RSI Divergence", "rsi_threshold"),
            ("Magic Strategy", "heiken_ashi_momentum"),
            ("SMA Crossover", "sma_crossover"),
            ("sma-crossover", "sma_crossover"),
        ];
        for (input, tag) in cases {
            let config: StrategyConfig = input.parse().unwrap();
            assert_eq!(config.name(), tag, "input {input}");
        }
        assert!("bollinger".parse::<StrategyConfig>().is_err());
    }

    #[test]
    fn display_names_round_trip_through_from_str() {
        for config in StrategyConfig::all_defaults() {
            let parsed: StrategyConfig = config.display_name().parse().unwrap();
            assert_eq!(parsed, config);
        }
    }

    #[test]
    fn default_warmups() {
        let warmups: Vec<usize> = StrategyConfig::all_defaults()
            .iter()
            .map(StrategyConfig::warmup)
            .collect();
        assert_eq!(warmups, vec![20, 20, 15, 10, 21]);
    }

    #[test]
    fn fingerprint_tracks_params() {
        let a = StrategyConfig::EmaCross(EmaCrossParams::default());
        let b = StrategyConfig::EmaCross(EmaCrossParams {
            fast_span: 8,
            slow_span: 21,
        });
        assert_eq!(a.fingerprint(), a.clone().fingerprint());
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_eq!(a.fingerprint().len(), 64);
    }

    #[test]
    fn fingerprint_survives_non_finite_params() {
        let config = StrategyConfig::EmaRsi(EmaRsiParams {
            rsi_midline: f64::NAN,
            ..Default::default()
        });
        assert!(config.validate().is_err());
        assert_eq!(config.fingerprint().len(), 64);
    }

    #[test]
    fn json_uses_type_tag() {
        let config = StrategyConfig::SmaCrossover(SmaCrossoverParams::default());
        let json = serde_json::to_value(&config).unwrap();
        assert_eq!(json["type"], "sma_crossover");
        assert_eq!(json["long_window"], 20);
    }

    #[test]
    fn from_path_reads_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("strategy.toml");
        std::fs::write(&path, "type = \"heiken_ashi_momentum\"\nma_window = 12\n").unwrap();
        let config = StrategyConfig::from_path(&path).unwrap();
        assert_eq!(
            config,
            StrategyConfig::HeikenAshiMomentum(HeikenAshiMomentumParams {
                ma_window: 12,
                roc_lag: 5,
            })
        );
    }

    #[test]
    fn from_path_missing_file_is_io_error() {
        let err = StrategyConfig::from_path("/nonexistent/strategy.toml").unwrap_err();
        assert!(matches!(err, SignalError::Io(_)));
    }
}

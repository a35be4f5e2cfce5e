//! candlesig core: candle domain types, indicators, strategies and the
//! signal engine.
//!
//! - Domain types (candles, signals, vocabularies)
//! - Indicators producing NaN-padded series aligned with the candles
//! - Strategy generators behind the `SignalGenerator` trait
//! - A closed `StrategyConfig` enum and the factory that builds from it
//! - `evaluate`: candles + strategy → `Signal`

pub mod components;
pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod indicators;

pub use config::StrategyConfig;
pub use domain::{Candle, Signal, Vocabulary};
pub use engine::{evaluate, evaluate_detailed, evaluate_series, Evaluation, SignalEngine};
pub use error::{InputError, SignalError};

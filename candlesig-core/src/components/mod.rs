//! Component traits and the factory that wires configs to them.
//!
//! - Indicator: candle series in, aligned numeric series out
//! - Signal generator: indicator values in, trade decision out

pub mod factory;
pub mod indicator;
pub mod signal;

pub use factory::{create_strategy, required_indicators};
pub use indicator::{Indicator, IndicatorValues};
pub use signal::SignalGenerator;

//! Domain types for candlesig

pub mod candle;
pub mod signal;

pub use candle::{validate_series, Candle};
pub use signal::{Signal, Vocabulary};

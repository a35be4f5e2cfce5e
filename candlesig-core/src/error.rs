//! Error types for the signal engine.
//!
//! Insufficient warm-up data is deliberately absent: it is reported as
//! `Signal::None` so callers can wait for more candles.

/// Malformed candle input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("candle series is empty")]
    Empty,

    #[error("candle {index} is not strictly after its predecessor")]
    Unsorted { index: usize },

    #[error("candle {index} has a non-finite {field}")]
    NonFinite { index: usize, field: &'static str },
}

/// Errors surfaced by the engine.
#[derive(Debug, thiserror::Error)]
pub enum SignalError {
    #[error("Invalid input: {0}")]
    InvalidInput(#[from] InputError),

    #[error("Invalid strategy config: {0}")]
    InvalidConfig(String),

    #[error("Failed to parse strategy config: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to read strategy config: {0}")]
    Io(#[from] std::io::Error),
}

impl SignalError {
    pub fn is_invalid_input(&self) -> bool {
        matches!(self, Self::InvalidInput(_))
    }
}

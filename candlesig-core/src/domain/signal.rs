//! Trade decision emitted by a strategy.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Discrete trade decision for the latest candle.
///
/// `Call` and `Put` are the binary-options names; `BUY`/`SELL` are accepted as
/// aliases when deserializing and are produced by [`Signal::label`] under the
/// [`Vocabulary::BuySell`] vocabulary. The two vocabularies are semantically
/// identical.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    #[serde(alias = "BUY")]
    Call,
    #[serde(alias = "SELL")]
    Put,
    #[default]
    None,
}

impl Signal {
    pub fn is_none(&self) -> bool {
        matches!(self, Signal::None)
    }

    /// Caller-facing label in the given vocabulary.
    pub fn label(&self, vocabulary: Vocabulary) -> &'static str {
        match (self, vocabulary) {
            (Signal::Call, Vocabulary::CallPut) => "CALL",
            (Signal::Put, Vocabulary::CallPut) => "PUT",
            (Signal::Call, Vocabulary::BuySell) => "BUY",
            (Signal::Put, Vocabulary::BuySell) => "SELL",
            (Signal::None, _) => "NONE",
        }
    }
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label(Vocabulary::CallPut))
    }
}

/// Naming used by a caller for the two directional signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Vocabulary {
    #[default]
    CallPut,
    BuySell,
}

impl FromStr for Vocabulary {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace('-', "_").as_str() {
            "call_put" | "callput" => Ok(Vocabulary::CallPut),
            "buy_sell" | "buysell" => Ok(Vocabulary::BuySell),
            other => Err(format!("unknown vocabulary: {other}")),
        }
    }
}

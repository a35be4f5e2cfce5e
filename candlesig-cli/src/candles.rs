//! Candle file loading.
//!
//! `.json` files hold an array of candle objects; anything else is read as
//! CSV with a `time,open,high,low,close,volume` header. Times are RFC 3339
//! strings or unix seconds. `volume` may be omitted and defaults to zero.
//!
//! Loading only parses. Ordering and finiteness are checked by the engine.

use anyhow::{bail, Context, Result};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::path::Path;
use tracing::debug;

use candlesig_core::Candle;

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawTime {
    Seconds(i64),
    Text(String),
}

#[derive(Debug, Deserialize)]
struct JsonCandle {
    time: RawTime,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: f64,
}

#[derive(Debug, Deserialize)]
struct CsvCandle {
    time: String,
    open: f64,
    high: f64,
    low: f64,
    close: f64,
    #[serde(default)]
    volume: Option<f64>,
}

/// Load candles from `path`, picking the format from its extension.
pub fn load_candles(path: &Path) -> Result<Vec<Candle>> {
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    let candles = if is_json {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading {}", path.display()))?;
        parse_json(&content).with_context(|| format!("parsing {}", path.display()))?
    } else {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .from_path(path)
            .with_context(|| format!("opening {}", path.display()))?;
        parse_csv(reader).with_context(|| format!("parsing {}", path.display()))?
    };

    debug!(path = %path.display(), candles = candles.len(), "loaded candles");
    Ok(candles)
}

fn parse_json(content: &str) -> Result<Vec<Candle>> {
    let raw: Vec<JsonCandle> = serde_json::from_str(content)?;
    raw.into_iter()
        .enumerate()
        .map(|(i, c)| {
            let time = match c.time {
                RawTime::Seconds(secs) => from_unix(secs),
                RawTime::Text(s) => parse_time(&s),
            }
            .with_context(|| format!("candle {i}"))?;
            Ok(Candle::new(time, c.open, c.high, c.low, c.close, c.volume))
        })
        .collect()
}

fn parse_csv<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<Vec<Candle>> {
    let mut candles = Vec::new();
    for (i, record) in reader.deserialize::<CsvCandle>().enumerate() {
        // Header is line 1.
        let row = record.with_context(|| format!("line {}", i + 2))?;
        let time = parse_time(&row.time).with_context(|| format!("line {}", i + 2))?;
        candles.push(Candle::new(
            time,
            row.open,
            row.high,
            row.low,
            row.close,
            row.volume.unwrap_or(0.0),
        ));
    }
    Ok(candles)
}

/// RFC 3339 timestamp or integer unix seconds.
fn parse_time(s: &str) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(secs) = s.parse::<i64>() {
        return from_unix(secs);
    }
    match DateTime::parse_from_rfc3339(s) {
        Ok(t) => Ok(t.with_timezone(&Utc)),
        Err(e) => bail!("invalid time '{s}': {e}"),
    }
}

fn from_unix(secs: i64) -> Result<DateTime<Utc>> {
    match DateTime::from_timestamp(secs, 0) {
        Some(t) => Ok(t),
        None => bail!("unix time {secs} out of range"),
    }
}

//! Criterion benchmarks for candlesig hot paths.
//!
//! Benchmarks:
//! 1. Latest-candle evaluation per strategy (the polling path)
//! 2. Per-candle series evaluation (the backfill path)
//! 3. Indicator computation

use chrono::{Duration, TimeZone, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use candlesig_core::components::indicator::Indicator;
use candlesig_core::indicators::{heiken_ashi, Ema, PriceSource, Roc, Rsi, RsiSmoothing, Sma};
use candlesig_core::{Candle, SignalEngine, StrategyConfig};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_candles(n: usize) -> Vec<Candle> {
    let base = Utc.with_ymd_and_hms(2024, 1, 2, 0, 0, 0).unwrap();
    (0..n)
        .map(|i| {
            let close = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            Candle::new(
                base + Duration::minutes(i as i64),
                close - 0.3,
                close + 1.5,
                close - 1.5,
                close,
                1_000.0 + (i % 500) as f64,
            )
        })
        .collect()
}

// ── 1. Latest-candle evaluation ──────────────────────────────────────

fn bench_evaluate(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_latest");

    // Dashboards poll with a few hundred candles of history.
    let candles = make_candles(300);
    for config in StrategyConfig::all_defaults() {
        let engine = match SignalEngine::new(&config) {
            Ok(engine) => engine,
            Err(e) => panic!("default config {} invalid: {e}", config.name()),
        };
        group.bench_function(config.name(), |b| {
            b.iter(|| black_box(engine.evaluate(black_box(&candles))))
        });
    }

    group.finish();
}

// ── 2. Series evaluation ─────────────────────────────────────────────

fn bench_series(c: &mut Criterion) {
    let mut group = c.benchmark_group("evaluate_series");

    for &candle_count in &[300, 1440, 10_080] {
        let candles = make_candles(candle_count);
        for config in StrategyConfig::all_defaults() {
            let engine = match SignalEngine::new(&config) {
                Ok(engine) => engine,
                Err(e) => panic!("default config {} invalid: {e}", config.name()),
            };
            group.bench_with_input(
                BenchmarkId::new(config.name(), candle_count),
                &candle_count,
                |b, _| b.iter(|| black_box(engine.evaluate_series(black_box(&candles)))),
            );
        }
    }

    group.finish();
}

// ── 3. Indicators ────────────────────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicator_compute");

    for &candle_count in &[300, 1440, 10_080] {
        let candles = make_candles(candle_count);

        let indicators: Vec<Box<dyn Indicator>> = vec![
            Box::new(Ema::new(20)),
            Box::new(Sma::new(20)),
            Box::new(Sma::on(10, PriceSource::HeikenAshi)),
            Box::new(Rsi::new(14)),
            Box::new(Rsi::with_smoothing(14, RsiSmoothing::Wilder)),
            Box::new(Roc::on(5, PriceSource::HeikenAshi)),
        ];

        for ind in &indicators {
            group.bench_with_input(
                BenchmarkId::new(ind.name(), candle_count),
                &candle_count,
                |b, _| b.iter(|| black_box(ind.compute(black_box(&candles)))),
            );
        }

        group.bench_with_input(
            BenchmarkId::new("heiken_ashi_candles", candle_count),
            &candle_count,
            |b, _| b.iter(|| black_box(heiken_ashi(black_box(&candles)))),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_evaluate, bench_series, bench_indicators);
criterion_main!(benches);

//! candlesig CLI: evaluate trading strategies over candle files.
//!
//! Commands:
//! - `evaluate`: decision for the latest candle of one or more candle files
//! - `series`: decision at every candle of a single file
//! - `strategies`: list the available strategies and their defaults

mod candles;
mod logging;

use anyhow::{bail, Result};
use clap::{Args, Parser, Subcommand};
use rayon::prelude::*;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{error, info};

use candlesig_core::{Evaluation, SignalEngine, StrategyConfig, Vocabulary};

use crate::candles::load_candles;

#[derive(Parser)]
#[command(
    name = "candlesig",
    version,
    about = "candlesig CLI: CALL/PUT signals from OHLCV candles"
)]
struct Cli {
    /// Emit logs as JSON lines on stderr.
    #[arg(long, global = true, default_value_t = false)]
    log_json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate the latest candle of each file.
    Evaluate {
        /// Candle files (CSV, or JSON by `.json` extension).
        #[arg(long, required = true, num_args = 1..)]
        candles: Vec<PathBuf>,

        #[command(flatten)]
        strategy: StrategyArgs,

        #[command(flatten)]
        output: OutputArgs,
    },
    /// Print the decision at every candle of one file.
    Series {
        /// Candle file (CSV, or JSON by `.json` extension).
        #[arg(long)]
        candles: PathBuf,

        #[command(flatten)]
        strategy: StrategyArgs,

        #[command(flatten)]
        output: OutputArgs,

        /// Only print candles where the strategy fired.
        #[arg(long, default_value_t = false)]
        fired_only: bool,
    },
    /// List available strategies with their default warm-up.
    Strategies {
        /// Print the default configs as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[derive(Args)]
struct StrategyArgs {
    /// Strategy name: ema_rsi, ema_cross, rsi_threshold, heiken_ashi_momentum,
    /// sma_crossover, or a dashboard name such as "Magic Secret".
    #[arg(long, conflicts_with = "config")]
    strategy: Option<String>,

    /// Path to a TOML strategy config.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Args)]
struct OutputArgs {
    /// Label signals as call-put or buy-sell. Defaults to the strategy's own.
    #[arg(long)]
    vocabulary: Option<Vocabulary>,

    /// Print JSON instead of text.
    #[arg(long, default_value_t = false)]
    json: bool,
}

impl StrategyArgs {
    fn resolve(&self) -> Result<StrategyConfig> {
        match (&self.strategy, &self.config) {
            (Some(name), None) => Ok(name.parse()?),
            (None, Some(path)) => Ok(StrategyConfig::from_path(path)?),
            (None, None) => bail!("one of --strategy or --config is required"),
            (Some(_), Some(_)) => bail!("--strategy and --config are mutually exclusive"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init_logging(cli.log_json);

    match cli.command {
        Commands::Evaluate {
            candles,
            strategy,
            output,
        } => run_evaluate(&candles, &strategy, &output),
        Commands::Series {
            candles,
            strategy,
            output,
            fired_only,
        } => run_series(&candles, &strategy, &output, fired_only),
        Commands::Strategies { json } => run_strategies(json),
    }
}

fn run_evaluate(paths: &[PathBuf], strategy: &StrategyArgs, output: &OutputArgs) -> Result<()> {
    let config = strategy.resolve()?;
    let engine = SignalEngine::new(&config)?;
    let vocabulary = output.vocabulary.unwrap_or_else(|| engine.vocabulary());

    let fingerprint = config.fingerprint();
    info!(
        strategy = config.name(),
        fingerprint = &fingerprint[..12],
        files = paths.len(),
        "evaluating"
    );

    let results: Vec<(&PathBuf, Result<Evaluation>)> = paths
        .par_iter()
        .map(|path| (path, evaluate_file(&engine, path)))
        .collect();

    let mut failures = 0;
    let mut evaluations = Vec::new();
    for (path, result) in results {
        match result {
            Ok(mut eval) => {
                eval.label = eval.signal.label(vocabulary).to_string();
                eval.vocabulary = vocabulary;
                evaluations.push(FileEvaluation {
                    file: path.display().to_string(),
                    evaluation: eval,
                });
            }
            Err(e) => {
                failures += 1;
                error!(file = %path.display(), "{e:#}");
            }
        }
    }

    if output.json {
        println!("{}", serde_json::to_string_pretty(&evaluations)?);
    } else {
        for fe in &evaluations {
            print_evaluation(fe);
        }
    }

    if failures > 0 {
        bail!("{failures} of {} file(s) failed", paths.len());
    }
    Ok(())
}

#[derive(Serialize)]
struct FileEvaluation {
    file: String,
    #[serde(flatten)]
    evaluation: Evaluation,
}

fn evaluate_file(engine: &SignalEngine, path: &Path) -> Result<Evaluation> {
    let candles = load_candles(path)?;
    Ok(engine.evaluate_detailed(&candles)?)
}

fn print_evaluation(fe: &FileEvaluation) {
    let e = &fe.evaluation;
    println!(
        "{:<30} {:<22} {:<6} {} ({} candles)",
        fe.file,
        e.strategy,
        e.label,
        e.time.to_rfc3339(),
        e.candles
    );
    if !e.is_warm() {
        println!("  warming up: {}/{} candles", e.candles, e.warmup);
    }
    for (name, value) in &e.indicators {
        match value {
            Some(v) => println!("  {name:<14} {v:>12.5}"),
            None => println!("  {name:<14} {:>12}", "-"),
        }
    }
}

#[derive(Serialize)]
struct SeriesRow {
    time: String,
    signal: candlesig_core::Signal,
    label: &'static str,
}

fn run_series(
    path: &Path,
    strategy: &StrategyArgs,
    output: &OutputArgs,
    fired_only: bool,
) -> Result<()> {
    let config = strategy.resolve()?;
    let engine = SignalEngine::new(&config)?;
    let vocabulary = output.vocabulary.unwrap_or_else(|| engine.vocabulary());

    let candles = load_candles(path)?;
    let signals = engine.evaluate_series(&candles)?;

    let rows: Vec<SeriesRow> = candles
        .iter()
        .zip(&signals)
        .filter(|(_, s)| !fired_only || !s.is_none())
        .map(|(c, s)| SeriesRow {
            time: c.time.to_rfc3339(),
            signal: *s,
            label: s.label(vocabulary),
        })
        .collect();

    info!(
        strategy = config.name(),
        candles = candles.len(),
        fired = signals.iter().filter(|s| !s.is_none()).count(),
        "series evaluated"
    );

    if output.json {
        println!("{}", serde_json::to_string_pretty(&rows)?);
    } else {
        for row in &rows {
            println!("{} {}", row.time, row.label);
        }
    }

    Ok(())
}

fn run_strategies(json: bool) -> Result<()> {
    let configs = StrategyConfig::all_defaults();

    if json {
        println!("{}", serde_json::to_string_pretty(&configs)?);
        return Ok(());
    }

    println!(
        "{:<22} {:<16} {:>7}  {}",
        "Strategy", "Dashboard name", "Warm-up", "Signals"
    );
    println!("{}", "-".repeat(60));
    for config in &configs {
        let engine = SignalEngine::new(config)?;
        let labels = match engine.vocabulary() {
            Vocabulary::CallPut => "CALL/PUT",
            Vocabulary::BuySell => "BUY/SELL",
        };
        println!(
            "{:<22} {:<16} {:>7}  {}",
            config.name(),
            config.display_name(),
            config.warmup(),
            labels
        );
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn evaluate_accepts_several_files() {
        let cli = Cli::try_parse_from([
            "candlesig",
            "evaluate",
            "--candles",
            "a.csv",
            "b.json",
            "--strategy",
            "Magic Secret",
            "--vocabulary",
            "buy-sell",
        ])
        .unwrap();
        match cli.command {
            Commands::Evaluate {
                candles,
                strategy,
                output,
            } => {
                assert_eq!(candles.len(), 2);
                assert_eq!(strategy.resolve().unwrap().name(), "ema_rsi");
                assert_eq!(output.vocabulary, Some(Vocabulary::BuySell));
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn strategy_and_config_conflict() {
        let result = Cli::try_parse_from([
            "candlesig",
            "evaluate",
            "--candles",
            "a.csv",
            "--strategy",
            "ema_cross",
            "--config",
            "s.toml",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn missing_strategy_is_reported() {
        let args = StrategyArgs {
            strategy: None,
            config: None,
        };
        assert!(args.resolve().is_err());
    }

    #[test]
    fn evaluate_file_end_to_end() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rising.csv");
        let mut csv = String::from("time,open,high,low,close,volume\n");
        for (i, close) in (10..=30).enumerate() {
            let close = close as f64;
            csv.push_str(&format!(
                "{},{},{},{},{},100\n",
                1_704_187_800 + 60 * i as i64,
                close - 1.0,
                close + 0.5,
                close - 1.5,
                close
            ));
        }
        std::fs::write(&path, csv).unwrap();

        let engine = SignalEngine::new(&"ema_cross".parse().unwrap()).unwrap();
        let eval = evaluate_file(&engine, &path).unwrap();
        assert_eq!(eval.signal, candlesig_core::Signal::Call);
        assert_eq!(eval.candles, 21);
    }

    #[test]
    fn evaluate_file_rejects_unsorted() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("unsorted.csv");
        std::fs::write(
            &path,
            "time,open,high,low,close,volume\n1704187860,1,1,1,1,1\n1704187800,1,1,1,1,1\n",
        )
        .unwrap();

        let engine = SignalEngine::new(&"ema_cross".parse().unwrap()).unwrap();
        let err = evaluate_file(&engine, &path).unwrap_err();
        assert!(err
            .downcast_ref::<candlesig_core::SignalError>()
            .is_some_and(|e| e.is_invalid_input()));
    }
}

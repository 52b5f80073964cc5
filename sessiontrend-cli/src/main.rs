//! SessionTrend CLI: signal, scan and synthetic-data commands.
//!
//! Commands:
//! - `signal`: evaluate one symbol from two CSV files and print the outcome
//! - `scan`: evaluate many symbols from a data directory in parallel
//! - `synthetic`: write a seeded daily/4-hour CSV pair for a symbol
//!
//! Results go to stdout as JSON; logs go to stderr.

mod loader;
mod logging;
mod sessions;
mod settings;
mod synthetic;

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use sessiontrend_core::{Bar, Evaluation, SessionType, TrendStrategy};
use tracing::info;

use crate::sessions::SessionWindows;
use crate::settings::{AppConfig, LoggingSettings};
use crate::synthetic::SyntheticConfig;

#[derive(Parser)]
#[command(
    name = "sessiontrend",
    about = "SessionTrend CLI: dual-timeframe trend continuation signals"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one symbol and print the signal outcome and strategy status.
    Signal {
        /// Path to the TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Instrument symbol (e.g., EURUSD).
        #[arg(long)]
        symbol: String,

        /// CSV with the slow (daily) series.
        #[arg(long)]
        slow: PathBuf,

        /// CSV with the fast (4-hour) series.
        #[arg(long)]
        fast: PathBuf,

        /// Session label: asian, european, us, overlap. Defaults to the
        /// session of the last fast bar.
        #[arg(long)]
        session: Option<SessionType>,

        /// Entry price. Defaults to the last fast close.
        #[arg(long)]
        price: Option<f64>,
    },
    /// Evaluate several symbols from `<data-dir>/<SYMBOL>_{slow,fast}.csv`.
    Scan {
        /// Path to the TOML config file.
        #[arg(long)]
        config: PathBuf,

        /// Directory holding the CSV pairs.
        #[arg(long, default_value = "data")]
        data_dir: PathBuf,

        /// Symbols to scan.
        #[arg(required = true)]
        symbols: Vec<String>,

        /// Session label for every symbol. Defaults to each symbol's last
        /// fast bar.
        #[arg(long)]
        session: Option<SessionType>,
    },
    /// Write a seeded synthetic CSV pair for a symbol.
    Synthetic {
        /// Output directory (created if missing).
        #[arg(long, default_value = "data")]
        out_dir: PathBuf,

        /// Symbol used in the file names.
        #[arg(long)]
        symbol: String,

        /// Number of hourly bars to generate before resampling.
        #[arg(long, default_value_t = 5000)]
        hours: usize,

        /// RNG seed.
        #[arg(long, default_value_t = 42)]
        seed: u64,

        /// Price drift per hour.
        #[arg(long, default_value_t = 0.0001, allow_negative_numbers = true)]
        drift: f64,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Signal {
            config,
            symbol,
            slow,
            fast,
            session,
            price,
        } => run_signal(&config, &symbol, &slow, &fast, session, price),
        Commands::Scan {
            config,
            data_dir,
            symbols,
            session,
        } => run_scan(&config, &data_dir, &symbols, session),
        Commands::Synthetic {
            out_dir,
            symbol,
            hours,
            seed,
            drift,
        } => run_synthetic(&out_dir, &symbol, hours, seed, drift),
    }
}

/// Load the config, start logging, and build the strategy and session table.
fn setup(config_path: &Path) -> Result<(TrendStrategy, SessionWindows)> {
    let app = AppConfig::load(config_path)?;
    logging::init_logging(&app.logging);
    let windows = SessionWindows::from_settings(&app.sessions)?;
    let strategy = TrendStrategy::new(app.strategy)?;
    Ok((strategy, windows))
}

/// Session of the last bar, unless overridden.
fn resolve_session(
    explicit: Option<SessionType>,
    fast: &[Bar],
    windows: &SessionWindows,
) -> Option<SessionType> {
    explicit.or_else(|| fast.last().map(|bar| windows.session_at(bar.timestamp)))
}

fn run_signal(
    config: &Path,
    symbol: &str,
    slow: &Path,
    fast: &Path,
    session: Option<SessionType>,
    price: Option<f64>,
) -> Result<()> {
    let (mut strategy, windows) = setup(config)?;
    let slow_bars = loader::load_bars(slow)?;
    let fast_bars = loader::load_bars(fast)?;

    let session = resolve_session(session, &fast_bars, &windows)
        .context("fast series is empty; pass --session explicitly")?;
    let price = match price {
        Some(p) => p,
        None => match fast_bars.last() {
            Some(bar) => bar.close,
            None => bail!("fast series is empty; pass --price explicitly"),
        },
    };

    let outcome = strategy.generate_signal(symbol, &slow_bars, &fast_bars, session, price);
    println!("{}", serde_json::to_string_pretty(&outcome)?);
    println!("{}", serde_json::to_string_pretty(&strategy.status())?);
    Ok(())
}

fn run_scan(
    config: &Path,
    data_dir: &Path,
    symbols: &[String],
    session: Option<SessionType>,
) -> Result<()> {
    let (mut strategy, windows) = setup(config)?;

    let inputs = symbols
        .iter()
        .map(|symbol| {
            let (slow, fast) = loader::load_symbol(data_dir, symbol)?;
            Ok((symbol.as_str(), slow, fast))
        })
        .collect::<Result<Vec<_>>>()?;

    // Evaluation only reads the strategy, so symbols fan out across threads;
    // cache writes happen afterwards in input order.
    let evaluations: Vec<Evaluation> = inputs
        .par_iter()
        .map(|(symbol, slow, fast)| {
            let session = resolve_session(session, fast, &windows).unwrap_or(SessionType::Asian);
            let price = fast.last().map_or(f64::NAN, |bar| bar.close);
            strategy.evaluate(symbol, slow, fast, session, price)
        })
        .collect();

    let mut emitted = 0usize;
    for evaluation in evaluations {
        let symbol = evaluation.symbol.clone();
        let outcome = strategy.record(evaluation);
        if outcome.is_signal() {
            emitted += 1;
        }
        let line = serde_json::json!({ "symbol": symbol, "outcome": outcome });
        println!("{line}");
    }

    info!(symbols = symbols.len(), emitted, "scan finished");
    println!("{}", serde_json::to_string_pretty(&strategy.status())?);
    Ok(())
}

fn run_synthetic(out_dir: &Path, symbol: &str, hours: usize, seed: u64, drift: f64) -> Result<()> {
    logging::init_logging(&LoggingSettings::default());

    if hours == 0 {
        bail!("--hours must be at least 1");
    }
    std::fs::create_dir_all(out_dir)
        .with_context(|| format!("failed to create {}", out_dir.display()))?;

    let config = SyntheticConfig {
        hours,
        seed,
        drift,
        ..SyntheticConfig::default()
    };
    let (slow, fast) = synthetic::generate(&config);
    let (slow_path, fast_path) = loader::symbol_paths(out_dir, symbol);
    loader::write_bars(&slow_path, &slow)?;
    loader::write_bars(&fast_path, &fast)?;

    info!(
        symbol,
        seed,
        slow_bars = slow.len(),
        fast_bars = fast.len(),
        "synthetic data written"
    );
    println!("{}", slow_path.display());
    println!("{}", fast_path.display());
    Ok(())
}

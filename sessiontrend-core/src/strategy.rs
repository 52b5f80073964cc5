//! Strategy state and orchestration.
//!
//! `TrendStrategy` owns the validated config, the per-symbol analysis cache and
//! the registry of emitted signals. Entry points:
//! - `analyze()`: pure dual-timeframe analysis, no cache writes.
//! - `evaluate()`: analysis plus the signal decision, still without writes.
//!   Safe to call from many threads at once.
//! - `record()`: applies an evaluation to the caches.
//! - `generate_signal()`: `evaluate()` followed by `record()`.
//!
//! Failures inside the indicator math never escape: they are logged and come
//! back as `NoSignal { ComputationFailed }`.

use std::collections::HashMap;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, error, info, warn};

use crate::classifier::{classify, fast_pass};
use crate::config::{ConfigError, StrategyConfig};
use crate::confirmation::{confirm, is_confirmed, synthesize};
use crate::domain::{
    validate_series, Bar, NoSignalReason, SeriesError, SessionType, SignalData, SignalOutcome,
    Symbol, TrendAnalysis,
};

/// Errors that stop an analysis from producing a result.
#[derive(Debug, Error)]
pub enum AnalysisError {
    #[error("slow series: {0}")]
    SlowSeries(#[source] SeriesError),
    #[error("fast series: {0}")]
    FastSeries(#[source] SeriesError),
    #[error("current price must be finite and > 0, got {0}")]
    InvalidPrice(f64),
}

/// Analysis and decision for one symbol, not yet applied to the caches.
#[derive(Debug, Clone)]
pub struct Evaluation {
    pub symbol: Symbol,
    /// `None` when the analysis itself failed.
    pub analysis: Option<TrendAnalysis>,
    pub outcome: SignalOutcome,
}

/// Read-only snapshot for observability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyStatus {
    pub name: String,
    pub active_signals: usize,
    pub cached_analyses: usize,
    pub config: StrategyConfig,
    pub config_hash: String,
    pub timestamp: DateTime<Utc>,
}

/// Dual-timeframe trend continuation strategy.
#[derive(Debug, Clone)]
pub struct TrendStrategy {
    config: StrategyConfig,
    active_signals: HashMap<Symbol, SignalData>,
    trend_cache: HashMap<Symbol, TrendAnalysis>,
}

impl TrendStrategy {
    /// Validate the config and build an empty strategy.
    pub fn new(config: StrategyConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        info!(
            name = %config.name,
            config_hash = %config.config_hash(),
            "strategy initialized"
        );
        Ok(Self {
            config,
            active_signals: HashMap::new(),
            trend_cache: HashMap::new(),
        })
    }

    pub fn config(&self) -> &StrategyConfig {
        &self.config
    }

    /// Classify both resolutions and apply the confirmation rule.
    pub fn analyze(&self, slow: &[Bar], fast: &[Bar]) -> Result<TrendAnalysis, AnalysisError> {
        validate_series(slow).map_err(AnalysisError::SlowSeries)?;
        validate_series(fast).map_err(AnalysisError::FastSeries)?;

        let slow_trend = classify(slow, self.config.slow_fast_period, self.config.slow_slow_period);
        let pass = fast_pass(fast, &self.config);
        let confirmed = is_confirmed(
            slow_trend,
            pass.reading.trend,
            pass.strength,
            self.config.strength_threshold,
        );

        let analysis = TrendAnalysis {
            slow_trend,
            fast_trend: pass.reading.trend,
            strength: pass.strength,
            fast_ma_value: pass.reading.fast_ma,
            slow_ma_value: pass.reading.slow_ma,
            volatility_value: pass.risk,
            confirmed,
        };

        debug!(
            slow_trend = %analysis.slow_trend,
            fast_trend = %analysis.fast_trend,
            strength = analysis.strength,
            confirmed,
            "trend analysis completed"
        );

        Ok(analysis)
    }

    /// Analysis plus signal decision, without touching the caches.
    pub fn evaluate(
        &self,
        symbol: &str,
        slow: &[Bar],
        fast: &[Bar],
        session: SessionType,
        current_price: f64,
    ) -> Evaluation {
        let analysis = match self.analyze(slow, fast) {
            Ok(analysis) => analysis,
            Err(e) => {
                return Evaluation {
                    symbol: symbol.to_string(),
                    analysis: None,
                    outcome: Self::failed(symbol, session, &e),
                }
            }
        };

        let outcome = self.decide(symbol, fast.len(), session, current_price, &analysis);
        Evaluation {
            symbol: symbol.to_string(),
            analysis: Some(analysis),
            outcome,
        }
    }

    /// Apply an evaluation: cache its analysis and register an emitted signal.
    pub fn record(&mut self, evaluation: Evaluation) -> SignalOutcome {
        let Evaluation {
            symbol,
            analysis,
            outcome,
        } = evaluation;

        if let Some(analysis) = analysis {
            self.trend_cache.insert(symbol.clone(), analysis);
        }
        if let SignalOutcome::Signal(signal) = &outcome {
            self.active_signals.insert(symbol, signal.clone());
        }
        outcome
    }

    /// Analyze, cache the analysis, and emit a signal if confirmed.
    pub fn generate_signal(
        &mut self,
        symbol: &str,
        slow: &[Bar],
        fast: &[Bar],
        session: SessionType,
        current_price: f64,
    ) -> SignalOutcome {
        let started = Instant::now();
        let evaluation = self.evaluate(symbol, slow, fast, session, current_price);
        let outcome = self.record(evaluation);

        debug!(
            symbol,
            signal_type = outcome.label(),
            strength = outcome.signal().map_or(0.0, |s| s.strength),
            generation_us = elapsed_micros(started),
            "signal generation finished"
        );

        outcome
    }

    pub fn cached_analysis(&self, symbol: &str) -> Option<&TrendAnalysis> {
        self.trend_cache.get(symbol)
    }

    pub fn active_signal(&self, symbol: &str) -> Option<&SignalData> {
        self.active_signals.get(symbol)
    }

    /// Remove a symbol's active signal, e.g. once execution has taken it over.
    pub fn release_signal(&mut self, symbol: &str) -> Option<SignalData> {
        self.active_signals.remove(symbol)
    }

    pub fn status(&self) -> StrategyStatus {
        StrategyStatus {
            name: self.config.name.clone(),
            active_signals: self.active_signals.len(),
            cached_analyses: self.trend_cache.len(),
            config: self.config.clone(),
            config_hash: self.config.config_hash(),
            timestamp: Utc::now(),
        }
    }

    fn decide(
        &self,
        symbol: &str,
        fast_bars: usize,
        session: SessionType,
        current_price: f64,
        analysis: &TrendAnalysis,
    ) -> SignalOutcome {
        let side = match confirm(
            analysis.slow_trend,
            analysis.fast_trend,
            analysis.strength,
            self.config.strength_threshold,
        ) {
            Ok(side) => side,
            Err(reason) => return SignalOutcome::no_signal(reason),
        };

        let required = self.config.risk_period;
        let risk = analysis.volatility_value;
        if fast_bars < required || !risk.is_finite() || risk <= 0.0 {
            warn!(
                symbol,
                bars = fast_bars,
                required,
                risk_value = risk,
                "confirmed trend suppressed: risk metric not warmed up"
            );
            return SignalOutcome::no_signal(NoSignalReason::InsufficientRiskHistory {
                bars: fast_bars,
                required,
                risk_value: risk,
            });
        }

        if !current_price.is_finite() || current_price <= 0.0 {
            return Self::failed(symbol, session, &AnalysisError::InvalidPrice(current_price));
        }

        SignalOutcome::Signal(synthesize(
            symbol,
            side,
            session,
            current_price,
            analysis,
            self.config.risk_multiplier,
        ))
    }

    fn failed(symbol: &str, session: SessionType, err: &AnalysisError) -> SignalOutcome {
        error!(symbol, session = %session, error = %err, "error generating signal");
        SignalOutcome::no_signal(NoSignalReason::ComputationFailed {
            error: err.to_string(),
        })
    }
}

/// Microseconds since `started`, saturating at `u64::MAX`.
fn elapsed_micros(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX)
}

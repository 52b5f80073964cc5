//! SessionTrend Core: dual-timeframe trend confirmation and signal synthesis.
//!
//! This crate contains the whole algorithmic path:
//! - Domain types (bars, trend directions, sessions, analyses, signals)
//! - Indicator engines (true range, volatility filter, risk metric, strength)
//! - EMA-crossover classifier for the slow and fast resolutions
//! - Confirmation rule and risk-annotated signal synthesis
//! - `TrendStrategy`: config, per-symbol caches and the public entry points
//!
//! Everything is synchronous and free of I/O except config file loading.

pub mod classifier;
pub mod config;
pub mod confirmation;
pub mod domain;
pub mod indicators;
pub mod strategy;

pub use config::{ConfigError, StrategyConfig};
pub use domain::{
    Bar, NoSignalReason, SeriesError, SessionType, SignalData, SignalOutcome, SignalType,
    TrendAnalysis, TrendDirection,
};
pub use strategy::{AnalysisError, Evaluation, StrategyStatus, TrendStrategy};

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all public domain types are Send + Sync, so hosts
    /// can fan evaluations out across threads.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<Bar>();
        require_sync::<Bar>();
        require_send::<TrendAnalysis>();
        require_sync::<TrendAnalysis>();
        require_send::<SignalData>();
        require_sync::<SignalData>();
        require_send::<SignalOutcome>();
        require_sync::<SignalOutcome>();
        require_send::<StrategyConfig>();
        require_sync::<StrategyConfig>();
        require_send::<TrendStrategy>();
        require_sync::<TrendStrategy>();
    }

    /// Architecture contract: indicators cannot see strategy state.
    ///
    /// `Indicator::compute` takes only bars. If someone adds a strategy or
    /// cache parameter, this signature check stops compiling.
    #[allow(dead_code)]
    fn assert_compute_takes_only_bars<I: indicators::Indicator>() {
        let _compute: fn(&I, &[Bar]) -> Vec<f64> = I::compute;
    }

    #[test]
    fn indicators_compute_through_trait_objects() {
        let bars = indicators::make_bars(&[100.0, 101.0, 102.5, 101.5, 103.0]);
        let all: Vec<Box<dyn indicators::Indicator>> = vec![
            Box::new(indicators::Ema::new(3)),
            Box::new(indicators::TrueRange),
            Box::new(indicators::VolatilityFilter::new(2)),
            Box::new(indicators::RiskMetric::new(2)),
            Box::new(indicators::DirectionalStrength::new(2)),
        ];
        for indicator in &all {
            assert_eq!(indicator.compute(&bars).len(), bars.len(), "{}", indicator.name());
        }
        assert_compute_takes_only_bars::<indicators::Ema>();
    }
}

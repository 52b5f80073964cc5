//! Indicator engines.
//!
//! Every indicator is a pure function of a bar series: bars in, a numeric series
//! of the same length out. Warmup positions are `f64::NAN` unless the indicator
//! documents a zero fill (strength and risk metric do, so that short series
//! degrade to "no signal" instead of propagating NaN into the classifier).
//!
//! The moving-average primitives (`ema`, `sma`) work on raw `f64` slices so the
//! composed indicators can smooth arbitrary derived series.

pub mod ema;
pub mod sma;
pub mod strength;
pub mod true_range;

pub use ema::{ewm_mean, Ema};
pub use sma::rolling_mean;
pub use strength::{directional_movement, strength, DirectionalStrength};
pub use true_range::{
    risk_metric, true_range, true_range_series, volatility_filter, RiskMetric, TrueRange,
    VolatilityFilter,
};

use crate::domain::Bar;

/// Trait for indicators.
///
/// # Look-ahead contamination guard
/// No value at bar t may depend on bar t+1 or later. Every indicator must
/// pass the truncated-vs-full series test.
pub trait Indicator: Send + Sync {
    /// Human-readable name (e.g., "ema_20", "risk_14").
    fn name(&self) -> &str;

    /// Number of leading bars that carry no meaningful value.
    fn lookback(&self) -> usize;

    /// Compute the indicator for the entire bar series.
    fn compute(&self, bars: &[Bar]) -> Vec<f64>;

    /// Most recent value, if the series is non-empty.
    fn latest(&self, bars: &[Bar]) -> Option<f64> {
        self.compute(bars).last().copied()
    }
}

/// Create synthetic hourly bars from close prices for testing.
///
/// open = prev_close (or close for the first bar),
/// high = max(open,close) + 1.0, low = min(open,close) - 1.0, volume = 1000.
#[cfg(test)]
pub fn make_bars(closes: &[f64]) -> Vec<Bar> {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| {
            let open = if i == 0 { close } else { closes[i - 1] };
            Bar {
                timestamp: base + chrono::Duration::hours(i as i64),
                open,
                high: open.max(close) + 1.0,
                low: open.min(close) - 1.0,
                close,
                volume: 1000,
            }
        })
        .collect()
}

/// Create bars from explicit (open, high, low, close) tuples.
#[cfg(test)]
pub fn make_ohlc_bars(data: &[(f64, f64, f64, f64)]) -> Vec<Bar> {
    let base = chrono::NaiveDate::from_ymd_opt(2024, 1, 2)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap();
    data.iter()
        .enumerate()
        .map(|(i, &(open, high, low, close))| Bar {
            timestamp: base + chrono::Duration::hours(i as i64),
            open,
            high,
            low,
            close,
            volume: 1000,
        })
        .collect()
}

/// Assert two f64 values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(actual: f64, expected: f64, epsilon: f64) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: f64 = 1e-10;

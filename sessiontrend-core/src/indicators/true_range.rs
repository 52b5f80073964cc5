//! True range and its two smoothed forms.
//!
//! True Range: max(high-low, |high-prev_close|, |low-prev_close|), and just
//! high-low on the first bar.
//!
//! - Volatility filter: rolling mean of TR over `period` bars. NaN until
//!   `period` bars exist. Only used as the strength oscillator's denominator.
//! - Risk metric: span-weighted EMA of TR. Defined from the first bar, with
//!   any non-finite value zero-filled. Sizes stops and targets.

use crate::domain::Bar;
use crate::indicators::ema::ewm_mean;
use crate::indicators::sma::rolling_mean;
use crate::indicators::Indicator;

/// True range of one bar given the previous close, if any.
pub fn true_range(high: f64, low: f64, prev_close: Option<f64>) -> f64 {
    let range = high - low;
    match prev_close {
        Some(pc) => range.max((high - pc).abs()).max((low - pc).abs()),
        None => range,
    }
}

/// Per-bar true range series.
pub fn true_range_series(bars: &[Bar]) -> Vec<f64> {
    bars.iter()
        .enumerate()
        .map(|(i, bar)| {
            let prev_close = i.checked_sub(1).map(|p| bars[p].close);
            true_range(bar.high, bar.low, prev_close)
        })
        .collect()
}

/// Rolling mean of true range.
pub fn volatility_filter(bars: &[Bar], period: usize) -> Vec<f64> {
    rolling_mean(&true_range_series(bars), period)
}

/// Exponentially smoothed true range, zero-filled where undefined.
pub fn risk_metric(bars: &[Bar], period: usize) -> Vec<f64> {
    ewm_mean(&true_range_series(bars), period)
        .into_iter()
        .map(|v| if v.is_finite() { v } else { 0.0 })
        .collect()
}

#[derive(Debug, Clone, Default)]
pub struct TrueRange;

impl Indicator for TrueRange {
    fn name(&self) -> &str {
        "true_range"
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        true_range_series(bars)
    }
}

#[derive(Debug, Clone)]
pub struct VolatilityFilter {
    period: usize,
    name: String,
}

impl VolatilityFilter {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "volatility filter period must be >= 1");
        Self {
            period,
            name: format!("volatility_{period}"),
        }
    }
}

impl Indicator for VolatilityFilter {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        volatility_filter(bars, self.period)
    }
}

#[derive(Debug, Clone)]
pub struct RiskMetric {
    period: usize,
    name: String,
}

impl RiskMetric {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "risk metric period must be >= 1");
        Self {
            period,
            name: format!("risk_{period}"),
        }
    }
}

impl Indicator for RiskMetric {
    fn name(&self) -> &str {
        &self.name
    }

    /// Values exist from bar 0 but are not trusted for sizing before a full
    /// period has been seen.
    fn lookback(&self) -> usize {
        self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        risk_metric(bars, self.period)
    }
}

//! Per-request trend analysis snapshot.

use serde::{Deserialize, Serialize};

use super::trend::TrendDirection;

/// Result of one dual-timeframe analysis pass.
///
/// Recomputed on every request and cached per symbol by the strategy; a new
/// analysis replaces the previous one outright.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendAnalysis {
    pub slow_trend: TrendDirection,
    pub fast_trend: TrendDirection,
    /// Directional strength oscillator, 0 to 100.
    pub strength: f64,
    /// Latest fast EMA of the fast-resolution series.
    pub fast_ma_value: f64,
    /// Latest slow EMA of the fast-resolution series.
    pub slow_ma_value: f64,
    /// Latest risk metric (smoothed true range) of the fast-resolution series.
    pub volatility_value: f64,
    pub confirmed: bool,
}

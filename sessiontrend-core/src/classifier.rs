//! Dual-timeframe trend classifier.
//!
//! Each resolution is classified on its own by comparing the latest fast and
//! slow EMA of the close. The fast resolution also yields the strength
//! oscillator and the risk metric in the same pass, since all three read the
//! same bars.

use crate::config::StrategyConfig;
use crate::domain::{closes, Bar, TrendDirection};
use crate::indicators::{ewm_mean, risk_metric, strength};

/// Latest crossover read of one series.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrossoverReading {
    pub trend: TrendDirection,
    pub fast_ma: f64,
    pub slow_ma: f64,
}

/// Everything the fast resolution contributes to an analysis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FastPass {
    pub reading: CrossoverReading,
    pub strength: f64,
    pub risk: f64,
}

impl FastPass {
    fn insufficient() -> Self {
        Self {
            reading: CrossoverReading {
                trend: TrendDirection::Sideways,
                fast_ma: 0.0,
                slow_ma: 0.0,
            },
            strength: 0.0,
            risk: 0.0,
        }
    }
}

/// Crossover read, or `None` when the series is shorter than either period.
pub fn crossover(bars: &[Bar], fast_period: usize, slow_period: usize) -> Option<CrossoverReading> {
    if bars.is_empty() || bars.len() < fast_period.max(slow_period) {
        return None;
    }

    let close = closes(bars);
    let fast_ma = *ewm_mean(&close, fast_period).last()?;
    let slow_ma = *ewm_mean(&close, slow_period).last()?;

    Some(CrossoverReading {
        trend: TrendDirection::from_crossover(fast_ma, slow_ma),
        fast_ma,
        slow_ma,
    })
}

/// Trend direction of one series; `Sideways` on insufficient history.
pub fn classify(bars: &[Bar], fast_period: usize, slow_period: usize) -> TrendDirection {
    crossover(bars, fast_period, slow_period)
        .map(|r| r.trend)
        .unwrap_or_default()
}

/// Fast-resolution pass: crossover, strength and risk from one series.
pub fn fast_pass(bars: &[Bar], config: &StrategyConfig) -> FastPass {
    if bars.is_empty() || bars.len() < config.fast_history() {
        return FastPass::insufficient();
    }

    let Some(reading) = crossover(bars, config.fast_fast_period, config.fast_slow_period) else {
        return FastPass::insufficient();
    };

    let strength = strength(bars, config.strength_period)
        .last()
        .copied()
        .unwrap_or(0.0);
    let risk = risk_metric(bars, config.risk_period)
        .last()
        .copied()
        .unwrap_or(0.0);

    FastPass {
        reading,
        strength,
        risk,
    }
}

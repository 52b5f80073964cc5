//! Trend confirmation and signal synthesis.
//!
//! Confirmation is a pure function of the two trend reads and the strength
//! oscillator. Synthesis turns a confirmed direction into a signal with
//! stop-loss and take-profit levels sized from the risk metric.

use chrono::Utc;
use tracing::info;

use crate::domain::{
    NoSignalReason, SessionType, SignalData, SignalMetadata, SignalType, TrendAnalysis,
    TrendDirection,
};

/// Oscillator value at which normalized confidence saturates to 1.0.
pub const STRENGTH_SATURATION: f64 = 50.0;

/// Take-profit distance as a multiple of the stop distance.
pub const REWARD_RISK_RATIO: f64 = 2.0;

/// Confirmed iff both resolutions agree on a non-sideways trend and the
/// oscillator reaches the threshold.
pub fn is_confirmed(
    slow_trend: TrendDirection,
    fast_trend: TrendDirection,
    strength: f64,
    threshold: f64,
) -> bool {
    confirm(slow_trend, fast_trend, strength, threshold).is_ok()
}

/// Confirmation verdict with the side to trade, or the reason there is none.
pub fn confirm(
    slow_trend: TrendDirection,
    fast_trend: TrendDirection,
    strength: f64,
    threshold: f64,
) -> Result<SignalType, NoSignalReason> {
    if slow_trend != fast_trend {
        return Err(NoSignalReason::TrendsMisaligned {
            slow_trend,
            fast_trend,
        });
    }
    let Some(side) = SignalType::from_trend(slow_trend) else {
        return Err(NoSignalReason::NoTrend);
    };
    if strength.is_nan() || strength < threshold {
        return Err(NoSignalReason::WeakTrend {
            strength,
            threshold,
        });
    }
    Ok(side)
}

/// Map the 0-100 oscillator onto 0-1 confidence, saturating at 50.
pub fn normalized_strength(strength: f64) -> f64 {
    (strength / STRENGTH_SATURATION).clamp(0.0, 1.0)
}

/// Stop-loss and take-profit around an entry price.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RiskLevels {
    pub stop_loss: f64,
    pub take_profit: f64,
}

impl RiskLevels {
    /// Stop at `risk * multiplier` against the trade, target at twice that in favour.
    pub fn new(side: SignalType, price: f64, risk: f64, multiplier: f64) -> Self {
        let stop_distance = risk * multiplier;
        let target_distance = stop_distance * REWARD_RISK_RATIO;
        match side {
            SignalType::Buy => Self {
                stop_loss: price - stop_distance,
                take_profit: price + target_distance,
            },
            SignalType::Sell => Self {
                stop_loss: price + stop_distance,
                take_profit: price - target_distance,
            },
        }
    }
}

/// Build a signal for a confirmed analysis.
pub fn synthesize(
    symbol: &str,
    side: SignalType,
    session: SessionType,
    price: f64,
    analysis: &TrendAnalysis,
    risk_multiplier: f64,
) -> SignalData {
    let levels = RiskLevels::new(side, price, analysis.volatility_value, risk_multiplier);
    let strength = normalized_strength(analysis.strength);

    let signal = SignalData {
        symbol: symbol.to_string(),
        signal_type: side,
        strength,
        session,
        timestamp: Utc::now(),
        price,
        stop_loss: levels.stop_loss,
        take_profit: levels.take_profit,
        metadata: SignalMetadata {
            risk_value: analysis.volatility_value,
            raw_strength: analysis.strength,
            slow_trend: analysis.slow_trend,
            fast_trend: analysis.fast_trend,
            fast_ma: analysis.fast_ma_value,
            slow_ma: analysis.slow_ma_value,
            risk_multiplier,
        },
    };

    info!(
        symbol,
        signal_type = %side,
        strength,
        session = %session,
        price,
        stop_loss = signal.stop_loss,
        take_profit = signal.take_profit,
        "signal generated: {side} {symbol}"
    );

    signal
}

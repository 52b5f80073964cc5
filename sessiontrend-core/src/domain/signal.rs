//! Trading signals and the explicit no-signal outcome.
//!
//! Signals are immutable once emitted. The strategy never persists them; the
//! execution collaborator decides what to do with each one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::trend::{SessionType, SignalType, TrendDirection};

/// Indicator snapshot captured when a signal is synthesized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalMetadata {
    pub risk_value: f64,
    /// Oscillator value before normalization (0 to 100).
    pub raw_strength: f64,
    pub slow_trend: TrendDirection,
    pub fast_trend: TrendDirection,
    pub fast_ma: f64,
    pub slow_ma: f64,
    pub risk_multiplier: f64,
}

/// A risk-annotated directional signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SignalData {
    pub symbol: String,
    pub signal_type: SignalType,
    /// Normalized confidence, 0.0 to 1.0.
    pub strength: f64,
    pub session: SessionType,
    pub timestamp: DateTime<Utc>,
    pub price: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    pub metadata: SignalMetadata,
}

impl SignalData {
    /// Distance between entry and stop.
    pub fn risk(&self) -> f64 {
        (self.price - self.stop_loss).abs()
    }

    /// Distance between entry and target.
    pub fn reward(&self) -> f64 {
        (self.take_profit - self.price).abs()
    }

    /// Equality on everything except the emission timestamp.
    pub fn same_signal(&self, other: &SignalData) -> bool {
        self.symbol == other.symbol
            && self.signal_type == other.signal_type
            && self.strength == other.strength
            && self.session == other.session
            && self.price == other.price
            && self.stop_loss == other.stop_loss
            && self.take_profit == other.take_profit
            && self.metadata == other.metadata
    }
}

/// Why a request produced no signal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NoSignalReason {
    /// The two resolutions point in different directions.
    TrendsMisaligned {
        slow_trend: TrendDirection,
        fast_trend: TrendDirection,
    },
    /// Both resolutions agree on sideways.
    NoTrend,
    /// Trends agree but the oscillator is below the threshold.
    WeakTrend { strength: f64, threshold: f64 },
    /// Confirmed, but the risk metric cannot size stops yet.
    InsufficientRiskHistory {
        bars: usize,
        required: usize,
        risk_value: f64,
    },
    /// Indicator math could not run on the inputs.
    ComputationFailed { error: String },
}

impl NoSignalReason {
    /// True for reasons that stem from the market, not from bad inputs.
    pub fn is_unconfirmed(&self) -> bool {
        matches!(
            self,
            Self::TrendsMisaligned { .. } | Self::NoTrend | Self::WeakTrend { .. }
        )
    }
}

/// Result of a signal request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SignalOutcome {
    Signal(SignalData),
    NoSignal { reason: NoSignalReason },
}

impl SignalOutcome {
    pub fn no_signal(reason: NoSignalReason) -> Self {
        Self::NoSignal { reason }
    }

    pub fn is_signal(&self) -> bool {
        matches!(self, Self::Signal(_))
    }

    pub fn signal(&self) -> Option<&SignalData> {
        match self {
            Self::Signal(signal) => Some(signal),
            Self::NoSignal { .. } => None,
        }
    }

    pub fn into_signal(self) -> Option<SignalData> {
        match self {
            Self::Signal(signal) => Some(signal),
            Self::NoSignal { .. } => None,
        }
    }

    pub fn reason(&self) -> Option<&NoSignalReason> {
        match self {
            Self::Signal(_) => None,
            Self::NoSignal { reason } => Some(reason),
        }
    }

    /// Label used in logs: the signal side, or "hold".
    pub fn label(&self) -> &'static str {
        match self {
            Self::Signal(signal) => signal.signal_type.as_str(),
            Self::NoSignal { .. } => "hold",
        }
    }

    /// Same outcome, ignoring signal timestamps.
    pub fn same_outcome(&self, other: &SignalOutcome) -> bool {
        match (self, other) {
            (Self::Signal(a), Self::Signal(b)) => a.same_signal(b),
            (Self::NoSignal { reason: a }, Self::NoSignal { reason: b }) => a == b,
            _ => false,
        }
    }
}

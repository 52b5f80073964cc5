//! Direction, session and signal-side enums.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Trend direction read from a moving-average crossover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Bullish,
    Bearish,
    #[default]
    Sideways,
}

impl TrendDirection {
    pub const ALL: [TrendDirection; 3] = [Self::Bullish, Self::Bearish, Self::Sideways];

    /// Direction implied by a fast average relative to a slow one.
    ///
    /// Exact equality (and any NaN comparison) is `Sideways`.
    pub fn from_crossover(fast: f64, slow: f64) -> Self {
        match fast.partial_cmp(&slow) {
            Some(Ordering::Greater) => Self::Bullish,
            Some(Ordering::Less) => Self::Bearish,
            _ => Self::Sideways,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Bullish => "bullish",
            Self::Bearish => "bearish",
            Self::Sideways => "sideways",
        }
    }
}

impl fmt::Display for TrendDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Trading session label carried through to the signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SessionType {
    Asian,
    European,
    Us,
    Overlap,
}

impl SessionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Asian => "asian",
            Self::European => "european",
            Self::Us => "us",
            Self::Overlap => "overlap",
        }
    }
}

impl fmt::Display for SessionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SessionType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "asian" => Ok(Self::Asian),
            "european" => Ok(Self::European),
            "us" => Ok(Self::Us),
            "overlap" => Ok(Self::Overlap),
            other => Err(format!(
                "unknown session '{other}' (expected asian, european, us or overlap)"
            )),
        }
    }
}

/// Side of an emitted signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalType {
    Buy,
    Sell,
}

impl SignalType {
    /// `Bullish` buys, `Bearish` sells, `Sideways` has no side.
    pub fn from_trend(trend: TrendDirection) -> Option<Self> {
        match trend {
            TrendDirection::Bullish => Some(Self::Buy),
            TrendDirection::Bearish => Some(Self::Sell),
            TrendDirection::Sideways => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "buy",
            Self::Sell => "sell",
        }
    }
}

impl fmt::Display for SignalType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

//! Bar: the fundamental market data unit.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// OHLCV bar for a single instrument at a single resolution step.
///
/// The same type carries daily and intraday bars; the resolution is implied
/// by the series the bar belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub timestamp: NaiveDateTime,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

impl Bar {
    /// Returns true if any OHLC field is NaN or infinite.
    pub fn is_void(&self) -> bool {
        !(self.open.is_finite()
            && self.high.is_finite()
            && self.low.is_finite()
            && self.close.is_finite())
    }

    /// Basic OHLC sanity check: high >= low, high >= open, high >= close, etc.
    pub fn is_sane(&self) -> bool {
        if self.is_void() {
            return false;
        }
        self.high >= self.low
            && self.high >= self.open
            && self.high >= self.close
            && self.low <= self.open
            && self.low <= self.close
            && self.open > 0.0
            && self.close > 0.0
    }
}

/// Structural defects in a bar series.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SeriesError {
    #[error("bar {index}: non-finite OHLC value")]
    NonFinite { index: usize },
    #[error("bar {index}: high {high} below low {low}")]
    InvertedRange { index: usize, high: f64, low: f64 },
    #[error("bar {index}: duplicate timestamp {timestamp}")]
    DuplicateTimestamp {
        index: usize,
        timestamp: NaiveDateTime,
    },
    #[error("bar {index}: timestamp {timestamp} precedes {previous}")]
    OutOfOrder {
        index: usize,
        timestamp: NaiveDateTime,
        previous: NaiveDateTime,
    },
}

/// Check that a series is usable for indicator math.
///
/// Timestamps must be strictly increasing, every OHLC value finite and
/// `high >= low`. An empty series is valid (it is just too short to say
/// anything).
pub fn validate_series(bars: &[Bar]) -> Result<(), SeriesError> {
    for (index, bar) in bars.iter().enumerate() {
        if bar.is_void() {
            return Err(SeriesError::NonFinite { index });
        }
        if bar.high < bar.low {
            return Err(SeriesError::InvertedRange {
                index,
                high: bar.high,
                low: bar.low,
            });
        }
        if index > 0 {
            let previous = bars[index - 1].timestamp;
            if bar.timestamp == previous {
                return Err(SeriesError::DuplicateTimestamp {
                    index,
                    timestamp: bar.timestamp,
                });
            }
            if bar.timestamp < previous {
                return Err(SeriesError::OutOfOrder {
                    index,
                    timestamp: bar.timestamp,
                    previous,
                });
            }
        }
    }
    Ok(())
}

/// Extract the close column.
pub fn closes(bars: &[Bar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

//! Exponential Moving Average (span-weighted, bias-adjusted).
//!
//! alpha = 2 / (span + 1). Rather than seeding with an SMA, every value is
//! the weighted mean of all observations so far with weights (1 - alpha)^age:
//!
//!   EMA[t] = sum_i (1-alpha)^i * x[t-i] / sum_i (1-alpha)^i
//!
//! so the average is defined from the very first bar and converges to the
//! recursive form once the weights have decayed. Lookback: 0.

use crate::domain::Bar;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct Ema {
    span: usize,
    name: String,
}

impl Ema {
    pub fn new(span: usize) -> Self {
        assert!(span >= 1, "EMA span must be >= 1");
        Self {
            span,
            name: format!("ema_{span}"),
        }
    }

    pub fn span(&self) -> usize {
        self.span
    }
}

impl Indicator for Ema {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        0
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        ewm_mean(&closes, self.span)
    }
}

/// Span-weighted EMA of an arbitrary series.
///
/// NaN observations add no weight but still age the earlier ones, so the
/// output at a NaN position repeats the previous average (or stays NaN if no
/// valid observation has been seen yet).
pub fn ewm_mean(values: &[f64], span: usize) -> Vec<f64> {
    if span == 0 {
        return vec![f64::NAN; values.len()];
    }

    let alpha = 2.0 / (span as f64 + 1.0);
    let decay = 1.0 - alpha;
    let mut mean = f64::NAN;
    let mut weight_total = 0.0;

    // Incremental form of the weighted mean: a constant input stays exactly
    // constant, so equal averages compare equal.
    values
        .iter()
        .map(|&v| {
            weight_total *= decay;
            if !v.is_nan() {
                weight_total += 1.0;
                if mean.is_nan() {
                    mean = v;
                } else {
                    mean += (v - mean) / weight_total;
                }
            }
            mean
        })
        .collect()
}

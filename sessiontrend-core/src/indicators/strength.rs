//! Directional strength oscillator (ADX-style, simple-average smoothing).
//!
//! Steps:
//! 1. +DM = high[t] - high[t-1], -DM = low[t-1] - low[t]; keep only the
//!    strictly larger one, and only if positive
//! 2. Rolling-mean smooth +DM, -DM and TR over `period` bars
//! 3. +DI = 100 * mean(+DM) / mean(TR), -DI likewise
//! 4. DX = 100 * |+DI - -DI| / (+DI + -DI), 0 when the DI sum is 0
//! 5. Strength = rolling mean of DX over `period` bars
//!
//! Warmup positions are 0, not NaN. Lookback: 2 * period - 1.

use crate::domain::Bar;
use crate::indicators::sma::rolling_mean;
use crate::indicators::true_range::volatility_filter;
use crate::indicators::Indicator;

#[derive(Debug, Clone)]
pub struct DirectionalStrength {
    period: usize,
    name: String,
}

impl DirectionalStrength {
    pub fn new(period: usize) -> Self {
        assert!(period >= 1, "strength period must be >= 1");
        Self {
            period,
            name: format!("strength_{period}"),
        }
    }
}

impl Indicator for DirectionalStrength {
    fn name(&self) -> &str {
        &self.name
    }

    fn lookback(&self) -> usize {
        2 * self.period - 1
    }

    fn compute(&self, bars: &[Bar]) -> Vec<f64> {
        strength(bars, self.period)
    }
}

/// +DM and -DM series. Index 0 is NaN (no previous bar).
pub fn directional_movement(bars: &[Bar]) -> (Vec<f64>, Vec<f64>) {
    let n = bars.len();
    let mut plus_dm = vec![f64::NAN; n];
    let mut minus_dm = vec![f64::NAN; n];

    for i in 1..n {
        let up = bars[i].high - bars[i - 1].high;
        let down = bars[i - 1].low - bars[i].low;

        plus_dm[i] = if up > down && up > 0.0 { up } else { 0.0 };
        minus_dm[i] = if down > up && down > 0.0 { down } else { 0.0 };
    }

    (plus_dm, minus_dm)
}

/// Strength oscillator series, bounded in [0, 100].
pub fn strength(bars: &[Bar], period: usize) -> Vec<f64> {
    let n = bars.len();
    if n == 0 || period == 0 {
        return vec![0.0; n];
    }

    let (plus_dm, minus_dm) = directional_movement(bars);
    let avg_tr = volatility_filter(bars, period);
    let avg_plus = rolling_mean(&plus_dm, period);
    let avg_minus = rolling_mean(&minus_dm, period);

    let dx: Vec<f64> = (0..n)
        .map(|i| {
            if avg_tr[i].is_nan() || avg_plus[i].is_nan() || avg_minus[i].is_nan() {
                return f64::NAN;
            }
            if avg_tr[i] <= 0.0 {
                return 0.0;
            }
            let plus_di = 100.0 * avg_plus[i] / avg_tr[i];
            let minus_di = 100.0 * avg_minus[i] / avg_tr[i];
            let di_sum = plus_di + minus_di;
            if di_sum == 0.0 {
                0.0
            } else {
                100.0 * (plus_di - minus_di).abs() / di_sum
            }
        })
        .collect();

    rolling_mean(&dx, period)
        .into_iter()
        .map(|v| if v.is_nan() { 0.0 } else { v.clamp(0.0, 100.0) })
        .collect()
}

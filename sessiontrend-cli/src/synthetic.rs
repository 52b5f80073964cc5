//! Seeded synthetic price data for demos and smoke runs.
//!
//! An hourly series is built as `base + drift * i + noise`, then resampled
//! into the two resolutions the strategy reads (daily and 4-hour) with
//! first/max/min/last/sum aggregation.

use chrono::{Duration, NaiveDate, NaiveDateTime};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use sessiontrend_core::Bar;

#[derive(Debug, Clone)]
pub struct SyntheticConfig {
    pub hours: usize,
    pub seed: u64,
    /// Price added per hour.
    pub drift: f64,
    pub base_price: f64,
    /// Standard deviation of the per-bar noise.
    pub noise: f64,
    pub start: NaiveDateTime,
}

impl Default for SyntheticConfig {
    fn default() -> Self {
        Self {
            hours: 5000,
            seed: 42,
            drift: 0.0001,
            base_price: 1.1,
            noise: 0.0005,
            start: NaiveDate::from_ymd_opt(2023, 1, 1)
                .and_then(|d| d.and_hms_opt(0, 0, 0))
                .unwrap_or_default(),
        }
    }
}

/// Hourly bars. Same seed, same series.
pub fn hourly_series(config: &SyntheticConfig) -> Vec<Bar> {
    let mut rng = StdRng::seed_from_u64(config.seed);
    // Uniform noise on [-a, a] has standard deviation a / sqrt(3).
    let amplitude = config.noise * 3.0_f64.sqrt();

    let mut bars = Vec::with_capacity(config.hours);
    let mut prev_close: Option<f64> = None;
    for i in 0..config.hours {
        let noise = if amplitude > 0.0 {
            rng.gen_range(-amplitude..=amplitude)
        } else {
            0.0
        };
        let close = config.base_price + config.drift * i as f64 + noise;
        let spread = rng.gen_range(0.0001..0.0005);
        let open = prev_close.unwrap_or(close);
        bars.push(Bar {
            timestamp: config.start + Duration::hours(i as i64),
            open,
            high: (close + spread / 2.0).max(open),
            low: (close - spread / 2.0).min(open),
            close,
            volume: rng.gen_range(100..1000),
        });
        prev_close = Some(close);
    }
    bars
}

/// Aggregate bars into fixed buckets aligned to midnight.
///
/// `bucket` must divide a day (1h, 4h, 1d...). Empty buckets are skipped.
pub fn resample(bars: &[Bar], bucket: Duration) -> Vec<Bar> {
    let secs = bucket.num_seconds().max(1);
    let mut out: Vec<Bar> = Vec::new();

    for bar in bars {
        let offset = bar.timestamp.and_utc().timestamp().rem_euclid(secs);
        let start = bar.timestamp - Duration::seconds(offset);
        match out.last_mut() {
            Some(current) if current.timestamp == start => {
                current.high = current.high.max(bar.high);
                current.low = current.low.min(bar.low);
                current.close = bar.close;
                current.volume += bar.volume;
            }
            _ => out.push(Bar {
                timestamp: start,
                ..bar.clone()
            }),
        }
    }
    out
}

/// `(slow, fast)` = (daily, 4-hour) series.
pub fn generate(config: &SyntheticConfig) -> (Vec<Bar>, Vec<Bar>) {
    let hourly = hourly_series(config);
    (
        resample(&hourly, Duration::days(1)),
        resample(&hourly, Duration::hours(4)),
    )
}

//! End-to-end tests of `TrendStrategy`: confirmation truth table, the
//! threshold-25 scenario, idempotence and cache behaviour.

use chrono::{NaiveDate, NaiveDateTime};
use sessiontrend_core::confirmation::{confirm, is_confirmed};
use sessiontrend_core::domain::{Bar, NoSignalReason, SessionType, SignalType, TrendDirection};
use sessiontrend_core::{StrategyConfig, TrendStrategy};

fn base_time() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2023, 1, 1)
        .unwrap()
        .and_hms_opt(0, 0, 0)
        .unwrap()
}

/// Daily bars with linearly increasing closes.
fn linear_daily(n: usize, start: f64, step: f64) -> Vec<Bar> {
    (0..n)
        .map(|i| {
            let close = start + step * i as f64;
            let open = close - step;
            Bar {
                timestamp: base_time() + chrono::Duration::days(i as i64),
                open,
                high: open.max(close) + 0.5,
                low: open.min(close) - 0.5,
                close,
                volume: 10_000,
            }
        })
        .collect()
}

/// Bars with a constant close and a fixed range around it.
fn flat(n: usize, hours_per_bar: i64, level: f64) -> Vec<Bar> {
    (0..n)
        .map(|i| Bar {
            timestamp: base_time() + chrono::Duration::hours(hours_per_bar * i as i64),
            open: level,
            high: level + 0.5,
            low: level - 0.5,
            close: level,
            volume: 1_000,
        })
        .collect()
}

/// 4-hour bars whose whole range shifts up by `up`, then down by `down`.
///
/// Each up bar carries +DM = `up` and each down bar -DM = `down`. Every
/// even-length window holds the same number of each, so
/// DX = 100 * (up - down) / (up + down) once the windows are full.
fn zigzag_intraday(n: usize, up: f64, down: f64) -> Vec<Bar> {
    let mut mid = 100.0;
    (0..n)
        .map(|i| {
            if i > 0 {
                mid += if i % 2 == 1 { up } else { -down };
            }
            Bar {
                timestamp: base_time() + chrono::Duration::hours(4 * i as i64),
                open: mid,
                high: mid + 1.0,
                low: mid - 1.0,
                close: mid,
                volume: 1_000,
            }
        })
        .collect()
}

fn scenario_config() -> StrategyConfig {
    StrategyConfig {
        name: "TrendContinuation".into(),
        slow_fast_period: 50,
        slow_slow_period: 200,
        fast_fast_period: 20,
        fast_slow_period: 50,
        strength_period: 14,
        strength_threshold: 25.0,
        risk_period: 14,
        risk_multiplier: 2.0,
    }
}

fn small_config() -> StrategyConfig {
    StrategyConfig {
        name: "Small".into(),
        slow_fast_period: 5,
        slow_slow_period: 20,
        fast_fast_period: 3,
        fast_slow_period: 10,
        strength_period: 4,
        strength_threshold: 25.0,
        risk_period: 4,
        risk_multiplier: 1.5,
    }
}

#[test]
fn confirmation_truth_table() {
    let threshold = 25.0;
    for slow in TrendDirection::ALL {
        for fast in TrendDirection::ALL {
            for (strength, above) in [(30.0, true), (20.0, false)] {
                let expected = slow == fast && slow != TrendDirection::Sideways && above;
                assert_eq!(
                    is_confirmed(slow, fast, strength, threshold),
                    expected,
                    "slow={slow} fast={fast} strength={strength}"
                );
                assert_eq!(confirm(slow, fast, strength, threshold).is_ok(), expected);
            }
        }
    }
}

#[test]
fn threshold_scenario_emits_buy_at_point_six() {
    let mut strategy = TrendStrategy::new(scenario_config()).unwrap();
    let slow = linear_daily(300, 1.0, 0.01);
    let fast = zigzag_intraday(1200, 1.3, 0.7);
    let price = fast.last().unwrap().close;

    let analysis = strategy.analyze(&slow, &fast).unwrap();
    assert_eq!(analysis.slow_trend, TrendDirection::Bullish);
    assert_eq!(analysis.fast_trend, TrendDirection::Bullish);
    assert!((analysis.strength - 30.0).abs() < 1e-6, "strength {}", analysis.strength);
    assert!(analysis.confirmed);

    let outcome = strategy.generate_signal("EURUSD", &slow, &fast, SessionType::Overlap, price);
    let signal = outcome.signal().expect("confirmed scenario must signal");
    assert_eq!(signal.signal_type, SignalType::Buy);
    assert_eq!(signal.signal_type.as_str(), "buy");
    assert!((signal.strength - 0.6).abs() < 1e-6);
    assert_eq!(signal.session, SessionType::Overlap);
    assert!(signal.stop_loss < price && price < signal.take_profit);
    let risk = price - signal.stop_loss;
    assert!((signal.take_profit - price - 2.0 * risk).abs() < 1e-9);
    assert!((risk - analysis.volatility_value * 2.0).abs() < 1e-9);
}

#[test]
fn flat_market_is_sideways_even_at_zero_threshold() {
    let mut config = scenario_config();
    config.strength_threshold = 0.0;
    let mut strategy = TrendStrategy::new(config).unwrap();
    let slow = flat(300, 24, 100.0);
    let fast = flat(1200, 4, 100.0);

    let outcome = strategy.generate_signal("EURUSD", &slow, &fast, SessionType::Us, 100.0);
    assert_eq!(outcome.reason(), Some(&NoSignalReason::NoTrend));
    assert_eq!(outcome.label(), "hold");

    let analysis = strategy.cached_analysis("EURUSD").unwrap();
    assert_eq!(analysis.slow_trend, TrendDirection::Sideways);
    assert_eq!(analysis.fast_trend, TrendDirection::Sideways);
    assert_eq!(analysis.fast_ma_value, 100.0);
    assert_eq!(analysis.slow_ma_value, 100.0);
    assert!(!analysis.confirmed);
    assert!(strategy.active_signal("EURUSD").is_none());
}

#[test]
fn bearish_signal_inverts_levels() {
    let mut strategy = TrendStrategy::new(small_config()).unwrap();
    let slow = linear_daily(40, 200.0, -1.0);
    let fast = zigzag_intraday(80, 0.7, 1.3);
    let price = fast.last().unwrap().close;

    let outcome = strategy.generate_signal("GBPUSD", &slow, &fast, SessionType::European, price);
    let signal = outcome.signal().expect("expected a sell signal");
    assert_eq!(signal.signal_type, SignalType::Sell);
    assert!(signal.stop_loss > price && price > signal.take_profit);
    let risk = signal.stop_loss - price;
    assert!((price - signal.take_profit - 2.0 * risk).abs() < 1e-9);
}

#[test]
fn weak_strength_holds() {
    let mut config = small_config();
    config.strength_threshold = 40.0;
    let mut strategy = TrendStrategy::new(config).unwrap();
    let slow = linear_daily(40, 1.0, 0.1);
    let fast = zigzag_intraday(80, 1.3, 0.7);

    let outcome = strategy.generate_signal("EURUSD", &slow, &fast, SessionType::Us, 120.0);
    match outcome.reason() {
        Some(NoSignalReason::WeakTrend {
            strength,
            threshold,
        }) => {
            assert!((strength - 30.0).abs() < 1e-6);
            assert_eq!(*threshold, 40.0);
        }
        other => panic!("expected WeakTrend, got {other:?}"),
    }
    assert!(!strategy.cached_analysis("EURUSD").unwrap().confirmed);
}

#[test]
fn short_history_is_sideways_not_error() {
    let mut strategy = TrendStrategy::new(scenario_config()).unwrap();
    let slow = linear_daily(100, 1.0, 0.01);
    let fast = zigzag_intraday(30, 1.3, 0.7);

    let outcome = strategy.generate_signal("EURUSD", &slow, &fast, SessionType::Asian, 1.5);
    assert_eq!(outcome.reason(), Some(&NoSignalReason::NoTrend));

    let cached = strategy.cached_analysis("EURUSD").unwrap();
    assert_eq!(cached.slow_trend, TrendDirection::Sideways);
    assert_eq!(cached.fast_trend, TrendDirection::Sideways);
    assert_eq!(cached.strength, 0.0);
    assert_eq!(cached.volatility_value, 0.0);
}

#[test]
fn risk_history_guard_suppresses_confirmed_signal() {
    let mut config = small_config();
    config.risk_period = 100;
    let mut strategy = TrendStrategy::new(config).unwrap();
    let slow = linear_daily(40, 1.0, 0.1);
    let fast = zigzag_intraday(60, 1.3, 0.7);

    let outcome = strategy.generate_signal("EURUSD", &slow, &fast, SessionType::Us, 110.0);
    assert!(matches!(
        outcome.reason(),
        Some(NoSignalReason::InsufficientRiskHistory {
            bars: 60,
            required: 100,
            ..
        })
    ));
    assert!(strategy.cached_analysis("EURUSD").unwrap().confirmed);
    assert!(strategy.active_signal("EURUSD").is_none());
}

#[test]
fn generate_signal_is_idempotent() {
    let mut strategy = TrendStrategy::new(scenario_config()).unwrap();
    let slow = linear_daily(300, 1.0, 0.01);
    let fast = zigzag_intraday(1200, 1.3, 0.7);
    let price = fast.last().unwrap().close;

    let first = strategy.generate_signal("EURUSD", &slow, &fast, SessionType::Us, price);
    let first_analysis = strategy.cached_analysis("EURUSD").cloned().unwrap();
    let second = strategy.generate_signal("EURUSD", &slow, &fast, SessionType::Us, price);
    let second_analysis = strategy.cached_analysis("EURUSD").cloned().unwrap();

    assert!(first.same_outcome(&second));
    assert_eq!(first_analysis, second_analysis);
    assert_eq!(strategy.status().cached_analyses, 1);
    assert_eq!(strategy.status().active_signals, 1);
}

#[test]
fn cache_matches_analyze_and_last_write_wins() {
    let mut strategy = TrendStrategy::new(small_config()).unwrap();
    let slow = linear_daily(40, 1.0, 0.1);
    let up = zigzag_intraday(80, 1.3, 0.7);
    let down = zigzag_intraday(80, 0.7, 1.3);

    strategy.generate_signal("EURUSD", &slow, &up, SessionType::Us, 120.0);
    assert_eq!(
        strategy.cached_analysis("EURUSD"),
        Some(&strategy.analyze(&slow, &up).unwrap())
    );

    strategy.generate_signal("EURUSD", &slow, &down, SessionType::Us, 120.0);
    let expected = strategy.analyze(&slow, &down).unwrap();
    assert_eq!(strategy.cached_analysis("EURUSD"), Some(&expected));
    assert_eq!(expected.fast_trend, TrendDirection::Bearish);
    assert_eq!(strategy.status().cached_analyses, 1);
}

#[test]
fn symbols_are_cached_independently() {
    let mut strategy = TrendStrategy::new(small_config()).unwrap();
    let slow = linear_daily(40, 1.0, 0.1);
    let fast = zigzag_intraday(80, 1.3, 0.7);

    strategy.generate_signal("EURUSD", &slow, &fast, SessionType::Us, 120.0);
    strategy.generate_signal("USDJPY", &slow, &fast[..40], SessionType::Asian, 120.0);
    let status = strategy.status();
    assert_eq!(status.cached_analyses, 2);
    assert_eq!(status.name, "Small");
    assert_eq!(status.config_hash, small_config().config_hash());
}

#[test]
fn status_is_read_only() {
    let mut strategy = TrendStrategy::new(small_config()).unwrap();
    let slow = linear_daily(40, 1.0, 0.1);
    let fast = zigzag_intraday(80, 1.3, 0.7);
    strategy.generate_signal("EURUSD", &slow, &fast, SessionType::Us, 120.0);

    let before = strategy.status();
    let after = strategy.status();
    assert_eq!(before.active_signals, after.active_signals);
    assert_eq!(before.cached_analyses, after.cached_analyses);
    assert_eq!(before.config, after.config);

    let json = serde_json::to_value(&after).unwrap();
    assert_eq!(json["active_signals"], 1);
    assert_eq!(json["config"]["strength_threshold"], 25.0);
}

//! Unit tests for market regime detection

use chrono::{Duration, TimeZone, Utc};
use concordia::models::{Candle, MarketRegime};
use concordia::regime;

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 18, 0, 0, 0).unwrap()
}

fn flat_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            Candle::new(
                100.0,
                100.2,
                99.8,
                100.0,
                1000.0,
                base_time() + Duration::minutes(i as i64),
            )
        })
        .collect()
}

/// Sixty quiet bars followed by ten wide-range bars: current ATR far above
/// its lookback average.
fn volatility_spike_candles() -> Vec<Candle> {
    (0..70)
        .map(|i| {
            let range = if i < 60 { 0.5 } else { 2.5 };
            Candle::new(
                100.0,
                100.0 + range,
                100.0 - range,
                100.0,
                1000.0,
                base_time() + Duration::minutes(i as i64),
            )
        })
        .collect()
}

fn trending_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            let close = 100.0 * 1.01f64.powi(i as i32);
            Candle::new(
                close * 0.999,
                close * 1.001,
                close * 0.998,
                close,
                1000.0,
                base_time() + Duration::minutes(i as i64),
            )
        })
        .collect()
}

#[test]
fn insufficient_history_falls_back_to_ranging() {
    assert_eq!(regime::detect_regime(&flat_candles(10)), MarketRegime::Ranging);
    assert_eq!(regime::detect_regime(&[]), MarketRegime::Ranging);
}

#[test]
fn volatility_spike_classifies_volatile() {
    assert_eq!(
        regime::detect_regime(&volatility_spike_candles()),
        MarketRegime::Volatile
    );
}

#[test]
fn volatility_wins_over_trend_divergence() {
    // A strong uptrend whose last ten bars blow out the range: the
    // volatility check matches first even though the EMAs diverge.
    let candles: Vec<Candle> = (0..100)
        .map(|i| {
            let close = 100.0 * 1.01f64.powi(i as i32);
            let range = if i >= 90 { 0.03 } else { 0.001 };
            Candle::new(
                close,
                close * (1.0 + range),
                close * (1.0 - range),
                close,
                1000.0,
                base_time() + Duration::minutes(i as i64),
            )
        })
        .collect();
    assert_eq!(regime::detect_regime(&candles), MarketRegime::Volatile);
}

#[test]
fn steady_trend_classifies_trending() {
    assert_eq!(
        regime::detect_regime(&trending_candles(100)),
        MarketRegime::Trending
    );
}

#[test]
fn quiet_flat_market_classifies_ranging() {
    assert_eq!(regime::detect_regime(&flat_candles(120)), MarketRegime::Ranging);
}

#[test]
fn detection_is_deterministic() {
    let candles = trending_candles(100);
    let first = regime::detect_regime(&candles);
    let second = regime::detect_regime(&candles);
    assert_eq!(first, second);
}

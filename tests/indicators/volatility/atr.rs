//! Unit tests for the ATR indicator

use chrono::{Duration, TimeZone, Utc};
use concordia::indicators::volatility::atr;
use concordia::models::Candle;

fn flat_candles(count: usize, range: f64) -> Vec<Candle> {
    let base = Utc.with_ymd_and_hms(2025, 8, 18, 0, 0, 0).unwrap();
    (0..count)
        .map(|i| {
            Candle::new(
                100.0,
                100.0 + range / 2.0,
                100.0 - range / 2.0,
                100.0,
                1000.0,
                base + Duration::minutes(i as i64),
            )
        })
        .collect()
}

#[test]
fn atr_of_constant_range_bars() {
    let candles = flat_candles(30, 2.0);
    let value = atr::calculate_atr(&candles, 14).unwrap();
    assert!((value - 2.0).abs() < 1e-9);
}

#[test]
fn atr_series_length() {
    let candles = flat_candles(30, 1.0);
    // 29 true ranges, rolling window of 14.
    assert_eq!(atr::atr_series(&candles, 14).len(), 16);
}

#[test]
fn atr_insufficient_history() {
    let candles = flat_candles(14, 1.0);
    assert!(atr::calculate_atr(&candles, 14).is_none());
    assert!(atr::atr_series(&candles, 14).is_empty());
}

#[test]
fn atr_rises_with_widening_ranges() {
    let mut candles = flat_candles(50, 1.0);
    let wide = flat_candles(10, 5.0);
    let base = candles.last().unwrap().timestamp;
    for (i, mut candle) in wide.into_iter().enumerate() {
        candle.timestamp = base + Duration::minutes(i as i64 + 1);
        candles.push(candle);
    }
    let series = atr::atr_series(&candles, 14);
    assert!(series.last().unwrap() > series.first().unwrap());
}

//! Unit tests for shared math helpers

use concordia::common::math;

#[test]
fn sma_of_last_window() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let sma = math::sma(&values, 4).unwrap();
    assert!((sma - 6.5).abs() < 1e-12);
}

#[test]
fn sma_insufficient_history() {
    assert!(math::sma(&[1.0, 2.0], 3).is_none());
    assert!(math::sma(&[1.0, 2.0], 0).is_none());
}

#[test]
fn ema_of_constant_series_is_constant() {
    let values = [100.0; 30];
    let ema = math::ema(&values, 9).unwrap();
    assert!((ema - 100.0).abs() < 1e-9);
}

#[test]
fn ema_series_length() {
    let values: Vec<f64> = (0..20).map(|i| i as f64).collect();
    let series = math::ema_series(&values, 5);
    assert_eq!(series.len(), 16);
    // EMA of a rising series sits below the latest value.
    assert!(*series.last().unwrap() < 19.0);
}

#[test]
fn rolling_mean_windows() {
    let values = [1.0, 2.0, 3.0, 4.0];
    let means = math::rolling_mean(&values, 2);
    assert_eq!(means.len(), 3);
    assert!((means[0] - 1.5).abs() < 1e-12);
    assert!((means[2] - 3.5).abs() < 1e-12);
}

#[test]
fn std_dev_sample() {
    let values = [2.0, 4.0, 4.0, 4.0, 5.0, 5.0, 7.0, 9.0];
    let sd = math::std_dev(&values, 8).unwrap();
    assert!((sd - 2.138089935299395).abs() < 1e-9);
}

#[test]
fn true_range_picks_widest() {
    // Gap down: the high-to-previous-close distance dominates.
    assert!((math::true_range(10.0, 9.0, 12.0) - 3.0).abs() < 1e-12);
    // Ordinary bar: high-low dominates.
    assert!((math::true_range(11.0, 9.0, 10.0) - 2.0).abs() < 1e-12);
}

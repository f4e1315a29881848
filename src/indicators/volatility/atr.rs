//! ATR (Average True Range) indicator

use crate::common::math;
use crate::models::Candle;

/// ATR value at every point from the first full window onwards.
///
/// The series is the rolling mean of the true range, so `candles.len()` must
/// be at least `period + 1` for any output.
pub fn atr_series(candles: &[Candle], period: u32) -> Vec<f64> {
    let period = period as usize;
    if period == 0 || candles.len() < period + 1 {
        return Vec::new();
    }

    let tr_values: Vec<f64> = (1..candles.len())
        .map(|i| {
            math::true_range(candles[i].high, candles[i].low, candles[i - 1].close)
        })
        .collect();

    math::rolling_mean(&tr_values, period)
}

/// Current ATR value.
pub fn calculate_atr(candles: &[Candle], period: u32) -> Option<f64> {
    atr_series(candles, period).last().copied()
}

/// ATR with the conventional 14-bar period.
pub fn calculate_atr_default(candles: &[Candle]) -> Option<f64> {
    calculate_atr(candles, 14)
}

//! EMA (Exponential Moving Average) indicator

use crate::common::math;
use crate::models::Candle;

/// Calculate the current EMA of candle closes for a period.
pub fn calculate_ema(candles: &[Candle], period: u32) -> Option<f64> {
    if candles.len() < period as usize {
        return None;
    }
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    math::ema(&closes, period as usize)
}

/// Calculate a fast/slow EMA pair in one pass.
pub fn calculate_ema_pair(candles: &[Candle], fast: u32, slow: u32) -> Option<(f64, f64)> {
    Some((calculate_ema(candles, fast)?, calculate_ema(candles, slow)?))
}

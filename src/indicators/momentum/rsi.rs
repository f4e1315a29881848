//! RSI (Relative Strength Index) indicator

use crate::models::Candle;

/// Calculate RSI over candle closes.
///
/// RSI = 100 - (100 / (1 + RS)), RS = average gain / average loss over the
/// last `period` changes. All-gain history returns 100.
pub fn calculate_rsi(candles: &[Candle], period: u32) -> Option<f64> {
    let period = period as usize;
    if period == 0 || candles.len() < period + 1 {
        return None;
    }

    let mut gains = Vec::with_capacity(candles.len() - 1);
    let mut losses = Vec::with_capacity(candles.len() - 1);
    for i in 1..candles.len() {
        let change = candles[i].close - candles[i - 1].close;
        if change > 0.0 {
            gains.push(change);
            losses.push(0.0);
        } else {
            gains.push(0.0);
            losses.push(change.abs());
        }
    }

    let avg_gain: f64 = gains.iter().rev().take(period).sum::<f64>() / period as f64;
    let avg_loss: f64 = losses.iter().rev().take(period).sum::<f64>() / period as f64;

    if avg_loss == 0.0 {
        return Some(100.0);
    }

    let rs = avg_gain / avg_loss;
    Some(100.0 - (100.0 / (1.0 + rs)))
}

/// RSI with the conventional 14-bar period.
pub fn calculate_rsi_default(candles: &[Candle]) -> Option<f64> {
    calculate_rsi(candles, 14)
}

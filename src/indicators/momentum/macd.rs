//! MACD (Moving Average Convergence Divergence) indicator

use crate::common::math;
use crate::models::Candle;

/// Current MACD line, signal line and histogram.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdLine {
    pub macd: f64,
    pub signal: f64,
    pub histogram: f64,
}

/// Calculate MACD from candle closes.
pub fn calculate_macd(
    candles: &[Candle],
    fast: u32,
    slow: u32,
    signal: u32,
) -> Option<MacdLine> {
    let (fast, slow, signal) = (fast as usize, slow as usize, signal as usize);
    if fast == 0 || signal == 0 || fast >= slow {
        return None;
    }
    // The signal line needs `signal` MACD points, each of which needs a full
    // slow-EMA seed.
    if candles.len() < slow + signal - 1 {
        return None;
    }

    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let fast_series = math::ema_series(&closes, fast);
    let slow_series = math::ema_series(&closes, slow);

    let macd_series: Vec<f64> = slow_series
        .iter()
        .enumerate()
        .map(|(i, slow_ema)| {
            // slow_series[i] corresponds to closes index i + slow - 1;
            // align the fast series to the same close.
            let fast_ema = fast_series[i + slow - fast];
            fast_ema - slow_ema
        })
        .collect();

    let signal_series = math::ema_series(&macd_series, signal);
    let macd_value = *macd_series.last()?;
    let signal_value = *signal_series.last()?;

    Some(MacdLine {
        macd: macd_value,
        signal: signal_value,
        histogram: macd_value - signal_value,
    })
}

/// MACD with the conventional 12/26/9 parameters.
pub fn calculate_macd_default(candles: &[Candle]) -> Option<MacdLine> {
    calculate_macd(candles, 12, 26, 9)
}

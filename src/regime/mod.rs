//! Market regime classification from volatility and trend divergence.

use crate::common::math;
use crate::indicators::trend::ema;
use crate::indicators::volatility::atr;
use crate::models::{Candle, MarketRegime};

/// Minimum history for a meaningful classification.
pub const MIN_CANDLES: usize = 50;

const ATR_PERIOD: u32 = 14;
const ATR_LOOKBACK: usize = 50;
const VOLATILITY_RATIO_THRESHOLD: f64 = 1.5;
const TREND_DIVERGENCE_THRESHOLD: f64 = 0.02;

/// Classify the current market regime.
///
/// Decision order, first match wins: volatility ratio above 1.5 is VOLATILE,
/// EMA20/EMA50 divergence above 2% is TRENDING, anything else is RANGING.
/// Fewer than 50 bars is treated as insufficient data and reported as
/// RANGING.
pub fn detect_regime(candles: &[Candle]) -> MarketRegime {
    if candles.len() < MIN_CANDLES {
        return MarketRegime::Ranging;
    }

    if volatility_ratio(candles) > VOLATILITY_RATIO_THRESHOLD {
        return MarketRegime::Volatile;
    }

    if let Some((ema_20, ema_50)) = ema::calculate_ema_pair(candles, 20, 50) {
        if ema_50 != 0.0 && ((ema_20 - ema_50).abs() / ema_50) > TREND_DIVERGENCE_THRESHOLD {
            return MarketRegime::Trending;
        }
    }

    MarketRegime::Ranging
}

/// Current ATR(14) relative to its mean over the last 50 ATR values.
///
/// Falls back to 1.0 (neutral) when the lookback average is unavailable or
/// not positive, so short histories can never classify as VOLATILE through
/// this path.
fn volatility_ratio(candles: &[Candle]) -> f64 {
    let series = atr::atr_series(candles, ATR_PERIOD);
    let current = match series.last() {
        Some(&value) => value,
        None => return 1.0,
    };

    if series.len() < ATR_LOOKBACK {
        return 1.0;
    }
    let lookback = &series[series.len() - ATR_LOOKBACK..];
    match math::mean(lookback) {
        Some(avg) if avg > 0.0 => current / avg,
        _ => 1.0,
    }
}

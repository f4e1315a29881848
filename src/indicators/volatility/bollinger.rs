//! Bollinger Bands indicator

use crate::common::math;
use crate::models::Candle;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerBands {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

impl BollingerBands {
    /// Position of a price inside the bands, 0.0 at the lower band and 1.0
    /// at the upper band. None when the bands have collapsed to a point.
    pub fn position(&self, price: f64) -> Option<f64> {
        let width = self.upper - self.lower;
        if width <= 0.0 {
            return None;
        }
        Some((price - self.lower) / width)
    }
}

/// Calculate Bollinger Bands over candle closes.
pub fn calculate_bollinger(candles: &[Candle], period: u32, k: f64) -> Option<BollingerBands> {
    let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
    let middle = math::sma(&closes, period as usize)?;
    let deviation = math::std_dev(&closes, period as usize)?;
    Some(BollingerBands {
        upper: middle + deviation * k,
        middle,
        lower: middle - deviation * k,
    })
}

/// Bollinger Bands with the conventional 20-bar period and 2.0 multiplier.
pub fn calculate_bollinger_default(candles: &[Candle]) -> Option<BollingerBands> {
    calculate_bollinger(candles, 20, 2.0)
}

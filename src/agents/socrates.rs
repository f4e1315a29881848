//! Socrates: mean reversion inside a questioned range.

use crate::agents::{MarketView, StrategyAgent};
use crate::models::{Candle, Signal, SignalAction};

/// Treats every move as suspect and only trades the extremes of a
/// well-defined range. Four questions are asked of the market; at least
/// three must answer yes.
pub struct Socrates {
    extreme_low: f64,
    extreme_high: f64,
    calm_volume_ratio: f64,
}

impl Socrates {
    pub fn new() -> Self {
        Self {
            extreme_low: 0.2,
            extreme_high: 0.8,
            calm_volume_ratio: 1.5,
        }
    }
}

impl Default for Socrates {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyAgent for Socrates {
    fn name(&self) -> &'static str {
        "Socrates"
    }

    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> Option<Signal> {
        let view = MarketView::from_candles(candles)?;
        let rsi = view.rsi?;

        let low_range = view.support_20?;
        let high_range = view.resistance_20?;
        let range_size = high_range - low_range;
        if range_size <= 0.0 {
            return None;
        }
        let mid_range = (high_range + low_range) / 2.0;
        let position = (view.close - low_range) / range_size;

        let bands = view.bollinger?;
        let questions = [
            position < self.extreme_low || position > self.extreme_high,
            view.volume_ratio.map(|r| r < self.calm_volume_ratio).unwrap_or(false),
            rsi < 30.0 || rsi > 70.0,
            view.close <= bands.lower || view.close >= bands.upper,
        ];
        let answered = questions.iter().filter(|q| **q).count();
        if answered < 3 {
            return None;
        }

        let confidence = (answered as f64 / questions.len() as f64).min(0.85);

        if position < self.extreme_low && rsi < 30.0 {
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Buy,
                    confidence,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(vec![
                    "Price at the bottom of the range".to_string(),
                    format!("RSI oversold at {:.1}", rsi),
                    format!("{answered}/4 range questions answered"),
                ])
                .with_levels(low_range * 0.98, mid_range),
            )
        } else if position > self.extreme_high && rsi > 70.0 {
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Sell,
                    confidence,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(vec![
                    "Price at the top of the range".to_string(),
                    format!("RSI overbought at {:.1}", rsi),
                    format!("{answered}/4 range questions answered"),
                ])
                .with_levels(high_range * 1.02, mid_range),
            )
        } else {
            None
        }
    }
}

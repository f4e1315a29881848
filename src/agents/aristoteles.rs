//! Aristoteles: systematic trend following.

use crate::agents::{MarketView, StrategyAgent};
use crate::models::{Candle, Signal, SignalAction};

/// Cause and effect: an aligned EMA structure with MACD confirmation is
/// expected to persist. Entries only in the strength zone of RSI.
pub struct Aristoteles {
    rsi_floor: f64,
    rsi_ceiling: f64,
    bullish_confidence: f64,
    bearish_confidence: f64,
}

impl Aristoteles {
    pub fn new() -> Self {
        Self {
            rsi_floor: 50.0,
            rsi_ceiling: 70.0,
            bullish_confidence: 0.75,
            bearish_confidence: 0.70,
        }
    }
}

impl Default for Aristoteles {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyAgent for Aristoteles {
    fn name(&self) -> &'static str {
        "Aristoteles"
    }

    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> Option<Signal> {
        let view = MarketView::from_candles(candles)?;
        let rsi = view.rsi?;
        let macd = view.macd?;
        let (ema_20, ema_50) = (view.ema_20?, view.ema_50?);

        let bullish_structure =
            view.close > ema_20 && ema_20 > ema_50 && macd.macd > macd.signal;
        let bearish_structure =
            view.close < ema_20 && ema_20 < ema_50 && macd.macd < macd.signal;

        if bullish_structure && rsi > self.rsi_floor && rsi < self.rsi_ceiling {
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Buy,
                    self.bullish_confidence,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(vec![
                    "Bullish structure confirmed".to_string(),
                    "EMAs aligned upward with MACD agreement".to_string(),
                    format!("RSI in strength zone at {:.1}", rsi),
                ])
                .with_levels(ema_20 * 0.98, view.close * 1.05),
            )
        } else if bearish_structure && rsi < self.rsi_floor && rsi > 100.0 - self.rsi_ceiling {
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Sell,
                    self.bearish_confidence,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(vec![
                    "Bearish structure confirmed".to_string(),
                    "EMAs aligned downward with MACD agreement".to_string(),
                    format!("RSI in weakness zone at {:.1}", rsi),
                ])
                .with_levels(ema_20 * 1.02, view.close * 0.95),
            )
        } else {
            None
        }
    }
}

//! Confucio: trades the return to balance around the band middle.

use crate::agents::{MarketView, StrategyAgent};
use crate::models::{Candle, Signal, SignalAction};

pub struct Confucio {
    imbalance: f64,
    rsi_low: f64,
    rsi_high: f64,
}

impl Confucio {
    pub fn new() -> Self {
        Self {
            imbalance: 0.02,
            rsi_low: 45.0,
            rsi_high: 55.0,
        }
    }
}

impl Default for Confucio {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyAgent for Confucio {
    fn name(&self) -> &'static str {
        "Confucio"
    }

    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> Option<Signal> {
        let view = MarketView::from_candles(candles)?;
        let rsi = view.rsi?;
        let bands = view.bollinger?;
        let atr = view.atr?;
        if bands.middle == 0.0 {
            return None;
        }

        let distance = (view.close - bands.middle) / bands.middle;

        if distance < -self.imbalance && rsi < self.rsi_low {
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Buy,
                    0.70,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(vec![
                    format!("Price {:.1}% below equilibrium", distance.abs() * 100.0),
                    format!("RSI leaning weak at {:.1}", rsi),
                ])
                .with_levels(view.close - atr * 2.0, bands.middle),
            )
        } else if distance > self.imbalance && rsi > self.rsi_high {
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Sell,
                    0.70,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(vec![
                    format!("Price {:.1}% above equilibrium", distance * 100.0),
                    format!("RSI leaning strong at {:.1}", rsi),
                ])
                .with_levels(view.close + atr * 2.0, bands.middle),
            )
        } else {
            None
        }
    }
}

//! SunTzu: strikes only when a volume surge exposes exhaustion.

use crate::agents::{MarketView, StrategyAgent};
use crate::models::{Candle, Signal, SignalAction};

pub struct SunTzu {
    surge_volume_ratio: f64,
    weak_rsi: f64,
    strong_rsi: f64,
}

impl SunTzu {
    pub fn new() -> Self {
        Self {
            surge_volume_ratio: 1.5,
            weak_rsi: 40.0,
            strong_rsi: 60.0,
        }
    }
}

impl Default for SunTzu {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyAgent for SunTzu {
    fn name(&self) -> &'static str {
        "SunTzu"
    }

    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> Option<Signal> {
        let view = MarketView::from_candles(candles)?;
        let rsi = view.rsi?;
        let (ema_9, ema_21) = (view.ema_9?, view.ema_21?);
        let volume_ratio = view.volume_ratio?;

        // No surge, no battle.
        if volume_ratio <= self.surge_volume_ratio {
            return None;
        }

        if rsi < self.weak_rsi && ema_9 > ema_21 {
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Buy,
                    0.80,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(vec![
                    format!("Volume surge at {:.2}x average", volume_ratio),
                    "Seller exhaustion inside an uptrend".to_string(),
                ])
                .with_levels(view.close * 0.97, view.close * 1.04),
            )
        } else if rsi > self.strong_rsi && ema_9 < ema_21 {
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Sell,
                    0.80,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(vec![
                    format!("Volume surge at {:.2}x average", volume_ratio),
                    "Buyer exhaustion inside a downtrend".to_string(),
                ])
                .with_levels(view.close * 1.03, view.close * 0.96),
            )
        } else {
            None
        }
    }
}

//! Nietzsche: extreme contrarian, fades capitulation and euphoria.

use crate::agents::{MarketView, StrategyAgent};
use crate::models::{Candle, Signal, SignalAction};

pub struct Nietzsche {
    panic_rsi: f64,
    euphoria_rsi: f64,
    surge_volume_ratio: f64,
    band_overshoot: f64,
}

impl Nietzsche {
    pub fn new() -> Self {
        Self {
            panic_rsi: 20.0,
            euphoria_rsi: 80.0,
            surge_volume_ratio: 2.5,
            band_overshoot: 0.02,
        }
    }
}

impl Default for Nietzsche {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyAgent for Nietzsche {
    fn name(&self) -> &'static str {
        "Nietzsche"
    }

    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> Option<Signal> {
        let view = MarketView::from_candles(candles)?;
        let rsi = view.rsi?;
        let bands = view.bollinger?;
        let volume_ratio = view.volume_ratio?;

        if volume_ratio <= self.surge_volume_ratio {
            return None;
        }

        // Overshoot beyond the band, as a fraction of the band level.
        let below_lower = if bands.lower > 0.0 {
            (bands.lower - view.close) / bands.lower
        } else {
            0.0
        };
        let above_upper = if bands.upper > 0.0 {
            (view.close - bands.upper) / bands.upper
        } else {
            0.0
        };

        if rsi < self.panic_rsi && below_lower > self.band_overshoot {
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
                    "Extreme panic detected".to_string(),
                    format!("RSI at {:.1} with capitulation volume", rsi),
                    "Price dislocated below the lower band".to_string(),
                ])
                .with_levels(view.close * 0.97, bands.middle),
            )
        } else if rsi > self.euphoria_rsi && above_upper > self.band_overshoot {
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Sell,
                    0.75,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(vec![
                    "Irrational euphoria detected".to_string(),
                    format!("RSI at {:.1} with chase volume", rsi),
                    "Price dislocated above the upper band".to_string(),
                ])
                .with_levels(view.close * 1.03, bands.middle),
            )
        } else {
            None
        }
    }
}

//! Descartes: methodical doubt, multiple confirmations before acting.

use crate::agents::{MarketView, StrategyAgent};
use crate::models::{Candle, Signal, SignalAction};

/// Forms a hypothesis from the Bollinger position, then tries to confirm it
/// on three further levels (momentum, volume, structure). Three of the four
/// levels must hold; confidence is the confirmed fraction.
pub struct Descartes {
    band_low: f64,
    band_high: f64,
    active_volume_ratio: f64,
    min_confirmations: usize,
}

impl Descartes {
    pub fn new() -> Self {
        Self {
            band_low: 0.2,
            band_high: 0.8,
            active_volume_ratio: 1.2,
            min_confirmations: 3,
        }
    }
}

impl Default for Descartes {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyAgent for Descartes {
    fn name(&self) -> &'static str {
        "Descartes"
    }

    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> Option<Signal> {
        let view = MarketView::from_candles(candles)?;
        let rsi = view.rsi?;
        let macd = view.macd?;
        let bands = view.bollinger?;
        let (ema_9, ema_21) = (view.ema_9?, view.ema_21?);
        let atr = view.atr?;

        // Level 1: the evident — price at a band extreme.
        let band_position = bands.position(view.close)?;
        let action = if band_position < self.band_low {
            SignalAction::Buy
        } else if band_position > self.band_high {
            SignalAction::Sell
        } else {
            return None;
        };

        let mut confirmations = 1usize;
        let mut confirmed = vec!["Price at band extreme".to_string()];

        // Level 2: momentum agrees with the reversion hypothesis.
        let momentum_confirms = match action {
            SignalAction::Buy => rsi < 40.0 && macd.macd < macd.signal,
            SignalAction::Sell => rsi > 60.0 && macd.macd > macd.signal,
            SignalAction::Hold => false,
        };
        if momentum_confirms {
            confirmations += 1;
            confirmed.push("Momentum exhausted in signal direction".to_string());
        }

        // Level 3: volume above the quiet baseline.
        if view.volume_ratio.map(|r| r > self.active_volume_ratio).unwrap_or(false) {
            confirmations += 1;
            confirmed.push("Volume above average".to_string());
        }

        // Level 4: market structure (pullback within the larger trend).
        let structure_confirms = match action {
            SignalAction::Buy => view.close < ema_9 && ema_9 < ema_21,
            SignalAction::Sell => view.close > ema_9 && ema_9 > ema_21,
            SignalAction::Hold => false,
        };
        if structure_confirms {
            confirmations += 1;
            confirmed.push("Structure supports a pullback entry".to_string());
        }

        if confirmations < self.min_confirmations {
            return None;
        }

        let confidence = (confirmations as f64 / 4.0).min(0.95);
        confirmed.push(format!("Doubt overcome with {confirmations}/4 confirmations"));

        let (stop_loss, take_profit) = match action {
            SignalAction::Buy => (view.close - atr * 1.5, view.close + atr * 3.0),
            _ => (view.close + atr * 1.5, view.close - atr * 3.0),
        };

        Some(
            Signal::new(
                self.name(),
                symbol,
                action,
                confidence,
                view.close,
                view.timestamp,
            )
            .with_rationale(confirmed)
            .with_levels(stop_loss, take_profit),
        )
    }
}

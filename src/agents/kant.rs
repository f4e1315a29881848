//! Kant: categorical rules, all of them, every time.

use crate::common::math;
use crate::agents::{MarketView, StrategyAgent};
use crate::models::{Candle, Signal, SignalAction};

/// Every rule must pass before a trade is permitted; one failure vetoes the
/// whole opinion. Confidence is fixed because the rules either all hold or
/// the agent stays silent.
pub struct Kant {
    rsi_oversold: f64,
    rsi_overbought: f64,
    volume_threshold: f64,
    trend_threshold: f64,
    confidence: f64,
}

impl Kant {
    pub fn new() -> Self {
        Self {
            rsi_oversold: 30.0,
            rsi_overbought: 70.0,
            volume_threshold: 1.5,
            trend_threshold: 0.02,
            confidence: 0.80,
        }
    }
}

impl Default for Kant {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyAgent for Kant {
    fn name(&self) -> &'static str {
        "Kant"
    }

    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> Option<Signal> {
        let view = MarketView::from_candles(candles)?;
        let rsi = view.rsi?;
        let macd = view.macd?;
        let volume_ratio = view.volume_ratio?;
        let atr = view.atr?;

        // Rule 1: RSI at an extreme decides the direction.
        let action = if rsi < self.rsi_oversold {
            SignalAction::Buy
        } else if rsi > self.rsi_overbought {
            SignalAction::Sell
        } else {
            return None;
        };

        // Rule 2: volume above threshold.
        if volume_ratio <= self.volume_threshold {
            return None;
        }

        // Rule 3: price meaningfully away from its 20-bar mean.
        let closes: Vec<f64> = candles.iter().map(|c| c.close).collect();
        let sma_20 = math::sma(&closes, 20)?;
        if sma_20 == 0.0 || ((view.close - sma_20) / sma_20).abs() <= self.trend_threshold {
            return None;
        }

        // Rule 4: MACD confirms the direction.
        let macd_confirms = match action {
            SignalAction::Buy => macd.macd > macd.signal,
            SignalAction::Sell => macd.macd < macd.signal,
            SignalAction::Hold => false,
        };
        if !macd_confirms {
            return None;
        }

        let (stop_loss, take_profit) = match action {
            SignalAction::Buy => (view.close - atr * 2.0, view.close + atr * 4.0),
            _ => (view.close + atr * 2.0, view.close - atr * 4.0),
        };

        Some(
            Signal::new(
                self.name(),
                symbol,
                action,
                self.confidence,
                view.close,
                view.timestamp,
            )
            .with_rationale(vec![
                "All categorical rules satisfied".to_string(),
                format!("RSI extreme at {:.1}", rsi),
                format!("Volume ratio {:.2} above threshold", volume_ratio),
                "MACD confirms direction".to_string(),
            ])
            .with_levels(stop_loss, take_profit),
        )
    }
}

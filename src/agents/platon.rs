//! Platon: only trades configurations close to an ideal pattern.

use crate::agents::{MarketView, StrategyAgent};
use crate::models::{Candle, Signal, SignalAction};

const FIB_LEVELS: [f64; 5] = [0.236, 0.382, 0.5, 0.618, 0.786];

/// Scores geometric "perfection" of the current configuration out of six
/// points; anything under four points is noise, not form.
pub struct Platon {
    fib_tolerance: f64,
    ema_convergence: f64,
    min_pattern_score: u32,
}

impl Platon {
    pub fn new() -> Self {
        Self {
            fib_tolerance: 0.01,
            ema_convergence: 0.002,
            min_pattern_score: 4,
        }
    }

    fn pattern_score(&self, view: &MarketView, candles: &[Candle]) -> (u32, Vec<String>) {
        let mut score = 0;
        let mut found = Vec::new();

        if let (Some(low), Some(high)) = (view.low_50, view.high_50) {
            let range = high - low;
            for level in FIB_LEVELS {
                let fib_price = low + range * level;
                if fib_price > 0.0 && ((view.close - fib_price) / fib_price).abs() < self.fib_tolerance
                {
                    score += 1;
                    found.push(format!("Fibonacci retracement {level}"));
                }
            }
        }

        if let (Some(ema_9), Some(ema_21)) = (view.ema_9, view.ema_21) {
            if ema_21 != 0.0 && ((ema_9 - ema_21) / ema_21).abs() < self.ema_convergence {
                score += 2;
                found.push("EMA convergence".to_string());
            }
        }

        if candles.len() >= 3 {
            let last_3 = &candles[candles.len() - 3..];
            if last_3.iter().all(|c| c.is_bullish()) || last_3.iter().all(|c| c.is_bearish()) {
                score += 1;
                found.push("Three-candle continuation".to_string());
            }
        }

        if let Some(rsi) = view.rsi {
            for level in [30.0, 50.0, 70.0] {
                if (rsi - level).abs() < 2.0 {
                    score += 1;
                    found.push(format!("RSI at key level {level}"));
                }
            }
        }

        (score, found)
    }
}

impl Default for Platon {
    fn default() -> Self {
        Self::new()
    }
}

impl StrategyAgent for Platon {
    fn name(&self) -> &'static str {
        "Platon"
    }

    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> Option<Signal> {
        let view = MarketView::from_candles(candles)?;
        let rsi = view.rsi?;
        let ema_21 = view.ema_21?;
        let (low_50, high_50) = (view.low_50?, view.high_50?);

        let (score, mut found) = self.pattern_score(&view, candles);
        if score < self.min_pattern_score {
            return None;
        }

        let last_3 = &candles[candles.len() - 3..];
        let bullish_3 = last_3.iter().all(|c| c.is_bullish());
        let bearish_3 = last_3.iter().all(|c| c.is_bearish());

        if view.close > ema_21 && rsi > 50.0 && bullish_3 {
            let confidence = (score as f64 / 6.0).min(0.90);
            found.insert(0, "Ideal bullish pattern".to_string());
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Buy,
                    confidence,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(found)
                .with_levels(low_50, high_50),
            )
        } else if view.close < ema_21 && rsi < 50.0 && bearish_3 {
            let confidence = (score as f64 / 6.0).min(0.85);
            found.insert(0, "Ideal bearish pattern".to_string());
            Some(
                Signal::new(
                    self.name(),
                    symbol,
                    SignalAction::Sell,
                    confidence,
                    view.close,
                    view.timestamp,
                )
                .with_rationale(found)
                .with_levels(high_50, low_50),
            )
        } else {
            None
        }
    }
}

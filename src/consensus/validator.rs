//! Secondary technical cross-check of resolved and standalone signals.

use crate::indicators::momentum::rsi;
use crate::indicators::trend::ema;
use crate::models::{Candle, Signal, SignalAction};

const RSI_PERIOD: u32 = 14;
const EMA_PERIOD: u32 = 9;
const ADJUSTMENT_FACTOR: f64 = 0.3;
const CONFIDENCE_CAP: f64 = 0.95;

/// Re-score a signal's confidence against RSI(14) and EMA(9).
///
/// Bonuses accumulate into a technical score: a BUY gains 0.3 when RSI is
/// under 40 and 0.2 when price holds above EMA9; a SELL mirrors both checks
/// at RSI over 60 and price under EMA9. The adjusted confidence is
/// `original x (1 + score x 0.3)`, capped at 0.95, with the original kept
/// on the signal for audit.
///
/// Fail-open: if the indicators cannot be computed from `recent_bars`, or
/// the signal is a HOLD, the input is returned unchanged.
pub fn validate(signal: Signal, recent_bars: &[Candle]) -> Signal {
    if signal.action == SignalAction::Hold {
        return signal;
    }

    let (current_rsi, ema_9, close) = match (
        rsi::calculate_rsi(recent_bars, RSI_PERIOD),
        ema::calculate_ema(recent_bars, EMA_PERIOD),
        recent_bars.last().map(|c| c.close),
    ) {
        (Some(r), Some(e), Some(c)) => (r, e, c),
        _ => return signal,
    };

    let mut technical_score: f64 = 0.0;
    let mut validations = Vec::new();

    match signal.action {
        SignalAction::Buy => {
            if current_rsi < 40.0 {
                technical_score += 0.3;
                validations.push("RSI favorable for entry".to_string());
            } else if current_rsi < 30.0 {
                // Unreachable: any RSI under 30 already matched the arm
                // above. The deeper-oversold bonus never fires.
                technical_score += 0.5;
                validations.push("RSI deeply oversold".to_string());
            }
            if close > ema_9 {
                technical_score += 0.2;
                validations.push("Price above EMA9".to_string());
            }
        }
        SignalAction::Sell => {
            if current_rsi > 60.0 {
                technical_score += 0.3;
                validations.push("RSI favorable for exit".to_string());
            } else if current_rsi > 70.0 {
                // Unreachable, mirror of the BUY side: the > 60 arm always
                // matches first.
                technical_score += 0.5;
                validations.push("RSI deeply overbought".to_string());
            }
            if close < ema_9 {
                technical_score += 0.2;
                validations.push("Price below EMA9".to_string());
            }
        }
        SignalAction::Hold => unreachable!("handled above"),
    }

    let mut validated = signal;
    let original = validated.confidence;
    let adjusted =
        (original * (1.0 + technical_score * ADJUSTMENT_FACTOR)).min(CONFIDENCE_CAP);

    validated.original_confidence = Some(original);
    validated.set_confidence(adjusted);
    validated.rationale.extend(validations);
    validated
}

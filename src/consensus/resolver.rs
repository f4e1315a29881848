//! Weighted-vote resolution of a conflict group.

use crate::consensus::weights::WeightTable;
use crate::models::{
    clamp_confidence, ConflictGroup, ConsensusAudit, MarketRegime, Resolution, ResolutionAction,
    Signal, SignalAction,
};

/// Resolve a conflict group under the current regime.
///
/// Each member contributes `confidence x weight` to its side; HOLD opinions
/// carry no weight. Side scores are normalized into probabilities — with a
/// zero total both sides sit at 0.5 by definition — and the first side whose
/// probability reaches `min_consensus` wins. Otherwise the directive is WAIT
/// with confidence equal to the stronger probability.
///
/// Pure: same group, regime and table always produce the same resolution,
/// independent of member order.
pub fn resolve(
    group: &ConflictGroup,
    regime: MarketRegime,
    weights: &WeightTable,
    min_consensus: f64,
) -> Resolution {
    let mut buy_score = 0.0;
    let mut sell_score = 0.0;
    let mut agents_buy = Vec::new();
    let mut agents_sell = Vec::new();

    for signal in &group.signals {
        let weight = weights.get(regime, &signal.agent);
        match signal.action {
            SignalAction::Buy => {
                buy_score += signal.confidence * weight;
                agents_buy.push(signal.agent.clone());
            }
            SignalAction::Sell => {
                sell_score += signal.confidence * weight;
                agents_sell.push(signal.agent.clone());
            }
            SignalAction::Hold => {}
        }
    }
    agents_buy.sort();
    agents_sell.sort();

    let total = buy_score + sell_score;
    let (buy_probability, sell_probability) = if total > 0.0 {
        (buy_score / total, sell_score / total)
    } else {
        (0.5, 0.5)
    };

    let timestamp = group
        .signals
        .iter()
        .map(|s| s.timestamp)
        .max()
        .unwrap_or(chrono::DateTime::<chrono::Utc>::MIN_UTC);

    let (action, confidence, reasoning) = if buy_probability >= min_consensus {
        (
            ResolutionAction::Buy,
            buy_probability,
            format!(
                "Consensus BUY: {:.1}% vs SELL: {:.1}%",
                buy_probability * 100.0,
                sell_probability * 100.0
            ),
        )
    } else if sell_probability >= min_consensus {
        (
            ResolutionAction::Sell,
            sell_probability,
            format!(
                "Consensus SELL: {:.1}% vs BUY: {:.1}%",
                sell_probability * 100.0,
                buy_probability * 100.0
            ),
        )
    } else {
        (
            ResolutionAction::Wait,
            buy_probability.max(sell_probability),
            format!(
                "No clear consensus. BUY: {:.1}%, SELL: {:.1}%",
                buy_probability * 100.0,
                sell_probability * 100.0
            ),
        )
    };

    Resolution {
        timestamp,
        symbol: group.symbol.clone(),
        action,
        confidence: clamp_confidence(confidence),
        agents_buy,
        agents_sell,
        reasoning,
    }
}

/// Promote the strongest original signal on the winning side.
///
/// The promoted copy takes the resolution's confidence, is flagged as
/// consensus-derived, and records the contributing agents of both sides.
/// A WAIT resolution promotes nothing and suppresses the whole group.
pub fn promote_winner(group: &ConflictGroup, resolution: &Resolution) -> Option<Signal> {
    let winning_action = match resolution.action {
        ResolutionAction::Buy => SignalAction::Buy,
        ResolutionAction::Sell => SignalAction::Sell,
        ResolutionAction::Wait => return None,
    };

    let best = group
        .signals
        .iter()
        .filter(|s| s.action == winning_action)
        .max_by(|a, b| {
            a.confidence
                .partial_cmp(&b.confidence)
                .unwrap_or(std::cmp::Ordering::Equal)
        })?;

    let mut promoted = best.clone();
    promoted.set_confidence(resolution.confidence);
    promoted.consensus = Some(ConsensusAudit {
        agents_buy: resolution.agents_buy.clone(),
        agents_sell: resolution.agents_sell.clone(),
        reasoning: resolution.reasoning.clone(),
    });
    Some(promoted)
}

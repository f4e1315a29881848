//! Signal and resolution records exchanged between the engine stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Directional opinion emitted by a strategy agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SignalAction {
    Buy,
    Sell,
    Hold,
}

impl SignalAction {
    /// Whether two opinions contend for the same instrument.
    pub fn opposes(&self, other: SignalAction) -> bool {
        *self != other
    }
}

impl std::fmt::Display for SignalAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            SignalAction::Buy => "BUY",
            SignalAction::Sell => "SELL",
            SignalAction::Hold => "HOLD",
        };
        f.write_str(s)
    }
}

/// Final directive of a resolved conflict group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ResolutionAction {
    Buy,
    Sell,
    Wait,
}

impl std::fmt::Display for ResolutionAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ResolutionAction::Buy => "BUY",
            ResolutionAction::Sell => "SELL",
            ResolutionAction::Wait => "WAIT",
        };
        f.write_str(s)
    }
}

/// Clamp a confidence value into [0, 1]. Undefined arithmetic (NaN) collapses
/// to 0.0 so a malformed input can never propagate through the pipeline.
pub fn clamp_confidence(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 1.0)
    }
}

/// Consensus metadata attached to a signal promoted by the resolver.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConsensusAudit {
    pub agents_buy: Vec<String>,
    pub agents_sell: Vec<String>,
    pub reasoning: String,
}

/// A directional opinion about one instrument.
///
/// Created once by an agent (or promoted by the resolver); mutated at most
/// once more by the technical validator, which adjusts `confidence` and keeps
/// the prior value in `original_confidence`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Signal {
    pub agent: String,
    pub symbol: String,
    pub action: SignalAction,
    pub confidence: f64,
    pub entry_price: f64,
    pub timestamp: DateTime<Utc>,
    pub rationale: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop_loss: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub take_profit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub consensus: Option<ConsensusAudit>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub original_confidence: Option<f64>,
}

impl Signal {
    pub fn new(
        agent: impl Into<String>,
        symbol: impl Into<String>,
        action: SignalAction,
        confidence: f64,
        entry_price: f64,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            agent: agent.into(),
            symbol: symbol.into(),
            action,
            confidence: clamp_confidence(confidence),
            entry_price,
            timestamp,
            rationale: Vec::new(),
            stop_loss: None,
            take_profit: None,
            consensus: None,
            original_confidence: None,
        }
    }

    pub fn with_rationale(mut self, rationale: Vec<String>) -> Self {
        self.rationale = rationale;
        self
    }

    pub fn with_levels(mut self, stop_loss: f64, take_profit: f64) -> Self {
        self.stop_loss = Some(stop_loss);
        self.take_profit = Some(take_profit);
        self
    }

    /// Overwrite confidence, clamping into [0, 1].
    pub fn set_confidence(&mut self, confidence: f64) {
        self.confidence = clamp_confidence(confidence);
    }

    pub fn is_consensus_derived(&self) -> bool {
        self.consensus.is_some()
    }
}

/// Same-instrument, opposing-action signals within the conflict window.
/// Ephemeral: lives only for the duration of one evaluation cycle.
#[derive(Debug, Clone)]
pub struct ConflictGroup {
    pub symbol: String,
    pub signals: Vec<Signal>,
}

impl ConflictGroup {
    pub fn len(&self) -> usize {
        self.signals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signals.is_empty()
    }
}

/// Outcome of weighted voting over one conflict group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resolution {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub action: ResolutionAction,
    pub confidence: f64,
    pub agents_buy: Vec<String>,
    pub agents_sell: Vec<String>,
    pub reasoning: String,
}

//! Regime-indexed agent weight table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::MarketRegime;

/// Default weight when an agent is missing from a regime's table.
pub const DEFAULT_WEIGHT: f64 = 1.0;

/// Read-only mapping from (regime, agent identity) to a positive weight
/// multiplier. Weights are not required to sum to 1; an unknown identity
/// resolves to 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeightTable {
    weights: HashMap<MarketRegime, HashMap<String, f64>>,
}

impl WeightTable {
    pub fn empty() -> Self {
        Self {
            weights: HashMap::new(),
        }
    }

    /// Set one weight. Non-positive values are rejected and logged rather
    /// than stored, keeping the positive-weight invariant.
    pub fn set(&mut self, regime: MarketRegime, agent: impl Into<String>, weight: f64) {
        let agent = agent.into();
        if weight <= 0.0 || !weight.is_finite() {
            warn!(agent = %agent, regime = %regime, weight, "ignoring non-positive weight");
            return;
        }
        self.weights.entry(regime).or_default().insert(agent, weight);
    }

    /// Look up the multiplier for an agent under a regime, defaulting to 1.0.
    pub fn get(&self, regime: MarketRegime, agent: &str) -> f64 {
        self.weights
            .get(&regime)
            .and_then(|per_agent| per_agent.get(agent))
            .copied()
            .unwrap_or(DEFAULT_WEIGHT)
    }

    /// Parse a table from its JSON representation, e.g.
    /// `{"TRENDING": {"Aristoteles": 1.2}}`. Non-positive entries are
    /// dropped.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: HashMap<MarketRegime, HashMap<String, f64>> = serde_json::from_str(json)?;
        let mut table = Self::empty();
        for (regime, per_agent) in raw {
            for (agent, weight) in per_agent {
                table.set(regime, agent, weight);
            }
        }
        Ok(table)
    }
}

impl Default for WeightTable {
    /// The philosopher weights the system ships with: trend logicians lead
    /// in trending markets, range traders in ranging ones, chaos-tolerant
    /// strategies when volatility spikes.
    fn default() -> Self {
        let mut table = Self::empty();

        for (agent, weight) in [
            ("Aristoteles", 1.2),
            ("Platon", 0.8),
            ("Socrates", 0.5),
            ("Nietzsche", 0.7),
            ("Kant", 1.0),
            ("Descartes", 1.1),
            ("Confucio", 0.6),
            ("SunTzu", 1.0),
        ] {
            table.set(MarketRegime::Trending, agent, weight);
        }

        for (agent, weight) in [
            ("Socrates", 1.3),
            ("Confucio", 1.2),
            ("Aristoteles", 0.7),
            ("Platon", 0.9),
            ("Nietzsche", 0.8),
            ("Kant", 1.0),
            ("Descartes", 1.0),
            ("SunTzu", 0.9),
        ] {
            table.set(MarketRegime::Ranging, agent, weight);
        }

        for (agent, weight) in [
            ("SunTzu", 1.3),
            ("Nietzsche", 1.2),
            ("Descartes", 1.1),
            ("Kant", 1.0),
            ("Aristoteles", 0.8),
            ("Platon", 0.7),
            ("Socrates", 0.6),
            ("Confucio", 0.5),
        ] {
            table.set(MarketRegime::Volatile, agent, weight);
        }

        table
    }
}

//! One evaluation cycle: collect, classify, group, resolve, validate,
//! filter.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::agents::AgentRegistry;
use crate::config::Config;
use crate::consensus::{conflict, resolver, validator, weights::WeightTable};
use crate::models::{Candle, MarketRegime, Resolution, Signal};
use crate::regime;

/// Final records of one evaluation cycle for one instrument.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CycleOutput {
    pub symbol: String,
    pub regime: MarketRegime,
    /// Signals that survived validation and the confidence filter, ordered
    /// by timestamp.
    pub signals: Vec<Signal>,
    /// Every resolution produced this cycle, including WAIT directives that
    /// suppressed their group. Kept for audit.
    pub resolutions: Vec<Resolution>,
}

/// The consensus engine: a stateless pipeline over one instrument's bars.
///
/// The registry and weight table are read-only for the duration of a cycle,
/// so cycles for different instruments can safely run concurrently over the
/// same engine.
pub struct ConsensusEngine {
    registry: AgentRegistry,
    weights: WeightTable,
    config: Config,
}

impl ConsensusEngine {
    pub fn new(registry: AgentRegistry, weights: WeightTable, config: Config) -> Self {
        Self {
            registry,
            weights,
            config,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Run one full evaluation cycle. Never fails: missing data and silent
    /// agents simply produce an empty final set.
    pub fn run_cycle(&self, symbol: &str, candles: &[Candle]) -> CycleOutput {
        // COLLECT: every agent evaluates the same bars independently.
        let candidates: Vec<Signal> = self
            .registry
            .iter()
            .filter_map(|agent| agent.generate_signal(symbol, candles))
            .collect();
        debug!(symbol, candidates = candidates.len(), "agents evaluated");

        // DETECT_REGIME
        let market_regime = regime::detect_regime(candles);
        debug!(symbol, regime = %market_regime, "market regime detected");

        // GROUP_CONFLICTS
        let partition =
            conflict::group_conflicts(candidates, self.config.conflict_window_seconds);
        debug!(
            symbol,
            groups = partition.groups.len(),
            standalone = partition.standalone.len(),
            "conflicts grouped"
        );

        // RESOLVE_EACH_GROUP: resolving one group is independent of the
        // others; WAIT suppresses the whole group.
        let mut resolutions = Vec::with_capacity(partition.groups.len());
        let mut survivors = Vec::new();
        for group in &partition.groups {
            let resolution =
                resolver::resolve(group, market_regime, &self.weights, self.config.min_consensus);
            debug!(
                symbol,
                action = %resolution.action,
                confidence = resolution.confidence,
                "conflict resolved"
            );
            if let Some(promoted) = resolver::promote_winner(group, &resolution) {
                survivors.push(promoted);
            }
            resolutions.push(resolution);
        }
        survivors.extend(partition.standalone);

        // VALIDATE_ALL
        let validated = survivors
            .into_iter()
            .map(|signal| validator::validate(signal, candles));

        // FILTER_BY_CONFIDENCE -> FINAL_SET
        let mut signals: Vec<Signal> = validated
            .filter(|signal| signal.confidence >= self.config.min_confidence_threshold)
            .collect();
        signals.sort_by_key(|s| s.timestamp);
        debug!(symbol, finals = signals.len(), "cycle complete");

        CycleOutput {
            symbol: symbol.to_string(),
            regime: market_regime,
            signals,
            resolutions,
        }
    }
}

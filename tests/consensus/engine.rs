//! Unit tests for the full evaluation cycle

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use concordia::agents::{AgentRegistry, StrategyAgent};
use concordia::config::Config;
use concordia::consensus::{ConsensusEngine, WeightTable};
use concordia::models::{Candle, MarketRegime, ResolutionAction, Signal, SignalAction};

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 18, 0, 0, 0).unwrap()
}

fn flat_candles(count: usize) -> Vec<Candle> {
    (0..count)
        .map(|i| {
            Candle::new(
                100.0,
                100.2,
                99.8,
                100.0,
                1000.0,
                base_time() + Duration::minutes(i as i64),
            )
        })
        .collect()
}

/// Fixed-opinion agent used to drive the pipeline deterministically.
struct Stub {
    name: &'static str,
    action: SignalAction,
    confidence: f64,
    offset_secs: i64,
}

impl StrategyAgent for Stub {
    fn name(&self) -> &'static str {
        self.name
    }

    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> Option<Signal> {
        let last = candles.last()?;
        Some(Signal::new(
            self.name,
            symbol,
            self.action,
            self.confidence,
            last.close,
            last.timestamp + Duration::seconds(self.offset_secs),
        ))
    }
}

fn stub_registry(stubs: Vec<Stub>) -> AgentRegistry {
    let mut registry = AgentRegistry::new();
    for stub in stubs {
        registry.register(Arc::new(stub));
    }
    registry
}

fn test_config(min_confidence_threshold: f64) -> Config {
    Config {
        min_confidence_threshold,
        ..Config::default()
    }
}

#[test]
fn near_tie_conflict_is_suppressed_with_an_audit_trail() {
    let registry = stub_registry(vec![
        Stub { name: "AgentA", action: SignalAction::Buy, confidence: 0.825, offset_secs: 0 },
        Stub { name: "AgentB", action: SignalAction::Sell, confidence: 0.775, offset_secs: 60 },
    ]);
    let engine = ConsensusEngine::new(registry, WeightTable::empty(), test_config(0.70));
    let output = engine.run_cycle("X", &flat_candles(60));

    assert_eq!(output.regime, MarketRegime::Ranging);
    assert!(output.signals.is_empty());
    assert_eq!(output.resolutions.len(), 1);
    let resolution = &output.resolutions[0];
    assert_eq!(resolution.action, ResolutionAction::Wait);
    assert!((resolution.confidence - 0.515625).abs() < 1e-9);
}

#[test]
fn weighted_winner_is_promoted_and_survives() {
    let registry = stub_registry(vec![
        Stub { name: "AgentA", action: SignalAction::Buy, confidence: 0.825, offset_secs: 0 },
        Stub { name: "AgentB", action: SignalAction::Sell, confidence: 0.775, offset_secs: 60 },
    ]);
    let mut weights = WeightTable::empty();
    weights.set(MarketRegime::Ranging, "AgentA", 2.0);
    let engine = ConsensusEngine::new(registry, weights, test_config(0.50));
    let output = engine.run_cycle("X", &flat_candles(60));

    assert_eq!(output.resolutions.len(), 1);
    assert_eq!(output.resolutions[0].action, ResolutionAction::Buy);
    assert_eq!(output.signals.len(), 1);
    let promoted = &output.signals[0];
    assert_eq!(promoted.agent, "AgentA");
    assert!(promoted.is_consensus_derived());
    // 1.65 / 2.425; the flat market adds no technical bonus on top.
    assert!((promoted.confidence - 0.680412371134).abs() < 1e-9);
    assert_eq!(promoted.original_confidence, Some(promoted.confidence));
}

#[test]
fn non_conflicting_signal_passes_the_filter_untouched_by_consensus() {
    let registry = stub_registry(vec![Stub {
        name: "AgentA",
        action: SignalAction::Buy,
        confidence: 0.9,
        offset_secs: 0,
    }]);
    let engine = ConsensusEngine::new(registry, WeightTable::empty(), test_config(0.70));
    let output = engine.run_cycle("X", &flat_candles(60));

    assert!(output.resolutions.is_empty());
    assert_eq!(output.signals.len(), 1);
    assert!(!output.signals[0].is_consensus_derived());
    assert!((output.signals[0].confidence - 0.9).abs() < 1e-9);
}

#[test]
fn low_confidence_signals_are_filtered_out() {
    let registry = stub_registry(vec![Stub {
        name: "AgentA",
        action: SignalAction::Buy,
        confidence: 0.4,
        offset_secs: 0,
    }]);
    let engine = ConsensusEngine::new(registry, WeightTable::empty(), test_config(0.70));
    let output = engine.run_cycle("X", &flat_candles(60));
    assert!(output.signals.is_empty());
    assert!(output.resolutions.is_empty());
}

#[test]
fn cycles_are_stateless_and_repeatable() {
    let engine = ConsensusEngine::new(
        stub_registry(vec![
            Stub { name: "AgentA", action: SignalAction::Buy, confidence: 0.825, offset_secs: 0 },
            Stub { name: "AgentB", action: SignalAction::Sell, confidence: 0.775, offset_secs: 60 },
        ]),
        WeightTable::empty(),
        test_config(0.70),
    );
    let candles = flat_candles(60);
    let first = engine.run_cycle("X", &candles);
    let second = engine.run_cycle("X", &candles);
    assert_eq!(first.resolutions, second.resolutions);
    assert_eq!(first.signals, second.signals);
}

#[test]
fn empty_bars_produce_an_empty_cycle() {
    let engine = ConsensusEngine::new(
        AgentRegistry::with_default_philosophers(),
        WeightTable::default(),
        test_config(0.70),
    );
    let output = engine.run_cycle("X", &[]);
    assert_eq!(output.regime, MarketRegime::Ranging);
    assert!(output.signals.is_empty());
    assert!(output.resolutions.is_empty());
}

#[test]
fn final_set_confidence_is_always_in_bounds() {
    let registry = stub_registry(vec![
        Stub { name: "AgentA", action: SignalAction::Buy, confidence: 0.95, offset_secs: 0 },
        Stub { name: "AgentB", action: SignalAction::Buy, confidence: 0.90, offset_secs: 30 },
        Stub { name: "AgentC", action: SignalAction::Sell, confidence: 0.05, offset_secs: 60 },
    ]);
    let engine = ConsensusEngine::new(registry, WeightTable::empty(), test_config(0.0));
    let output = engine.run_cycle("X", &flat_candles(60));
    for signal in &output.signals {
        assert!((0.0..=1.0).contains(&signal.confidence));
    }
    for resolution in &output.resolutions {
        assert!((0.0..=1.0).contains(&resolution.confidence));
    }
}

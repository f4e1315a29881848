//! Unit tests for weighted consensus resolution

use chrono::{Duration, TimeZone, Utc};
use concordia::consensus::{promote_winner, resolve, WeightTable};
use concordia::models::{
    ConflictGroup, MarketRegime, Resolution, ResolutionAction, Signal, SignalAction,
};
use proptest::prelude::*;

fn base_time() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 8, 18, 1, 42, 0).unwrap()
}

fn signal(agent: &str, action: SignalAction, confidence: f64, offset_secs: i64) -> Signal {
    Signal::new(
        agent,
        "X",
        action,
        confidence,
        0.22,
        base_time() + Duration::seconds(offset_secs),
    )
}

fn group(signals: Vec<Signal>) -> ConflictGroup {
    ConflictGroup {
        symbol: "X".to_string(),
        signals,
    }
}

#[test]
fn near_tie_resolves_to_wait() {
    // 0.825 vs 0.775 at equal weight: 51.6% / 48.4%, neither side reaches
    // the 60% consensus bar.
    let group = group(vec![
        signal("A", SignalAction::Buy, 0.825, 0),
        signal("B", SignalAction::Sell, 0.775, 60),
    ]);
    let resolution = resolve(&group, MarketRegime::Ranging, &WeightTable::empty(), 0.60);
    assert_eq!(resolution.action, ResolutionAction::Wait);
    assert!((resolution.confidence - 0.515625).abs() < 1e-9);
    assert_eq!(resolution.agents_buy, vec!["A"]);
    assert_eq!(resolution.agents_sell, vec!["B"]);
    assert!(promote_winner(&group, &resolution).is_none());
}

#[test]
fn regime_weighting_breaks_the_tie() {
    // Same two opinions, but the buyer carries weight 2.0 under TRENDING:
    // 1.65 / 2.425 = 68.0%.
    let mut weights = WeightTable::empty();
    weights.set(MarketRegime::Trending, "A", 2.0);
    let group = group(vec![
        signal("A", SignalAction::Buy, 0.825, 0),
        signal("B", SignalAction::Sell, 0.775, 60),
    ]);
    let resolution = resolve(&group, MarketRegime::Trending, &weights, 0.60);
    assert_eq!(resolution.action, ResolutionAction::Buy);
    assert!((resolution.confidence - 0.680412371134).abs() < 1e-9);
    assert_eq!(resolution.agents_buy, vec!["A"]);
    assert_eq!(resolution.agents_sell, vec!["B"]);

    let promoted = promote_winner(&group, &resolution).unwrap();
    assert_eq!(promoted.agent, "A");
    assert!((promoted.confidence - resolution.confidence).abs() < 1e-12);
    let audit = promoted.consensus.unwrap();
    assert_eq!(audit.agents_buy, vec!["A"]);
    assert_eq!(audit.agents_sell, vec!["B"]);
}

#[test]
fn zero_total_score_is_an_even_wait() {
    let group = group(vec![
        signal("A", SignalAction::Buy, 0.0, 0),
        signal("B", SignalAction::Sell, 0.0, 60),
    ]);
    let resolution = resolve(&group, MarketRegime::Ranging, &WeightTable::empty(), 0.60);
    assert_eq!(resolution.action, ResolutionAction::Wait);
    assert!((resolution.confidence - 0.5).abs() < 1e-12);
}

#[test]
fn hold_opinions_carry_no_weight() {
    let group = group(vec![
        signal("A", SignalAction::Buy, 0.9, 0),
        signal("B", SignalAction::Hold, 0.9, 30),
        signal("C", SignalAction::Sell, 0.3, 60),
    ]);
    let resolution = resolve(&group, MarketRegime::Ranging, &WeightTable::empty(), 0.60);
    // 0.9 / 1.2 = 75% BUY; the HOLD neither scores nor appears on a side.
    assert_eq!(resolution.action, ResolutionAction::Buy);
    assert!((resolution.confidence - 0.75).abs() < 1e-9);
    assert_eq!(resolution.agents_buy, vec!["A"]);
    assert_eq!(resolution.agents_sell, vec!["C"]);
}

#[test]
fn unknown_agent_defaults_to_weight_one() {
    let group = group(vec![
        signal("Unknown1", SignalAction::Buy, 0.9, 0),
        signal("Unknown2", SignalAction::Sell, 0.3, 60),
    ]);
    let resolution = resolve(&group, MarketRegime::Volatile, &WeightTable::default(), 0.60);
    assert!((resolution.confidence - 0.75).abs() < 1e-9);
    assert_eq!(resolution.action, ResolutionAction::Buy);
}

#[test]
fn resolution_timestamp_is_the_latest_member() {
    let group = group(vec![
        signal("A", SignalAction::Buy, 0.9, 0),
        signal("B", SignalAction::Sell, 0.2, 120),
    ]);
    let resolution = resolve(&group, MarketRegime::Ranging, &WeightTable::empty(), 0.60);
    assert_eq!(resolution.timestamp, base_time() + Duration::seconds(120));
}

#[test]
fn promotion_picks_the_strongest_signal_on_the_winning_side() {
    let group = group(vec![
        signal("A", SignalAction::Buy, 0.65, 0),
        signal("B", SignalAction::Buy, 0.85, 30),
        signal("C", SignalAction::Sell, 0.2, 60),
    ]);
    let resolution = resolve(&group, MarketRegime::Ranging, &WeightTable::empty(), 0.60);
    assert_eq!(resolution.action, ResolutionAction::Buy);
    let promoted = promote_winner(&group, &resolution).unwrap();
    assert_eq!(promoted.agent, "B");
    assert!(promoted.is_consensus_derived());
}

#[test]
fn resolution_is_order_independent() {
    let forward = group(vec![
        signal("A", SignalAction::Buy, 0.825, 0),
        signal("B", SignalAction::Sell, 0.775, 60),
    ]);
    let reversed = group(vec![
        signal("B", SignalAction::Sell, 0.775, 60),
        signal("A", SignalAction::Buy, 0.825, 0),
    ]);
    let weights = WeightTable::default();
    let first = resolve(&forward, MarketRegime::Ranging, &weights, 0.60);
    let second = resolve(&reversed, MarketRegime::Ranging, &weights, 0.60);
    assert_eq!(first, second);
}

fn arbitrary_members() -> impl Strategy<Value = Vec<(bool, f64, u8)>> {
    prop::collection::vec((any::<bool>(), 0.0..1.0f64, 0u8..12), 2..8)
}

fn regime_strategy() -> impl Strategy<Value = MarketRegime> {
    prop_oneof![
        Just(MarketRegime::Trending),
        Just(MarketRegime::Ranging),
        Just(MarketRegime::Volatile),
    ]
}

proptest! {
    #[test]
    fn confidence_is_always_clamped(members in arbitrary_members(), regime in regime_strategy()) {
        let signals: Vec<Signal> = members
            .iter()
            .enumerate()
            .map(|(i, (is_buy, confidence, agent))| {
                let action = if *is_buy { SignalAction::Buy } else { SignalAction::Sell };
                signal(&format!("agent-{agent}"), action, *confidence, i as i64 * 10)
            })
            .collect();
        let group = group(signals);
        let resolution = resolve(&group, regime, &WeightTable::default(), 0.60);
        prop_assert!((0.0..=1.0).contains(&resolution.confidence));
        if let Some(promoted) = promote_winner(&group, &resolution) {
            prop_assert!((0.0..=1.0).contains(&promoted.confidence));
        }
    }

    #[test]
    fn resolving_twice_is_identical(members in arbitrary_members(), regime in regime_strategy()) {
        let signals: Vec<Signal> = members
            .iter()
            .enumerate()
            .map(|(i, (is_buy, confidence, agent))| {
                let action = if *is_buy { SignalAction::Buy } else { SignalAction::Sell };
                signal(&format!("agent-{agent}"), action, *confidence, i as i64 * 10)
            })
            .collect();
        let group = group(signals);
        let first: Resolution = resolve(&group, regime, &WeightTable::default(), 0.60);
        let second: Resolution = resolve(&group, regime, &WeightTable::default(), 0.60);
        prop_assert_eq!(first, second);
    }
}

//! Strategy agent framework: the capability interface, a shared indicator
//! snapshot, and the identity-keyed registry.

pub mod aristoteles;
pub mod confucio;
pub mod descartes;
pub mod kant;
pub mod nietzsche;
pub mod platon;
pub mod socrates;
pub mod suntzu;

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::common::math;
use crate::indicators::momentum::{macd, rsi};
use crate::indicators::trend::ema;
use crate::indicators::volatility::{atr, bollinger};
use crate::models::{Candle, Signal};

/// Minimum history every agent needs before it will form an opinion.
pub const MIN_CANDLES: usize = 50;

/// An independent strategy producing at most one directional opinion per
/// evaluation. Implementations own their parameters, share no state, and
/// perform no I/O.
pub trait StrategyAgent: Send + Sync {
    /// Stable identity used for registry and weight-table lookups.
    fn name(&self) -> &'static str;

    /// Evaluate the instrument. `None` is the normal "nothing interesting"
    /// outcome, including for insufficient history.
    fn generate_signal(&self, symbol: &str, candles: &[Candle]) -> Option<Signal>;
}

/// Indicator snapshot an agent derives from the bars it was handed.
///
/// Each agent builds its own view inside `generate_signal`; the struct only
/// exists so the eight strategies don't repeat the same plumbing.
#[derive(Debug, Clone)]
pub struct MarketView {
    pub close: f64,
    pub timestamp: DateTime<Utc>,
    pub rsi: Option<f64>,
    pub macd: Option<macd::MacdLine>,
    pub ema_9: Option<f64>,
    pub ema_20: Option<f64>,
    pub ema_21: Option<f64>,
    pub ema_50: Option<f64>,
    pub bollinger: Option<bollinger::BollingerBands>,
    pub atr: Option<f64>,
    pub volume_ratio: Option<f64>,
    pub support_20: Option<f64>,
    pub resistance_20: Option<f64>,
    pub low_50: Option<f64>,
    pub high_50: Option<f64>,
}

impl MarketView {
    /// Build the snapshot, or `None` below the minimum history.
    pub fn from_candles(candles: &[Candle]) -> Option<Self> {
        if candles.len() < MIN_CANDLES {
            return None;
        }
        let last = candles.last()?;

        let volumes: Vec<f64> = candles.iter().map(|c| c.volume).collect();
        let volume_ratio = math::sma(&volumes, 20).and_then(|avg| {
            if avg > 0.0 {
                Some(last.volume / avg)
            } else {
                None
            }
        });

        let window_20 = &candles[candles.len() - 20..];
        let window_50 = &candles[candles.len() - 50..];

        Some(Self {
            close: last.close,
            timestamp: last.timestamp,
            rsi: rsi::calculate_rsi_default(candles),
            macd: macd::calculate_macd_default(candles),
            ema_9: ema::calculate_ema(candles, 9),
            ema_20: ema::calculate_ema(candles, 20),
            ema_21: ema::calculate_ema(candles, 21),
            ema_50: ema::calculate_ema(candles, 50),
            bollinger: bollinger::calculate_bollinger_default(candles),
            atr: atr::calculate_atr_default(candles),
            volume_ratio,
            support_20: window_20.iter().map(|c| c.low).fold(None, fold_min),
            resistance_20: window_20.iter().map(|c| c.high).fold(None, fold_max),
            low_50: window_50.iter().map(|c| c.low).fold(None, fold_min),
            high_50: window_50.iter().map(|c| c.high).fold(None, fold_max),
        })
    }
}

fn fold_min(acc: Option<f64>, value: f64) -> Option<f64> {
    match acc {
        Some(current) if current <= value => Some(current),
        _ => Some(value),
    }
}

fn fold_max(acc: Option<f64>, value: f64) -> Option<f64> {
    match acc {
        Some(current) if current >= value => Some(current),
        _ => Some(value),
    }
}

/// Identity-keyed set of strategy agents. Read-only during evaluation;
/// iteration order is the sorted identity order, so a cycle over the same
/// registry is deterministic.
pub struct AgentRegistry {
    agents: BTreeMap<String, Arc<dyn StrategyAgent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: BTreeMap::new(),
        }
    }

    /// Registry preloaded with the eight philosopher strategies.
    pub fn with_default_philosophers() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(aristoteles::Aristoteles::new()));
        registry.register(Arc::new(confucio::Confucio::new()));
        registry.register(Arc::new(descartes::Descartes::new()));
        registry.register(Arc::new(kant::Kant::new()));
        registry.register(Arc::new(nietzsche::Nietzsche::new()));
        registry.register(Arc::new(platon::Platon::new()));
        registry.register(Arc::new(socrates::Socrates::new()));
        registry.register(Arc::new(suntzu::SunTzu::new()));
        registry
    }

    /// Register an agent under its own identity. A later registration with
    /// the same identity replaces the earlier one.
    pub fn register(&mut self, agent: Arc<dyn StrategyAgent>) {
        self.agents.insert(agent.name().to_string(), agent);
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn StrategyAgent>> {
        self.agents.get(name)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Arc<dyn StrategyAgent>> {
        self.agents.values()
    }

    pub fn names(&self) -> Vec<&str> {
        self.agents.keys().map(String::as_str).collect()
    }

    pub fn len(&self) -> usize {
        self.agents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::with_default_philosophers()
    }
}

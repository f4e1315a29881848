//! Concordia: a multi-agent signal consensus engine for crypto markets.
//!
//! Independent strategy agents each form a directional opinion from the same
//! bars; opposing opinions close together in time are grouped, resolved by
//! regime-weighted voting, cross-checked against secondary indicators, and
//! filtered by confidence into a final signal set.

pub mod agents;
pub mod common;
pub mod config;
pub mod consensus;
pub mod error;
pub mod indicators;
pub mod logging;
pub mod models;
pub mod regime;
pub mod runtime;

pub use agents::{AgentRegistry, StrategyAgent};
pub use config::Config;
pub use consensus::{ConsensusEngine, CycleOutput, WeightTable};
pub use error::{EngineError, FeedError};
pub use models::{Candle, MarketRegime, Resolution, ResolutionAction, Signal, SignalAction};

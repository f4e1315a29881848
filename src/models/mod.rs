//! Shared data models spanning the engine layers.

pub mod market;
pub mod regime;
pub mod signal;

pub use market::Candle;
pub use regime::MarketRegime;
pub use signal::{
    clamp_confidence, ConflictGroup, ConsensusAudit, Resolution, ResolutionAction, Signal,
    SignalAction,
};

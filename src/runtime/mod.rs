//! Evaluation runtime: feed/sink contracts and the scheduled loop.

pub mod feed;
pub mod scheduler;
pub mod sink;

pub use feed::MarketDataFeed;
pub use scheduler::{EngineRuntime, CANDLE_HISTORY};
pub use sink::SignalSink;

//! Error taxonomy of the engine boundary.
//!
//! Missing data and configuration gaps are handled locally (absent signal,
//! RANGING fallback, default weight) and never become errors; only feed
//! failures and a fully dry evaluation tick surface as values here.

use thiserror::Error;

/// Failure fetching bars from a market data feed implementation.
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("no bars available for {0}")]
    Empty(String),
    #[error("feed unavailable: {0}")]
    Unavailable(String),
}

/// Failure of the evaluation runtime as a whole.
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("no market data available for any configured symbol")]
    NoMarketData,
    #[error("invalid evaluation schedule: {0}")]
    InvalidSchedule(String),
}

//! Market data feed contract.

use async_trait::async_trait;

use crate::error::FeedError;
use crate::models::Candle;

/// Supplies time-ordered bar sequences per instrument. Implemented by the
/// external market-data collaborator; the engine only consumes it.
#[async_trait]
pub trait MarketDataFeed: Send + Sync {
    /// Fetch up to `limit` most recent bars for a symbol, oldest first.
    async fn fetch_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, FeedError>;
}

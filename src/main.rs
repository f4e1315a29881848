use std::sync::Arc;

use async_trait::async_trait;
use chrono::{Duration, Utc};
use concordia::agents::AgentRegistry;
use concordia::config::Config;
use concordia::consensus::{ConsensusEngine, CycleOutput, WeightTable};
use concordia::error::FeedError;
use concordia::models::Candle;
use concordia::runtime::{EngineRuntime, MarketDataFeed, SignalSink};

/// Deterministic in-memory feed used by the demo: a capitulation profile for
/// the first symbol, a quiet range for everything else.
struct SyntheticFeed;

#[async_trait]
impl MarketDataFeed for SyntheticFeed {
    async fn fetch_candles(&self, symbol: &str, limit: usize) -> Result<Vec<Candle>, FeedError> {
        let start = Utc::now() - Duration::minutes(limit as i64);
        let mut candles = Vec::with_capacity(limit);

        for i in 0..limit {
            let timestamp = start + Duration::minutes(i as i64);
            let candle = if symbol.starts_with("BTC") {
                // Steady sell-off with a volume rush into the lows.
                let price = 100.0 * (1.0 - 0.004 * i as f64);
                let volume = if i + 5 >= limit { 3000.0 } else { 1000.0 };
                Candle::new(price * 1.004, price * 1.005, price * 0.999, price, volume, timestamp)
            } else {
                // Narrow range around 50.
                let phase = (i % 20) as f64 / 20.0;
                let price = 50.0 + (phase - 0.5).abs() * 2.0;
                Candle::new(price, price + 0.1, price - 0.1, price, 1000.0, timestamp)
            };
            candles.push(candle);
        }

        Ok(candles)
    }
}

/// Prints each cycle's final records as JSON.
struct StdoutSink;

#[async_trait]
impl SignalSink for StdoutSink {
    async fn publish(
        &self,
        output: &CycleOutput,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        println!("{}", serde_json::to_string_pretty(output)?);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    concordia::logging::init_logging();

    let mut config = Config::from_env();
    if config.symbols.len() < 2 {
        config.symbols = vec!["BTC-USD".to_string(), "ETH-USD".to_string()];
    }

    let engine = Arc::new(ConsensusEngine::new(
        AgentRegistry::with_default_philosophers(),
        WeightTable::default(),
        config.clone(),
    ));
    let runtime = EngineRuntime::new(engine, Arc::new(SyntheticFeed), Arc::new(StdoutSink), &config)?;

    let outputs = runtime.run_once().await?;
    for output in &outputs {
        println!(
            "{}: regime {}, {} final signal(s), {} resolution(s)",
            output.symbol,
            output.regime,
            output.signals.len(),
            output.resolutions.len()
        );
    }

    Ok(())
}

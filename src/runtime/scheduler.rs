//! Cron-driven evaluation loop over the configured symbols.

use std::str::FromStr;
use std::sync::Arc;

use cron::Schedule;
use futures_util::future::join_all;
use tokio::sync::RwLock;
use tracing::{debug, error, info, warn};

use crate::config::Config;
use crate::consensus::{ConsensusEngine, CycleOutput};
use crate::error::EngineError;
use crate::runtime::feed::MarketDataFeed;
use crate::runtime::sink::SignalSink;

/// Bars requested from the feed per cycle; enough history for every
/// indicator the agents and the regime detector use.
pub const CANDLE_HISTORY: usize = 200;

/// Periodically evaluates every configured symbol and hands the final sets
/// to the sink. One cycle per symbol per tick, symbols in parallel; a cycle
/// started is always run to completion.
pub struct EngineRuntime {
    engine: Arc<ConsensusEngine>,
    feed: Arc<dyn MarketDataFeed>,
    sink: Arc<dyn SignalSink>,
    schedule: Schedule,
    symbols: Vec<String>,
    handle: Arc<RwLock<Option<tokio::task::JoinHandle<()>>>>,
}

impl EngineRuntime {
    /// Build the runtime from an engine and its collaborators. The tick
    /// schedule is derived from the configured interval.
    pub fn new(
        engine: Arc<ConsensusEngine>,
        feed: Arc<dyn MarketDataFeed>,
        sink: Arc<dyn SignalSink>,
        config: &Config,
    ) -> Result<Self, EngineError> {
        let interval = config.evaluation_interval_seconds;
        if interval == 0 {
            return Err(EngineError::InvalidSchedule(
                "evaluation interval is 0 (scheduler disabled)".to_string(),
            ));
        }

        // Cron format: second minute hour day month weekday.
        let cron_expr = if interval >= 60 {
            format!("0 */{} * * * *", interval / 60)
        } else {
            format!("*/{} * * * * *", interval)
        };
        let schedule = Schedule::from_str(&cron_expr)
            .map_err(|e| EngineError::InvalidSchedule(format!("{cron_expr}: {e}")))?;

        info!(
            interval,
            cron = %cron_expr,
            symbols = ?config.symbols,
            "evaluation runtime configured"
        );

        Ok(Self {
            engine,
            feed,
            sink,
            schedule,
            symbols: config.symbols.clone(),
            handle: Arc::new(RwLock::new(None)),
        })
    }

    /// Run a single evaluation tick across all symbols.
    ///
    /// Per-symbol feed failures are contained (logged, symbol skipped);
    /// only a tick in which every symbol failed to produce data is an
    /// error.
    pub async fn run_once(&self) -> Result<Vec<CycleOutput>, EngineError> {
        evaluate_tick(
            self.engine.clone(),
            self.feed.clone(),
            self.sink.clone(),
            self.symbols.clone(),
        )
        .await
    }

    /// Start the scheduled loop in a background task.
    pub async fn start(&self) {
        let engine = self.engine.clone();
        let feed = self.feed.clone();
        let sink = self.sink.clone();
        let symbols = self.symbols.clone();
        let schedule = self.schedule.clone();

        let handle = tokio::spawn(async move {
            info!("evaluation runtime started, waiting for first tick");
            loop {
                let mut upcoming = schedule.upcoming(chrono::Utc);
                match upcoming.next() {
                    Some(next_tick) => {
                        let now = chrono::Utc::now();
                        if next_tick > now {
                            let wait = (next_tick - now).to_std().unwrap_or_default();
                            tokio::time::sleep(wait).await;
                        }
                    }
                    None => {
                        tokio::time::sleep(tokio::time::Duration::from_secs(60)).await;
                        continue;
                    }
                }

                debug!("evaluation tick");
                match evaluate_tick(
                    engine.clone(),
                    feed.clone(),
                    sink.clone(),
                    symbols.clone(),
                )
                .await
                {
                    Ok(outputs) => {
                        let finals: usize = outputs.iter().map(|o| o.signals.len()).sum();
                        info!(cycles = outputs.len(), finals, "tick complete");
                    }
                    Err(e) => error!(error = %e, "tick failed"),
                }
            }
        });

        let mut slot = self.handle.write().await;
        *slot = Some(handle);
    }

    /// Stop the scheduled loop. Per-symbol cycles already spawned by a tick
    /// are not cancelled; they run to completion.
    pub async fn stop(&self) {
        let mut slot = self.handle.write().await;
        if let Some(handle) = slot.take() {
            handle.abort();
            info!("evaluation runtime stopped");
        }
    }

    pub async fn is_running(&self) -> bool {
        self.handle.read().await.is_some()
    }
}

/// One tick: fetch, evaluate and publish every symbol concurrently.
async fn evaluate_tick(
    engine: Arc<ConsensusEngine>,
    feed: Arc<dyn MarketDataFeed>,
    sink: Arc<dyn SignalSink>,
    symbols: Vec<String>,
) -> Result<Vec<CycleOutput>, EngineError> {
    let symbol_count = symbols.len();
    let tasks = symbols.into_iter().map(|symbol| {
        let engine = engine.clone();
        let feed = feed.clone();
        let sink = sink.clone();

        tokio::spawn(async move {
            match feed.fetch_candles(&symbol, CANDLE_HISTORY).await {
                Ok(candles) if !candles.is_empty() => {
                    let output = engine.run_cycle(&symbol, &candles);
                    if let Err(e) = sink.publish(&output).await {
                        error!(symbol = %output.symbol, error = %e, "sink publish failed");
                    }
                    Some(output)
                }
                Ok(_) => {
                    warn!(symbol = %symbol, "feed returned no bars, skipping cycle");
                    None
                }
                Err(e) => {
                    warn!(symbol = %symbol, error = %e, "feed failed, skipping cycle");
                    None
                }
            }
        })
    });

    let outputs: Vec<CycleOutput> = join_all(tasks)
        .await
        .into_iter()
        .filter_map(|joined| joined.ok().flatten())
        .collect();

    if outputs.is_empty() && symbol_count > 0 {
        return Err(EngineError::NoMarketData);
    }
    Ok(outputs)
}

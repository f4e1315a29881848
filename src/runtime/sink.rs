//! Output contract for final signal sets.

use async_trait::async_trait;

use crate::consensus::CycleOutput;

/// Receives each cycle's final records. Implemented by the external
/// persistence/notification/execution collaborators. Publish failures are
/// the sink's own concern; the runtime logs and moves on.
#[async_trait]
pub trait SignalSink: Send + Sync {
    async fn publish(
        &self,
        output: &CycleOutput,
    ) -> Result<(), Box<dyn std::error::Error + Send + Sync>>;
}

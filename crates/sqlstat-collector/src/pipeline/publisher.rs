use std::sync::Arc;

use tokio::sync::mpsc;

use sqlstat_core::Update;

use super::{PipelineStats, ShutdownSignal};
use crate::registry::GaugeRegistry;

/// Consumer loop: applies updates to the registry in receipt order.
///
/// On shutdown, queued updates are not drained.
pub async fn run_publisher(
    mut rx: mpsc::Receiver<Update>,
    registry: Arc<GaugeRegistry>,
    mut shutdown: ShutdownSignal,
    stats: Arc<PipelineStats>,
) {
    tracing::debug!("publisher started");

    loop {
        let update = tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            next = rx.recv() => match next {
                Some(u) => u,
                None => break,
            },
        };
        apply(&registry, &stats, update);
    }

    tracing::debug!("publisher stopped");
}

/// A rejected update is logged and counted; the loop keeps going.
fn apply(registry: &GaugeRegistry, stats: &PipelineStats, update: Update) {
    match registry.set_by_name(update.name, update.value) {
        Ok(()) => stats.record_applied(),
        Err(e) => {
            stats.record_publish_error();
            tracing::error!(
                metric = %update.name,
                kind = e.kind().as_str(),
                error = %e,
                "failed to publish pool metric"
            );
        }
    }
}

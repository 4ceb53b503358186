use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::MissedTickBehavior;

use sqlstat_core::{Pool, SnapshotReader, Update};

use super::{PipelineStats, ShutdownSignal};
use crate::config::options::duration_ms;

/// Producer loop: one snapshot per tick, eight updates per snapshot.
///
/// The next snapshot is only taken after every update of the current one was
/// accepted by the channel. A full channel blocks the loop; nothing is dropped.
pub async fn run_sampler(
    pool: Arc<dyn Pool>,
    interval: Duration,
    tx: mpsc::Sender<Update>,
    mut shutdown: ShutdownSignal,
    stats: Arc<PipelineStats>,
) {
    let mut tick = tokio::time::interval(interval);
    tick.set_missed_tick_behavior(MissedTickBehavior::Delay);

    tracing::debug!(interval_ms = duration_ms(interval), "sampler started");

    'sampling: loop {
        tokio::select! {
            biased;
            _ = shutdown.cancelled() => break,
            _ = tick.tick() => {}
        }

        let snapshot = SnapshotReader::read(pool.as_ref());
        stats.record_tick();
        tracing::trace!(?snapshot, "pool sampled");

        for update in snapshot.updates() {
            tokio::select! {
                biased;
                _ = shutdown.cancelled() => break 'sampling,
                sent = tx.send(update) => {
                    if sent.is_err() {
                        tracing::debug!("update channel closed");
                        break 'sampling;
                    }
                }
            }
        }
    }

    tracing::debug!("sampler stopped");
}

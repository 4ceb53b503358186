//! Background sampling pipeline.
//!
//! `sampler` reads the pool on every tick and pushes eight updates into a
//! bounded channel, `publisher` drains the channel into the gauge registry.
//! Both race every blocking wait against a shared [`ShutdownSignal`].

mod publisher;
mod sampler;

use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

pub use publisher::run_publisher;
pub use sampler::run_sampler;

/// Pipeline counters, shared by both loops.
#[derive(Debug, Default)]
pub struct PipelineStats {
    ticks: AtomicU64,
    updates_applied: AtomicU64,
    publish_errors: AtomicU64,
}

/// Point-in-time copy of [`PipelineStats`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStatsSnapshot {
    /// Pool snapshots taken.
    pub ticks: u64,
    /// Updates written to the registry.
    pub updates_applied: u64,
    /// Updates the registry rejected.
    pub publish_errors: u64,
}

impl PipelineStats {
    pub fn snapshot(&self) -> PipelineStatsSnapshot {
        PipelineStatsSnapshot {
            ticks: self.ticks.load(Ordering::Relaxed),
            updates_applied: self.updates_applied.load(Ordering::Relaxed),
            publish_errors: self.publish_errors.load(Ordering::Relaxed),
        }
    }

    fn record_tick(&self) {
        self.ticks.fetch_add(1, Ordering::Relaxed);
    }

    fn record_applied(&self) {
        self.updates_applied.fetch_add(1, Ordering::Relaxed);
    }

    fn record_publish_error(&self) {
        self.publish_errors.fetch_add(1, Ordering::Relaxed);
    }
}

/// Create a linked trigger/signal pair.
pub fn shutdown_channel() -> (ShutdownTrigger, ShutdownSignal) {
    let (tx, rx) = watch::channel(false);
    (ShutdownTrigger(tx), ShutdownSignal(rx))
}

/// Sending side of the shutdown signal. Dropping it also counts as shutdown.
#[derive(Debug)]
pub struct ShutdownTrigger(watch::Sender<bool>);

impl ShutdownTrigger {
    pub fn trigger(&self) {
        self.0.send_replace(true);
    }
}

#[derive(Debug, Clone)]
pub struct ShutdownSignal(watch::Receiver<bool>);

impl ShutdownSignal {
    /// Resolves once shutdown was triggered or the trigger was dropped.
    /// Cancel-safe.
    pub async fn cancelled(&mut self) {
        while !*self.0.borrow_and_update() {
            if self.0.changed().await.is_err() {
                return;
            }
        }
    }
}

//! Sampler and publisher loops driven directly, without the collector.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::time::timeout;

use sqlstat_collector::pipeline::{run_publisher, run_sampler, shutdown_channel, PipelineStats};
use sqlstat_collector::GaugeRegistry;
use sqlstat_core::{MemoryPool, MetricName, Pool, PoolSnapshot, Update};

const WAIT: Duration = Duration::from_secs(2);

fn registry() -> Arc<GaugeRegistry> {
    let reg = GaugeRegistry::new();
    for name in MetricName::ALL {
        reg.register(name, name.help(), "sql", "stat").unwrap();
    }
    Arc::new(reg)
}

#[tokio::test]
async fn sampler_emits_one_snapshot_in_canonical_order() {
    let pool: Arc<dyn Pool> = Arc::new(MemoryPool::with_snapshot(PoolSnapshot {
        max_open_connections: 16,
        open_connections: 3,
        ..PoolSnapshot::default()
    }));
    let (tx, mut rx) = mpsc::channel(8);
    let (trigger, signal) = shutdown_channel();
    let stats = Arc::new(PipelineStats::default());

    let task = tokio::spawn(run_sampler(
        pool,
        Duration::from_secs(60),
        tx,
        signal,
        Arc::clone(&stats),
    ));

    let mut got = Vec::new();
    for _ in 0..8 {
        got.push(timeout(WAIT, rx.recv()).await.unwrap().unwrap());
    }
    let names: Vec<MetricName> = got.iter().map(|u| u.name).collect();
    assert_eq!(names, MetricName::ALL.to_vec());
    assert_eq!(got[0].value, 16);
    assert_eq!(got[1].value, 3);

    trigger.trigger();
    timeout(WAIT, task).await.unwrap().unwrap();
    assert_eq!(stats.snapshot().ticks, 1);
}

#[tokio::test]
async fn sampler_blocks_instead_of_dropping() {
    let pool = Arc::new(MemoryPool::new());
    let dyn_pool: Arc<dyn Pool> = pool.clone();
    let (tx, mut rx) = mpsc::channel(1);
    let (trigger, signal) = shutdown_channel();
    let stats = Arc::new(PipelineStats::default());

    let task = tokio::spawn(run_sampler(
        dyn_pool,
        Duration::from_millis(5),
        tx,
        signal,
        Arc::clone(&stats),
    ));

    // Slow consumer: every update of three full ticks must arrive in order.
    let mut got: Vec<Update> = Vec::new();
    for _ in 0..24 {
        tokio::time::sleep(Duration::from_millis(2)).await;
        got.push(timeout(WAIT, rx.recv()).await.unwrap().unwrap());
    }
    for chunk in got.chunks(8) {
        let names: Vec<MetricName> = chunk.iter().map(|u| u.name).collect();
        assert_eq!(names, MetricName::ALL.to_vec());
    }

    trigger.trigger();
    timeout(WAIT, task).await.unwrap().unwrap();
}

#[tokio::test]
async fn sampler_stops_while_blocked_on_full_channel() {
    let pool: Arc<dyn Pool> = Arc::new(MemoryPool::new());
    let (tx, _rx) = mpsc::channel(1);
    let (trigger, signal) = shutdown_channel();

    let task = tokio::spawn(run_sampler(
        pool,
        Duration::from_millis(5),
        tx,
        signal,
        Arc::new(PipelineStats::default()),
    ));

    tokio::time::sleep(Duration::from_millis(20)).await;
    trigger.trigger();
    timeout(WAIT, task).await.unwrap().unwrap();
}

#[tokio::test]
async fn publisher_applies_in_fifo_order() {
    let reg = registry();
    let (tx, rx) = mpsc::channel(16);
    let (trigger, signal) = shutdown_channel();
    let stats = Arc::new(PipelineStats::default());

    for v in [1, 2, 3] {
        tx.send(Update {
            name: MetricName::InUse,
            value: v,
        })
        .await
        .unwrap();
    }
    drop(tx);

    let task = tokio::spawn(run_publisher(rx, Arc::clone(&reg), signal, Arc::clone(&stats)));
    timeout(WAIT, task).await.unwrap().unwrap();

    assert_eq!(reg.get(MetricName::InUse).unwrap().get(), 3);
    assert_eq!(stats.snapshot().updates_applied, 3);
    drop(trigger);
}

#[tokio::test]
async fn publisher_survives_unknown_metric() {
    let reg = Arc::new(GaugeRegistry::new());
    reg.register(MetricName::Idle, "idle", "sql", "stat").unwrap();

    let (tx, rx) = mpsc::channel(16);
    let (_trigger, signal) = shutdown_channel();
    let stats = Arc::new(PipelineStats::default());

    tx.send(Update {
        name: MetricName::InUse,
        value: 5,
    })
    .await
    .unwrap();
    tx.send(Update {
        name: MetricName::Idle,
        value: 7,
    })
    .await
    .unwrap();
    drop(tx);

    let task = tokio::spawn(run_publisher(rx, Arc::clone(&reg), signal, Arc::clone(&stats)));
    timeout(WAIT, task).await.unwrap().unwrap();

    let s = stats.snapshot();
    assert_eq!(s.publish_errors, 1);
    assert_eq!(s.updates_applied, 1);
    assert_eq!(reg.get(MetricName::Idle).unwrap().get(), 7);
}

#[tokio::test]
async fn publisher_exits_on_shutdown_with_open_channel() {
    let (tx, rx) = mpsc::channel::<Update>(16);
    let (trigger, signal) = shutdown_channel();

    let task = tokio::spawn(run_publisher(
        rx,
        registry(),
        signal,
        Arc::new(PipelineStats::default()),
    ));

    trigger.trigger();
    timeout(WAIT, task).await.unwrap().unwrap();
    drop(tx);
}

#[tokio::test]
async fn dropped_trigger_counts_as_shutdown() {
    let (trigger, mut signal) = shutdown_channel();
    drop(trigger);
    timeout(WAIT, signal.cancelled()).await.unwrap();
}

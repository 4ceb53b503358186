//! Snapshot, metric name and pool contract tests.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::collections::HashSet;
use std::time::Duration;

use sqlstat_core::{MemoryPool, MetricName, Pool, PoolSnapshot, SnapshotReader};

fn sample() -> PoolSnapshot {
    PoolSnapshot {
        max_open_connections: 16,
        open_connections: 3,
        in_use: 1,
        idle: 2,
        wait_count: 7,
        wait_duration: Duration::from_millis(12),
        max_idle_closed: 4,
        max_lifetime_closed: 5,
    }
}

#[test]
fn metric_names_are_unique_and_documented() {
    let names: HashSet<&str> = MetricName::ALL.iter().map(|n| n.as_str()).collect();
    assert_eq!(names.len(), 8);
    for name in MetricName::ALL {
        assert!(!name.help().is_empty(), "{name} has no help text");
    }
}

#[test]
fn fq_name_joins_labels() {
    assert_eq!(
        MetricName::OpenConnections.fq_name("sql", "stat"),
        "sql_stat_open_connections"
    );
}

#[test]
fn updates_follow_canonical_order() {
    let updates = sample().updates();
    let order: Vec<MetricName> = updates.iter().map(|u| u.name).collect();
    assert_eq!(order, MetricName::ALL.to_vec());

    assert_eq!(updates[0].value, 16);
    assert_eq!(updates[1].value, 3);
    assert_eq!(updates[5].value, 12_000_000);
}

#[test]
fn values_saturate_at_i64_max() {
    let snap = PoolSnapshot {
        wait_count: u64::MAX,
        wait_duration: Duration::MAX,
        ..PoolSnapshot::default()
    };
    assert_eq!(snap.value(MetricName::WaitCount), i64::MAX);
    assert_eq!(snap.value(MetricName::WaitDuration), i64::MAX);
}

#[test]
fn fresh_pool_reads_all_zero() {
    let pool = MemoryPool::new();
    let snap = SnapshotReader::read(&pool);
    assert_eq!(snap, PoolSnapshot::default());
    assert!(snap.updates().iter().all(|u| u.value == 0));
}

#[test]
fn reading_does_not_mutate_pool() {
    let pool = MemoryPool::with_snapshot(sample());
    let first = SnapshotReader::read(&pool);
    let second = SnapshotReader::read(&pool);
    assert_eq!(first, second);
    assert_eq!(pool.stats(), sample());
}

#[test]
fn memory_pool_reports_replaced_snapshot() {
    let pool = MemoryPool::new();
    pool.set(sample());
    assert_eq!(pool.stats().open_connections, 3);

    pool.update(|s| s.open_connections = 9);
    assert_eq!(pool.stats().open_connections, 9);
    assert_eq!(pool.stats().max_open_connections, 16);
}

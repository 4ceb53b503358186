//! Point-in-time pool counters.

use std::time::Duration;

use crate::metric::{MetricName, Update};
use crate::pool::Pool;

/// The eight counters as reported by the pool at one instant.
///
/// Consistency across fields is the pool's responsibility; nothing here
/// re-derives one counter from another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PoolSnapshot {
    pub max_open_connections: u64,
    pub open_connections: u64,
    pub in_use: u64,
    pub idle: u64,
    pub wait_count: u64,
    pub wait_duration: Duration,
    pub max_idle_closed: u64,
    pub max_lifetime_closed: u64,
}

impl PoolSnapshot {
    /// Published value for `name`. Saturates at `i64::MAX`.
    pub fn value(&self, name: MetricName) -> i64 {
        match name {
            MetricName::MaxOpenConnections => saturate(self.max_open_connections),
            MetricName::OpenConnections => saturate(self.open_connections),
            MetricName::InUse => saturate(self.in_use),
            MetricName::Idle => saturate(self.idle),
            MetricName::WaitCount => saturate(self.wait_count),
            MetricName::WaitDuration => {
                i64::try_from(self.wait_duration.as_nanos()).unwrap_or(i64::MAX)
            }
            MetricName::MaxIdleClosed => saturate(self.max_idle_closed),
            MetricName::MaxLifetimeClosed => saturate(self.max_lifetime_closed),
        }
    }

    /// One update per metric, in [`MetricName::ALL`] order.
    pub fn updates(&self) -> [Update; 8] {
        MetricName::ALL.map(|name| Update {
            name,
            value: self.value(name),
        })
    }
}

fn saturate(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

/// Reads a [`PoolSnapshot`] from a pool without mutating it.
pub struct SnapshotReader;

impl SnapshotReader {
    pub fn read(pool: &dyn Pool) -> PoolSnapshot {
        pool.stats()
    }
}

//! The closed set of pool metrics.

use std::fmt;

/// One of the eight well-known pool counters.
///
/// Every registration, sample and look-up goes through this enum, so a metric
/// name exists in exactly one place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MetricName {
    MaxOpenConnections,
    OpenConnections,
    InUse,
    Idle,
    WaitCount,
    WaitDuration,
    MaxIdleClosed,
    MaxLifetimeClosed,
}

impl MetricName {
    /// Canonical order. Samples are emitted in this order on every tick.
    pub const ALL: [MetricName; 8] = [
        MetricName::MaxOpenConnections,
        MetricName::OpenConnections,
        MetricName::InUse,
        MetricName::Idle,
        MetricName::WaitCount,
        MetricName::WaitDuration,
        MetricName::MaxIdleClosed,
        MetricName::MaxLifetimeClosed,
    ];

    /// Short name, the last segment of the fully-qualified gauge name.
    pub fn as_str(self) -> &'static str {
        match self {
            MetricName::MaxOpenConnections => "max_open_connections",
            MetricName::OpenConnections => "open_connections",
            MetricName::InUse => "in_use",
            MetricName::Idle => "idle",
            MetricName::WaitCount => "wait_count",
            MetricName::WaitDuration => "wait_duration",
            MetricName::MaxIdleClosed => "max_idle_closed",
            MetricName::MaxLifetimeClosed => "max_lifetime_closed",
        }
    }

    pub fn help(self) -> &'static str {
        match self {
            MetricName::MaxOpenConnections => "Maximum number of open connections to the database.",
            MetricName::OpenConnections => {
                "The number of established connections both in use and idle."
            }
            MetricName::InUse => "The number of connections currently in use.",
            MetricName::Idle => "The number of idle connections.",
            MetricName::WaitCount => "The total number of connections waited for.",
            MetricName::WaitDuration => {
                "The total time blocked waiting for a new connection, in nanoseconds."
            }
            MetricName::MaxIdleClosed => {
                "The total number of connections closed due to the idle limit."
            }
            MetricName::MaxLifetimeClosed => {
                "The total number of connections closed due to the max lifetime."
            }
        }
    }

    /// `{namespace}_{subsystem}_{name}`
    pub fn fq_name(self, namespace: &str, subsystem: &str) -> String {
        format!("{namespace}_{subsystem}_{}", self.as_str())
    }
}

impl fmt::Display for MetricName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single sampled value travelling from the sampler to the publisher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Update {
    pub name: MetricName,
    pub value: i64,
}

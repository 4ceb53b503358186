//! Top-level facade crate for sqlstat.
//!
//! Re-exports core types and the collector library so users can depend on a single crate.

pub mod core {
    pub use sqlstat_core::*;
}

pub mod collector {
    pub use sqlstat_collector::*;
}

pub use sqlstat_collector::{Collector, GaugeHandle, Options};
pub use sqlstat_core::{MetricName, Pool, PoolSnapshot, SqlStatError};

//! sqlstat core: metric names, pool snapshots, the pool contract, and errors.
//!
//! This crate defines the data shared by the collector pipeline and by any
//! exporter that reads its gauges. It carries no runtime dependencies so a
//! pool adapter can implement [`pool::Pool`] without pulling in tokio.
//!
//! # Defensive guarantees
//! Panics, `unwrap`, and `expect` are compile-denied here.
//! All fallible paths surface as `SqlStatError`/`Result`; a telemetry fault
//! must never take the host service down.

#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]

pub mod error;
pub mod metric;
pub mod pool;
pub mod snapshot;

/// Shared result type.
pub use error::{ErrorKind, Result, SqlStatError};
pub use metric::{MetricName, Update};
pub use pool::{MemoryPool, Pool};
pub use snapshot::{PoolSnapshot, SnapshotReader};

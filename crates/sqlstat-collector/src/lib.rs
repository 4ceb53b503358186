//! sqlstat collector library.
//!
//! Samples a connection pool on a fixed interval and republishes its counters
//! as gauges. The pipeline is two tokio tasks joined by a bounded channel:
//! sampler -> publisher -> [`registry::GaugeRegistry`]. Exporters read the
//! gauges through [`collector::Collector::export_handles`].

pub mod collector;
pub mod config;
pub mod pipeline;
pub mod registry;

pub use collector::{Collector, CollectorState};
pub use config::Options;
pub use registry::{GaugeHandle, GaugeRegistry};

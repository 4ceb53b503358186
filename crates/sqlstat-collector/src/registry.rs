//! Gauge registry: one atomic cell per pool metric.
//!
//! Handles are shared with exporters, which only read them. Values are
//! plain `AtomicI64` loads/stores, so a scrape on another thread never
//! contends with the publisher beyond the DashMap shard lock on look-up.

use std::fmt;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use dashmap::mapref::entry::Entry;
use dashmap::{DashMap, DashSet};

use sqlstat_core::error::{Result, SqlStatError};
use sqlstat_core::MetricName;

struct GaugeCell {
    name: MetricName,
    fq_name: String,
    help: String,
    value: AtomicI64,
}

/// Named gauge shared between the registry and exporters.
#[derive(Clone)]
pub struct GaugeHandle {
    cell: Arc<GaugeCell>,
}

impl GaugeHandle {
    fn new(name: MetricName, fq_name: String, help: String) -> Self {
        Self {
            cell: Arc::new(GaugeCell {
                name,
                fq_name,
                help,
                value: AtomicI64::new(0),
            }),
        }
    }

    pub fn name(&self) -> MetricName { self.cell.name }
    /// `{namespace}_{subsystem}_{name}`
    pub fn fq_name(&self) -> &str { &self.cell.fq_name }
    pub fn help(&self) -> &str { &self.cell.help }

    /// Current value.
    pub fn get(&self) -> i64 {
        self.cell.value.load(Ordering::Relaxed)
    }

    fn set(&self, v: i64) {
        self.cell.value.store(v, Ordering::Relaxed);
    }
}

impl fmt::Debug for GaugeHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GaugeHandle")
            .field("fq_name", &self.cell.fq_name)
            .field("value", &self.get())
            .finish()
    }
}

/// Registry keyed by [`MetricName`]; also tracks fully-qualified names so the
/// same exported name can never appear twice.
#[derive(Default)]
pub struct GaugeRegistry {
    gauges: DashMap<MetricName, GaugeHandle>,
    fq_names: DashSet<String>,
}

impl GaugeRegistry {
    pub fn new() -> Self {
        Self {
            gauges: DashMap::new(),
            fq_names: DashSet::new(),
        }
    }

    /// Create the gauge for `name` under `{namespace}_{subsystem}_{name}`.
    pub fn register(
        &self,
        name: MetricName,
        help: impl Into<String>,
        namespace: &str,
        subsystem: &str,
    ) -> Result<GaugeHandle> {
        let fq_name = name.fq_name(namespace, subsystem);
        match self.gauges.entry(name) {
            Entry::Occupied(_) => Err(SqlStatError::DuplicateRegistration(fq_name)),
            Entry::Vacant(slot) => {
                if !self.fq_names.insert(fq_name.clone()) {
                    return Err(SqlStatError::DuplicateRegistration(fq_name));
                }
                let handle = GaugeHandle::new(name, fq_name, help.into());
                slot.insert(handle.clone());
                Ok(handle)
            }
        }
    }

    /// Set the gauge registered for `name`.
    pub fn set_by_name(&self, name: MetricName, value: i64) -> Result<()> {
        let gauge = self
            .gauges
            .get(&name)
            .ok_or_else(|| SqlStatError::UnknownMetric(name.to_string()))?;
        gauge.set(value);
        Ok(())
    }

    pub fn get(&self, name: MetricName) -> Option<GaugeHandle> {
        self.gauges.get(&name).map(|r| r.value().clone())
    }

    /// Every registered handle, in [`MetricName::ALL`] order.
    pub fn all_handles(&self) -> Vec<GaugeHandle> {
        MetricName::ALL
            .iter()
            .filter_map(|name| self.get(*name))
            .collect()
    }

    pub fn len(&self) -> usize {
        self.gauges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.gauges.is_empty()
    }

    /// Drop every gauge. Used to roll back a partially failed attach.
    pub(crate) fn clear(&self) {
        self.gauges.clear();
        self.fq_names.clear();
    }
}

//! Collector facade: owns the registry and the two background loops.
//!
//! Lifecycle: `Unregistered` -> `attach_pool` -> `Running` -> `stop` ->
//! `Stopped`. One pool per collector. Dropping a running collector drops its
//! shutdown trigger, which stops both loops as well.

use std::mem;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use sqlstat_core::error::{Result, SqlStatError};
use sqlstat_core::{MetricName, Pool};

use crate::config::Options;
use crate::pipeline::{
    run_publisher, run_sampler, shutdown_channel, PipelineStats, PipelineStatsSnapshot,
    ShutdownTrigger,
};
use crate::registry::{GaugeHandle, GaugeRegistry};

/// Observable collector state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectorState {
    Unregistered,
    Running,
    Stopped,
}

enum Lifecycle {
    Unregistered,
    Running {
        trigger: ShutdownTrigger,
        tasks: Vec<JoinHandle<()>>,
    },
    Stopped {
        tasks: Vec<JoinHandle<()>>,
    },
}

pub struct Collector {
    options: Options,
    registry: Arc<GaugeRegistry>,
    stats: Arc<PipelineStats>,
    lifecycle: Mutex<Lifecycle>,
}

impl Collector {
    /// Validate `options` and build an unattached collector.
    pub fn new(options: Options) -> Result<Self> {
        options.validate()?;
        Ok(Self::build(options))
    }

    fn build(options: Options) -> Self {
        Self {
            options,
            registry: Arc::new(GaugeRegistry::new()),
            stats: Arc::new(PipelineStats::default()),
            lifecycle: Mutex::new(Lifecycle::Unregistered),
        }
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn state(&self) -> CollectorState {
        match *self.lifecycle() {
            Lifecycle::Unregistered => CollectorState::Unregistered,
            Lifecycle::Running { .. } => CollectorState::Running,
            Lifecycle::Stopped { .. } => CollectorState::Stopped,
        }
    }

    /// Register all gauges and start sampling `pool`.
    ///
    /// Must be called from within a tokio runtime. Every failure leaves the
    /// collector exactly as it was: no gauges, no tasks.
    pub fn attach_pool(&self, pool: Option<Arc<dyn Pool>>) -> Result<()> {
        let mut lifecycle = self.lifecycle();
        if !matches!(*lifecycle, Lifecycle::Unregistered) {
            return Err(SqlStatError::AlreadyAttached);
        }

        let pool =
            pool.ok_or_else(|| SqlStatError::InvalidArgument("pool must be provided".into()))?;

        let runtime = Handle::try_current().map_err(|e| {
            SqlStatError::InvalidArgument(format!("attach_pool requires a tokio runtime: {e}"))
        })?;

        if let Err(e) = self.register_gauges() {
            self.registry.clear();
            return Err(e);
        }

        let (trigger, signal) = shutdown_channel();
        let (tx, rx) = mpsc::channel(self.options.channel_capacity);

        let sampler = runtime.spawn(run_sampler(
            pool,
            self.options.interval,
            tx,
            signal.clone(),
            Arc::clone(&self.stats),
        ));
        let publisher = runtime.spawn(run_publisher(
            rx,
            Arc::clone(&self.registry),
            signal,
            Arc::clone(&self.stats),
        ));

        *lifecycle = Lifecycle::Running {
            trigger,
            tasks: vec![sampler, publisher],
        };

        tracing::info!(
            namespace = %self.options.namespace,
            subsystem = %self.options.subsystem,
            interval_ms = self.options.interval_ms(),
            "pool attached, sampling started"
        );
        Ok(())
    }

    fn register_gauges(&self) -> Result<()> {
        for name in MetricName::ALL {
            self.registry.register(
                name,
                name.help(),
                &self.options.namespace,
                &self.options.subsystem,
            )?;
        }
        Ok(())
    }

    /// Handles for an exporter to register with its scrape endpoint.
    /// Empty until a pool is attached.
    pub fn export_handles(&self) -> Vec<GaugeHandle> {
        self.registry.all_handles()
    }

    pub fn gauge(&self, name: MetricName) -> Option<GaugeHandle> {
        self.registry.get(name)
    }

    pub fn pipeline_stats(&self) -> PipelineStatsSnapshot {
        self.stats.snapshot()
    }

    /// Signal both loops to exit. No-op unless running.
    ///
    /// Gauges keep their last published values.
    pub fn stop(&self) {
        let mut lifecycle = self.lifecycle();
        match mem::replace(&mut *lifecycle, Lifecycle::Unregistered) {
            Lifecycle::Running { trigger, tasks } => {
                trigger.trigger();
                *lifecycle = Lifecycle::Stopped { tasks };
                tracing::info!(namespace = %self.options.namespace, "collector stopped");
            }
            other => *lifecycle = other,
        }
    }

    /// `stop`, then wait for both loops to finish.
    pub async fn shutdown(&self) {
        self.stop();

        let tasks = {
            let mut lifecycle = self.lifecycle();
            match &mut *lifecycle {
                Lifecycle::Stopped { tasks } => mem::take(tasks),
                _ => Vec::new(),
            }
        };

        for task in tasks {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "collector task failed");
            }
        }
    }

    fn lifecycle(&self) -> MutexGuard<'_, Lifecycle> {
        self.lifecycle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for Collector {
    fn default() -> Self {
        Self::build(Options::default())
    }
}

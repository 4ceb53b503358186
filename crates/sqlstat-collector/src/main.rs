//! sqlstat demo binary.
//!
//! Attaches a simulated in-memory pool and logs the exported gauges on every
//! interval until Ctrl-C. Optional first argument: path to a YAML config.

use std::sync::Arc;

use tracing_subscriber::{fmt, EnvFilter};

use sqlstat_collector::{config, Collector, Options};
use sqlstat_core::{MemoryPool, Pool, PoolSnapshot};

#[tokio::main]
async fn main() {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    let options = match std::env::args().nth(1) {
        Some(path) => match config::load_from_file(&path) {
            Ok(cfg) => cfg.options(),
            Err(e) => {
                tracing::error!(%path, error = %e, "config load failed");
                std::process::exit(1);
            }
        },
        None => Options::default(),
    };

    let collector = match Collector::new(options) {
        Ok(c) => c,
        Err(e) => {
            tracing::error!(error = %e, "invalid collector options");
            std::process::exit(1);
        }
    };

    let pool = Arc::new(MemoryPool::with_snapshot(PoolSnapshot {
        max_open_connections: 16,
        ..PoolSnapshot::default()
    }));
    let attached: Arc<dyn Pool> = pool.clone();
    if let Err(e) = collector.attach_pool(Some(attached)) {
        tracing::error!(error = %e, "attach failed");
        std::process::exit(1);
    }

    tracing::info!(gauges = collector.export_handles().len(), "sqlstat demo running");

    let mut report = tokio::time::interval(collector.options().interval);
    let mut round: u64 = 0;
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            _ = report.tick() => {
                round += 1;
                pool.update(|s| {
                    s.in_use = round % (s.max_open_connections + 1);
                    s.idle = s.max_open_connections.saturating_sub(s.in_use) / 2;
                    s.open_connections = s.in_use + s.idle;
                });
                for gauge in collector.export_handles() {
                    tracing::info!(gauge = gauge.fq_name(), value = gauge.get(), "gauge");
                }
            }
        }
    }

    collector.shutdown().await;
    tracing::info!(stats = ?collector.pipeline_stats(), "sqlstat demo stopped");
}

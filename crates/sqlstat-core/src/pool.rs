//! The pool contract consumed by the collector.

use std::sync::Mutex;

use crate::snapshot::PoolSnapshot;

/// A connection pool that can report its counters.
///
/// `stats` is expected to be cheap and to return mutually consistent values.
/// It is called from a background task, once per sampling tick.
pub trait Pool: Send + Sync {
    fn stats(&self) -> PoolSnapshot;
}

/// In-process pool stand-in whose reported snapshot can be replaced at any time.
///
/// A fresh instance reports the all-zero snapshot.
#[derive(Debug, Default)]
pub struct MemoryPool {
    current: Mutex<PoolSnapshot>,
}

impl MemoryPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_snapshot(snapshot: PoolSnapshot) -> Self {
        Self {
            current: Mutex::new(snapshot),
        }
    }

    /// Replace the snapshot returned by subsequent `stats` calls.
    pub fn set(&self, snapshot: PoolSnapshot) {
        *self.current.lock().unwrap_or_else(|e| e.into_inner()) = snapshot;
    }

    /// Apply `f` to the current snapshot in place.
    pub fn update(&self, f: impl FnOnce(&mut PoolSnapshot)) {
        let mut current = self.current.lock().unwrap_or_else(|e| e.into_inner());
        f(&mut *current);
    }
}

impl Pool for MemoryPool {
    fn stats(&self) -> PoolSnapshot {
        *self.current.lock().unwrap_or_else(|e| e.into_inner())
    }
}

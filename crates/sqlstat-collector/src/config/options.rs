use std::time::Duration;

use sqlstat_core::error::{Result, SqlStatError};

pub const DEFAULT_NAMESPACE: &str = "sql";
pub const DEFAULT_SUBSYSTEM: &str = "stat";
pub const DEFAULT_INTERVAL: Duration = Duration::from_secs(5);
pub const DEFAULT_CHANNEL_CAPACITY: usize = 64;

/// Collector settings. Validated once by `Collector::new`, never mutated after.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub namespace: String,
    pub subsystem: String,
    /// Sampling period. Zero is rejected.
    pub interval: Duration,
    /// Bound of the sampler -> publisher hand-off queue.
    pub channel_capacity: usize,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_NAMESPACE.into(),
            subsystem: DEFAULT_SUBSYSTEM.into(),
            interval: DEFAULT_INTERVAL,
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl Options {
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    pub fn with_labels(
        mut self,
        namespace: impl Into<String>,
        subsystem: impl Into<String>,
    ) -> Self {
        self.namespace = namespace.into();
        self.subsystem = subsystem.into();
        self
    }

    /// Sampling period in whole milliseconds, saturating at `u64::MAX`.
    pub fn interval_ms(&self) -> u64 {
        duration_ms(self.interval)
    }

    pub fn validate(&self) -> Result<()> {
        validate_label("namespace", &self.namespace)?;
        validate_label("subsystem", &self.subsystem)?;
        if self.interval.is_zero() {
            return Err(SqlStatError::InvalidConfig(
                "interval must be greater than zero".into(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(SqlStatError::InvalidConfig(
                "channel_capacity must be at least 1".into(),
            ));
        }
        Ok(())
    }
}

pub fn duration_ms(d: Duration) -> u64 {
    u64::try_from(d.as_millis()).unwrap_or(u64::MAX)
}

/// Labels become part of the gauge name: `[a-zA-Z_][a-zA-Z0-9_]*`.
fn validate_label(field: &str, v: &str) -> Result<()> {
    let mut chars = v.chars();
    let Some(first) = chars.next() else {
        return Err(SqlStatError::InvalidConfig(format!("{field} must not be empty")));
    };
    let head_ok = first.is_ascii_alphabetic() || first == '_';
    if !head_ok || !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(SqlStatError::InvalidConfig(format!(
            "{field} must match [a-zA-Z_][a-zA-Z0-9_]*, got {v:?}"
        )));
    }
    Ok(())
}

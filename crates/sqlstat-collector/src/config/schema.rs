use std::time::Duration;

use serde::Deserialize;
use sqlstat_core::error::{Result, SqlStatError};

use super::options::{self, Options};

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatConfig {
    pub version: u32,

    #[serde(default)]
    pub collector: CollectorSection,
}

impl StatConfig {
    pub fn validate(&self) -> Result<()> {
        if self.version != 1 {
            return Err(SqlStatError::InvalidConfig(format!(
                "unsupported config version: {}",
                self.version
            )));
        }

        self.collector.validate()?;

        Ok(())
    }

    pub fn options(&self) -> Options {
        self.collector.options()
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CollectorSection {
    #[serde(default = "default_namespace")]
    pub namespace: String,

    #[serde(default = "default_subsystem")]
    pub subsystem: String,

    #[serde(default = "default_interval_ms")]
    pub interval_ms: u64,

    #[serde(default = "default_channel_capacity")]
    pub channel_capacity: usize,
}

impl Default for CollectorSection {
    fn default() -> Self {
        Self {
            namespace: default_namespace(),
            subsystem: default_subsystem(),
            interval_ms: default_interval_ms(),
            channel_capacity: default_channel_capacity(),
        }
    }
}

impl CollectorSection {
    pub fn validate(&self) -> Result<()> {
        if !(1..=3_600_000).contains(&self.interval_ms) {
            return Err(SqlStatError::InvalidConfig(
                "collector.interval_ms must be between 1 and 3600000".into(),
            ));
        }
        if !(1..=65_536).contains(&self.channel_capacity) {
            return Err(SqlStatError::InvalidConfig(
                "collector.channel_capacity must be between 1 and 65536".into(),
            ));
        }
        self.options().validate()
    }

    pub fn options(&self) -> Options {
        Options {
            namespace: self.namespace.clone(),
            subsystem: self.subsystem.clone(),
            interval: Duration::from_millis(self.interval_ms),
            channel_capacity: self.channel_capacity,
        }
    }
}

fn default_namespace() -> String {
    options::DEFAULT_NAMESPACE.into()
}
fn default_subsystem() -> String {
    options::DEFAULT_SUBSYSTEM.into()
}
fn default_interval_ms() -> u64 {
    options::duration_ms(options::DEFAULT_INTERVAL)
}
fn default_channel_capacity() -> usize {
    options::DEFAULT_CHANNEL_CAPACITY
}

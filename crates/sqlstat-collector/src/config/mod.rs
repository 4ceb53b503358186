//! Collector config loader (strict parsing).

pub mod options;
pub mod schema;

use std::fs;

use sqlstat_core::error::{Result, SqlStatError};

pub use options::Options;
pub use schema::{CollectorSection, StatConfig};

pub fn load_from_file(path: &str) -> Result<StatConfig> {
    let s = fs::read_to_string(path)
        .map_err(|e| SqlStatError::InvalidConfig(format!("read config failed: {e}")))?;
    load_from_str(&s)
}

pub fn load_from_str(s: &str) -> Result<StatConfig> {
    let cfg: StatConfig = serde_yaml::from_str(s)
        .map_err(|e| SqlStatError::InvalidConfig(format!("invalid yaml: {e}")))?;
    cfg.validate()?;
    Ok(cfg)
}

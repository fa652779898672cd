//! CLI command implementations

pub mod check;
pub mod replay;
pub mod run;

use anyhow::{Context, Result};
use cadence_core::LoopConfig;

/// Load the config file if one was given, then apply command-line overrides
pub fn resolve_config(
    path: Option<&str>,
    rate: Option<u32>,
    idle_threshold: Option<f64>,
) -> Result<LoopConfig> {
    let mut config = match path {
        Some(path) => LoopConfig::load(path)
            .with_context(|| format!("Failed to load config '{}'", path))?,
        None => LoopConfig::default(),
    };

    if let Some(rate) = rate {
        config.target_rate = rate;
    }
    if let Some(idle_threshold) = idle_threshold {
        config.idle_threshold = idle_threshold;
    }

    config.validate().context("Invalid loop configuration")?;
    Ok(config)
}

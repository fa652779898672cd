//! Config check command

use anyhow::{Context, Result};
use cadence_core::LoopConfig;

pub fn run(path: &str) -> Result<()> {
    let config = LoopConfig::load(path).with_context(|| format!("Invalid config '{}'", path))?;

    println!("{}: OK", path);
    println!("  target_rate:    {} steps/s", config.target_rate);
    println!("  fixed_step:     {:.6} s", config.fixed_step());
    println!("  idle_threshold: {} s", config.idle_threshold);

    Ok(())
}

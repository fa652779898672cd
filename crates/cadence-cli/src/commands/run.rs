//! Demo run command
//!
//! Drives a loop against the system clock. Each callback sleeps for a few
//! milliseconds to stand in for real input, simulation and drawing work.

use super::resolve_config;
use anyhow::{Context, Result};
use cadence_runtime::{GameLoop, RunSummary, SystemClock};
use std::cell::Cell;
use std::thread;
use std::time::Duration;

pub struct RunArgs {
    pub config: Option<String>,
    pub rate: Option<u32>,
    pub idle_threshold: Option<f64>,
    pub duration: f64,
    pub work_ms: u64,
    pub format: String,
}

pub fn run(args: RunArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), args.rate, args.idle_threshold)?;
    if !(args.duration.is_finite() && args.duration > 0.0) {
        anyhow::bail!("--duration must be a positive number of seconds");
    }

    println!(
        "Running at {} steps/s (idle threshold {}s) for {}s of simulation time",
        config.target_rate, config.idle_threshold, args.duration
    );

    let work = Duration::from_millis(args.work_ms);
    let simulated = Cell::new(0.0);
    let duration = args.duration;

    let mut game_loop = GameLoop::builder()
        .config(config)
        .clock(SystemClock::new())
        .input(|| {
            thread::sleep(work);
            tracing::info!("process input");
            simulated.get() >= duration
        })
        .update(|dt| {
            thread::sleep(work);
            simulated.set(simulated.get() + dt);
            tracing::info!(dt, "updating");
        })
        .render(|alpha| {
            thread::sleep(work);
            tracing::info!(alpha, "rendering");
        })
        .build()
        .context("Failed to build loop")?;

    let summary = game_loop.run().context("Loop failed")?;
    print_summary(&summary, &args.format)
}

fn print_summary(summary: &RunSummary, format: &str) -> Result<()> {
    match format {
        "json" => println!("{}", serde_json::to_string_pretty(summary)?),
        "text" => {
            println!("Iterations:       {}", summary.iterations);
            println!("Stalled:          {}", summary.stalled_iterations);
            println!("Updates:          {}", summary.updates);
            println!("Simulated time:   {:.4}s", summary.simulated_time);
            println!("Residual lag:     {:.6}s", summary.residual_lag);
        }
        _ => anyhow::bail!("Unknown format: {}", format),
    }
    Ok(())
}

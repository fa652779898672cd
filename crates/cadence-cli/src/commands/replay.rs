//! Replay command: run the loop over scripted clock readings

use super::resolve_config;
use anyhow::{Context, Result};
use cadence_core::LoopConfig;
use cadence_runtime::{FnHandler, Iteration, LoopPhase, LoopState, ScriptedClock, Timing};
use serde::Serialize;

pub struct ReplayArgs {
    pub readings: Vec<f64>,
    pub quit_after: Option<usize>,
    pub config: Option<String>,
    pub rate: Option<u32>,
    pub idle_threshold: Option<f64>,
    pub format: String,
}

/// One iteration of a replayed run
#[derive(Debug, Serialize)]
pub struct ReplayRow {
    pub iteration: usize,
    pub clock: f64,
    pub stalled: bool,
    pub elapsed: f64,
    pub updates: u64,
    pub lag: f64,
    pub alpha: Option<f64>,
    pub quit: bool,
}

pub fn run(args: ReplayArgs) -> Result<()> {
    let config = resolve_config(args.config.as_deref(), args.rate, args.idle_threshold)?;
    let rows = replay(&config, &args.readings, args.quit_after).context("Replay failed")?;

    match args.format.as_str() {
        "json" => println!("{}", serde_json::to_string_pretty(&rows)?),
        "text" => {
            println!(
                "{:>4}  {:>10}  {:>10}  {:>7}  {:>10}  {:>6}",
                "iter", "clock", "elapsed", "updates", "lag", "alpha"
            );
            for row in &rows {
                let alpha = row
                    .alpha
                    .map(|a| format!("{:.3}", a))
                    .unwrap_or_else(|| "-".into());
                let updates = if row.stalled {
                    "stall".to_string()
                } else {
                    row.updates.to_string()
                };
                println!(
                    "{:>4}  {:>10.4}  {:>10.4}  {:>7}  {:>10.6}  {:>6}{}",
                    row.iteration,
                    row.clock,
                    row.elapsed,
                    updates,
                    row.lag,
                    alpha,
                    if row.quit { "  quit" } else { "" }
                );
            }
            let total: u64 = rows.iter().map(|r| r.updates).sum();
            println!("{} iterations, {} updates", rows.len(), total);
        }
        _ => anyhow::bail!("Unknown format: {}", args.format),
    }

    Ok(())
}

/// Run a loop over `readings` (the first one seeds the loop), quitting on
/// input poll `quit_after`, or once per remaining reading if not given.
pub fn replay(
    config: &LoopConfig,
    readings: &[f64],
    quit_after: Option<usize>,
) -> cadence_core::Result<Vec<ReplayRow>> {
    let timing = Timing::from_config(config)?;
    let quit_after = quit_after
        .unwrap_or(readings.len().saturating_sub(1))
        .max(1);

    let mut clock = ScriptedClock::new(readings.iter().copied());
    let mut polls = 0;
    let mut handler = FnHandler::new(
        || {
            polls += 1;
            polls >= quit_after
        },
        |_| {},
        |_| {},
    );

    let mut state = LoopState::start(&mut clock);
    let mut rows = Vec::new();

    while state.phase() == LoopPhase::Running {
        let before = state.previous();
        let iteration = state.iterate(&timing, &mut clock, &mut handler)?;
        let elapsed = state.previous() - before;

        let row = match iteration {
            Iteration::Stalled { elapsed } => ReplayRow {
                iteration: rows.len() + 1,
                clock: state.previous(),
                stalled: true,
                elapsed,
                updates: 0,
                lag: state.lag(),
                alpha: None,
                quit: false,
            },
            Iteration::Completed {
                updates,
                alpha,
                quit,
            } => ReplayRow {
                iteration: rows.len() + 1,
                clock: state.previous(),
                stalled: false,
                elapsed,
                updates,
                lag: state.lag(),
                alpha: Some(alpha),
                quit,
            },
        };
        rows.push(row);
    }

    Ok(rows)
}

//! Fixed-step loop driver
//!
//! Each iteration reads the clock, folds the elapsed time into an
//! accumulator, polls input, drains the accumulator in fixed-size update
//! steps and renders once. A gap longer than the idle threshold (a suspended
//! process, a minimized window) discards the whole iteration instead of
//! turning it into a burst of catch-up steps.

use crate::clock::Clock;
use crate::handler::LoopHandler;
use cadence_core::{CadenceError, LoopConfig, Result};
use serde::Serialize;

/// Step duration and stall threshold derived from a validated [`LoopConfig`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Timing {
    pub target_rate: u32,
    /// Seconds per update, always `1 / target_rate`
    pub fixed_step: f64,
    pub idle_threshold: f64,
}

impl Timing {
    pub fn from_config(config: &LoopConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            target_rate: config.target_rate,
            fixed_step: config.fixed_step(),
            idle_threshold: config.idle_threshold,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoopPhase {
    Running,
    Terminated,
}

/// What a single iteration did
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Iteration {
    /// The gap since the previous read exceeded the idle threshold. Nothing
    /// was polled, updated or rendered and the accumulator is untouched.
    Stalled { elapsed: f64 },
    /// Input was polled, `updates` fixed steps ran, and one render happened
    Completed { updates: u64, alpha: f64, quit: bool },
}

/// Mutable state of one run: last clock reading and unsimulated time
#[derive(Debug, Clone)]
pub struct LoopState {
    previous: f64,
    lag: f64,
    phase: LoopPhase,
}

impl LoopState {
    /// Seed the state from a first clock read
    pub fn start<C: Clock + ?Sized>(clock: &mut C) -> Self {
        Self {
            previous: clock.now(),
            lag: 0.0,
            phase: LoopPhase::Running,
        }
    }

    pub fn previous(&self) -> f64 {
        self.previous
    }

    /// Accumulated time not yet turned into update steps
    pub fn lag(&self) -> f64 {
        self.lag
    }

    pub fn phase(&self) -> LoopPhase {
        self.phase
    }

    /// Run one iteration of the loop.
    ///
    /// On quit or on a handler error the state becomes
    /// [`LoopPhase::Terminated`] and every later call fails with
    /// [`CadenceError::LoopTerminated`].
    pub fn iterate<C, H>(
        &mut self,
        timing: &Timing,
        clock: &mut C,
        handler: &mut H,
    ) -> Result<Iteration>
    where
        C: Clock + ?Sized,
        H: LoopHandler + ?Sized,
    {
        if self.phase == LoopPhase::Terminated {
            return Err(CadenceError::LoopTerminated);
        }

        let current = clock.now();
        let mut elapsed = current - self.previous;

        // A non-finite reading is skipped without moving `previous`; a
        // non-finite `previous` (bad seed) resyncs on the next good reading
        if !elapsed.is_finite() {
            tracing::warn!(
                target: "cadence",
                current,
                previous = self.previous,
                "non-finite clock reading, skipping iteration"
            );
            if current.is_finite() {
                self.previous = current;
            }
            return Ok(Iteration::Stalled { elapsed });
        }

        self.previous = current;

        if elapsed > timing.idle_threshold {
            tracing::debug!(
                target: "cadence",
                elapsed,
                idle_threshold = timing.idle_threshold,
                "stall detected, skipping iteration"
            );
            return Ok(Iteration::Stalled { elapsed });
        }

        if elapsed < 0.0 {
            tracing::warn!(
                target: "cadence",
                elapsed,
                "clock went backwards, treating as no time elapsed"
            );
            elapsed = 0.0;
        }

        self.lag += elapsed;

        match self.advance(timing, handler) {
            Ok(iteration) => {
                if let Iteration::Completed { quit: true, .. } = iteration {
                    self.phase = LoopPhase::Terminated;
                }
                Ok(iteration)
            }
            Err(err) => {
                tracing::error!(target: "cadence", %err, "loop handler failed, terminating");
                self.phase = LoopPhase::Terminated;
                Err(err)
            }
        }
    }

    fn advance<H: LoopHandler + ?Sized>(
        &mut self,
        timing: &Timing,
        handler: &mut H,
    ) -> Result<Iteration> {
        let step = timing.fixed_step;

        // Quit still lets this iteration update and render
        let quit = handler.process_input()?;

        let mut updates = 0;
        while self.lag >= step {
            handler.update(step)?;
            self.lag -= step;
            updates += 1;
        }

        let alpha = self.lag / step;
        handler.render(alpha)?;

        tracing::trace!(target: "cadence", updates, lag = self.lag, quit, "iteration complete");
        Ok(Iteration::Completed {
            updates,
            alpha,
            quit,
        })
    }
}

/// Statistics for one completed run
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    /// Iterations that polled input and rendered
    pub iterations: u64,
    /// Iterations discarded by the idle threshold
    pub stalled_iterations: u64,
    pub updates: u64,
    /// Unsimulated time left in the accumulator when the loop quit
    pub residual_lag: f64,
    /// `updates * fixed_step`
    pub simulated_time: f64,
}

/// A runnable fixed-step loop over a clock and a handler
pub struct GameLoop<C, H> {
    timing: Timing,
    clock: C,
    handler: H,
}

impl<C: Clock, H: LoopHandler> GameLoop<C, H> {
    /// Validate `config` and build a loop
    pub fn new(config: &LoopConfig, clock: C, handler: H) -> Result<Self> {
        let timing = Timing::from_config(config)?;
        Ok(Self {
            timing,
            clock,
            handler,
        })
    }

    pub fn timing(&self) -> Timing {
        self.timing
    }

    pub fn fixed_step(&self) -> f64 {
        self.timing.fixed_step
    }

    pub fn idle_threshold(&self) -> f64 {
        self.timing.idle_threshold
    }

    pub fn handler(&self) -> &H {
        &self.handler
    }

    pub fn handler_mut(&mut self) -> &mut H {
        &mut self.handler
    }

    pub fn clock_mut(&mut self) -> &mut C {
        &mut self.clock
    }

    pub fn into_parts(self) -> (C, H) {
        (self.clock, self.handler)
    }

    /// Run until the handler signals quit. Blocks the calling thread.
    ///
    /// Every call starts from fresh state seeded by one clock read.
    pub fn run(&mut self) -> Result<RunSummary> {
        let mut state = LoopState::start(&mut self.clock);
        let mut summary = RunSummary::default();

        tracing::info!(
            target: "cadence",
            target_rate = self.timing.target_rate,
            idle_threshold = self.timing.idle_threshold,
            "loop starting"
        );

        loop {
            match state.iterate(&self.timing, &mut self.clock, &mut self.handler)? {
                Iteration::Stalled { .. } => summary.stalled_iterations += 1,
                Iteration::Completed { updates, quit, .. } => {
                    summary.iterations += 1;
                    summary.updates += updates;
                    if quit {
                        break;
                    }
                }
            }
        }

        summary.residual_lag = state.lag();
        summary.simulated_time = summary.updates as f64 * self.timing.fixed_step;

        tracing::info!(
            target: "cadence",
            iterations = summary.iterations,
            stalled = summary.stalled_iterations,
            updates = summary.updates,
            "loop finished"
        );
        Ok(summary)
    }
}

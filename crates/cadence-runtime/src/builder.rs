//! Closure-based loop construction

use crate::clock::{Clock, FnClock};
use crate::driver::GameLoop;
use crate::handler::FnHandler;
use cadence_core::{CadenceError, LoopConfig, Result};

/// A loop built from closures by [`GameLoopBuilder`]
pub type BoxedGameLoop<'a> = GameLoop<Box<dyn Clock + 'a>, FnHandler<'a>>;

impl<'a> BoxedGameLoop<'a> {
    pub fn builder() -> GameLoopBuilder<'a> {
        GameLoopBuilder::new()
    }
}

/// Collects configuration and the four capabilities of a loop.
///
/// ```
/// use cadence_runtime::{GameLoop, ScriptedClock};
///
/// let mut frames = 0;
/// let mut game_loop = GameLoop::builder()
///     .target_rate(10)
///     .idle_threshold(1.0)
///     .clock(ScriptedClock::new([0.0, 0.05, 0.12, 0.31]))
///     .input(|| {
///         frames += 1;
///         frames == 3
///     })
///     .update(|dt| assert!((dt - 0.1).abs() < 1e-12))
///     .render(|_alpha| {})
///     .build()
///     .unwrap();
///
/// let summary = game_loop.run().unwrap();
/// assert_eq!(summary.updates, 3);
/// ```
#[derive(Default)]
pub struct GameLoopBuilder<'a> {
    config: LoopConfig,
    clock: Option<Box<dyn Clock + 'a>>,
    input: Option<Box<dyn FnMut() -> bool + 'a>>,
    update: Option<Box<dyn FnMut(f64) + 'a>>,
    render: Option<Box<dyn FnMut(f64) + 'a>>,
}

impl<'a> GameLoopBuilder<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace both rate and idle threshold
    pub fn config(mut self, config: LoopConfig) -> Self {
        self.config = config;
        self
    }

    pub fn target_rate(mut self, steps_per_second: u32) -> Self {
        self.config.target_rate = steps_per_second;
        self
    }

    pub fn idle_threshold(mut self, seconds: f64) -> Self {
        self.config.idle_threshold = seconds;
        self
    }

    pub fn clock(mut self, clock: impl Clock + 'a) -> Self {
        self.clock = Some(Box::new(clock));
        self
    }

    /// Use a closure returning seconds as the clock
    pub fn clock_fn(self, now: impl FnMut() -> f64 + 'a) -> Self {
        self.clock(FnClock(now))
    }

    /// Input callback; returns `true` to request quit
    pub fn input(mut self, input: impl FnMut() -> bool + 'a) -> Self {
        self.input = Some(Box::new(input));
        self
    }

    /// Update callback, called with the fixed step once per drained step
    pub fn update(mut self, update: impl FnMut(f64) + 'a) -> Self {
        self.update = Some(Box::new(update));
        self
    }

    /// Render callback, called once per non-stalled iteration with the
    /// interpolation fraction
    pub fn render(mut self, render: impl FnMut(f64) + 'a) -> Self {
        self.render = Some(Box::new(render));
        self
    }

    pub fn build(self) -> Result<BoxedGameLoop<'a>> {
        let clock = self.clock.ok_or_else(|| missing("clock"))?;
        let input = self.input.ok_or_else(|| missing("input"))?;
        let update = self.update.ok_or_else(|| missing("update"))?;
        let render = self.render.ok_or_else(|| missing("render"))?;

        GameLoop::new(
            &self.config,
            clock,
            FnHandler::from_boxed(input, update, render),
        )
    }
}

fn missing(name: &str) -> CadenceError {
    CadenceError::MissingCapability(name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::ScriptedClock;

    fn complete_builder<'a>() -> GameLoopBuilder<'a> {
        GameLoopBuilder::new()
            .clock(ScriptedClock::new([0.0, 0.1]))
            .input(|| true)
            .update(|_| {})
            .render(|_| {})
    }

    #[test]
    fn test_build_complete() {
        let game_loop = complete_builder().target_rate(30).build().unwrap();
        assert!((game_loop.fixed_step() - 1.0 / 30.0).abs() < 1e-10);
        assert!((game_loop.idle_threshold() - 1.0).abs() < 1e-10);
    }

    #[test]
    fn test_missing_capabilities() {
        let cases: Vec<(&str, GameLoopBuilder)> = vec![
            ("clock", GameLoopBuilder::new().input(|| true).update(|_| {}).render(|_| {})),
            (
                "input",
                GameLoopBuilder::new()
                    .clock_fn(|| 0.0)
                    .update(|_| {})
                    .render(|_| {}),
            ),
            (
                "update",
                GameLoopBuilder::new()
                    .clock_fn(|| 0.0)
                    .input(|| true)
                    .render(|_| {}),
            ),
            (
                "render",
                GameLoopBuilder::new()
                    .clock_fn(|| 0.0)
                    .input(|| true)
                    .update(|_| {}),
            ),
        ];

        for (name, builder) in cases {
            match builder.build() {
                Err(CadenceError::MissingCapability(missing)) => assert_eq!(missing, name),
                Err(other) => panic!("expected missing {name}, got {other}"),
                Ok(_) => panic!("expected missing {name}, build succeeded"),
            }
        }
    }

    #[test]
    fn test_zero_rate_fails_build() {
        let result = complete_builder().target_rate(0).build();
        assert!(matches!(result, Err(CadenceError::InvalidConfig(_))));
    }

    #[test]
    fn test_negative_idle_threshold_fails_build() {
        let result = complete_builder().idle_threshold(-1.0).build();
        assert!(matches!(result, Err(CadenceError::ValueOutOfRange { .. })));
    }

    #[test]
    fn test_config_replaces_settings() {
        let game_loop = complete_builder()
            .config(LoopConfig::new(120, 0.25))
            .build()
            .unwrap();
        assert!((game_loop.fixed_step() - 1.0 / 120.0).abs() < 1e-10);
        assert!((game_loop.idle_threshold() - 0.25).abs() < 1e-10);
    }

    #[test]
    fn test_closures_borrow_local_state() {
        let mut steps = Vec::new();
        let mut renders = 0;
        {
            let mut game_loop = GameLoop::builder()
                .target_rate(10)
                .clock(ScriptedClock::new([0.0, 0.35]))
                .input(|| true)
                .update(|dt| steps.push(dt))
                .render(|_| renders += 1)
                .build()
                .unwrap();
            game_loop.run().unwrap();
        }
        assert_eq!(steps.len(), 3);
        assert!(steps.iter().all(|dt| (dt - 0.1).abs() < 1e-12));
        assert_eq!(renders, 1);
    }
}

//! Cadence Runtime - Fixed-timestep loop driver
//!
//! Provides the loop and the pieces it is assembled from:
//! - `GameLoop` - runs input, fixed-step updates and one render per iteration
//! - `GameLoopBuilder` - assembles a loop from closures
//! - `LoopState` / `Iteration` - explicit per-run state, one iteration at a time
//! - `Clock` - pluggable time sources (system, tick counter, manual, scripted)
//! - `LoopHandler` - trait for the input, update and render capabilities

mod builder;
mod clock;
mod driver;
mod handler;

pub use builder::{BoxedGameLoop, GameLoopBuilder};
pub use clock::{Clock, ClockHandle, FnClock, ManualClock, ScriptedClock, SystemClock, TickClock};
pub use driver::{GameLoop, Iteration, LoopPhase, LoopState, RunSummary, Timing};
pub use handler::{FnHandler, LoopHandler};

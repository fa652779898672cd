//! Time sources for the loop driver
//!
//! The driver only ever asks "what time is it, in seconds". Readings must be
//! non-decreasing for the lifetime of one loop, but need not be wall-clock.

use std::cell::Cell;
use std::collections::VecDeque;
use std::rc::Rc;
use std::time::Instant;

/// A source of the current time in seconds
pub trait Clock {
    fn now(&mut self) -> f64;
}

impl<C: Clock + ?Sized> Clock for Box<C> {
    fn now(&mut self) -> f64 {
        (**self).now()
    }
}

impl<C: Clock + ?Sized> Clock for &mut C {
    fn now(&mut self) -> f64 {
        (**self).now()
    }
}

/// Monotonic system clock, reporting seconds since it was created
pub struct SystemClock {
    origin: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn now(&mut self) -> f64 {
        self.origin.elapsed().as_secs_f64()
    }
}

/// Adapts a closure returning seconds
pub struct FnClock<F>(pub F);

impl<F: FnMut() -> f64> Clock for FnClock<F> {
    fn now(&mut self) -> f64 {
        (self.0)()
    }
}

/// Converts a raw tick counter (e.g. a hardware performance counter) to seconds
pub struct TickClock<F> {
    read_ticks: F,
    ticks_per_second: u64,
}

impl<F: FnMut() -> u64> TickClock<F> {
    /// `ticks_per_second` is clamped to at least 1
    pub fn new(ticks_per_second: u64, read_ticks: F) -> Self {
        Self {
            read_ticks,
            ticks_per_second: ticks_per_second.max(1),
        }
    }

    pub fn ticks_per_second(&self) -> u64 {
        self.ticks_per_second
    }
}

impl<F: FnMut() -> u64> Clock for TickClock<F> {
    fn now(&mut self) -> f64 {
        let ticks = (self.read_ticks)();
        // Split to keep precision for large counters
        let whole = ticks / self.ticks_per_second;
        let rem = ticks % self.ticks_per_second;
        whole as f64 + rem as f64 / self.ticks_per_second as f64
    }
}

/// Simulated clock that only moves when its handle says so
///
/// Single-threaded: the clock and its handles share one `Rc<Cell<f64>>`.
#[derive(Default)]
pub struct ManualClock {
    time: Rc<Cell<f64>>,
}

/// Controls the time reported by a [`ManualClock`]
#[derive(Clone)]
pub struct ClockHandle {
    time: Rc<Cell<f64>>,
}

impl ManualClock {
    pub fn new(start: f64) -> Self {
        Self {
            time: Rc::new(Cell::new(start)),
        }
    }

    pub fn handle(&self) -> ClockHandle {
        ClockHandle {
            time: Rc::clone(&self.time),
        }
    }
}

impl Clock for ManualClock {
    fn now(&mut self) -> f64 {
        self.time.get()
    }
}

impl ClockHandle {
    pub fn get(&self) -> f64 {
        self.time.get()
    }

    pub fn set(&self, seconds: f64) {
        self.time.set(seconds);
    }

    pub fn advance(&self, seconds: f64) {
        self.time.set(self.time.get() + seconds);
    }
}

/// Replays a fixed sequence of readings, then holds the last one
pub struct ScriptedClock {
    readings: VecDeque<f64>,
    last: f64,
}

impl ScriptedClock {
    pub fn new(readings: impl IntoIterator<Item = f64>) -> Self {
        Self {
            readings: readings.into_iter().collect(),
            last: 0.0,
        }
    }

    /// Readings not yet returned
    pub fn remaining(&self) -> usize {
        self.readings.len()
    }
}

impl Clock for ScriptedClock {
    fn now(&mut self) -> f64 {
        if let Some(next) = self.readings.pop_front() {
            self.last = next;
        }
        self.last
    }
}

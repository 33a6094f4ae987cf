#![forbid(unsafe_code)]

//! Wall-clock sources.
//!
//! The lock never reads the system time directly; it asks a [`Clock`]. Hosts
//! use [`SystemClock`]; tests use [`ManualClock`], whose clones share one
//! timeline so a test can hold a handle and advance time the widget sees.

use std::cell::Cell;
use std::rc::Rc;

use web_time::{Duration, Instant};

/// A monotonic time source.
pub trait Clock {
    fn now(&self) -> Instant;
}

/// The platform monotonic clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    #[inline]
    fn now(&self) -> Instant {
        Instant::now()
    }
}

/// A clock that only moves when told to.
///
/// Single-threaded by construction (`Rc`), matching the lock's execution
/// model.
#[derive(Debug, Clone)]
pub struct ManualClock {
    origin: Instant,
    offset: Rc<Cell<Duration>>,
}

impl ManualClock {
    /// Start a manual clock at the current instant.
    #[must_use]
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    /// Start a manual clock at `origin`.
    #[must_use]
    pub fn starting_at(origin: Instant) -> Self {
        Self {
            origin,
            offset: Rc::new(Cell::new(Duration::ZERO)),
        }
    }

    /// Move time forward by `dt`.
    pub fn advance(&self, dt: Duration) {
        self.offset.set(self.offset.get().saturating_add(dt));
    }

    /// Jump to `origin + elapsed`. Moving backwards is ignored.
    pub fn set_elapsed(&self, elapsed: Duration) {
        if elapsed > self.offset.get() {
            self.offset.set(elapsed);
        }
    }

    /// Time elapsed since the origin.
    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.offset.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.offset.get()
    }
}

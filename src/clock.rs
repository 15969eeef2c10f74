//! Time source for transaction timestamps

use std::cell::Cell;

use chrono::{Duration, Local, NaiveDateTime, Timelike};

/// Provides the current local date-time with whole-second precision
pub trait Clock {
    /// current instant
    fn now(&self) -> NaiveDateTime;
}

/// Wall clock of the machine
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        let now = Local::now().naive_local();
        now.with_nanosecond(0).unwrap_or(now)
    }
}

/// Always returns the same instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Starts at a given instant and moves forward by `step` on every reading
#[derive(Debug, Clone)]
pub struct SteppingClock {
    next: Cell<NaiveDateTime>,
    step: Duration,
}

impl SteppingClock {
    /// First reading returns `start`
    pub fn new(start: NaiveDateTime, step: Duration) -> Self {
        Self {
            next: Cell::new(start),
            step,
        }
    }
}

impl Clock for SteppingClock {
    fn now(&self) -> NaiveDateTime {
        let now = self.next.get();
        self.next.set(now + self.step);
        now
    }
}

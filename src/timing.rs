//! Scoped wall-clock timing.
//!
//! `timed` runs a closure and always reports how long it took, whether the closure
//! returned a value or an error.

use std::time::{Duration, Instant};

/// Outcome of a timed operation together with its elapsed wall-clock time.
#[derive(Debug)]
pub struct Timed<T> {
    pub outcome: T,
    pub elapsed: Duration,
}

impl<T, E> Timed<Result<T, E>> {
    /// Split a timed `Result` so the duration survives the error path.
    pub fn transpose(self) -> Result<Timed<T>, (E, Duration)> {
        match self.outcome {
            Ok(v) => Ok(Timed { outcome: v, elapsed: self.elapsed }),
            Err(e) => Err((e, self.elapsed)),
        }
    }
}

/// Run `op` and measure it.
pub fn timed<T>(op: impl FnOnce() -> T) -> Timed<T> {
    let start = Instant::now();
    let outcome = op();
    Timed { outcome, elapsed: start.elapsed() }
}

/// Accumulates durations for one plan entry.
#[derive(Debug, Default, Clone, Copy)]
pub struct Stopwatch {
    total: Duration,
    laps: u64,
}

impl Stopwatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, lap: Duration) {
        self.total += lap;
        self.laps += 1;
    }

    pub fn total(&self) -> Duration {
        self.total
    }

    pub fn laps(&self) -> u64 {
        self.laps
    }
}

//! Clocks for the move selector's time budget.
//!
//! The selector only reads elapsed time through [`Clock`], so budget
//! handling can be driven by a deterministic clock in tests.

use std::cell::Cell;
use std::time::{Duration, Instant};

/// Source of elapsed time for one move request.
pub trait Clock {
    /// Restart the clock at zero.
    fn start(&mut self);

    /// Time elapsed since the last [`Clock::start`].
    fn elapsed(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    started: Instant,
}

impl Default for SystemClock {
    fn default() -> Self {
        SystemClock {
            started: Instant::now(),
        }
    }
}

impl Clock for SystemClock {
    fn start(&mut self) {
        self.started = Instant::now();
    }

    fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Clock that advances by a fixed step every time it is read.
///
/// The n-th reading after [`Clock::start`] returns `n * step`, which makes
/// budget cut-offs reproducible.
#[derive(Debug, Clone, Default)]
pub struct SteppingClock {
    step: Duration,
    now: Cell<Duration>,
}

impl SteppingClock {
    #[must_use]
    pub fn new(step: Duration) -> Self {
        SteppingClock {
            step,
            now: Cell::new(Duration::ZERO),
        }
    }

    /// Number of readings taken since the last start.
    #[must_use]
    #[allow(clippy::cast_possible_truncation)]
    pub fn readings(&self) -> u32 {
        if self.step.is_zero() {
            return 0;
        }
        (self.now.get().as_nanos() / self.step.as_nanos()) as u32
    }
}

impl Clock for SteppingClock {
    fn start(&mut self) {
        self.now.set(Duration::ZERO);
    }

    fn elapsed(&self) -> Duration {
        let now = self.now.get() + self.step;
        self.now.set(now);
        now
    }
}

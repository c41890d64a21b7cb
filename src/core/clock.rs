//! Tick sources for running jobs.
//!
//! A job of `n` ticks calls [`TickClock::tick`] `n` times with the state lock
//! released. The real-time clock sleeps; the virtual clock returns at once so
//! tests run as fast as the scheduler can cycle.

use std::sync::atomic::{AtomicU64, Ordering};
use std::thread;
use std::time::Duration;

/// One unit of simulated time.
pub trait TickClock: Send + Sync {
    /// Block for one tick.
    fn tick(&self);
}

/// Wall-clock ticks of a fixed length.
#[derive(Debug, Clone, Copy)]
pub struct RealTimeClock {
    interval: Duration,
}

impl RealTimeClock {
    /// Clock whose ticks last `interval`.
    #[must_use]
    pub const fn new(interval: Duration) -> Self {
        Self { interval }
    }
}

impl TickClock for RealTimeClock {
    fn tick(&self) {
        thread::sleep(self.interval);
    }
}

/// Instant ticks, counted across every instance sharing the clock.
#[derive(Debug, Default)]
pub struct VirtualClock {
    ticks: AtomicU64,
}

impl VirtualClock {
    /// Fresh clock with no ticks recorded.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            ticks: AtomicU64::new(0),
        }
    }

    /// Total ticks served so far.
    #[must_use]
    pub fn ticks(&self) -> u64 {
        self.ticks.load(Ordering::Acquire)
    }
}

impl TickClock for VirtualClock {
    fn tick(&self) {
        self.ticks.fetch_add(1, Ordering::AcqRel);
        thread::yield_now();
    }
}

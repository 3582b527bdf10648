//! Monotonic clock abstraction used for pacing and gravity.

use std::cell::Cell;
use std::time::{Duration, Instant};

const NANOS_PER_SEC: u128 = 1_000_000_000;

/// Monotonic counter with a known frequency, plus the two ways of waiting the
/// pacer uses.
pub trait Clock {
    /// Current counter value; never decreases
    fn now(&self) -> u64;

    /// Counter ticks per second
    fn frequency(&self) -> u64;

    /// Coarse, OS-scheduled wait
    fn sleep(&self, duration: Duration);

    /// One iteration of a busy-wait
    fn spin(&self) {
        std::hint::spin_loop();
    }
}

/// Convert a counter delta to wall time
pub fn ticks_to_duration(ticks: u64, frequency: u64) -> Duration {
    let nanos = ticks as u128 * NANOS_PER_SEC / frequency.max(1) as u128;
    Duration::from_nanos(nanos.min(u64::MAX as u128) as u64)
}

/// Convert wall time to a counter delta, rounding down
pub fn duration_to_ticks(duration: Duration, frequency: u64) -> u64 {
    let ticks = duration.as_nanos() * frequency as u128 / NANOS_PER_SEC;
    ticks.min(u64::MAX as u128) as u64
}

/// `Instant`-backed clock with nanosecond ticks
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
    origin: Instant,
}

impl SystemClock {
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for SystemClock {
    fn now(&self) -> u64 {
        duration_to_ticks(self.origin.elapsed(), NANOS_PER_SEC as u64)
    }

    fn frequency(&self) -> u64 {
        NANOS_PER_SEC as u64
    }

    fn sleep(&self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

/// Deterministic clock for tests and headless replays.
///
/// Time only moves when told to: `sleep` advances by the requested duration
/// and `spin` by one tick.
#[derive(Debug)]
pub struct ManualClock {
    counter: Cell<u64>,
    frequency: u64,
    slept: Cell<Duration>,
}

impl ManualClock {
    /// Microsecond resolution
    pub fn new() -> Self {
        Self::with_frequency(1_000_000)
    }

    pub fn with_frequency(frequency: u64) -> Self {
        Self {
            counter: Cell::new(0),
            frequency: frequency.max(1),
            slept: Cell::new(Duration::ZERO),
        }
    }

    /// Simulate work or a stall
    pub fn advance(&self, duration: Duration) {
        self.advance_ticks(duration_to_ticks(duration, self.frequency));
    }

    pub fn advance_ticks(&self, ticks: u64) {
        self.counter.set(self.counter.get() + ticks);
    }

    /// Total time spent in `sleep`
    pub fn slept(&self) -> Duration {
        self.slept.get()
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> u64 {
        self.counter.get()
    }

    fn frequency(&self) -> u64 {
        self.frequency
    }

    fn sleep(&self, duration: Duration) {
        self.slept.set(self.slept.get() + duration);
        self.advance(duration);
    }

    fn spin(&self) {
        self.advance_ticks(1);
    }
}

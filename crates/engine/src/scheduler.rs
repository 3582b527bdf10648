//! Frame scheduler - fixed-cadence pacing and the gravity cadence.
//!
//! Pacing is a two-phase wait: whole-millisecond sleeps while at least two
//! granules remain, then a spin until the target.

use std::time::Duration;

use log::{trace, warn};

use crate::clock::{duration_to_ticks, ticks_to_duration, Clock};
use crate::types::{DEFAULT_REFRESH_HZ, SLEEP_GRANULARITY_MS};

/// Simulation rate for a display refresh rate: half the refresh, with
/// implausible or missing rates replaced by the default.
pub fn tick_rate_hz(refresh_hz: Option<u32>) -> f64 {
    let refresh = refresh_hz
        .filter(|&hz| hz > 1)
        .unwrap_or(DEFAULT_REFRESH_HZ);
    refresh as f64 / 2.0
}

/// Timing of one finished tick
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TickReport {
    /// Simulation and presentation time before pacing
    pub work: Duration,
    /// Full tick including the wait
    pub frame: Duration,
    pub missed_deadline: bool,
}

impl TickReport {
    pub fn fps(&self) -> f64 {
        let secs = self.frame.as_secs_f64();
        if secs > 0.0 {
            1.0 / secs
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone)]
pub struct FrameScheduler {
    target: Duration,
    target_ticks: u64,
    frequency: u64,
    tick_start: u64,
    ticks: u64,
    missed_deadlines: u64,
}

impl FrameScheduler {
    /// Compute the target once and start the first tick now
    pub fn new(clock: &impl Clock, refresh_hz: Option<u32>) -> Self {
        let target = Duration::from_secs_f64(1.0 / tick_rate_hz(refresh_hz));
        let frequency = clock.frequency();
        Self {
            target,
            target_ticks: duration_to_ticks(target, frequency).max(1),
            frequency,
            tick_start: clock.now(),
            ticks: 0,
            missed_deadlines: 0,
        }
    }

    pub fn target_tick_duration(&self) -> Duration {
        self.target
    }

    /// Counter value the running tick started at
    pub fn tick_start(&self) -> u64 {
        self.tick_start
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn missed_deadlines(&self) -> u64 {
        self.missed_deadlines
    }

    /// Restart the running tick, e.g. after a host-side stall that should not
    /// count against the budget.
    pub fn restart(&mut self, clock: &impl Clock) {
        self.tick_start = clock.now();
    }

    /// Finish the running tick: wait out the remaining budget, or report the
    /// overrun, then start the next tick.
    pub fn end_tick(&mut self, clock: &impl Clock) -> TickReport {
        let work_ticks = clock.now().saturating_sub(self.tick_start);
        let work = ticks_to_duration(work_ticks, self.frequency);
        let missed_deadline = work_ticks >= self.target_ticks;

        if missed_deadline {
            self.missed_deadlines += 1;
            warn!(
                "missed tick deadline: {:.02}ms of work against a {:.02}ms target",
                work.as_secs_f64() * 1000.0,
                self.target.as_secs_f64() * 1000.0
            );
        } else {
            self.wait_until_target(clock);
        }

        let end = clock.now();
        let frame = ticks_to_duration(end.saturating_sub(self.tick_start), self.frequency);
        self.tick_start = end;
        self.ticks += 1;

        let report = TickReport {
            work,
            frame,
            missed_deadline,
        };
        trace!(
            "{:.02}ms/f, {:.02}fps, {:.02}ms work",
            frame.as_secs_f64() * 1000.0,
            report.fps(),
            work.as_secs_f64() * 1000.0
        );
        report
    }

    fn wait_until_target(&self, clock: &impl Clock) {
        loop {
            let elapsed = clock.now().saturating_sub(self.tick_start);
            if elapsed >= self.target_ticks {
                break;
            }

            let remaining = ticks_to_duration(self.target_ticks - elapsed, self.frequency);
            let remaining_ms = remaining.as_millis() as u32;
            if remaining_ms > SLEEP_GRANULARITY_MS {
                let sleep_ms = remaining_ms - SLEEP_GRANULARITY_MS;
                clock.sleep(Duration::from_millis(sleep_ms as u64));
            } else {
                clock.spin();
            }
        }
    }
}

/// Gravity cadence, decoupled from the tick rate.
///
/// The timestamp only moves when drops are granted, and it moves by whole
/// intervals, so the number of drops tracks wall time no matter how many ticks
/// run in between.
#[derive(Debug, Clone)]
pub struct GravityTimer {
    interval: Duration,
    interval_ticks: u64,
    last_drop: u64,
}

impl GravityTimer {
    pub fn new(clock: &impl Clock, interval: Duration) -> Self {
        Self {
            interval,
            interval_ticks: duration_to_ticks(interval, clock.frequency()).max(1),
            last_drop: clock.now(),
        }
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Whole intervals elapsed since the last granted drop
    pub fn due_drops(&mut self, now: u64) -> u32 {
        let elapsed = now.saturating_sub(self.last_drop);
        let due = elapsed / self.interval_ticks;
        self.last_drop += due * self.interval_ticks;
        due.min(u32::MAX as u64) as u32
    }

    /// Start a fresh interval at `now`
    pub fn reset(&mut self, now: u64) {
        self.last_drop = now;
    }
}

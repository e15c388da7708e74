//! Tick time and repeating schedules
//!
//! The library never owns a clock. Hosts advance their own tick counter and
//! poll campaign schedules with it, so the same code runs under a game loop,
//! a test, or a headless simulation.

/// Monotonic simulation time, counted in ticks.
pub type Tick = u64;

/// Simulation ticks per wall-clock second.
pub const TICKS_PER_SECOND: Tick = 20;

/// A cancellable fixed-interval schedule.
///
/// Owned by whoever runs the work; dropping the task cancels it. Firing is
/// polled, not pushed: call [`fire_due`](RepeatingTask::fire_due) with the
/// current tick and run the work when it returns true.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatingTask {
    next_run: Tick,
    period: Tick,
}

impl RepeatingTask {
    /// Schedules the first firing `initial_delay` ticks after `now`, then
    /// every `period` ticks. A zero period is bumped to one tick.
    pub fn new(now: Tick, initial_delay: Tick, period: Tick) -> Self {
        Self {
            next_run: now + initial_delay,
            period: period.max(1),
        }
    }

    /// Returns true at most once per call when the schedule is due, and
    /// pushes the next firing `period` ticks past `now`. A poll that arrives
    /// late fires once rather than replaying missed firings.
    pub fn fire_due(&mut self, now: Tick) -> bool {
        if now < self.next_run {
            return false;
        }
        self.next_run = now + self.period;
        true
    }

    pub fn next_run(&self) -> Tick {
        self.next_run
    }

    pub fn period(&self) -> Tick {
        self.period
    }
}

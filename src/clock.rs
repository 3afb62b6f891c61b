use std::time::{Duration, Instant};

/// Schedules game ticks at a fixed period.
///
/// The clock does not measure time itself; callers pass in the current
/// instant, and after handling a due tick, call [`Clock::fire()`] to schedule
/// the next one a full period later.  A tick that is handled late therefore
/// delays the following ticks rather than causing a burst of catch-up ticks.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct Clock {
    period: Duration,
    next_tick: Option<Instant>,
}

impl Clock {
    /// Create a stopped clock that ticks every `period` once started
    pub(crate) fn new(period: Duration) -> Clock {
        Clock {
            period,
            next_tick: None,
        }
    }

    /// Start the clock, with the first tick one period after `now`.  Has no
    /// effect if the clock is already running.
    pub(crate) fn start(&mut self, now: Instant) {
        if self.next_tick.is_none() {
            self.next_tick = Some(now + self.period);
        }
    }

    pub(crate) fn stop(&mut self) {
        self.next_tick = None;
    }

    pub(crate) fn is_running(&self) -> bool {
        self.next_tick.is_some()
    }

    /// Return how long to wait after `now` until the next tick is due, or
    /// `None` if the clock is stopped.  Returns zero if a tick is already
    /// due.
    pub(crate) fn wait(&self, now: Instant) -> Option<Duration> {
        self.next_tick
            .map(|when| when.saturating_duration_since(now))
    }

    /// Return `true` if the clock is running and a tick is due at `now`
    pub(crate) fn due(&self, now: Instant) -> bool {
        self.wait(now).is_some_and(|d| d.is_zero())
    }

    /// Record that a tick was handled at `now` and schedule the next one.
    /// Has no effect if the clock is stopped.
    pub(crate) fn fire(&mut self, now: Instant) {
        if self.next_tick.is_some() {
            self.next_tick = Some(now + self.period);
        }
    }
}

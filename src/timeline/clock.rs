use std::collections::BTreeMap;
use std::time::{Duration, Instant};

use crate::foundation::error::{RaceError, RaceResult};

/// Handle of a scheduled repeating timer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize)]
pub struct TimerId(pub u64);

/// Milliseconds since a scheduler's epoch.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize,
)]
pub struct Millis(pub u64);

impl Millis {
    /// `self + ms`, saturating.
    pub fn after(self, ms: u64) -> Self {
        Self(self.0.saturating_add(ms))
    }
}

/// Single-threaded timer queue.
///
/// Ticks are not delivered by callback: the owner pulls them one at a time with
/// [`Scheduler::pop_due`] and dispatches them itself, so every tick is a discrete step and
/// handling one tick always completes before the next is popped.
///
/// Contract: once [`Scheduler::cancel`] returns, `pop_due` never yields that id again.
pub trait Scheduler {
    /// Current time.
    fn now(&self) -> Millis;
    /// Register a timer firing every `period_ms`, first at `now + period_ms`.
    fn schedule_repeating(&mut self, period_ms: u64) -> RaceResult<TimerId>;
    /// Remove a timer. Returns `false` when it was not registered.
    fn cancel(&mut self, id: TimerId) -> bool;
    /// Pop the earliest tick due at or before `deadline`, moving time to it.
    ///
    /// Returns `None` (with time moved to `deadline`) when nothing is due. Equal due times pop in
    /// scheduling order.
    fn pop_due(&mut self, deadline: Millis) -> Option<TimerId>;
    /// Number of registered timers.
    fn active_timers(&self) -> usize;
}

#[derive(Clone, Copy, Debug)]
struct Timer {
    period_ms: u64,
    next_due: Millis,
}

/// Timer bookkeeping shared by the clocks.
#[derive(Debug, Default)]
struct TimerTable {
    next_id: u64,
    timers: BTreeMap<TimerId, Timer>,
}

impl TimerTable {
    fn schedule(&mut self, now: Millis, period_ms: u64) -> RaceResult<TimerId> {
        if period_ms == 0 {
            return Err(RaceError::schedule("timer period must be > 0"));
        }
        let id = TimerId(self.next_id);
        self.next_id += 1;
        self.timers.insert(
            id,
            Timer {
                period_ms,
                next_due: now.after(period_ms),
            },
        );
        Ok(id)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.timers.remove(&id).is_some()
    }

    /// Earliest `(due, id)`; ids break ties so scheduling order wins.
    fn earliest(&self) -> Option<(Millis, TimerId)> {
        self.timers
            .iter()
            .map(|(&id, t)| (t.next_due, id))
            .min()
    }

    fn fire(&mut self, id: TimerId) {
        if let Some(t) = self.timers.get_mut(&id) {
            t.next_due = t.next_due.after(t.period_ms);
        }
    }
}

/// Simulated clock: time only moves when ticks are popped.
///
/// Used by tests and headless replays.
#[derive(Debug, Default)]
pub struct ManualClock {
    now: Millis,
    table: TimerTable,
    fail_next: Option<String>,
}

impl ManualClock {
    /// Clock starting at `0 ms`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Make the next `schedule_repeating` call fail with `reason`.
    pub fn fail_next_schedule(&mut self, reason: impl Into<String>) {
        self.fail_next = Some(reason.into());
    }
}

impl Scheduler for ManualClock {
    fn now(&self) -> Millis {
        self.now
    }

    fn schedule_repeating(&mut self, period_ms: u64) -> RaceResult<TimerId> {
        if let Some(reason) = self.fail_next.take() {
            return Err(RaceError::schedule(reason));
        }
        self.table.schedule(self.now, period_ms)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.table.cancel(id)
    }

    fn pop_due(&mut self, deadline: Millis) -> Option<TimerId> {
        match self.table.earliest() {
            Some((due, id)) if due <= deadline => {
                self.now = self.now.max(due);
                self.table.fire(id);
                Some(id)
            }
            _ => {
                self.now = self.now.max(deadline);
                None
            }
        }
    }

    fn active_timers(&self) -> usize {
        self.table.timers.len()
    }
}

/// Real-time clock: `pop_due` sleeps the calling thread until the next tick.
#[derive(Debug)]
pub struct WallClock {
    epoch: Instant,
    table: TimerTable,
}

impl Default for WallClock {
    fn default() -> Self {
        Self::new()
    }
}

impl WallClock {
    /// Clock whose epoch is now.
    pub fn new() -> Self {
        Self {
            epoch: Instant::now(),
            table: TimerTable::default(),
        }
    }

    fn sleep_until(&self, at: Millis) {
        let now = self.now();
        if at > now {
            std::thread::sleep(Duration::from_millis(at.0 - now.0));
        }
    }
}

impl Scheduler for WallClock {
    fn now(&self) -> Millis {
        Millis(u64::try_from(self.epoch.elapsed().as_millis()).unwrap_or(u64::MAX))
    }

    fn schedule_repeating(&mut self, period_ms: u64) -> RaceResult<TimerId> {
        let now = self.now();
        self.table.schedule(now, period_ms)
    }

    fn cancel(&mut self, id: TimerId) -> bool {
        self.table.cancel(id)
    }

    fn pop_due(&mut self, deadline: Millis) -> Option<TimerId> {
        match self.table.earliest() {
            Some((due, id)) if due <= deadline => {
                self.sleep_until(due);
                self.table.fire(id);
                Some(id)
            }
            _ => {
                self.sleep_until(deadline);
                None
            }
        }
    }

    fn active_timers(&self) -> usize {
        self.table.timers.len()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/clock.rs"]
mod tests;

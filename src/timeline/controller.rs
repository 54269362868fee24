use crate::foundation::core::{Year, YearRange, parse_year};
use crate::foundation::error::{RaceError, RaceResult};
use crate::timeline::clock::{Millis, Scheduler, TimerId};
use crate::timeline::state::{PlaybackOptions, PlaybackState, PlaybackStatus};

/// Receiver of timeline positions, usually a [`crate::ChartSyncAdapter`].
pub trait SyncTarget {
    /// Show `year`. Called synchronously by every controller transition.
    fn sync(&mut self, year: Year) -> RaceResult<()>;

    /// Reflect a status change on the transport control (play/pause button, range input).
    fn status_changed(&mut self, _status: PlaybackStatus, _year: Year) -> RaceResult<()> {
        Ok(())
    }
}

/// Playback state machine for one chart.
///
/// Owns the scheduler and the sync target; nothing about playback lives outside this value.
/// Transitions: `Idle -> Playing -> Paused -> Playing -> ... -> Paused (at end)`.
///
/// Every transition calls [`SyncTarget::sync`] before returning, so the chart never lags the
/// reported `current_year`. Cancelling always happens before rescheduling, and a tick whose id
/// is not the active timer is dropped.
pub struct TimelineController<S: Scheduler, T: SyncTarget> {
    range: YearRange,
    opts: PlaybackOptions,
    status: PlaybackStatus,
    current_year: Year,
    timer: Option<TimerId>,
    scheduler: S,
    target: T,
}

impl<S: Scheduler, T: SyncTarget> TimelineController<S, T> {
    /// Create an idle controller positioned at `range.start`.
    ///
    /// Construction does not sync; the chart is expected to have been built at `range.start`.
    pub fn new(
        range: YearRange,
        opts: PlaybackOptions,
        scheduler: S,
        target: T,
    ) -> RaceResult<Self> {
        opts.validate()?;
        Ok(Self {
            range,
            opts,
            status: PlaybackStatus::Idle,
            current_year: range.start,
            timer: None,
            scheduler,
            target,
        })
    }

    /// Snapshot of the playback state.
    pub fn state(&self) -> PlaybackState {
        PlaybackState {
            status: self.status,
            current_year: self.current_year,
            step_ms: self.opts.step_ms,
            step_size: self.opts.step_size,
        }
    }

    /// Transport status.
    pub fn status(&self) -> PlaybackStatus {
        self.status
    }

    /// Year currently shown.
    pub fn current_year(&self) -> Year {
        self.current_year
    }

    /// Bounds of the timeline.
    pub fn range(&self) -> YearRange {
        self.range
    }

    /// Active timer, if playing.
    pub fn timer(&self) -> Option<TimerId> {
        self.timer
    }

    /// Borrow the scheduler.
    pub fn scheduler(&self) -> &S {
        &self.scheduler
    }

    /// Mutably borrow the scheduler.
    pub fn scheduler_mut(&mut self) -> &mut S {
        &mut self.scheduler
    }

    /// Borrow the sync target.
    pub fn target(&self) -> &T {
        &self.target
    }

    /// Mutably borrow the sync target.
    pub fn target_mut(&mut self) -> &mut T {
        &mut self.target
    }

    /// Start ticking every `step_ms`.
    ///
    /// No-op while already playing. When parked on the last year, playback restarts from the
    /// first year. If the scheduler refuses the timer, the controller falls back to `Idle` and a
    /// later `play()` retries.
    pub fn play(&mut self) -> RaceResult<()> {
        if self.status == PlaybackStatus::Playing {
            return Ok(());
        }

        let (previous, previous_year) = (self.status, self.current_year);
        if self.current_year == self.range.end && self.range.start < self.range.end {
            tracing::debug!(year = self.range.start, "replaying from first year");
            self.current_year = self.range.start;
        }

        self.cancel_timer();
        match self.scheduler.schedule_repeating(self.opts.step_ms) {
            Ok(id) => {
                self.timer = Some(id);
                if let Err(e) = self.set_status(PlaybackStatus::Playing) {
                    // Roll back: the target never saw `Playing`.
                    self.cancel_timer();
                    self.status = previous;
                    self.current_year = previous_year;
                    return Err(e);
                }
            }
            Err(e) => {
                tracing::warn!(error = %e, "could not schedule playback; timeline stays idle");
                self.set_status(PlaybackStatus::Idle)?;
            }
        }
        self.target.sync(self.current_year)
    }

    /// Stop ticking. Idempotent when paused, no-op when idle.
    pub fn pause(&mut self) -> RaceResult<()> {
        if self.status != PlaybackStatus::Playing {
            return Ok(());
        }
        self.cancel_timer();
        self.set_status(PlaybackStatus::Paused)?;
        self.target.sync(self.current_year)
    }

    /// Pause when playing, play otherwise. This is what the play/pause control is bound to.
    pub fn toggle(&mut self) -> RaceResult<()> {
        match self.status {
            PlaybackStatus::Playing => self.pause(),
            PlaybackStatus::Idle | PlaybackStatus::Paused => self.play(),
        }
    }

    /// Jump to `year`, clamped into range. Always stops playback.
    pub fn seek(&mut self, year: i64) -> RaceResult<()> {
        self.cancel_timer();
        let clamped = self.range.clamp(year);
        if i64::from(clamped) != year {
            tracing::debug!(requested = year, clamped, "seek clamped into range");
        }
        self.current_year = clamped;
        self.set_status(PlaybackStatus::Paused)?;
        self.target.sync(self.current_year)
    }

    /// Seek from a range-input value, coercing the string to an integer year first.
    pub fn seek_input(&mut self, raw: &str) -> RaceResult<()> {
        let year = parse_year(raw)
            .ok_or_else(|| RaceError::invalid_input(format!("'{raw}' is not a year")))?;
        self.seek(year)
    }

    /// Move `n` years, clamped into range. Reaching the last year pauses playback.
    pub fn advance(&mut self, n: i64) -> RaceResult<()> {
        let next = i64::from(self.current_year).saturating_add(n);
        self.current_year = self.range.clamp(next);
        if self.current_year >= self.range.end {
            self.cancel_timer();
            self.set_status(PlaybackStatus::Paused)?;
        }
        self.target.sync(self.current_year)
    }

    /// Handle one popped timer tick. Returns `false` for ticks that were ignored.
    pub fn on_tick(&mut self, id: TimerId) -> RaceResult<bool> {
        if self.timer != Some(id) || self.status != PlaybackStatus::Playing {
            tracing::debug!(timer = id.0, "ignoring tick of inactive timer");
            return Ok(false);
        }
        self.advance(i64::from(self.opts.step_size))?;
        Ok(true)
    }

    /// Deliver every tick due up to `deadline`, one at a time. Returns the ticks handled.
    pub fn run_until(&mut self, deadline: Millis) -> RaceResult<usize> {
        let mut handled = 0;
        while let Some(id) = self.scheduler.pop_due(deadline) {
            if self.on_tick(id)? {
                handled += 1;
            }
        }
        Ok(handled)
    }

    /// [`TimelineController::run_until`] `ms` from now.
    pub fn run_for(&mut self, ms: u64) -> RaceResult<usize> {
        let deadline = self.scheduler.now().after(ms);
        self.run_until(deadline)
    }

    /// Cancel any timer and hand back the scheduler and target.
    pub fn dispose(mut self) -> (S, T) {
        self.cancel_timer();
        self.status = PlaybackStatus::Idle;
        (self.scheduler, self.target)
    }

    fn cancel_timer(&mut self) {
        if let Some(id) = self.timer.take() {
            self.scheduler.cancel(id);
        }
    }

    fn set_status(&mut self, status: PlaybackStatus) -> RaceResult<()> {
        if self.status == status {
            return Ok(());
        }
        tracing::debug!(from = ?self.status, to = ?status, year = self.current_year, "playback");
        self.status = status;
        self.target.status_changed(status, self.current_year)
    }
}

#[cfg(test)]
#[path = "../../tests/unit/timeline/controller.rs"]
mod tests;

use crate::chart::backend::ChartBackend;
use crate::chart::sync::ChartSyncAdapter;
use crate::data::index::EntityIndex;
use crate::data::source::{DataSource, load_index};
use crate::foundation::core::ContainerId;
use crate::foundation::error::{RaceError, RaceResult};
use crate::session::config::RaceConfig;
use crate::timeline::clock::{Millis, Scheduler, TimerId};
use crate::timeline::controller::TimelineController;
use crate::visibility::gate::{IntersectionEntry, IntersectionObserver, VisibilityGate};

type Reveal = fn(&ContainerId) -> ContainerId;

/// Controller type of a constructed chart.
pub type RaceController<S, B> = TimelineController<S, ChartSyncAdapter<B>>;

enum Stage<S: Scheduler, B: ChartBackend> {
    Pending {
        index: EntityIndex,
        scheduler: S,
        backend: B,
        gate: VisibilityGate<Reveal>,
    },
    Revealing {
        index: EntityIndex,
        scheduler: S,
        backend: B,
        container: ContainerId,
        timer: TimerId,
    },
    Live(RaceController<S, B>),
    Broken,
}

/// One bar-race chart from data load to disposal.
///
/// The chart is built lazily: nothing reaches the backend until the container is first reported
/// visible, plus `reveal_delay_ms` on the chart's scheduler when that is set. Transport calls
/// made before that are no-ops.
pub struct RaceChart<S: Scheduler, B: ChartBackend> {
    config: RaceConfig,
    stage: Stage<S, B>,
}

impl<S: Scheduler, B: ChartBackend> RaceChart<S, B> {
    /// Fetch and index the data at `location`.
    ///
    /// Failures are logged and yield `None`; the caller then simply does not build the chart.
    pub fn load(
        source: &dyn DataSource,
        location: &str,
        config: &RaceConfig,
    ) -> Option<EntityIndex> {
        match Self::try_load(source, location, config) {
            Ok(index) => Some(index),
            Err(e) => {
                tracing::error!(location, error = %e, "race data unavailable; chart not rendered");
                None
            }
        }
    }

    /// [`RaceChart::load`] without swallowing the error.
    pub fn try_load(
        source: &dyn DataSource,
        location: &str,
        config: &RaceConfig,
    ) -> RaceResult<EntityIndex> {
        load_index(source, location, &config.index_options())
    }

    /// Register `container` with `observer` and wait for it to become visible.
    pub fn new(
        index: EntityIndex,
        config: RaceConfig,
        scheduler: S,
        backend: B,
        container: ContainerId,
        observer: &mut dyn IntersectionObserver,
    ) -> RaceResult<Self> {
        config.validate()?;
        let reveal: Reveal = <ContainerId as Clone>::clone;
        let gate = VisibilityGate::on_becomes_visible(observer, container, reveal);
        Ok(Self {
            config,
            stage: Stage::Pending {
                index,
                scheduler,
                backend,
                gate,
            },
        })
    }

    /// Config the chart was built with.
    pub fn config(&self) -> &RaceConfig {
        &self.config
    }

    /// Whether the chart has been constructed.
    pub fn is_live(&self) -> bool {
        matches!(self.stage, Stage::Live(_))
    }

    /// Feed an intersection entry. Returns `true` when this entry constructed the chart.
    ///
    /// With a reveal delay the entry only arms the delay timer and `false` is returned; the
    /// chart is then constructed by the `run_until` call that reaches the timer.
    pub fn on_intersection(
        &mut self,
        observer: &mut dyn IntersectionObserver,
        entry: &IntersectionEntry,
    ) -> RaceResult<bool> {
        let Stage::Pending { gate, .. } = &mut self.stage else {
            return Ok(false);
        };
        let Some(container) = gate.notify(observer, entry) else {
            return Ok(false);
        };
        let Stage::Pending {
            index,
            mut scheduler,
            backend,
            ..
        } = std::mem::replace(&mut self.stage, Stage::Broken)
        else {
            return Ok(false);
        };

        let delay = self.config.reveal_delay_ms;
        if delay > 0 {
            match scheduler.schedule_repeating(delay) {
                Ok(timer) => {
                    tracing::debug!(container = %container, delay, "chart reveal scheduled");
                    self.stage = Stage::Revealing {
                        index,
                        scheduler,
                        backend,
                        container,
                        timer,
                    };
                    return Ok(false);
                }
                Err(e) => {
                    tracing::warn!(error = %e, "could not delay chart reveal; building now");
                }
            }
        }
        self.build(index, scheduler, backend, &container)?;
        Ok(true)
    }

    fn build(
        &mut self,
        index: EntityIndex,
        scheduler: S,
        backend: B,
        container: &ContainerId,
    ) -> RaceResult<()> {
        let range = index.range();
        let mut adapter = ChartSyncAdapter::new(index, self.config.sync_options(), backend);
        if let Err(e) = adapter.init(container, range.start) {
            tracing::error!(container = %container, error = %e, "chart construction failed");
            return Err(e);
        }
        let controller =
            TimelineController::new(range, self.config.playback_options(), scheduler, adapter)?;
        tracing::debug!(container = %container, start = range.start, "race chart constructed");
        self.stage = Stage::Live(controller);
        Ok(())
    }

    /// Constructed controller, if any.
    pub fn controller(&self) -> Option<&RaceController<S, B>> {
        match &self.stage {
            Stage::Live(c) => Some(c),
            _ => None,
        }
    }

    /// Mutable constructed controller, if any.
    pub fn controller_mut(&mut self) -> Option<&mut RaceController<S, B>> {
        match &mut self.stage {
            Stage::Live(c) => Some(c),
            _ => None,
        }
    }

    /// Play/pause control.
    pub fn toggle(&mut self) -> RaceResult<()> {
        match self.controller_mut() {
            Some(c) => c.toggle(),
            None => Ok(()),
        }
    }

    /// Range-input control.
    pub fn seek_input(&mut self, raw: &str) -> RaceResult<()> {
        match self.controller_mut() {
            Some(c) => c.seek_input(raw),
            None => Ok(()),
        }
    }

    /// Deliver due ticks. Returns the playback ticks handled, zero while pending.
    ///
    /// A due reveal timer constructs the chart first; ticks after it reach the new controller.
    pub fn run_until(&mut self, deadline: Millis) -> RaceResult<usize> {
        if let Stage::Revealing {
            scheduler, timer, ..
        } = &mut self.stage
        {
            let mut revealed = false;
            while let Some(id) = scheduler.pop_due(deadline) {
                if id == *timer {
                    scheduler.cancel(id);
                    revealed = true;
                    break;
                }
            }
            if !revealed {
                return Ok(0);
            }
            if let Stage::Revealing {
                index,
                scheduler,
                backend,
                container,
                ..
            } = std::mem::replace(&mut self.stage, Stage::Broken)
            {
                self.build(index, scheduler, backend, &container)?;
            }
        }

        match self.controller_mut() {
            Some(c) => c.run_until(deadline),
            None => Ok(0),
        }
    }

    /// [`RaceChart::run_until`] `ms` from the scheduler's now.
    pub fn run_for(&mut self, ms: u64) -> RaceResult<usize> {
        let now = match &self.stage {
            Stage::Pending { scheduler, .. } | Stage::Revealing { scheduler, .. } => {
                scheduler.now()
            }
            Stage::Live(c) => c.scheduler().now(),
            Stage::Broken => return Ok(0),
        };
        self.run_until(now.after(ms))
    }

    /// Advance the label tweens.
    pub fn animate(&mut self, elapsed_ms: u64) -> RaceResult<()> {
        match self.controller_mut() {
            Some(c) => c.target_mut().animate(elapsed_ms),
            None => Ok(()),
        }
    }

    /// Tear everything down and hand back the scheduler and backend.
    ///
    /// A pending chart stops observing its container, a chart waiting out its reveal delay
    /// cancels that timer, and a live one cancels its timer and destroys the chart.
    pub fn dispose(self, observer: &mut dyn IntersectionObserver) -> RaceResult<(S, B)> {
        match self.stage {
            Stage::Pending {
                scheduler,
                backend,
                mut gate,
                ..
            } => {
                gate.cancel(observer);
                Ok((scheduler, backend))
            }
            Stage::Revealing {
                mut scheduler,
                backend,
                timer,
                ..
            } => {
                scheduler.cancel(timer);
                Ok((scheduler, backend))
            }
            Stage::Live(controller) => {
                let (scheduler, mut adapter) = controller.dispose();
                adapter.destroy()?;
                Ok((scheduler, adapter.into_backend()))
            }
            Stage::Broken => Err(RaceError::chart(
                "chart construction failed earlier; nothing to dispose",
            )),
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/race_chart.rs"]
mod tests;

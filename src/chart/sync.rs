use crate::chart::backend::{
    BarPoint, ChartBackend, ChartOptions, DataSorting, Readout, SeriesUpdate, TrendPoint,
};
use crate::chart::format::{ReadoutFormat, ReadoutValue};
use crate::chart::label::{LabelAnimator, LabelOptions};
use crate::data::index::EntityIndex;
use crate::foundation::core::{ContainerId, Year};
use crate::foundation::error::{RaceError, RaceResult};
use crate::snapshot::resolver::{DEFAULT_TOP_N, Snapshot, SnapshotResolver};
use crate::timeline::controller::SyncTarget;
use crate::timeline::state::PlaybackStatus;

/// Static look of the chart.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct ChartStyle {
    /// Chart title.
    pub title: String,
    /// Library point animation in milliseconds; usually equal to the tick period.
    pub animation_ms: u64,
    /// Give every bar its own color.
    pub color_by_point: bool,
}

impl Default for ChartStyle {
    fn default() -> Self {
        Self {
            title: String::new(),
            animation_ms: 500,
            color_by_point: true,
        }
    }
}

/// Everything the adapter needs besides the data and the backend.
#[derive(Clone, Debug, PartialEq)]
pub struct SyncOptions {
    /// Bars kept per snapshot, leader included.
    pub top_n: usize,
    /// Readout line format.
    pub readout: ReadoutFormat,
    /// Label tween settings.
    pub labels: LabelOptions,
    /// Chart look.
    pub style: ChartStyle,
    /// Tick period; label tweens span one period.
    pub step_ms: u64,
}

impl Default for SyncOptions {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            readout: ReadoutFormat::default(),
            labels: LabelOptions::default(),
            style: ChartStyle::default(),
            step_ms: 500,
        }
    }
}

/// Pushes timeline positions into one chart instance.
///
/// The chart is built once by [`ChartSyncAdapter::init`]; afterwards every
/// [`ChartSyncAdapter::sync`] replaces series data in place, rewrites the readout and grows or
/// resets the trend overlay. The adapter owns no timers, so it can be synced at any rate.
pub struct ChartSyncAdapter<B: ChartBackend> {
    index: EntityIndex,
    resolver: SnapshotResolver,
    opts: SyncOptions,
    labels: LabelAnimator,
    backend: B,
    container: Option<ContainerId>,
    destroyed: bool,
    trend_until: Option<Year>,
    last_snapshot: Option<Snapshot>,
}

impl<B: ChartBackend> ChartSyncAdapter<B> {
    /// Adapter over `index` drawing into `backend`. Nothing is drawn until `init`.
    pub fn new(index: EntityIndex, opts: SyncOptions, backend: B) -> Self {
        Self {
            index,
            resolver: SnapshotResolver::new(opts.top_n),
            labels: LabelAnimator::new(opts.labels),
            opts,
            backend,
            container: None,
            destroyed: false,
            trend_until: None,
            last_snapshot: None,
        }
    }

    /// Data the adapter resolves snapshots from.
    pub fn index(&self) -> &EntityIndex {
        &self.index
    }

    /// Borrow the backend.
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Mutably borrow the backend.
    pub fn backend_mut(&mut self) -> &mut B {
        &mut self.backend
    }

    /// Whether the chart is built and not yet destroyed.
    pub fn is_initialized(&self) -> bool {
        self.container.is_some() && !self.destroyed
    }

    /// Whether `destroy` has torn the chart down.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Snapshot pushed by the last `init`/`sync`.
    pub fn last_snapshot(&self) -> Option<&Snapshot> {
        self.last_snapshot.as_ref()
    }

    /// Build the chart in `container` showing `initial_year`.
    ///
    /// A second call fails with [`RaceError::AlreadyInitialized`] and leaves the chart alone.
    #[tracing::instrument(skip(self, container), fields(container = %container))]
    pub fn init(&mut self, container: &ContainerId, initial_year: Year) -> RaceResult<()> {
        if self.container.is_some() {
            return Err(RaceError::AlreadyInitialized);
        }

        let snapshot = self.resolver.resolve(&self.index, i64::from(initial_year))?;
        let options = ChartOptions {
            title: self.opts.style.title.clone(),
            animation_ms: self.opts.style.animation_ms,
            color_by_point: self.opts.style.color_by_point,
            sorting: DataSorting {
                enabled: true,
                match_by_name: true,
            },
            series: series_update(&snapshot),
            readout: self.readout(&snapshot)?,
            trend: self.trend_points(self.index.range().start, snapshot.year)?,
        };
        self.backend.create(container, &options)?;

        self.container = Some(container.clone());
        self.trend_until = Some(snapshot.year);
        self.labels.jump(&snapshot);
        self.last_snapshot = Some(snapshot);
        Ok(())
    }

    /// Interpolate data labels `elapsed_ms` into the current tick.
    pub fn animate(&mut self, elapsed_ms: u64) -> RaceResult<()> {
        if !self.is_initialized() {
            return Err(RaceError::NotInitialized);
        }
        let t = elapsed_ms as f64 / self.opts.step_ms.max(1) as f64;
        let frames = self.labels.sample(t);
        self.backend.draw_labels(&frames)
    }

    /// Tear the chart down. Idempotent; the adapter cannot be initialized again.
    pub fn destroy(&mut self) -> RaceResult<()> {
        if !self.is_initialized() {
            return Ok(());
        }
        self.destroyed = true;
        self.backend.destroy()
    }

    /// Give back the backend.
    pub fn into_backend(self) -> B {
        self.backend
    }

    fn readout(&self, snapshot: &Snapshot) -> RaceResult<Readout> {
        let value = self.tracked_value(snapshot)?;
        Ok(Readout {
            year: snapshot.year,
            leader: snapshot.leader.name.clone(),
            value,
            text: self.opts.readout.render(value),
        })
    }

    fn tracked_value(&self, snapshot: &Snapshot) -> RaceResult<f64> {
        match self.opts.readout.value {
            ReadoutValue::Leader => Ok(snapshot.leader.value),
            ReadoutValue::Sum => self.index.total_at(i64::from(snapshot.year)),
        }
    }

    fn trend_value(&self, year: Year) -> RaceResult<f64> {
        match self.opts.readout.value {
            ReadoutValue::Leader => Ok(self
                .resolver
                .resolve(&self.index, i64::from(year))?
                .leader
                .value),
            ReadoutValue::Sum => self.index.total_at(i64::from(year)),
        }
    }

    fn trend_points(&self, from: Year, to: Year) -> RaceResult<Vec<TrendPoint>> {
        (from..=to)
            .map(|year| {
                Ok(TrendPoint {
                    year,
                    value: self.trend_value(year)?,
                })
            })
            .collect()
    }

    fn sync_trend(&mut self, year: Year) -> RaceResult<()> {
        match self.trend_until {
            Some(until) if year == until => Ok(()),
            Some(until) if year > until => {
                for y in (until + 1)..=year {
                    let point = TrendPoint {
                        year: y,
                        value: self.trend_value(y)?,
                    };
                    self.backend.append_trend(point)?;
                }
                self.trend_until = Some(year);
                Ok(())
            }
            _ => {
                let points = self.trend_points(self.index.range().start, year)?;
                self.backend.set_trend(&points)?;
                self.trend_until = Some(year);
                Ok(())
            }
        }
    }
}

impl<B: ChartBackend> SyncTarget for ChartSyncAdapter<B> {
    fn sync(&mut self, year: Year) -> RaceResult<()> {
        if !self.is_initialized() {
            return Err(RaceError::NotInitialized);
        }

        let snapshot = self.resolver.resolve(&self.index, i64::from(year))?;
        self.backend.update_series(&series_update(&snapshot))?;
        let readout = self.readout(&snapshot)?;
        self.backend.set_readout(&readout)?;
        self.sync_trend(snapshot.year)?;
        self.labels.retarget(&snapshot);
        self.last_snapshot = Some(snapshot);
        Ok(())
    }

    fn status_changed(&mut self, status: PlaybackStatus, year: Year) -> RaceResult<()> {
        if !self.is_initialized() {
            return Ok(());
        }
        self.backend.set_transport(status, year)
    }
}

/// Series data for a snapshot: the ranked bars after the leader, named by year.
///
/// The leader is shown by the readout, matching the report layout where rank 0 is the
/// aggregate row.
fn series_update(snapshot: &Snapshot) -> SeriesUpdate {
    SeriesUpdate {
        name: snapshot.year.to_string(),
        data: snapshot
            .rest
            .iter()
            .map(|e| BarPoint {
                name: e.name.clone(),
                value: e.value,
            })
            .collect(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/sync.rs"]
mod tests;

use crate::chart::backend::{
    ChartBackend, ChartOptions, LabelFrame, Readout, SeriesUpdate, TrendPoint,
};
use crate::foundation::core::{ContainerId, Year};
use crate::foundation::error::{RaceError, RaceResult};
use crate::timeline::state::PlaybackStatus;

/// One call received by a [`RecordingChart`].
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum ChartEvent {
    /// `create`.
    Create {
        /// Target container.
        container: ContainerId,
        /// Options the chart was built from.
        options: Box<ChartOptions>,
    },
    /// `update_series`.
    UpdateSeries(SeriesUpdate),
    /// `set_readout`.
    SetReadout(Readout),
    /// `set_trend`.
    SetTrend {
        /// New overlay.
        points: Vec<TrendPoint>,
    },
    /// `append_trend`.
    AppendTrend(TrendPoint),
    /// `set_transport`.
    SetTransport {
        /// Status shown by the control.
        status: PlaybackStatus,
        /// Range input position.
        year: Year,
    },
    /// `draw_labels`.
    DrawLabels {
        /// Frame that was drawn.
        labels: Vec<LabelFrame>,
    },
    /// `destroy`.
    Destroy,
}

/// In-memory [`ChartBackend`] that keeps the current chart state and a log of every call.
///
/// Used by tests and by the CLI's headless replay. Enforces the same lifecycle rules a real
/// chart library would: no updates before `create`, a single `create`, nothing after
/// `destroy`.
#[derive(Debug, Default)]
pub struct RecordingChart {
    container: Option<ContainerId>,
    destroyed: bool,
    creates: usize,
    series: Option<SeriesUpdate>,
    readout: Option<Readout>,
    trend: Vec<TrendPoint>,
    transport: Option<(PlaybackStatus, Year)>,
    labels: Vec<LabelFrame>,
    events: Vec<ChartEvent>,
}

impl RecordingChart {
    /// Create an empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Container the chart was created in.
    pub fn container(&self) -> Option<&ContainerId> {
        self.container.as_ref()
    }

    /// Number of `create` calls accepted.
    pub fn creates(&self) -> usize {
        self.creates
    }

    /// Whether `destroy` was called.
    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// Current bar series.
    pub fn series(&self) -> Option<&SeriesUpdate> {
        self.series.as_ref()
    }

    /// Current readout.
    pub fn readout(&self) -> Option<&Readout> {
        self.readout.as_ref()
    }

    /// Current trend overlay.
    pub fn trend(&self) -> &[TrendPoint] {
        &self.trend
    }

    /// Current transport status and range-input position.
    pub fn transport(&self) -> Option<(PlaybackStatus, Year)> {
        self.transport
    }

    /// Labels of the last drawn frame.
    pub fn labels(&self) -> &[LabelFrame] {
        &self.labels
    }

    /// Every call in order.
    pub fn events(&self) -> &[ChartEvent] {
        &self.events
    }

    /// Drain the call log, keeping the current state.
    pub fn take_events(&mut self) -> Vec<ChartEvent> {
        std::mem::take(&mut self.events)
    }

    fn ensure_live(&self, op: &str) -> RaceResult<()> {
        if self.destroyed {
            return Err(RaceError::chart(format!("{op} after destroy")));
        }
        if self.container.is_none() {
            return Err(RaceError::chart(format!("{op} before create")));
        }
        Ok(())
    }
}

impl ChartBackend for RecordingChart {
    fn create(&mut self, container: &ContainerId, options: &ChartOptions) -> RaceResult<()> {
        if self.container.is_some() || self.destroyed {
            return Err(RaceError::chart("chart created twice"));
        }
        self.container = Some(container.clone());
        self.creates += 1;
        self.series = Some(options.series.clone());
        self.readout = Some(options.readout.clone());
        self.trend = options.trend.clone();
        self.events.push(ChartEvent::Create {
            container: container.clone(),
            options: Box::new(options.clone()),
        });
        Ok(())
    }

    fn update_series(&mut self, update: &SeriesUpdate) -> RaceResult<()> {
        self.ensure_live("update_series")?;
        self.series = Some(update.clone());
        self.events.push(ChartEvent::UpdateSeries(update.clone()));
        Ok(())
    }

    fn set_readout(&mut self, readout: &Readout) -> RaceResult<()> {
        self.ensure_live("set_readout")?;
        self.readout = Some(readout.clone());
        self.events.push(ChartEvent::SetReadout(readout.clone()));
        Ok(())
    }

    fn set_trend(&mut self, points: &[TrendPoint]) -> RaceResult<()> {
        self.ensure_live("set_trend")?;
        self.trend = points.to_vec();
        self.events.push(ChartEvent::SetTrend {
            points: points.to_vec(),
        });
        Ok(())
    }

    fn append_trend(&mut self, point: TrendPoint) -> RaceResult<()> {
        self.ensure_live("append_trend")?;
        self.trend.push(point);
        self.events.push(ChartEvent::AppendTrend(point));
        Ok(())
    }

    fn set_transport(&mut self, status: PlaybackStatus, year: Year) -> RaceResult<()> {
        self.ensure_live("set_transport")?;
        self.transport = Some((status, year));
        self.events.push(ChartEvent::SetTransport { status, year });
        Ok(())
    }

    fn draw_labels(&mut self, labels: &[LabelFrame]) -> RaceResult<()> {
        self.ensure_live("draw_labels")?;
        self.labels = labels.to_vec();
        self.events.push(ChartEvent::DrawLabels {
            labels: labels.to_vec(),
        });
        Ok(())
    }

    fn destroy(&mut self) -> RaceResult<()> {
        self.ensure_live("destroy")?;
        self.destroyed = true;
        self.events.push(ChartEvent::Destroy);
        Ok(())
    }
}

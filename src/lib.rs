//! Racechart drives animated "bar-race" ranking charts from year-by-entity tables.
//!
//! The crate is built around a timeline playback controller:
//!
//! - Load a CSV/JSON table into an [`EntityIndex`]
//! - Resolve per-year rankings with a [`SnapshotResolver`]
//! - Play, pause and seek with a [`TimelineController`] driven by a [`Scheduler`]
//! - Push every transition into a chart through a [`ChartSyncAdapter`] and a [`ChartBackend`]
//!
//! [`RaceChart`] wires these together behind a [`VisibilityGate`], so the chart is only built
//! once its container scrolls into view.
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod foundation;

pub(crate) mod animation;
pub(crate) mod chart;
pub(crate) mod data;
pub(crate) mod session;
pub(crate) mod snapshot;
pub(crate) mod timeline;
pub(crate) mod visibility;

pub use crate::foundation::core::{ContainerId, Year, YearRange, parse_year};
pub use crate::foundation::error::{RaceError, RaceResult};

pub use crate::animation::ease::Ease;
pub use crate::chart::backend::{
    BarPoint, ChartBackend, ChartOptions, DataSorting, LabelFrame, Readout, SeriesUpdate,
    TrendPoint,
};
pub use crate::chart::format::{ReadoutFormat, ReadoutValue, format_number};
pub use crate::chart::label::{LabelAnimator, LabelOptions};
pub use crate::chart::recording::{ChartEvent, RecordingChart};
pub use crate::chart::sync::{ChartStyle, ChartSyncAdapter, SyncOptions};
pub use crate::data::index::{Entity, EntityIndex, IndexOptions, MAX_CELLS, MAX_YEAR_SPAN};
pub use crate::data::source::{
    DEFAULT_JSON_NAME_KEY, DataFormat, DataSource, FileSource, load_index,
};
pub use crate::data::table::RawTable;
pub use crate::session::config::RaceConfig;
pub use crate::session::race_chart::{RaceChart, RaceController};
pub use crate::snapshot::resolver::{DEFAULT_TOP_N, RankedEntry, Snapshot, SnapshotResolver};
pub use crate::timeline::clock::{ManualClock, Millis, Scheduler, TimerId, WallClock};
pub use crate::timeline::controller::{SyncTarget, TimelineController};
pub use crate::timeline::state::{PlaybackOptions, PlaybackState, PlaybackStatus};
pub use crate::visibility::gate::{IntersectionEntry, IntersectionObserver, VisibilityGate};
pub use crate::visibility::viewport::{Bounds, ViewportObserver};

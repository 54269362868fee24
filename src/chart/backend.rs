use crate::foundation::core::{ContainerId, Year};
use crate::foundation::error::RaceResult;
use crate::timeline::state::PlaybackStatus;

/// One bar, matched across updates by `name`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct BarPoint {
    /// Entity name; the chart keeps a bar's identity (and its rank animation) by this key.
    pub name: String,
    /// Bar length.
    pub value: f64,
}

/// Replacement data for the primary bar series.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct SeriesUpdate {
    /// Series name; the race shows the current year here.
    pub name: String,
    /// Bars in rank order.
    pub data: Vec<BarPoint>,
}

/// Leader/total readout shown next to the bars.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Readout {
    /// Year shown in large type.
    pub year: Year,
    /// Current leader.
    pub leader: String,
    /// Raw value the text was formatted from.
    pub value: f64,
    /// Formatted line, e.g. `Total: 7.80 billion`.
    pub text: String,
}

/// One point of the trend overlay line.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct TrendPoint {
    /// X position.
    pub year: Year,
    /// Y position.
    pub value: f64,
}

/// Interpolated data label of one bar at one animation frame.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct LabelFrame {
    /// Bar the label belongs to.
    pub name: String,
    /// Interpolated value.
    pub value: f64,
    /// `value` formatted for display.
    pub text: String,
}

/// Series sorting behaviour requested from the chart library.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DataSorting {
    /// Let the library reorder bars by value.
    pub enabled: bool,
    /// Match old and new points by name so bars slide instead of being replaced.
    pub match_by_name: bool,
}

/// Declarative description the chart is constructed from.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ChartOptions {
    /// Chart title.
    pub title: String,
    /// Duration of the library's own point animation in milliseconds.
    pub animation_ms: u64,
    /// Give every bar its own color.
    pub color_by_point: bool,
    /// Sorting behaviour of the bar series.
    pub sorting: DataSorting,
    /// Initial bar series.
    pub series: SeriesUpdate,
    /// Initial readout.
    pub readout: Readout,
    /// Initial trend overlay.
    pub trend: Vec<TrendPoint>,
}

/// The charting library, seen through the handful of operations the race needs.
///
/// Implementations must apply `update_series` in place: the bar series is created once by
/// `create` and only its data is replaced afterwards.
pub trait ChartBackend {
    /// Construct the chart inside `container`.
    fn create(&mut self, container: &ContainerId, options: &ChartOptions) -> RaceResult<()>;
    /// Replace the bar series' name and data.
    fn update_series(&mut self, update: &SeriesUpdate) -> RaceResult<()>;
    /// Rewrite the readout.
    fn set_readout(&mut self, readout: &Readout) -> RaceResult<()>;
    /// Replace the whole trend overlay.
    fn set_trend(&mut self, points: &[TrendPoint]) -> RaceResult<()>;
    /// Add one point at the end of the trend overlay.
    fn append_trend(&mut self, point: TrendPoint) -> RaceResult<()>;
    /// Reflect transport status on the play/pause control and the range input.
    fn set_transport(&mut self, status: PlaybackStatus, year: Year) -> RaceResult<()>;
    /// Draw interpolated data labels.
    fn draw_labels(&mut self, labels: &[LabelFrame]) -> RaceResult<()>;
    /// Tear the chart down.
    fn destroy(&mut self) -> RaceResult<()>;
}

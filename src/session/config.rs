use crate::chart::format::ReadoutFormat;
use crate::chart::label::LabelOptions;
use crate::chart::sync::{ChartStyle, SyncOptions};
use crate::data::index::IndexOptions;
use crate::foundation::error::{RaceError, RaceResult};
use crate::snapshot::resolver::DEFAULT_TOP_N;
use crate::timeline::state::PlaybackOptions;

/// Configuration of one race chart, loadable from JSON.
///
/// Every field has a default, so `{}` is a valid config.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct RaceConfig {
    /// Bars per snapshot, leader included.
    pub top_n: usize,
    /// Tick period in milliseconds.
    pub step_ms: u64,
    /// Years advanced per tick.
    pub step_size: i32,
    /// Header of the entity-name column; `None` uses the first column.
    pub name_column: Option<String>,
    /// Readout line format.
    pub readout: ReadoutFormat,
    /// Data-label tween settings.
    pub labels: LabelOptions,
    /// Chart look.
    pub chart: ChartStyle,
    /// Wait this long after the container first becomes visible before building the chart.
    pub reveal_delay_ms: u64,
}

impl Default for RaceConfig {
    fn default() -> Self {
        Self {
            top_n: DEFAULT_TOP_N,
            step_ms: 500,
            step_size: 1,
            name_column: None,
            readout: ReadoutFormat::default(),
            labels: LabelOptions::default(),
            chart: ChartStyle::default(),
            reveal_delay_ms: 0,
        }
    }
}

impl RaceConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(text: &str) -> RaceResult<Self> {
        let cfg: Self = serde_json::from_str(text).map_err(|e| RaceError::serde(e.to_string()))?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Check that the config can drive a chart.
    pub fn validate(&self) -> RaceResult<()> {
        if self.top_n < 2 {
            return Err(RaceError::validation("top_n must be >= 2"));
        }
        self.playback_options().validate()?;
        if !(self.readout.divisor.is_finite() && self.readout.divisor > 0.0) {
            return Err(RaceError::validation("readout.divisor must be a positive number"));
        }
        Ok(())
    }

    /// Options for [`crate::EntityIndex::build`].
    pub fn index_options(&self) -> IndexOptions {
        IndexOptions {
            name_column: self.name_column.clone(),
        }
    }

    /// Options for [`crate::TimelineController::new`].
    pub fn playback_options(&self) -> PlaybackOptions {
        PlaybackOptions {
            step_ms: self.step_ms,
            step_size: self.step_size,
        }
    }

    /// Options for [`crate::ChartSyncAdapter::new`].
    pub fn sync_options(&self) -> SyncOptions {
        SyncOptions {
            top_n: self.top_n,
            readout: self.readout.clone(),
            labels: self.labels,
            style: self.chart.clone(),
            step_ms: self.step_ms,
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/config.rs"]
mod tests;

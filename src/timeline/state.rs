use crate::foundation::core::Year;
use crate::foundation::error::{RaceError, RaceResult};

/// Transport status of a timeline.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PlaybackStatus {
    /// Constructed, never played (or scheduling failed).
    #[default]
    Idle,
    /// A repeating tick is active.
    Playing,
    /// Stopped by the user, by a seek, or by reaching the last year.
    Paused,
}

impl PlaybackStatus {
    /// Label of the action the play/pause control offers in this status.
    pub fn control_label(self) -> &'static str {
        match self {
            Self::Playing => "pause",
            Self::Idle | Self::Paused => "play",
        }
    }
}

/// Timing parameters of playback.
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct PlaybackOptions {
    /// Tick period in milliseconds. Must be > 0.
    pub step_ms: u64,
    /// Years advanced per tick. Must be > 0.
    pub step_size: i32,
}

impl Default for PlaybackOptions {
    fn default() -> Self {
        Self {
            step_ms: 500,
            step_size: 1,
        }
    }
}

impl PlaybackOptions {
    /// Check that the options can drive a timeline.
    pub fn validate(&self) -> RaceResult<()> {
        if self.step_ms == 0 {
            return Err(RaceError::validation("step_ms must be > 0"));
        }
        if self.step_size <= 0 {
            return Err(RaceError::validation("step_size must be > 0"));
        }
        Ok(())
    }
}

/// Observable state of a [`crate::TimelineController`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PlaybackState {
    /// Transport status.
    pub status: PlaybackStatus,
    /// Year currently shown. Always inside the controller's range.
    pub current_year: Year,
    /// Tick period in milliseconds.
    pub step_ms: u64,
    /// Years advanced per tick.
    pub step_size: i32,
}

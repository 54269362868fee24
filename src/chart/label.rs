use crate::animation::ease::Ease;
use crate::chart::backend::LabelFrame;
use crate::chart::format::format_number;
use crate::snapshot::resolver::Snapshot;

/// Data-label animation settings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct LabelOptions {
    /// Curve applied to the tween progress.
    pub ease: Ease,
    /// Fraction digits of the label text.
    pub decimals: usize,
}

#[derive(Clone, Debug, PartialEq)]
struct Track {
    name: String,
    from: f64,
    to: f64,
}

/// Tweens bar labels from the values shown at the previous position to the new snapshot.
///
/// Retargeting mid-tween starts from whatever is currently displayed, so fast ticks and
/// scrubbing never make a label jump backwards.
#[derive(Clone, Debug)]
pub struct LabelAnimator {
    opts: LabelOptions,
    tracks: Vec<Track>,
    progress: f64,
}

impl LabelAnimator {
    /// Animator with no labels.
    pub fn new(opts: LabelOptions) -> Self {
        Self {
            opts,
            tracks: Vec::new(),
            progress: 1.0,
        }
    }

    /// Value currently displayed for `name`, if it has a label.
    pub fn displayed(&self, name: &str) -> Option<f64> {
        self.tracks
            .iter()
            .find(|t| t.name == name)
            .map(|t| self.opts.ease.tween(t.from, t.to, self.progress))
    }

    /// Start a new tween toward the bars of `snapshot` (the leader is shown by the readout).
    /// Bars entering the ranking start at their target.
    pub fn retarget(&mut self, snapshot: &Snapshot) {
        let tracks = snapshot
            .rest
            .iter()
            .map(|e| Track {
                name: e.name.clone(),
                from: self.displayed(&e.name).unwrap_or(e.value),
                to: e.value,
            })
            .collect();
        self.tracks = tracks;
        self.progress = 0.0;
    }

    /// Show `snapshot` immediately, without a tween.
    pub fn jump(&mut self, snapshot: &Snapshot) {
        self.retarget(snapshot);
        self.progress = 1.0;
    }

    /// Frames at normalized progress `t`; `t` is clamped to `[0, 1]`.
    pub fn sample(&mut self, t: f64) -> Vec<LabelFrame> {
        self.progress = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        self.tracks
            .iter()
            .map(|track| {
                let value = self.opts.ease.tween(track.from, track.to, self.progress);
                LabelFrame {
                    name: track.name.clone(),
                    value,
                    text: format_number(value, self.opts.decimals),
                }
            })
            .collect()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/chart/label.rs"]
mod tests;

/// Easing curves for tweening displayed values between two timeline positions.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ease {
    /// Constant speed.
    #[default]
    Linear,
    /// Quadratic ease-out.
    OutQuad,
    /// Quadratic ease-in/out.
    InOutQuad,
    /// Cubic ease-out.
    OutCubic,
}

impl Ease {
    /// Map normalized progress `t` (clamped to `[0, 1]`) through this curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = if t.is_nan() { 1.0 } else { t.clamp(0.0, 1.0) };
        match self {
            Self::Linear => t,
            Self::OutQuad => 1.0 - (1.0 - t) * (1.0 - t),
            Self::InOutQuad => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    1.0 - ((-2.0 * t + 2.0).powi(2) / 2.0)
                }
            }
            Self::OutCubic => 1.0 - (1.0 - t).powi(3),
        }
    }

    /// Interpolate between `from` and `to` at eased progress `t`.
    pub fn tween(self, from: f64, to: f64, t: f64) -> f64 {
        let p = self.apply(t);
        if p >= 1.0 {
            return to;
        }
        from + (to - from) * p
    }
}

#[cfg(test)]
#[path = "../../tests/unit/animation/ease.rs"]
mod tests;

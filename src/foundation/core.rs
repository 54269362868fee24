use crate::foundation::error::{RaceError, RaceResult};

/// Calendar year as used by dataset headers and timeline positions.
pub type Year = i32;

/// Inclusive year range `[start, end]` covered by a dataset.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub struct YearRange {
    /// First year (inclusive).
    pub start: Year,
    /// Last year (inclusive).
    pub end: Year,
}

impl YearRange {
    /// Create a validated range with `start <= end`.
    pub fn new(start: Year, end: Year) -> RaceResult<Self> {
        if start > end {
            return Err(RaceError::validation("YearRange start must be <= end"));
        }
        Ok(Self { start, end })
    }

    /// Number of years in the range. Always at least 1.
    pub fn year_count(self) -> usize {
        (i64::from(self.end) - i64::from(self.start) + 1) as usize
    }

    /// Return `true` when `year` is inside `[start, end]`.
    pub fn contains(self, year: i64) -> bool {
        i64::from(self.start) <= year && year <= i64::from(self.end)
    }

    /// Clamp an arbitrary (possibly overflowing) year into this range.
    pub fn clamp(self, year: i64) -> Year {
        year.clamp(i64::from(self.start), i64::from(self.end)) as Year
    }

    /// Zero-based position of `year` in the range, or `None` when outside.
    pub fn offset(self, year: i64) -> Option<usize> {
        if !self.contains(year) {
            return None;
        }
        Some((year - i64::from(self.start)) as usize)
    }

    /// Like [`YearRange::offset`] but reporting [`RaceError::OutOfRange`].
    pub fn require_offset(self, year: i64) -> RaceResult<usize> {
        self.offset(year).ok_or(RaceError::OutOfRange {
            year,
            start: self.start,
            end: self.end,
        })
    }

    /// Iterate all years in order.
    pub fn years(self) -> std::ops::RangeInclusive<Year> {
        self.start..=self.end
    }
}

/// Identifier of the host element a chart is bound to.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, serde::Serialize, serde::Deserialize)]
pub struct ContainerId(pub String);

impl ContainerId {
    /// Create a container id from any string-like value.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw id.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContainerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Parse a year the way UI controls and CSV headers hand it over: as a string.
///
/// Surrounding whitespace is ignored and a trailing `.0` (as produced by some number
/// formatters) is accepted.
pub fn parse_year(raw: &str) -> Option<i64> {
    let s = raw.trim();
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    let v = s.parse::<f64>().ok()?;
    if v.is_finite() && v.fract() == 0.0 && v.abs() < i64::MAX as f64 {
        Some(v as i64)
    } else {
        None
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/core.rs"]
mod tests;

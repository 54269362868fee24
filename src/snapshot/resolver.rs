use crate::data::index::EntityIndex;
use crate::foundation::core::Year;
use crate::foundation::error::{RaceError, RaceResult};

/// Bars shown by the observed report configuration (leader included).
pub const DEFAULT_TOP_N: usize = 15;

/// One ranked `(name, value)` pair.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct RankedEntry {
    /// Entity name.
    pub name: String,
    /// Value at the snapshot's year.
    pub value: f64,
}

/// Ranking of all entities at one year, cut to the top N.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Snapshot {
    /// Year the snapshot was resolved for.
    pub year: Year,
    /// Rank 0.
    pub leader: RankedEntry,
    /// Ranks 1..N, value descending. Holds at most N-1 entries.
    pub rest: Vec<RankedEntry>,
}

impl Snapshot {
    /// Leader followed by the rest, in rank order.
    pub fn entries(&self) -> impl Iterator<Item = &RankedEntry> {
        std::iter::once(&self.leader).chain(self.rest.iter())
    }
}

/// Resolves [`Snapshot`]s from an [`EntityIndex`].
///
/// Pure: the same `(index, year)` always yields an equal snapshot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SnapshotResolver {
    top_n: usize,
}

impl Default for SnapshotResolver {
    fn default() -> Self {
        Self::new(DEFAULT_TOP_N)
    }
}

impl SnapshotResolver {
    /// Create a resolver keeping `top_n` entries (leader included). `0` behaves like `1`.
    pub fn new(top_n: usize) -> Self {
        Self {
            top_n: top_n.max(1),
        }
    }

    /// Entries kept per snapshot, leader included.
    pub fn top_n(&self) -> usize {
        self.top_n
    }

    /// Rank all entities at `year`.
    ///
    /// Ties keep input order. Fails with [`RaceError::OutOfRange`] when `year` is outside
    /// the index range.
    pub fn resolve(&self, index: &EntityIndex, year: i64) -> RaceResult<Snapshot> {
        let mut ranked: Vec<RankedEntry> = index
            .column(year)?
            .map(|(name, value)| RankedEntry {
                name: name.to_owned(),
                value,
            })
            .collect();

        // `sort_by` is stable, which is what keeps ties in input order.
        ranked.sort_by(|a, b| b.value.total_cmp(&a.value));
        ranked.truncate(self.top_n);

        let mut it = ranked.into_iter();
        let leader = it
            .next()
            .ok_or_else(|| RaceError::malformed("index has no entities"))?;

        Ok(Snapshot {
            year: index.range().clamp(year),
            leader,
            rest: it.collect(),
        })
    }
}

#[cfg(test)]
#[path = "../../tests/unit/snapshot/resolver.rs"]
mod tests;

use std::collections::HashMap;

use crate::data::table::RawTable;
use crate::foundation::core::{Year, YearRange, parse_year};
use crate::foundation::error::{RaceError, RaceResult};

/// Options controlling how a [`RawTable`] is interpreted.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct IndexOptions {
    /// Header of the entity-name column. `None` uses the first column.
    #[serde(default)]
    pub name_column: Option<String>,
}

/// Widest year range an index may cover. Gaps are filled, so this bounds every values vector.
pub const MAX_YEAR_SPAN: usize = 10_000;

/// Upper bound on `entities * years` for one index.
pub const MAX_CELLS: usize = 50_000_000;

/// One real-world item (country, fleet, ...) and its yearly values.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct Entity {
    /// Stable display name, also the key used to match chart points.
    pub name: String,
    /// One value per year of the owning index's range, in year order.
    pub values: Vec<f64>,
}

/// Year-aligned lookup of entities, in input order.
///
/// Immutable once built. Every entity carries exactly `range.year_count()` values.
#[derive(Clone, Debug, PartialEq, serde::Serialize)]
pub struct EntityIndex {
    range: YearRange,
    entities: Vec<Entity>,
    #[serde(skip)]
    by_name: HashMap<String, usize>,
}

impl EntityIndex {
    /// Normalize raw rows into an index.
    ///
    /// Non-numeric or empty cells become `0`. Years missing from the header inside the covered
    /// range also read as `0`. Fails with [`RaceError::MalformedData`] when a row has no name,
    /// a header is not a year, a year or name repeats, or there is nothing to index.
    #[tracing::instrument(skip_all, fields(rows = table.rows.len()))]
    pub fn build(table: &RawTable, opts: &IndexOptions) -> RaceResult<Self> {
        if table.columns.is_empty() {
            return Err(RaceError::malformed("table has no header row"));
        }

        let name_col = match &opts.name_column {
            Some(wanted) => table
                .columns
                .iter()
                .position(|c| c == wanted)
                .ok_or_else(|| RaceError::malformed(format!("name column '{wanted}' not found")))?,
            None => 0,
        };

        let mut year_cols: Vec<(usize, Year)> = Vec::with_capacity(table.columns.len() - 1);
        for (col, header) in table.columns.iter().enumerate() {
            if col == name_col {
                continue;
            }
            let year = parse_year(header)
                .and_then(|y| Year::try_from(y).ok())
                .ok_or_else(|| {
                    RaceError::malformed(format!("column header '{header}' is not a year"))
                })?;
            if year_cols.iter().any(|&(_, y)| y == year) {
                return Err(RaceError::malformed(format!("year {year} appears twice")));
            }
            year_cols.push((col, year));
        }

        let (Some(start), Some(end)) = (
            year_cols.iter().map(|&(_, y)| y).min(),
            year_cols.iter().map(|&(_, y)| y).max(),
        ) else {
            return Err(RaceError::malformed("table has no year columns"));
        };
        let range = YearRange::new(start, end)?;
        if range.year_count() > MAX_YEAR_SPAN {
            return Err(RaceError::malformed(format!(
                "year columns span {start}..={end}, more than {MAX_YEAR_SPAN} years"
            )));
        }
        if range
            .year_count()
            .checked_mul(table.rows.len())
            .is_none_or(|cells| cells > MAX_CELLS)
        {
            return Err(RaceError::malformed(format!(
                "{} rows over {} years exceed {MAX_CELLS} values",
                table.rows.len(),
                range.year_count()
            )));
        }

        let mut entities = Vec::with_capacity(table.rows.len());
        let mut by_name = HashMap::with_capacity(table.rows.len());
        for (i, row) in table.rows.iter().enumerate() {
            let name = row
                .get(name_col)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .ok_or_else(|| {
                    RaceError::malformed(format!("row {} is missing the name field", i + 1))
                })?;

            if by_name.insert(name.to_owned(), entities.len()).is_some() {
                return Err(RaceError::malformed(format!(
                    "entity '{name}' appears more than once"
                )));
            }

            let mut values = vec![0.0; range.year_count()];
            for &(col, year) in &year_cols {
                let cell = row.get(col).map(String::as_str).unwrap_or_default();
                // Offsets are in range by construction of `range`.
                if let Some(slot) = range.offset(i64::from(year)).and_then(|o| values.get_mut(o)) {
                    *slot = coerce_value(cell);
                }
            }

            entities.push(Entity {
                name: name.to_owned(),
                values,
            });
        }

        if entities.is_empty() {
            return Err(RaceError::malformed("table has no entity rows"));
        }

        tracing::debug!(
            entities = entities.len(),
            start = range.start,
            end = range.end,
            "built entity index"
        );
        Ok(Self {
            range,
            entities,
            by_name,
        })
    }

    /// Covered year range.
    pub fn range(&self) -> YearRange {
        self.range
    }

    /// All entities in input order.
    pub fn entities(&self) -> &[Entity] {
        &self.entities
    }

    /// Number of entities.
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    /// Always `false` for a successfully built index.
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Look up an entity by name.
    pub fn get(&self, name: &str) -> Option<&Entity> {
        self.by_name.get(name).map(|&i| &self.entities[i])
    }

    /// Values of all entities at `year`, in input order.
    pub fn column(&self, year: i64) -> RaceResult<impl Iterator<Item = (&str, f64)> + '_> {
        let offset = self.range.require_offset(year)?;
        Ok(self
            .entities
            .iter()
            .map(move |e| (e.name.as_str(), e.values[offset])))
    }

    /// Sum of all entity values at `year`.
    pub fn total_at(&self, year: i64) -> RaceResult<f64> {
        Ok(self.column(year)?.map(|(_, v)| v).sum())
    }
}

/// Numeric coercion of a cell: anything that is not a finite number reads as `0`.
fn coerce_value(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        // Normalizes `-0` so equal values tie under `total_cmp`.
        Ok(v) if v.is_finite() => v + 0.0,
        _ => 0.0,
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/index.rs"]
mod tests;

use crate::foundation::error::{RaceError, RaceResult};

/// Untyped tabular input: a header row plus string cells.
///
/// This is the shape both the CSV and the JSON loaders produce; [`crate::EntityIndex::build`]
/// turns it into typed, year-aligned values. Rows may be shorter than the header, missing cells
/// read as empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize)]
pub struct RawTable {
    /// Header row, in file order.
    pub columns: Vec<String>,
    /// Data rows, in file order.
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Parse delimited text with a header row.
    pub fn from_csv_str(text: &str) -> RaceResult<Self> {
        let mut reader = csv::ReaderBuilder::new()
            .has_headers(true)
            .flexible(true)
            .trim(csv::Trim::All)
            .from_reader(text.as_bytes());

        let columns = reader
            .headers()
            .map_err(|e| RaceError::serde(format!("csv header: {e}")))?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').to_owned())
            .collect::<Vec<_>>();

        let mut rows = Vec::new();
        for (i, record) in reader.records().enumerate() {
            let record = record.map_err(|e| RaceError::serde(format!("csv row {}: {e}", i + 1)))?;
            if record.iter().all(str::is_empty) {
                continue;
            }
            rows.push(record.iter().map(str::to_owned).collect());
        }

        Ok(Self { columns, rows })
    }

    /// Parse JSON in either of the two shapes the report data ships in:
    ///
    /// - an array of flat records (`[{"Name": "A", "2000": 1}, ...]`), or
    /// - an object keyed by entity name (`{"A": {"2000": 1}, ...}`).
    ///
    /// `name_key` names the entity column; for the keyed shape it becomes the first header.
    pub fn from_json_str(text: &str, name_key: &str) -> RaceResult<Self> {
        let value: serde_json::Value =
            serde_json::from_str(text).map_err(|e| RaceError::serde(e.to_string()))?;

        match value {
            serde_json::Value::Array(records) => Self::from_json_records(&records, name_key),
            serde_json::Value::Object(by_name) => Self::from_json_keyed(&by_name, name_key),
            _ => Err(RaceError::malformed(
                "json data must be an array of records or an object keyed by name",
            )),
        }
    }

    fn from_json_records(records: &[serde_json::Value], name_key: &str) -> RaceResult<Self> {
        let mut columns = vec![name_key.to_owned()];
        for record in records {
            let obj = record
                .as_object()
                .ok_or_else(|| RaceError::malformed("json record must be an object"))?;
            for key in obj.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let rows = records
            .iter()
            .filter_map(serde_json::Value::as_object)
            .map(|obj| {
                columns
                    .iter()
                    .map(|c| obj.get(c).map(json_cell).unwrap_or_default())
                    .collect()
            })
            .collect();

        Ok(Self { columns, rows })
    }

    fn from_json_keyed(
        by_name: &serde_json::Map<String, serde_json::Value>,
        name_key: &str,
    ) -> RaceResult<Self> {
        let mut columns = vec![name_key.to_owned()];
        for (name, series) in by_name {
            let obj = series.as_object().ok_or_else(|| {
                RaceError::malformed(format!("json entry '{name}' must map years to values"))
            })?;
            for key in obj.keys() {
                if !columns.iter().any(|c| c == key) {
                    columns.push(key.clone());
                }
            }
        }

        let mut rows = Vec::with_capacity(by_name.len());
        for (name, series) in by_name {
            let Some(obj) = series.as_object() else {
                continue;
            };
            let mut row = Vec::with_capacity(columns.len());
            row.push(name.clone());
            for c in &columns[1..] {
                row.push(obj.get(c).map(json_cell).unwrap_or_default());
            }
            rows.push(row);
        }

        Ok(Self { columns, rows })
    }
}

fn json_cell(v: &serde_json::Value) -> String {
    match v {
        serde_json::Value::Null => String::new(),
        serde_json::Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
#[path = "../../tests/unit/data/table.rs"]
mod tests;

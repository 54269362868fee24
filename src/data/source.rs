use std::path::{Path, PathBuf};

use anyhow::Context as _;

use crate::data::index::{EntityIndex, IndexOptions};
use crate::data::table::RawTable;
use crate::foundation::error::{RaceError, RaceResult};

/// One-shot retrieval of a data file by location.
///
/// Implementations decide what a location means (a path under a base directory, a URL, ...).
pub trait DataSource {
    /// Fetch the whole body of the data file at `location`.
    fn fetch(&self, location: &str) -> RaceResult<String>;
}

/// [`DataSource`] reading files relative to a base directory.
#[derive(Clone, Debug)]
pub struct FileSource {
    base: PathBuf,
}

impl FileSource {
    /// Create a source rooted at `base`.
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Base directory locations are resolved against.
    pub fn base(&self) -> &Path {
        &self.base
    }
}

impl DataSource for FileSource {
    fn fetch(&self, location: &str) -> RaceResult<String> {
        let path = self.base.join(location);
        let body = std::fs::read_to_string(&path)
            .with_context(|| format!("read data file '{}'", path.display()))?;
        Ok(body)
    }
}

/// Encoding of a data file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum DataFormat {
    /// Header row plus delimited rows.
    Csv,
    /// Records array or name-keyed object.
    Json,
}

impl DataFormat {
    /// Guess the format from a location's extension. Anything that is not `.json` is CSV.
    pub fn from_location(location: &str) -> Self {
        let ext = Path::new(location)
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        match ext.as_deref() {
            Some("json") => Self::Json,
            _ => Self::Csv,
        }
    }
}

/// Name key used for JSON inputs when no name column is configured.
pub const DEFAULT_JSON_NAME_KEY: &str = "Name";

/// Fetch, parse and index a data file.
#[tracing::instrument(skip(source, opts))]
pub fn load_index(
    source: &dyn DataSource,
    location: &str,
    opts: &IndexOptions,
) -> RaceResult<EntityIndex> {
    let body = source.fetch(location)?;
    let table = match DataFormat::from_location(location) {
        DataFormat::Csv => RawTable::from_csv_str(&body)?,
        DataFormat::Json => {
            let key = opts.name_column.as_deref().unwrap_or(DEFAULT_JSON_NAME_KEY);
            RawTable::from_json_str(&body, key)?
        }
    };
    EntityIndex::build(&table, opts).map_err(|e| match e {
        RaceError::MalformedData(msg) => RaceError::malformed(format!("{location}: {msg}")),
        other => other,
    })
}

#[cfg(test)]
#[path = "../../tests/unit/data/source.rs"]
mod tests;

/// Convenience result type used across racechart.
pub type RaceResult<T> = Result<T, RaceError>;

/// Top-level error taxonomy used by racechart APIs.
#[derive(thiserror::Error, Debug)]
pub enum RaceError {
    /// Invalid user-provided configuration.
    #[error("validation error: {0}")]
    Validation(String),

    /// Input rows that cannot be turned into an entity index.
    #[error("malformed data: {0}")]
    MalformedData(String),

    /// A year outside the dataset's `[start, end]` range.
    #[error("year {year} is out of range [{start}, {end}]")]
    OutOfRange {
        /// Requested year.
        year: i64,
        /// First year of the dataset.
        start: i32,
        /// Last year of the dataset.
        end: i32,
    },

    /// `init` was called on a chart that is already constructed.
    #[error("chart is already initialized")]
    AlreadyInitialized,

    /// A chart operation was issued before `init`.
    #[error("chart is not initialized")]
    NotInitialized,

    /// A UI control emitted a value that cannot be coerced to a year.
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The scheduler refused to register a timer.
    #[error("schedule error: {0}")]
    Schedule(String),

    /// The chart backend rejected an operation.
    #[error("chart error: {0}")]
    Chart(String),

    /// Errors when serializing or deserializing data structures.
    #[error("serialization error: {0}")]
    Serde(String),

    /// Wrapped lower-level error from dependencies or IO.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl RaceError {
    /// Build a [`RaceError::Validation`] value.
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    /// Build a [`RaceError::MalformedData`] value.
    pub fn malformed(msg: impl Into<String>) -> Self {
        Self::MalformedData(msg.into())
    }

    /// Build a [`RaceError::InvalidInput`] value.
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Build a [`RaceError::Schedule`] value.
    pub fn schedule(msg: impl Into<String>) -> Self {
        Self::Schedule(msg.into())
    }

    /// Build a [`RaceError::Chart`] value.
    pub fn chart(msg: impl Into<String>) -> Self {
        Self::Chart(msg.into())
    }

    /// Build a [`RaceError::Serde`] value.
    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/foundation/error.rs"]
mod tests;

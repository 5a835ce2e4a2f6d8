// File: crates/multiline-core/src/error.rs
// Summary: Error taxonomy for loading, parsing, and configuring a chart.

use chrono::NaiveDate;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    /// The data source could not be read, even after retrying.
    #[error("failed to load {location} after {attempts} attempt(s)")]
    Load {
        location: String,
        attempts: u32,
        #[source]
        source: LoadFailure,
    },

    /// A header cell is not a `YYYY-MM` date; the shared date axis would be corrupt.
    #[error("header column {column} holds `{value}`, which is not a YYYY-MM date")]
    InvalidDate { column: usize, value: String },

    #[error("dates must be strictly increasing: {current} at column {index} follows {previous}")]
    NonMonotonicDates { index: usize, previous: NaiveDate, current: NaiveDate },

    #[error("header row has no date columns")]
    EmptyHeader,

    #[error("input contains no series rows")]
    NoSeries,

    #[error("series `{series}` has {found} values but the date axis has {expected}")]
    LengthMismatch { series: String, expected: usize, found: usize },

    #[error("malformed tab-separated input: {0}")]
    Csv(#[from] csv::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Underlying cause of a single failed load attempt.
#[derive(Debug, Error)]
pub enum LoadFailure {
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    #[error("server responded with HTTP {0}")]
    Status(u16),
}

impl Error {
    /// True for failures that concern fetching the source rather than its content.
    pub fn is_load_error(&self) -> bool {
        matches!(self, Error::Load { .. })
    }
}

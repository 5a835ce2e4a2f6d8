// File: crates/multiline-core/src/dataset.rs
// Summary: Validated dataset (shared monthly date axis + named series) and its TSV parser.

use chrono::{NaiveDate, NaiveTime};
use tracing::{debug, trace};

use crate::error::{Error, Result};
use crate::series::{parse_value, short_name, Series};

/// Unit label shown on the value axis when none is given.
pub const DEFAULT_LABEL: &str = "% Unemployment";

/// Immutable chart input. Invariants, checked by [`Dataset::new`]:
/// - at least one date, strictly increasing;
/// - at least one series;
/// - every series has exactly one value per date.
#[derive(Clone, Debug)]
pub struct Dataset {
    label: String,
    dates: Vec<NaiveDate>,
    // Dates as UTC epoch milliseconds, cached for bisection and scaling.
    times: Vec<f64>,
    series: Vec<Series>,
}

impl Dataset {
    pub fn new(label: impl Into<String>, dates: Vec<NaiveDate>, series: Vec<Series>) -> Result<Self> {
        if dates.is_empty() {
            return Err(Error::EmptyHeader);
        }
        for (i, pair) in dates.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(Error::NonMonotonicDates { index: i + 1, previous: pair[0], current: pair[1] });
            }
        }
        if series.is_empty() {
            return Err(Error::NoSeries);
        }
        if let Some(bad) = series.iter().find(|s| s.len() != dates.len()) {
            return Err(Error::LengthMismatch {
                series: bad.name().to_string(),
                expected: dates.len(),
                found: bad.len(),
            });
        }
        let times = dates.iter().copied().map(date_to_millis).collect();
        Ok(Self { label: label.into(), dates, times, series })
    }

    /// Parse tab-separated text using the default unit label.
    pub fn parse_tsv(text: &str) -> Result<Self> {
        Self::parse_tsv_with_label(text, DEFAULT_LABEL)
    }

    /// Parse tab-separated text: header `[label, YYYY-MM, ...]`, then one row per series.
    pub fn parse_tsv_with_label(text: &str, label: &str) -> Result<Self> {
        let mut rdr = csv::ReaderBuilder::new()
            .delimiter(b'\t')
            .has_headers(true)
            .flexible(true)
            .from_reader(text.as_bytes());

        let headers = rdr.headers()?.clone();
        let dates = headers
            .iter()
            .enumerate()
            .skip(1)
            .map(|(column, raw)| parse_header_date(column, raw))
            .collect::<Result<Vec<_>>>()?;
        if dates.is_empty() {
            return Err(Error::EmptyHeader);
        }

        let mut series = Vec::new();
        for rec in rdr.records() {
            let rec = rec?;
            if rec.iter().all(|cell| cell.trim().is_empty()) {
                continue;
            }
            let name = short_name(rec.get(0).unwrap_or_default());
            // Short rows are padded with missing values; extra cells are ignored.
            let values: Vec<f64> = (1..=dates.len())
                .map(|i| rec.get(i).map_or(f64::NAN, parse_value))
                .collect();
            let missing = values.iter().filter(|v| v.is_nan()).count();
            if missing > 0 {
                trace!(series = %name, missing, "substituted NaN for missing cells");
            }
            series.push(Series::new(name, values));
        }

        let dataset = Self::new(label, dates, series)?;
        debug!(
            series = dataset.series.len(),
            dates = dataset.dates.len(),
            first = %dataset.dates[0],
            last = %dataset.dates[dataset.dates.len() - 1],
            "parsed dataset"
        );
        Ok(dataset)
    }

    /// Unit label for the value axis.
    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// Dates as UTC epoch milliseconds, same order as [`Dataset::dates`].
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    pub fn series(&self) -> &[Series] {
        &self.series
    }

    /// Number of dates (and values per series).
    pub fn len(&self) -> usize {
        self.dates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// First and last date.
    pub fn time_extent(&self) -> (NaiveDate, NaiveDate) {
        (self.dates[0], self.dates[self.dates.len() - 1])
    }

    /// Largest value across all series, ignoring missing observations.
    pub fn max_value(&self) -> Option<f64> {
        self.series
            .iter()
            .filter_map(Series::max_value)
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }
}

/// Parse a `YYYY-MM` header cell into the first day of that month.
pub fn parse_header_date(column: usize, raw: &str) -> Result<NaiveDate> {
    let trimmed = raw.trim();
    NaiveDate::parse_from_str(&format!("{trimmed}-01"), "%Y-%m-%d")
        .ok()
        .filter(|_| !trimmed.is_empty() && trimmed.matches('-').count() == 1)
        .ok_or_else(|| Error::InvalidDate { column, value: raw.to_string() })
}

/// Midnight UTC of `date`, in epoch milliseconds.
#[inline]
pub fn date_to_millis(date: NaiveDate) -> f64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp_millis() as f64
}

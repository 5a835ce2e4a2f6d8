// File: crates/multiline-core/src/series.rs
// Summary: Named series of observations aligned to the dataset's shared date axis.
// Notes:
// - `NaN` marks a missing observation. It is kept in `values` so that indices
//   stay aligned with the date axis; accessors filter it out.

use std::sync::LazyLock;

use regex::Regex;

/// `, WORD...` suffix of a region label; everything after WORD is dropped.
static NAME_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r", ([A-Za-z0-9_-]+).*").expect("valid name-suffix pattern"));

#[derive(Clone, Debug)]
pub struct Series {
    name: String,
    values: Vec<f64>,
}

impl Series {
    pub fn new(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self { name: name.into(), values }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Raw values, index-aligned with the dates; may contain `NaN`.
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Observation at `index`, or `None` when out of range or missing.
    #[inline]
    pub fn value_at(&self, index: usize) -> Option<f64> {
        self.values.get(index).copied().filter(|v| !v.is_nan())
    }

    /// Largest observation, ignoring missing ones.
    pub fn max_value(&self) -> Option<f64> {
        self.values
            .iter()
            .copied()
            .filter(|v| !v.is_nan())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Number of present (non-`NaN`) observations.
    pub fn defined_count(&self) -> usize {
        self.values.iter().filter(|v| !v.is_nan()).count()
    }
}

/// Collapse a region label such as `"Bethesda-Rockville-Frederick, MD Met Div"`
/// into `"Bethesda-Rockville-Frederick MD"`. Labels without a `, WORD` suffix
/// are returned unchanged.
pub fn short_name(label: &str) -> String {
    NAME_SUFFIX.replacen(label, 1, " $1").into_owned()
}

/// Parse one observation cell; anything that is not a finite decimal is missing.
pub fn parse_value(cell: &str) -> f64 {
    match cell.trim().parse::<f64>() {
        Ok(v) if v.is_finite() => v,
        _ => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_name_drops_everything_after_first_word() {
        assert_eq!(short_name("Bethesda-Rockville-Frederick, MD Met Div"), "Bethesda-Rockville-Frederick MD");
        assert_eq!(short_name("Boston-Cambridge-Quincy, MA NECTA Div"), "Boston-Cambridge-Quincy MA");
        assert_eq!(short_name("Akron, OH"), "Akron OH");
    }

    #[test]
    fn short_name_keeps_labels_without_suffix() {
        assert_eq!(short_name("Nationwide"), "Nationwide");
        assert_eq!(short_name("Trailing comma, "), "Trailing comma, ");
    }

    #[test]
    fn parse_value_degrades_to_nan() {
        assert_eq!(parse_value(" 4.5 "), 4.5);
        assert!(parse_value("").is_nan());
        assert!(parse_value("n/a").is_nan());
        assert!(parse_value("inf").is_nan());
    }

    #[test]
    fn max_value_skips_missing() {
        let s = Series::new("a", vec![f64::NAN, 3.0, 7.5, f64::NAN]);
        assert_eq!(s.max_value(), Some(7.5));
        assert_eq!(s.defined_count(), 2);
        assert_eq!(s.value_at(0), None);
        assert_eq!(s.value_at(2), Some(7.5));
        assert_eq!(s.value_at(9), None);
        assert_eq!(Series::new("b", vec![f64::NAN]).max_value(), None);
    }
}

// File: crates/multiline-core/src/scale.rs
// Summary: Time (X) and value (Y) scales mapping data to surface pixels and back.
// Notes:
// - Both scales are linear and extrapolate outside their domain; nothing is clamped.

use chrono::{DateTime, NaiveDate, Utc};

use crate::config::ChartOptions;
use crate::dataset::{date_to_millis, Dataset};
use crate::ticks::{self, TimeTick};
use crate::types::Surface;

const DAY_MS: f64 = 86_400_000.0;

/// Shared forward/inverse mapping of a one-dimensional scale.
pub trait Scale {
    fn to_px(&self, v: f64) -> f32;
    fn from_px(&self, px: f32) -> f64;
    fn domain(&self) -> (f64, f64);
    fn range(&self) -> (f32, f32);
}

#[inline]
fn interpolate(v: f64, (d0, d1): (f64, f64), (r0, r1): (f32, f32)) -> f32 {
    let span = d1 - d0;
    if span == 0.0 {
        return ((r0 as f64 + r1 as f64) * 0.5) as f32;
    }
    (r0 as f64 + (v - d0) / span * (r1 as f64 - r0 as f64)) as f32
}

#[inline]
fn invert(px: f32, (d0, d1): (f64, f64), (r0, r1): (f32, f32)) -> f64 {
    let span = r1 as f64 - r0 as f64;
    if span == 0.0 {
        return d0;
    }
    d0 + (px as f64 - r0 as f64) / span * (d1 - d0)
}

/// Horizontal scale from UTC epoch milliseconds to pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TimeScale {
    start_ms: f64,
    stop_ms: f64,
    left_px: f32,
    right_px: f32,
}

impl TimeScale {
    /// A zero-length domain is widened by one day on each side.
    pub fn new(start_ms: f64, stop_ms: f64, left_px: f32, right_px: f32) -> Self {
        let (start_ms, stop_ms) =
            if start_ms == stop_ms { (start_ms - DAY_MS, stop_ms + DAY_MS) } else { (start_ms, stop_ms) };
        Self { start_ms, stop_ms, left_px, right_px }
    }

    /// Spans the dataset's first to last date across the surface's plot width.
    pub fn for_dataset(dataset: &Dataset, surface: &Surface) -> Self {
        let (first, last) = dataset.time_extent();
        Self::new(date_to_millis(first), date_to_millis(last), surface.plot_left(), surface.plot_right())
    }

    #[inline]
    pub fn date_to_px(&self, date: NaiveDate) -> f32 {
        self.to_px(date_to_millis(date))
    }

    /// Calendar time under `px`, if representable.
    pub fn px_to_datetime(&self, px: f32) -> Option<DateTime<Utc>> {
        let ms = self.from_px(px);
        if !ms.is_finite() {
            return None;
        }
        DateTime::from_timestamp_millis(ms.round() as i64)
    }

    /// Calendar ticks, about `count` of them.
    pub fn ticks(&self, count: f64) -> Vec<TimeTick> {
        ticks::time_ticks(self.start_ms, self.stop_ms, count)
    }
}

impl Scale for TimeScale {
    #[inline]
    fn to_px(&self, ms: f64) -> f32 {
        interpolate(ms, self.domain(), self.range())
    }
    #[inline]
    fn from_px(&self, px: f32) -> f64 {
        invert(px, self.domain(), self.range())
    }
    fn domain(&self) -> (f64, f64) {
        (self.start_ms, self.stop_ms)
    }
    fn range(&self) -> (f32, f32) {
        (self.left_px, self.right_px)
    }
}

/// Vertical value scale mapping `[vmin, vmax]` to `[bottom, top]` pixels.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ValueScale {
    vmin: f64,
    vmax: f64,
    bottom_px: f32,
    top_px: f32,
}

impl ValueScale {
    pub fn new_linear(vmin: f64, vmax: f64, bottom_px: f32, top_px: f32) -> Self {
        Self { vmin, vmax, bottom_px, top_px }
    }

    /// Domain `[0, max]` extended to nice bounds for `count` ticks. A missing,
    /// non-positive or non-finite `max` yields `[0, 1]`.
    pub fn new_nice(max: Option<f64>, count: usize, bottom_px: f32, top_px: f32) -> Self {
        let max = max.filter(|m| m.is_finite() && *m > 0.0).unwrap_or(1.0);
        let (vmin, vmax) = ticks::nice_domain(0.0, max, count.max(1) as f64);
        Self::new_linear(vmin, vmax, bottom_px, top_px)
    }

    pub fn for_dataset(dataset: &Dataset, surface: &Surface, count: usize) -> Self {
        Self::new_nice(dataset.max_value(), count, surface.plot_bottom(), surface.plot_top())
    }

    pub fn ticks(&self, count: usize) -> Vec<f64> {
        ticks::linear_ticks(self.vmin, self.vmax, count as f64)
    }

    /// Label text for a tick produced by [`ValueScale::ticks`] with the same `count`.
    pub fn tick_label(&self, value: f64, count: usize) -> String {
        ticks::format_tick(value, ticks::tick_step(self.vmin, self.vmax, count as f64))
    }
}

impl Scale for ValueScale {
    #[inline]
    fn to_px(&self, y: f64) -> f32 {
        interpolate(y, self.domain(), self.range())
    }
    #[inline]
    fn from_px(&self, py: f32) -> f64 {
        invert(py, self.domain(), self.range())
    }
    fn domain(&self) -> (f64, f64) {
        (self.vmin, self.vmax)
    }
    fn range(&self) -> (f32, f32) {
        (self.bottom_px, self.top_px)
    }
}

/// Both scales of a chart, rebuilt whenever the dataset or surface changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Scales {
    pub time: TimeScale,
    pub value: ValueScale,
}

impl Scales {
    pub fn build(dataset: &Dataset, surface: &Surface, opts: &ChartOptions) -> Self {
        Self {
            time: TimeScale::for_dataset(dataset, surface),
            value: ValueScale::for_dataset(dataset, surface, opts.value_ticks),
        }
    }
}

// File: crates/multiline-core/src/interaction.rs
// Summary: Pointer state machine and nearest-series hit testing.

use chrono::NaiveDate;
use tracing::trace;

use crate::dataset::Dataset;
use crate::scale::{Scale, Scales};
use crate::series::Series;

/// Pointer event in surface pixels, relative to the surface that received it.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    Enter,
    Move { x: f32, y: f32 },
    Leave,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum PointerPhase {
    /// No pointer over the surface.
    #[default]
    Idle,
    /// Pointer over the surface; paths are dimmed around the highlight.
    Entered,
}

/// Series nearest the pointer in the current frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Highlight {
    pub series: usize,
    /// Index into the shared date axis.
    pub index: usize,
    pub date: NaiveDate,
    /// The selected series' value at `index`.
    pub value: f64,
    /// Pointer position inverted through the scales.
    pub pointer_time: f64,
    pub pointer_value: f64,
}

/// Index of the element of `sorted` closest to `x`; an exact midpoint between
/// two elements resolves to the lower index. `None` for an empty slice or `NaN`.
pub fn bisect_center(sorted: &[f64], x: f64) -> Option<usize> {
    if sorted.is_empty() || x.is_nan() {
        return None;
    }
    let last = sorted.len() - 1;
    let i = sorted[..last].partition_point(|&v| v < x);
    if i > 0 && x - sorted[i - 1] <= sorted[i] - x {
        Some(i - 1)
    } else {
        Some(i)
    }
}

/// Series whose value at `index` is closest to `target`. Missing values never
/// win; ties go to the lowest series index.
pub fn nearest_series(series: &[Series], index: usize, target: f64) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, s) in series.iter().enumerate() {
        let Some(v) = s.value_at(index) else { continue };
        let d = (v - target).abs();
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((i, d));
        }
    }
    best.map(|(i, _)| i)
}

/// Invert a pointer position and select the nearest series at the nearest date.
pub fn pick(dataset: &Dataset, scales: &Scales, x: f32, y: f32) -> Option<Highlight> {
    let pointer_time = scales.time.from_px(x);
    let pointer_value = scales.value.from_px(y);
    let index = bisect_center(dataset.times(), pointer_time)?;
    let series = nearest_series(dataset.series(), index, pointer_value)?;
    let value = dataset.series()[series].value_at(index)?;
    let date = dataset.dates()[index];
    Some(Highlight { series, index, date, value, pointer_time, pointer_value })
}

/// What the renderer has to apply after an event.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Transition {
    /// Nothing visible changed.
    None,
    Entered,
    /// New highlight (or none, when no series has a value at the pointer's date).
    Moved(Option<Highlight>),
    Left,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct InteractionState {
    phase: PointerPhase,
    highlight: Option<Highlight>,
    // false until the first move after an enter has been applied
    placed: bool,
}

impl InteractionState {
    pub fn phase(&self) -> PointerPhase {
        self.phase
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.highlight.as_ref()
    }

    pub fn enter(&mut self) -> Transition {
        if self.phase == PointerPhase::Entered {
            return Transition::None;
        }
        self.phase = PointerPhase::Entered;
        self.highlight = None;
        self.placed = false;
        Transition::Entered
    }

    /// Record the pointer at `(x, y)`. Callers enter first when Idle.
    pub fn move_to(&mut self, dataset: &Dataset, scales: &Scales, x: f32, y: f32) -> Transition {
        let next = pick(dataset, scales, x, y);
        trace!(x, y, series = ?next.map(|h| h.series), index = ?next.map(|h| h.index), "pointer moved");
        let key = |h: Option<Highlight>| h.map(|h| (h.series, h.index));
        let unchanged = self.placed && key(next) == key(self.highlight);
        self.highlight = next;
        if unchanged {
            return Transition::None;
        }
        self.placed = true;
        Transition::Moved(next)
    }

    pub fn leave(&mut self) -> Transition {
        if self.phase == PointerPhase::Idle {
            return Transition::None;
        }
        self.phase = PointerPhase::Idle;
        self.highlight = None;
        self.placed = false;
        Transition::Left
    }

    /// Forget any pointer state, e.g. after the dataset was replaced.
    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bisect_center_picks_closest() {
        let xs = [0.0, 10.0, 20.0];
        assert_eq!(bisect_center(&xs, -5.0), Some(0));
        assert_eq!(bisect_center(&xs, 4.0), Some(0));
        assert_eq!(bisect_center(&xs, 6.0), Some(1));
        assert_eq!(bisect_center(&xs, 19.0), Some(2));
        assert_eq!(bisect_center(&xs, 99.0), Some(2));
        assert_eq!(bisect_center(&xs, 15.0), Some(1));
        assert_eq!(bisect_center(&[], 1.0), None);
        assert_eq!(bisect_center(&xs, f64::NAN), None);
    }

    #[test]
    fn nearest_series_breaks_ties_low() {
        let series = vec![Series::new("a", vec![4.0]), Series::new("b", vec![6.0])];
        assert_eq!(nearest_series(&series, 0, 5.0), Some(0));
        assert_eq!(nearest_series(&series, 1, 5.0), None);
    }

    #[test]
    fn enter_and_leave_are_idempotent() {
        let mut state = InteractionState::default();
        assert_eq!(state.leave(), Transition::None);
        assert_eq!(state.enter(), Transition::Entered);
        assert_eq!(state.enter(), Transition::None);
        assert_eq!(state.phase(), PointerPhase::Entered);
        assert_eq!(state.leave(), Transition::Left);
        assert_eq!(state.phase(), PointerPhase::Idle);
        assert!(state.highlight().is_none());
    }
}

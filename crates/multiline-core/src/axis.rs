// File: crates/multiline-core/src/axis.rs
// Summary: Axis layout: tick positions and labels for the bottom time axis and left value axis.

use crate::scale::{Scale, TimeScale, ValueScale};

/// Length of a tick mark, in pixels.
pub const TICK_SIZE: f32 = 6.0;
/// Gap between a tick mark's end and its label.
pub const TICK_PADDING: f32 = 3.0;
/// Font size of tick labels.
pub const TICK_FONT_SIZE: f32 = 10.0;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AxisSide {
    Bottom,
    Left,
}

#[derive(Clone, Debug, PartialEq)]
pub struct AxisTick {
    /// Pixel position along the axis.
    pub offset: f32,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Axis {
    pub side: AxisSide,
    pub ticks: Vec<AxisTick>,
    /// Axis line extent along the axis; `None` when the domain line is removed.
    pub domain: Option<(f32, f32)>,
    /// Extra bold label placed beside the last (top) tick.
    pub title: Option<String>,
}

impl Axis {
    /// Bottom time axis: about `count` calendar ticks, domain line without outer ticks.
    pub fn bottom(scale: &TimeScale, count: f64) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|t| AxisTick { offset: scale.date_to_px(t.date), label: t.label })
            .collect();
        Self { side: AxisSide::Bottom, ticks, domain: Some(scale.range()), title: None }
    }

    /// Left value axis without a domain line; the top tick carries `title`.
    pub fn left(scale: &ValueScale, count: usize, title: impl Into<String>) -> Self {
        let ticks = scale
            .ticks(count)
            .into_iter()
            .map(|v| AxisTick { offset: scale.to_px(v), label: scale.tick_label(v, count) })
            .collect();
        Self { side: AxisSide::Left, ticks, domain: None, title: Some(title.into()) }
    }

    /// The tick drawn last, which the title attaches to.
    pub fn last_tick(&self) -> Option<&AxisTick> {
        self.ticks.last()
    }
}

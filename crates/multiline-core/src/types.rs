// File: crates/multiline-core/src/types.rs
// Summary: Shared types and constants (viewport, margins, drawing surface extents).

use serde::{Deserialize, Serialize};

/// Default viewport width in pixels.
pub const WIDTH: u32 = 1280;
/// Default viewport height in pixels.
pub const HEIGHT: u32 = 800;

/// Screen margins reserved around the plot area, in pixels.
/// Contract: all fields are non-negative.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Margin {
    pub top: u32,
    pub right: u32,
    pub bottom: u32,
    pub left: u32,
}

impl Margin {
    /// Create new margins (non-negative by type).
    pub const fn new(top: u32, right: u32, bottom: u32, left: u32) -> Self {
        Self { top, right, bottom, left }
    }
}

impl Default for Margin {
    fn default() -> Self {
        Self::new(20, 20, 30, 30)
    }
}

/// Size of the area a host makes available to the chart.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Viewport {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self::new(WIDTH, HEIGHT)
    }
}

/// Drawing surface extents plus the margins kept free for the axes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Surface {
    pub width: f32,
    pub height: f32,
    pub margin: Margin,
}

impl Surface {
    pub fn new(width: f32, height: f32, margin: Margin) -> Self {
        Self { width: width.max(0.0), height: height.max(0.0), margin }
    }

    /// Surface covering `fraction` of the viewport in both directions.
    pub fn from_viewport(viewport: Viewport, fraction: f32, margin: Margin) -> Self {
        let fraction = if fraction.is_finite() && fraction > 0.0 { fraction } else { 1.0 };
        Self::new(viewport.width as f32 * fraction, viewport.height as f32 * fraction, margin)
    }

    pub fn plot_left(&self) -> f32 { self.margin.left as f32 }
    pub fn plot_right(&self) -> f32 { self.width - self.margin.right as f32 }
    pub fn plot_top(&self) -> f32 { self.margin.top as f32 }
    pub fn plot_bottom(&self) -> f32 { self.height - self.margin.bottom as f32 }
}

// File: crates/multiline-core/src/config.rs
// Summary: Chart and loader options with JSON overrides.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::theme::Theme;
use crate::types::{Margin, Surface, Viewport};

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartOptions {
    pub margin: Margin,
    /// Share of the viewport (per direction) given to the drawing surface.
    pub surface_fraction: f32,
    /// One time-axis tick is requested per this many pixels of surface width.
    pub px_per_time_tick: f32,
    /// Tick count hint for the value axis (also drives its "nice" domain).
    pub value_ticks: usize,
    /// Disable to keep raster output free of font differences across platforms.
    pub draw_labels: bool,
    pub theme: Theme,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            margin: Margin::default(),
            surface_fraction: 0.8,
            px_per_time_tick: 80.0,
            value_ticks: 10,
            draw_labels: true,
            theme: Theme::default(),
        }
    }
}

impl ChartOptions {
    pub fn surface_for(&self, viewport: Viewport) -> Surface {
        Surface::from_viewport(viewport, self.surface_fraction, self.margin)
    }

    /// Tick count hint for a time axis spanning `width` pixels.
    pub fn time_tick_count(&self, width: f32) -> f64 {
        (width / self.px_per_time_tick.max(1.0)) as f64
    }
}

/// Retry policy for fetching the data source.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    pub max_attempts: u32,
    pub initial_backoff_ms: u64,
    pub max_backoff_ms: u64,
    pub timeout_ms: u64,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self { max_attempts: 3, initial_backoff_ms: 200, max_backoff_ms: 2_000, timeout_ms: 10_000 }
    }
}

impl LoaderOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    /// Delay before retry number `retry` (1-based): doubles each time, capped.
    pub fn backoff(&self, retry: u32) -> Duration {
        let factor = 1u64.checked_shl(retry.saturating_sub(1)).unwrap_or(u64::MAX);
        let ms = self.initial_backoff_ms.saturating_mul(factor).min(self.max_backoff_ms);
        Duration::from_millis(ms)
    }
}

/// Everything a host reads from a config file.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub chart: ChartOptions,
    pub loader: LoaderOptions,
}

impl Config {
    pub fn from_json_str(text: &str) -> Result<Self> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }
}

// File: crates/multiline-core/src/lib.rs
// Summary: Core library entry point; exports the dataset, scales, scene, and hover-interaction API.

pub mod axis;
pub mod chart;
pub mod config;
pub mod dataset;
pub mod error;
pub mod geometry;
pub mod interaction;
pub mod loader;
pub mod render;
pub mod scale;
pub mod scene;
pub mod series;
pub mod svg;
pub mod telemetry;
pub mod theme;
pub mod ticks;
pub mod types;

pub use chart::{Chart, LoadStatus};
pub use config::{ChartOptions, Config, LoaderOptions};
pub use dataset::{Dataset, DEFAULT_LABEL};
pub use error::{Error, LoadFailure, Result};
pub use interaction::{bisect_center, nearest_series, Highlight, PointerEvent, PointerPhase};
pub use loader::{load_dataset, load_text, Source};
pub use scale::{Scale, Scales, TimeScale, ValueScale};
pub use scene::Scene;
pub use series::Series;
pub use theme::{Color, Theme};
pub use types::{Margin, Surface, Viewport};

// File: crates/multiline-core/src/render.rs
// Summary: Renderer owning the scene: axes, one path per series, hover marker and restyling.

use tracing::debug;

use crate::axis::{Axis, AxisSide, TICK_FONT_SIZE, TICK_PADDING, TICK_SIZE};
use crate::config::ChartOptions;
use crate::dataset::Dataset;
use crate::geometry::{Point, RectF};
use crate::interaction::Highlight;
use crate::scale::{Scale, Scales};
use crate::scene::{BlendMode, Element, ElementId, GroupId, Scene, Stroke, TextAnchor, TextBaseline, TextStyle};
use crate::theme::{Color, Theme};
use crate::types::Surface;

/// Radius of the hover marker dot.
pub const MARKER_RADIUS: f32 = 2.5;
/// The marker label's baseline sits this far above the dot.
pub const MARKER_LABEL_RISE: f32 = 8.0;

// Ids into the current scene, valid until the next `draw`/`clear`.
#[derive(Clone, Debug)]
struct Handles {
    paths: Vec<ElementId>,
    marker: GroupId,
    marker_label: Option<ElementId>,
}

/// Sole owner of the drawing surface; every mutation goes through here.
pub struct Renderer {
    scene: Scene,
    handles: Option<Handles>,
}

impl Renderer {
    pub fn new() -> Self {
        Self { scene: Scene::new(0.0, 0.0), handles: None }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn clear(&mut self) {
        self.scene.clear();
        self.handles = None;
    }

    /// Full redraw. Prior content is dropped first, so equal inputs give equal scenes.
    pub fn draw(&mut self, dataset: &Dataset, scales: &Scales, surface: &Surface, opts: &ChartOptions) {
        self.clear();
        let theme = &opts.theme;
        self.scene.set_size(surface.width, surface.height);
        self.scene.set_background(theme.background);

        let x_axis = Axis::bottom(&scales.time, opts.time_tick_count(surface.width));
        let y_axis = Axis::left(&scales.value, opts.value_ticks, dataset.label());
        self.draw_axis(&x_axis, surface, theme, opts.draw_labels);
        self.draw_axis(&y_axis, surface, theme, opts.draw_labels);

        let paths_group = self.scene.add_group("series");
        let mut paths = Vec::with_capacity(dataset.series().len());
        for index in 0..dataset.series().len() {
            let element = Element::Path {
                subpaths: series_subpaths(dataset, index, scales),
                stroke: Stroke::rounded(theme.line_stroke, theme.line_width),
                blend: theme.line_blend,
            };
            if let Some(id) = self.scene.push(paths_group, element) {
                paths.push(id);
            }
        }

        let marker = self.scene.add_group("marker");
        if let Some(g) = self.scene.group_mut(marker) {
            g.visible = false;
        }
        self.scene.push(marker, Element::Circle { center: Point::default(), radius: MARKER_RADIUS, fill: theme.marker });
        let marker_label = opts
            .draw_labels
            .then(|| {
                self.scene.push(
                    marker,
                    Element::Text {
                        at: Point::new(0.0, -MARKER_LABEL_RISE),
                        text: String::new(),
                        style: TextStyle::new(TICK_FONT_SIZE, theme.marker_label).anchor(TextAnchor::Middle),
                    },
                )
            })
            .flatten();

        self.scene.set_hit_region(RectF::from_ltwh(0.0, 0.0, surface.width, surface.height));
        self.handles = Some(Handles { paths, marker, marker_label });
        debug!(
            series = dataset.series().len(),
            width = surface.width,
            height = surface.height,
            elements = self.scene.element_count(),
            "drew chart"
        );
    }

    /// Degraded view shown when the data could not be loaded.
    pub fn draw_error(&mut self, message: &str, surface: &Surface, theme: &Theme) {
        self.clear();
        self.scene.set_size(surface.width, surface.height);
        self.scene.set_background(theme.background);
        let g = self.scene.add_group("error");
        self.scene.push(
            g,
            Element::Text {
                at: Point::new(surface.width * 0.5, surface.height * 0.5),
                text: message.to_string(),
                style: TextStyle::new(14.0, theme.error_text)
                    .anchor(TextAnchor::Middle)
                    .baseline(TextBaseline::Middle)
                    .bold(),
            },
        );
    }

    /// Pointer entered: dim every path and show the marker.
    pub fn show_hover(&mut self, theme: &Theme) {
        let Some(h) = self.handles.clone() else { return };
        for id in &h.paths {
            self.restyle_path(*id, theme.line_dimmed, BlendMode::Normal);
        }
        self.set_marker_visible(h.marker, true);
    }

    /// Emphasize the highlighted series, raise it, and move the marker onto it.
    /// With no highlight every path stays dimmed and the marker is hidden.
    pub fn apply_highlight(&mut self, highlight: Option<&Highlight>, dataset: &Dataset, scales: &Scales, theme: &Theme) {
        let Some(h) = self.handles.clone() else { return };
        for (i, id) in h.paths.iter().enumerate() {
            let color = if highlight.is_some_and(|hl| hl.series == i) { theme.line_stroke } else { theme.line_dimmed };
            self.restyle_path(*id, color, BlendMode::Normal);
        }
        let Some(hl) = highlight else {
            self.set_marker_visible(h.marker, false);
            return;
        };
        if let Some(id) = h.paths.get(hl.series) {
            self.scene.raise(*id);
        }
        let at = Point::new(scales.time.to_px(dataset.times()[hl.index]), scales.value.to_px(hl.value));
        if let Some(g) = self.scene.group_mut(h.marker) {
            g.offset = at;
            g.visible = true;
        }
        if let Some(Element::Text { text, .. }) = h.marker_label.and_then(|id| self.scene.element_mut(id)) {
            text.clear();
            text.push_str(dataset.series()[hl.series].name());
        }
    }

    /// Pointer left: restore the resting style and hide the marker.
    pub fn reset_hover(&mut self, theme: &Theme) {
        let Some(h) = self.handles.clone() else { return };
        for id in &h.paths {
            self.restyle_path(*id, theme.line_stroke, theme.line_blend);
        }
        self.set_marker_visible(h.marker, false);
    }

    /// Path element id of series `index` in the current scene.
    pub fn path_id(&self, index: usize) -> Option<ElementId> {
        self.handles.as_ref().and_then(|h| h.paths.get(index).copied())
    }

    fn restyle_path(&mut self, id: ElementId, color: Color, mode: BlendMode) {
        if let Some(Element::Path { stroke, blend, .. }) = self.scene.element_mut(id) {
            stroke.color = color;
            *blend = mode;
        }
    }

    fn set_marker_visible(&mut self, marker: GroupId, visible: bool) {
        if let Some(g) = self.scene.group_mut(marker) {
            g.visible = visible;
        }
    }

    fn draw_axis(&mut self, axis: &Axis, surface: &Surface, theme: &Theme, labels: bool) {
        let tick_stroke = Stroke::solid(theme.tick, 1.0);
        let label_style = TextStyle::new(TICK_FONT_SIZE, theme.axis_label);
        let reach = TICK_SIZE + TICK_PADDING;
        match axis.side {
            AxisSide::Bottom => {
                let g = self.scene.add_group("x-axis");
                if let Some(group) = self.scene.group_mut(g) {
                    group.offset = Point::new(0.0, surface.plot_bottom());
                }
                if let Some((r0, r1)) = axis.domain {
                    let stroke = Stroke::solid(theme.axis_line, 1.0);
                    self.scene.push(g, Element::Line { from: Point::new(r0, 0.0), to: Point::new(r1, 0.0), stroke });
                }
                for t in &axis.ticks {
                    self.scene.push(
                        g,
                        Element::Line { from: Point::new(t.offset, 0.0), to: Point::new(t.offset, TICK_SIZE), stroke: tick_stroke },
                    );
                    if labels {
                        let style = label_style.anchor(TextAnchor::Middle).baseline(TextBaseline::Hanging);
                        self.scene.push(g, Element::Text { at: Point::new(t.offset, reach), text: t.label.clone(), style });
                    }
                }
            }
            AxisSide::Left => {
                let g = self.scene.add_group("y-axis");
                if let Some(group) = self.scene.group_mut(g) {
                    group.offset = Point::new(surface.plot_left(), 0.0);
                }
                if let Some((r0, r1)) = axis.domain {
                    let stroke = Stroke::solid(theme.axis_line, 1.0);
                    self.scene.push(g, Element::Line { from: Point::new(0.0, r0), to: Point::new(0.0, r1), stroke });
                }
                for t in &axis.ticks {
                    self.scene.push(
                        g,
                        Element::Line { from: Point::new(-TICK_SIZE, t.offset), to: Point::new(0.0, t.offset), stroke: tick_stroke },
                    );
                    if labels {
                        let style = label_style.anchor(TextAnchor::End).baseline(TextBaseline::Middle);
                        self.scene.push(g, Element::Text { at: Point::new(-reach, t.offset), text: t.label.clone(), style });
                    }
                }
                if let (true, Some(title), Some(top)) = (labels, axis.title.as_ref(), axis.last_tick()) {
                    let style = label_style.anchor(TextAnchor::Start).baseline(TextBaseline::Middle).bold();
                    self.scene.push(g, Element::Text { at: Point::new(3.0, top.offset), text: title.clone(), style });
                }
            }
        }
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Self::new()
    }
}

/// Pixel runs for series `index`; missing values split the line instead of
/// being bridged.
pub fn series_subpaths(dataset: &Dataset, index: usize, scales: &Scales) -> Vec<Vec<Point>> {
    let Some(series) = dataset.series().get(index) else { return Vec::new() };
    let mut runs = Vec::new();
    let mut current: Vec<Point> = Vec::new();
    for (&t, &v) in dataset.times().iter().zip(series.values()) {
        if v.is_nan() {
            if !current.is_empty() {
                runs.push(std::mem::take(&mut current));
            }
            continue;
        }
        current.push(Point::new(scales.time.to_px(t), scales.value.to_px(v)));
    }
    if !current.is_empty() {
        runs.push(current);
    }
    runs
}

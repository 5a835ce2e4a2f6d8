// File: crates/multiline-core/src/chart.rs
// Summary: Chart state {dataset, scales, highlight, renderer} with explicit redraws per transition.

use tracing::{debug, warn};

use crate::config::ChartOptions;
use crate::dataset::Dataset;
use crate::error::Error;
use crate::interaction::{Highlight, InteractionState, PointerEvent, PointerPhase, Transition};
use crate::render::Renderer;
use crate::scale::Scales;
use crate::scene::Scene;
use crate::types::{Surface, Viewport};

/// Where the chart is in its data lifecycle.
#[derive(Clone, Debug, PartialEq)]
pub enum LoadStatus {
    Pending,
    Ready,
    /// Loading failed; the scene shows `message` instead of a chart.
    Failed(String),
}

pub struct Chart {
    options: ChartOptions,
    surface: Surface,
    status: LoadStatus,
    dataset: Option<Dataset>,
    scales: Option<Scales>,
    interaction: InteractionState,
    renderer: Renderer,
}

impl Chart {
    pub fn new(options: ChartOptions, viewport: Viewport) -> Self {
        let surface = options.surface_for(viewport);
        Self {
            options,
            surface,
            status: LoadStatus::Pending,
            dataset: None,
            scales: None,
            interaction: InteractionState::default(),
            renderer: Renderer::new(),
        }
    }

    /// Chart drawn directly onto a surface of the given size (no viewport fraction).
    pub fn with_surface(options: ChartOptions, surface: Surface) -> Self {
        let mut chart = Self::new(options, Viewport::default());
        chart.surface = surface;
        chart
    }

    pub fn options(&self) -> &ChartOptions {
        &self.options
    }

    pub fn surface(&self) -> &Surface {
        &self.surface
    }

    pub fn status(&self) -> &LoadStatus {
        &self.status
    }

    pub fn dataset(&self) -> Option<&Dataset> {
        self.dataset.as_ref()
    }

    pub fn scales(&self) -> Option<&Scales> {
        self.scales.as_ref()
    }

    pub fn highlight(&self) -> Option<&Highlight> {
        self.interaction.highlight()
    }

    pub fn phase(&self) -> PointerPhase {
        self.interaction.phase()
    }

    pub fn scene(&self) -> &Scene {
        self.renderer.scene()
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Install a freshly loaded dataset and redraw.
    pub fn set_dataset(&mut self, dataset: Dataset) {
        debug!(series = dataset.series().len(), dates = dataset.len(), "dataset installed");
        self.dataset = Some(dataset);
        self.status = LoadStatus::Ready;
        self.interaction.reset();
        self.redraw();
    }

    /// Switch to the degraded error view.
    pub fn set_load_error(&mut self, err: &Error) {
        warn!(error = %err, "showing load error");
        let message = format!("Could not load data: {err}");
        self.dataset = None;
        self.scales = None;
        self.interaction.reset();
        self.renderer.draw_error(&message, &self.surface, &self.options.theme);
        self.status = LoadStatus::Failed(message);
    }

    /// Apply a new viewport; redraws only when the surface size changes.
    pub fn resize(&mut self, viewport: Viewport) -> bool {
        let surface = self.options.surface_for(viewport);
        if surface == self.surface {
            return false;
        }
        self.surface = surface;
        self.redraw();
        true
    }

    /// Rebuild scales and redraw everything for the current state.
    pub fn redraw(&mut self) {
        match (&self.dataset, &self.status) {
            (Some(dataset), _) => {
                let scales = Scales::build(dataset, &self.surface, &self.options);
                self.renderer.draw(dataset, &scales, &self.surface, &self.options);
                self.scales = Some(scales);
                self.interaction.reset();
            }
            (None, LoadStatus::Failed(message)) => {
                let message = message.clone();
                self.renderer.draw_error(&message, &self.surface, &self.options.theme);
            }
            (None, _) => self.renderer.clear(),
        }
    }

    /// Route a pointer event; returns whether the scene changed.
    pub fn handle_pointer(&mut self, event: PointerEvent) -> bool {
        match event {
            PointerEvent::Enter => self.pointer_enter(),
            PointerEvent::Move { x, y } => self.pointer_move(x, y),
            PointerEvent::Leave => self.pointer_leave(),
        }
    }

    pub fn pointer_enter(&mut self) -> bool {
        if self.dataset.is_none() {
            return false;
        }
        match self.interaction.enter() {
            Transition::Entered => {
                self.renderer.show_hover(&self.options.theme);
                true
            }
            _ => false,
        }
    }

    /// Pointer at `(x, y)` in surface pixels. Leaving the hit region counts as
    /// a leave; arriving while Idle counts as an enter.
    pub fn pointer_move(&mut self, x: f32, y: f32) -> bool {
        if !self.renderer.scene().hit_test(x, y) {
            return self.pointer_leave();
        }
        let entered = self.pointer_enter();
        let (Some(dataset), Some(scales)) = (&self.dataset, &self.scales) else { return entered };
        match self.interaction.move_to(dataset, scales, x, y) {
            Transition::Moved(highlight) => {
                self.renderer.apply_highlight(highlight.as_ref(), dataset, scales, &self.options.theme);
                true
            }
            _ => entered,
        }
    }

    pub fn pointer_leave(&mut self) -> bool {
        match self.interaction.leave() {
            Transition::Left => {
                self.renderer.reset_hover(&self.options.theme);
                true
            }
            _ => false,
        }
    }
}

//! Browser-free core of the render/interaction surface.
//!
//! [`SurfaceCore`] owns one engine for the page's lifetime and everything the
//! frame loop and pointer handlers touch: the frame clock, the gesture state,
//! hover, tutor annotations and the live graph. It has no DOM dependencies so
//! it can be driven directly from tests; [`crate::host::Simulation`] wraps it
//! with the canvas element and the animation-frame scheduler.

#[cfg(test)]
#[path = "surface_test.rs"]
mod surface_test;

use crate::annotation::Annotation;
use crate::clock::FrameClock;
use crate::config::SurfaceConfig;
use crate::hit::hit_test;
use crate::input::{Button, Cursor, InputState, UiState, constrain};
use crate::mapper::{Mapper, Point, Projection, Viewport};
use crate::params::{Control, ParamValue, controls};
use crate::plot::Plot;
use crate::sim::{Engine, SimKind};
use crate::snapshot::{BodyId, Snapshot};
use crate::tutor::TutorReply;

/// Engine, clock and interaction state for one simulation page.
pub struct SurfaceCore {
    engine: Box<dyn Engine>,
    pub config: SurfaceConfig,
    pub clock: FrameClock,
    pub input: InputState,
    pub ui: UiState,
    annotations: Vec<Annotation>,
    plot: Plot,
    last_sample_ms: Option<f64>,
}

impl SurfaceCore {
    #[must_use]
    pub fn new(kind: SimKind, config: SurfaceConfig) -> Self {
        let config = config.normalized();
        Self {
            engine: kind.build(),
            clock: FrameClock::new(config.dt_ceiling_s),
            config,
            input: InputState::default(),
            ui: UiState::default(),
            annotations: Vec::new(),
            plot: Plot::default(),
            last_sample_ms: None,
        }
    }

    // --- Queries ---

    #[must_use]
    pub fn kind(&self) -> SimKind {
        self.engine.kind()
    }

    #[must_use]
    pub fn engine(&self) -> &dyn Engine {
        self.engine.as_ref()
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        self.engine.snapshot()
    }

    /// Slider descriptors for the current parameters.
    #[must_use]
    pub fn controls(&self) -> Vec<Control> {
        controls(self.engine.params())
    }

    #[must_use]
    pub fn viewport(&self) -> Viewport {
        Viewport::new(self.config.width, self.config.height)
    }

    /// Transform for this simulation's bodies.
    #[must_use]
    pub fn body_mapper(&self) -> Mapper {
        Mapper::new(self.kind().projection(), self.viewport())
    }

    /// Transform for tutor annotations.
    #[must_use]
    pub fn annotation_mapper(&self) -> Mapper {
        Mapper::new(Projection::Ground, self.viewport())
    }

    #[must_use]
    pub fn annotations(&self) -> &[Annotation] {
        &self.annotations
    }

    #[must_use]
    pub fn plot(&self) -> &Plot {
        &self.plot
    }

    /// Body to draw with the hover/drag highlight.
    #[must_use]
    pub fn highlighted(&self) -> Option<BodyId> {
        self.input.dragged().or(self.ui.hover)
    }

    #[must_use]
    pub fn cursor(&self) -> Cursor {
        if self.input.is_dragging() {
            Cursor::Grabbing
        } else if self.ui.hover.is_some() {
            Cursor::Grab
        } else {
            Cursor::Default
        }
    }

    // --- Frame loop ---

    /// Advance one display frame at `now_ms`. Returns the `dt` handed to the
    /// engine, which is zero while a drag is in progress.
    pub fn frame(&mut self, now_ms: f64) -> f64 {
        let dt = self.clock.tick(now_ms);
        if self.input.is_dragging() {
            return 0.0;
        }
        let was_running = self.engine.is_running();
        self.engine.update(dt);
        if self.engine.is_running() {
            let interval = f64::from(self.config.plot_interval_ms);
            if self.last_sample_ms.is_none_or(|last| now_ms - last >= interval) {
                self.sample_plot(now_ms);
            }
        } else if was_running {
            // The engine stopped itself this frame: record where it ended up.
            self.sample_plot(now_ms);
        }
        dt
    }

    fn sample_plot(&mut self, now_ms: f64) {
        if let Some(sample) = Plot::probe(&self.engine.snapshot()) {
            self.plot.record(sample);
        }
        self.last_sample_ms = Some(now_ms);
    }

    // --- Run control ---

    pub fn start(&mut self) {
        self.engine.start();
        log::info!("{} started", self.kind().slug());
    }

    pub fn stop(&mut self) {
        self.engine.stop();
        log::info!("{} stopped at t={:.2}", self.kind().slug(), self.engine.snapshot().elapsed_time);
    }

    pub fn toggle(&mut self) {
        if self.engine.is_running() {
            self.stop();
        } else {
            self.start();
        }
    }

    /// Reset the engine and drop everything derived from the previous run.
    pub fn reset(&mut self) {
        self.engine.reset();
        self.plot.clear();
        self.annotations.clear();
        self.last_sample_ms = None;
        log::info!("{} reset", self.kind().slug());
    }

    pub fn set_parameter(&mut self, key: &str, value: ParamValue) {
        log::debug!("set {key} = {value:?}");
        self.engine.set_parameter(key, value);
    }

    // --- Annotations ---

    pub fn set_annotations(&mut self, annotations: Vec<Annotation>) {
        self.annotations = annotations;
    }

    /// Show a tutor answer. A reply without annotations leaves the current
    /// overlay in place.
    pub fn apply_reply(&mut self, reply: &TutorReply) {
        if !reply.annotations.is_empty() {
            self.set_annotations(reply.annotations.clone());
        }
    }

    pub fn clear_annotations(&mut self) {
        self.annotations.clear();
    }

    // --- Pointer input ---

    fn candidates(&self) -> &'static [BodyId] {
        match self.engine.as_draggable() {
            Some(draggable) => draggable.bodies(),
            None => &[],
        }
    }

    fn pick(&self, pt: Point) -> Option<BodyId> {
        let snap = self.engine.snapshot();
        hit_test(pt, &snap, self.candidates(), self.viewport(), self.config.hit_radius_px).map(|h| h.body)
    }

    /// Begin a drag if the primary button went down on a draggable body.
    /// Returns whether a drag started.
    pub fn on_pointer_down(&mut self, pt: Point, button: Button) -> bool {
        if button != Button::Primary || self.input.is_dragging() {
            return false;
        }
        let Some(body) = self.pick(pt) else {
            return false;
        };
        let last_world = Mapper::new(body.projection(), self.viewport()).to_world(pt);
        self.input = InputState::Dragging { body, last_world };
        self.ui.hover = None;
        log::debug!("drag start: {}", body.as_str());
        true
    }

    /// Move the dragged body to the pointer, or refresh hover when idle.
    pub fn on_pointer_move(&mut self, pt: Point) {
        match self.input {
            InputState::Dragging { body, .. } => {
                let world = constrain(body, Mapper::new(body.projection(), self.viewport()).to_world(pt));
                if let Some(draggable) = self.engine.as_draggable_mut() {
                    draggable.set_object_position(body, world.x, world.y);
                }
                self.input = InputState::Dragging { body, last_world: world };
            }
            InputState::Idle => {
                self.ui.hover = self.pick(pt);
            }
        }
    }

    pub fn on_pointer_up(&mut self) {
        self.end_drag();
    }

    /// Pointer left the canvas: end any drag and drop the hover.
    pub fn on_pointer_leave(&mut self) {
        self.end_drag();
        self.ui.hover = None;
    }

    fn end_drag(&mut self) {
        if let InputState::Dragging { body, last_world } = self.input {
            log::debug!("drag end: {} at ({:.2}, {:.2})", body.as_str(), last_world.x, last_world.y);
            self.input = InputState::Idle;
        }
    }

    // --- Layout ---

    pub fn resize(&mut self, width: f64, height: f64) {
        self.config = SurfaceConfig { width, height, ..self.config }.normalized();
    }
}

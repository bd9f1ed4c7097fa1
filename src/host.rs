//! wasm-bindgen entry points and the animation-frame scheduler.
//!
//! DESIGN
//! ======
//! [`Simulation`] is the only type the host page sees. It owns a
//! [`SurfaceCore`] behind `Rc<RefCell<..>>` so the frame callback, the tutor
//! future and the DOM event handlers all reach the same state; every handler
//! borrows it for its whole call, so a parameter edit lands entirely before
//! or after a step.
//!
//! The frame loop runs from construction until [`Simulation::destroy`] (or
//! drop), independent of the engine's run state, so drags and hovers repaint
//! while the simulation is paused. The pending frame is an explicit
//! [`FrameRequest`] handle: cancelling it clears the live flag, cancels the
//! outstanding `requestAnimationFrame` id and releases the callback.
//!
//! Pointer coordinates are CSS pixels relative to the canvas (`offsetX`,
//! `offsetY`).

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use serde::Serialize;
use wasm_bindgen::prelude::*;
use wasm_bindgen::{JsCast, closure::Closure};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, Window};

use crate::config::SurfaceConfig;
use crate::error::SimError;
use crate::input::Button;
use crate::mapper::{Point, Viewport};
use crate::params::ParamValue;
use crate::render;
use crate::sim::SimKind;
use crate::surface::SurfaceCore;
use crate::tutor::{Consultation, Inquiries, ScriptedTutor, consult};

/// Install the panic hook and the console logger. Runs once when the module
/// is instantiated.
#[wasm_bindgen(start)]
pub fn init_logging() {
    console_error_panic_hook::set_once();
    if let Err(err) = console_log::init_with_level(log::Level::Info) {
        log::debug!("logger already installed: {err}");
    }
}

// =============================================================================
// FRAME SCHEDULER
// =============================================================================

type FrameCallback = Closure<dyn FnMut(f64)>;

/// Handle to a self-rescheduling `requestAnimationFrame` loop.
pub struct FrameRequest {
    window: Window,
    live: Rc<Cell<bool>>,
    pending: Rc<Cell<Option<i32>>>,
    callback: Rc<RefCell<Option<FrameCallback>>>,
}

impl FrameRequest {
    /// Start calling `on_frame` with the frame timestamp once per display
    /// frame until cancelled.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::Render`] if the first frame cannot be requested.
    pub fn schedule(window: Window, mut on_frame: impl FnMut(f64) + 'static) -> Result<Self, SimError> {
        let live = Rc::new(Cell::new(true));
        let pending = Rc::new(Cell::new(None));
        let callback: Rc<RefCell<Option<FrameCallback>>> = Rc::new(RefCell::new(None));

        let live_cb = Rc::clone(&live);
        let pending_cb = Rc::clone(&pending);
        let callback_cb = Rc::clone(&callback);
        let window_cb = window.clone();
        let tick = Closure::wrap(Box::new(move |ts: f64| {
            pending_cb.set(None);
            if !live_cb.get() {
                return;
            }
            on_frame(ts);
            if let Some(cb) = callback_cb.borrow().as_ref() {
                match window_cb.request_animation_frame(cb.as_ref().unchecked_ref()) {
                    Ok(id) => pending_cb.set(Some(id)),
                    Err(err) => log::warn!("frame request failed: {}", SimError::render(&err)),
                }
            }
        }) as Box<dyn FnMut(f64)>);

        let id = window
            .request_animation_frame(tick.as_ref().unchecked_ref())
            .map_err(|err| SimError::render(&err))?;
        pending.set(Some(id));
        *callback.borrow_mut() = Some(tick);

        Ok(Self { window, live, pending, callback })
    }

    /// Stop the loop. The callback never runs again after this returns.
    pub fn cancel(&self) {
        self.live.set(false);
        if let Some(id) = self.pending.take() {
            if let Err(err) = self.window.cancel_animation_frame(id) {
                log::warn!("cancel frame failed: {}", SimError::render(&err));
            }
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameRequest {
    fn drop(&mut self) {
        self.cancel();
    }
}

// =============================================================================
// SIMULATION
// =============================================================================

/// Second canvas the live graph is painted on.
struct GraphTarget {
    ctx: CanvasRenderingContext2d,
    size: Viewport,
}

/// One simulation bound to one canvas.
#[wasm_bindgen]
pub struct Simulation {
    canvas: HtmlCanvasElement,
    window: Window,
    core: Rc<RefCell<SurfaceCore>>,
    inquiries: Rc<RefCell<Inquiries>>,
    tutor: ScriptedTutor,
    graph: Rc<RefCell<Option<GraphTarget>>>,
    frames: Option<FrameRequest>,
}

#[wasm_bindgen]
impl Simulation {
    /// Bind a simulation to `canvas`. `kind` is a page slug
    /// (`projectile`, `charged-particle`, `double-slit`); any other slug
    /// shows the projectile. `config_json` is an optional [`SurfaceConfig`]
    /// document.
    ///
    /// # Errors
    ///
    /// Fails on a malformed config, a missing window or a canvas without a
    /// 2D context.
    #[wasm_bindgen(constructor)]
    pub fn new(canvas: HtmlCanvasElement, kind: &str, config_json: Option<String>) -> Result<Simulation, JsValue> {
        let kind = SimKind::resolve(kind);
        let config = match config_json.as_deref() {
            Some(raw) => SurfaceConfig::from_json(raw)?,
            None => SurfaceConfig::default(),
        };
        let window = web_sys::window().ok_or(SimError::NoWindow)?;
        let ctx = context_2d(&canvas)?;

        let core = Rc::new(RefCell::new(SurfaceCore::new(kind, config)));
        size_backing_store(&canvas, &window, core.borrow().viewport());
        let graph: Rc<RefCell<Option<GraphTarget>>> = Rc::new(RefCell::new(None));

        let frame_core = Rc::clone(&core);
        let frame_graph = Rc::clone(&graph);
        let frame_window = window.clone();
        let frames = FrameRequest::schedule(window.clone(), move |ts| {
            let Ok(mut core) = frame_core.try_borrow_mut() else {
                return;
            };
            core.frame(ts);
            let dpr = frame_window.device_pixel_ratio();
            if let Err(err) = render::draw(&ctx, &core, dpr) {
                log::warn!("paint failed: {}", SimError::render(&err));
            }
            if let Some(target) = frame_graph.borrow().as_ref() {
                if let Err(err) = render::draw_plot(&target.ctx, core.plot(), target.size, dpr) {
                    log::warn!("graph paint failed: {}", SimError::render(&err));
                }
            }
        })?;

        let viewport = core.borrow().viewport();
        log::info!("{} mounted ({}x{})", kind.slug(), viewport.width, viewport.height);
        Ok(Self {
            canvas,
            window,
            core,
            inquiries: Rc::new(RefCell::new(Inquiries::default())),
            tutor: ScriptedTutor::new(config.tutor_latency_ms),
            graph,
            frames: Some(frames),
        })
    }

    // --- Run control ---

    pub fn start(&self) {
        self.core.borrow_mut().start();
    }

    pub fn stop(&self) {
        self.core.borrow_mut().stop();
    }

    pub fn toggle(&self) {
        self.core.borrow_mut().toggle();
    }

    pub fn reset(&self) {
        self.core.borrow_mut().reset();
    }

    /// Set a parameter from a slider (number) or toggle (boolean). Other
    /// value types are ignored.
    #[wasm_bindgen(js_name = setParameter)]
    pub fn set_parameter(&self, key: &str, value: &JsValue) {
        let value = if let Some(flag) = value.as_bool() {
            ParamValue::Flag(flag)
        } else if let Some(n) = value.as_f64() {
            ParamValue::Number(n)
        } else {
            log::warn!("ignoring non-numeric value for {key}");
            return;
        };
        self.core.borrow_mut().set_parameter(key, value);
    }

    // --- Queries ---

    /// Current engine snapshot as a plain object.
    ///
    /// # Errors
    ///
    /// Fails only if the snapshot cannot be serialized.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        to_js(&self.core.borrow().snapshot())
    }

    /// Parameter panel rows: `{ key, label, value, min, max, step }`.
    ///
    /// # Errors
    ///
    /// Fails only if the rows cannot be serialized.
    pub fn controls(&self) -> Result<JsValue, JsValue> {
        to_js(&self.core.borrow().controls())
    }

    /// Live graph samples, oldest first: `[{ time, value }]`.
    ///
    /// # Errors
    ///
    /// Fails only if the samples cannot be serialized.
    #[wasm_bindgen(js_name = plotSamples)]
    pub fn plot_samples(&self) -> Result<JsValue, JsValue> {
        let core = self.core.borrow();
        to_js(&core.plot().samples().collect::<Vec<_>>())
    }

    /// CSS cursor for the canvas.
    #[must_use]
    pub fn cursor(&self) -> String {
        self.core.borrow().cursor().as_css().to_owned()
    }

    // --- Pointer input ---

    /// Returns whether a drag started.
    #[wasm_bindgen(js_name = pointerDown)]
    pub fn pointer_down(&self, x: f64, y: f64, button: i16) -> bool {
        self.core.borrow_mut().on_pointer_down(Point::new(x, y), Button::from_dom(button))
    }

    #[wasm_bindgen(js_name = pointerMove)]
    pub fn pointer_move(&self, x: f64, y: f64) {
        self.core.borrow_mut().on_pointer_move(Point::new(x, y));
    }

    #[wasm_bindgen(js_name = pointerUp)]
    pub fn pointer_up(&self) {
        self.core.borrow_mut().on_pointer_up();
    }

    #[wasm_bindgen(js_name = pointerLeave)]
    pub fn pointer_leave(&self) {
        self.core.borrow_mut().on_pointer_leave();
    }

    // --- Tutor ---

    /// Ask the tutor about the current state. Resolves to
    /// `{ explanation, annotations }`, or `null` if the simulation was
    /// destroyed first. An answer that carries annotations replaces the
    /// overlay.
    pub fn ask(&self, question: String) -> js_sys::Promise {
        let snapshot = self.core.borrow().snapshot();
        let (id, registration) = self.inquiries.borrow_mut().open();
        let tutor = self.tutor;
        let core = Rc::clone(&self.core);
        let inquiries = Rc::clone(&self.inquiries);

        wasm_bindgen_futures::future_to_promise(async move {
            let outcome = consult(&tutor, &question, &snapshot, registration).await;
            inquiries.borrow_mut().close(id);
            match outcome {
                Consultation::Answered(reply) => {
                    if let Ok(mut core) = core.try_borrow_mut() {
                        core.apply_reply(&reply);
                    }
                    to_js(&reply)
                }
                Consultation::Fallback(reply) => to_js(&reply),
                Consultation::Cancelled => Ok(JsValue::NULL),
            }
        })
    }

    // --- Live graph ---

    /// Paint the live graph on `canvas` every frame, at `width` x `height`
    /// CSS pixels. Replaces any previously attached graph canvas.
    ///
    /// # Errors
    ///
    /// Fails if `canvas` has no 2D context.
    #[wasm_bindgen(js_name = attachGraph)]
    pub fn attach_graph(&self, canvas: &HtmlCanvasElement, width: f64, height: f64) -> Result<(), JsValue> {
        let ctx = context_2d(canvas)?;
        let size = Viewport::new(width.max(1.0), height.max(1.0));
        size_backing_store(canvas, &self.window, size);
        *self.graph.borrow_mut() = Some(GraphTarget { ctx, size });
        Ok(())
    }

    #[wasm_bindgen(js_name = detachGraph)]
    pub fn detach_graph(&self) {
        self.graph.borrow_mut().take();
    }

    #[wasm_bindgen(js_name = clearAnnotations)]
    pub fn clear_annotations(&self) {
        self.core.borrow_mut().clear_annotations();
    }

    // --- Layout / lifecycle ---

    /// The canvas changed CSS size.
    pub fn resize(&self, width: f64, height: f64) {
        let mut core = self.core.borrow_mut();
        core.resize(width, height);
        size_backing_store(&self.canvas, &self.window, core.viewport());
    }

    /// Stop the frame loop and abort outstanding tutor requests.
    pub fn destroy(&mut self) {
        if let Some(frames) = self.frames.take() {
            frames.cancel();
        }
        self.graph.borrow_mut().take();
        let aborted = self.inquiries.borrow_mut().cancel_all();
        log::info!("{} destroyed ({aborted} tutor requests aborted)", self.core.borrow().kind().slug());
    }
}

impl Drop for Simulation {
    fn drop(&mut self) {
        if self.frames.is_some() {
            self.destroy();
        }
    }
}

// =============================================================================
// HELPERS
// =============================================================================

fn context_2d(canvas: &HtmlCanvasElement) -> Result<CanvasRenderingContext2d, SimError> {
    canvas
        .get_context("2d")
        .map_err(|err| SimError::render(&err))?
        .ok_or_else(|| SimError::Render("canvas has no 2d context".into()))?
        .dyn_into::<CanvasRenderingContext2d>()
        .map_err(|_| SimError::Render("2d context has unexpected type".into()))
}

/// Match the canvas backing store to its CSS size at the current pixel ratio.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn size_backing_store(canvas: &HtmlCanvasElement, window: &Window, viewport: Viewport) {
    let dpr = window.device_pixel_ratio().max(1.0);
    canvas.set_width((viewport.width * dpr).round() as u32);
    canvas.set_height((viewport.height * dpr).round() as u32);
}

fn to_js<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    let text = serde_json::to_string(value).map_err(|e| SimError::Serialize(e.to_string()))?;
    Ok(js_sys::JSON::parse(&text)?)
}

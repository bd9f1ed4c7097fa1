//! Rendering: draws one simulation frame, and the live graph, to 2D contexts.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! It reads a [`SurfaceCore`] and produces pixels; it never mutates
//! simulation or interaction state.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The frame scheduler in [`crate::host`] logs a failed frame and keeps going.

#[cfg(test)]
#[path = "render_test.rs"]
mod render_test;

use std::f64::consts::{PI, TAU};

use wasm_bindgen::JsValue;
use web_sys::CanvasRenderingContext2d;

use crate::annotation::{Annotation, Glyph};
use crate::consts::{GRAPH_AXIS_BOTTOM_PX, GRAPH_AXIS_LEFT_PX};
use crate::mapper::{Mapper, Point, Viewport};
use crate::plot::{GraphScale, Plot};
use crate::sim::{SimKind, projectile};
use crate::snapshot::{ChargedState, SimObject, Snapshot, WaveState};
use crate::surface::SurfaceCore;
use crate::vector::Vector2;

const PROJECTILE_RADIUS_PX: f64 = 8.0;
const PARTICLE_RADIUS_PX: f64 = 10.0;
const HIGHLIGHT_WIDTH_PX: f64 = 4.0;

/// Pixels of velocity arrow per unit of speed.
const VELOCITY_ARROW_GAIN: f64 = 2.0;

const WAVE_RINGS: u32 = 20;
const WAVE_SPEED_PX: f64 = 50.0;
const WAVE_SPACING_PX: f64 = 40.0;
const WAVE_WRAP_PX: f64 = 800.0;
const WAVE_FADE_PX: f64 = 600.0;

const BARREL_LENGTH_PX: f64 = 60.0;
const BARREL_WIDTH_PX: f64 = 14.0;

const HUD_FONT: &str = "14px Inter, system-ui, sans-serif";
const ANNOTATION_FONT: &str = "bold 14px Inter, system-ui";
const INK: &str = "#1e293b";
const POSITIVE: &str = "#ef4444";
const NEGATIVE: &str = "#3b82f6";
const GREEN: &str = "#22c55e";

const GRAPH_FONT: &str = "10px Inter";
const GRAPH_LINE: &str = "#3b82f6";
const GRAPH_LABEL_X: &str = "Time";
const GRAPH_LABEL_Y: &str = "Position (y)";

/// Draw the full frame: background, bodies, annotations, HUD.
///
/// `dpr` is the device pixel ratio; all drawing happens in CSS pixels.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw(ctx: &CanvasRenderingContext2d, core: &SurfaceCore, dpr: f64) -> Result<(), JsValue> {
    let viewport = core.viewport();
    let snapshot = core.snapshot();
    let mapper = core.body_mapper();

    // Layer 1: clear.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, viewport.width, viewport.height);

    // Layer 2: scenery.
    draw_background(ctx, core.kind(), &snapshot, &mapper, viewport)?;

    // Layer 3: bodies.
    let highlighted = core.highlighted();
    for (&id, obj) in &snapshot.objects {
        draw_body(ctx, obj, &mapper, highlighted == Some(id))?;
    }

    // Layer 4: annotations.
    let ann_mapper = core.annotation_mapper();
    for ann in core.annotations() {
        draw_annotation(ctx, ann, &ann_mapper)?;
    }

    // Layer 5: HUD.
    draw_hud(ctx, &snapshot)
}

// =============================================================
// Scenery
// =============================================================

fn draw_background(
    ctx: &CanvasRenderingContext2d,
    kind: SimKind,
    snapshot: &Snapshot,
    mapper: &Mapper,
    viewport: Viewport,
) -> Result<(), JsValue> {
    match kind {
        SimKind::Projectile => {
            ctx.set_fill_style_str("#e0f2fe");
            ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
            let ground_y = mapper.origin().y;
            ctx.set_fill_style_str("#84cc16");
            ctx.fill_rect(0.0, ground_y, viewport.width, viewport.height - ground_y);
            draw_barrel(ctx, mapper.origin(), snapshot.parameters.number(projectile::ANGLE))
        }
        SimKind::ChargedParticle => {
            ctx.set_fill_style_str("#f8fafc");
            ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
            draw_grid(ctx, mapper, viewport);
            Ok(())
        }
        SimKind::DoubleSlit => {
            ctx.set_fill_style_str("#0f172a");
            ctx.fill_rect(0.0, 0.0, viewport.width, viewport.height);
            Ok(())
        }
    }
}

fn draw_barrel(ctx: &CanvasRenderingContext2d, pivot: Point, angle_deg: f64) -> Result<(), JsValue> {
    ctx.save();
    ctx.translate(pivot.x, pivot.y)?;
    // Screen y points down, so counter-clockwise launch angles rotate negative.
    ctx.rotate(-angle_deg.to_radians())?;
    ctx.set_fill_style_str("#334155");
    ctx.fill_rect(-BARREL_WIDTH_PX * 0.5, -BARREL_WIDTH_PX * 0.5, BARREL_LENGTH_PX, BARREL_WIDTH_PX);
    ctx.restore();
    Ok(())
}

/// One-unit grid lines through the field region.
fn draw_grid(ctx: &CanvasRenderingContext2d, mapper: &Mapper, viewport: Viewport) {
    let step = mapper.scale();
    let origin = mapper.origin();
    ctx.set_stroke_style_str("rgba(148, 163, 184, 0.25)");
    ctx.set_line_width(1.0);
    ctx.begin_path();
    for x in grid_lines(origin.x, step, viewport.width) {
        ctx.move_to(x, 0.0);
        ctx.line_to(x, viewport.height);
    }
    for y in grid_lines(origin.y, step, viewport.height) {
        ctx.move_to(0.0, y);
        ctx.line_to(viewport.width, y);
    }
    ctx.stroke();
}

/// Positions of lines spaced `step` apart through `origin`, within `[0, extent]`.
fn grid_lines(origin: f64, step: f64, extent: f64) -> impl Iterator<Item = f64> {
    let first = origin - (origin / step).floor() * step;
    std::iter::successors(Some(first), move |x| Some(x + step)).take_while(move |x| *x <= extent)
}

// =============================================================
// Bodies
// =============================================================

fn draw_body(ctx: &CanvasRenderingContext2d, obj: &SimObject, mapper: &Mapper, highlighted: bool) -> Result<(), JsValue> {
    match obj {
        SimObject::Body(_) => draw_projectile(ctx, mapper.to_screen(obj.position()), highlighted),
        SimObject::Charged(state) => draw_particle(ctx, state, mapper, highlighted),
        SimObject::Waves(waves) => draw_waves(ctx, waves, mapper),
    }
}

fn draw_projectile(ctx: &CanvasRenderingContext2d, at: Point, highlighted: bool) -> Result<(), JsValue> {
    ctx.set_fill_style_str("#000000");
    ctx.begin_path();
    ctx.arc(at.x, at.y, PROJECTILE_RADIUS_PX, 0.0, TAU)?;
    ctx.fill();
    if highlighted {
        ctx.set_stroke_style_str("rgba(255, 255, 0, 0.8)");
        ctx.set_line_width(HIGHLIGHT_WIDTH_PX);
        ctx.stroke();
    }
    Ok(())
}

fn draw_particle(
    ctx: &CanvasRenderingContext2d,
    state: &ChargedState,
    mapper: &Mapper,
    highlighted: bool,
) -> Result<(), JsValue> {
    let at = mapper.to_screen(Vector2::new(state.body.x, state.body.y));
    let positive = state.charge > 0.0;

    ctx.set_fill_style_str(if positive { POSITIVE } else { NEGATIVE });
    ctx.begin_path();
    ctx.arc(at.x, at.y, PARTICLE_RADIUS_PX, 0.0, TAU)?;
    ctx.fill();
    if highlighted {
        ctx.set_stroke_style_str(if positive { "rgba(239, 68, 68, 0.5)" } else { "rgba(59, 130, 246, 0.5)" });
        ctx.set_line_width(HIGHLIGHT_WIDTH_PX);
        ctx.stroke();
    }

    let tip = velocity_tip(at, state.body.vx, state.body.vy);
    ctx.set_stroke_style_str(GREEN);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    ctx.move_to(at.x, at.y);
    ctx.line_to(tip.x, tip.y);
    ctx.stroke();
    Ok(())
}

/// End of the velocity arrow drawn from `at`.
fn velocity_tip(at: Point, vx: f64, vy: f64) -> Point {
    Point::new(at.x + vx * VELOCITY_ARROW_GAIN, at.y - vy * VELOCITY_ARROW_GAIN)
}

fn draw_waves(ctx: &CanvasRenderingContext2d, waves: &WaveState, mapper: &Mapper) -> Result<(), JsValue> {
    let center = mapper.origin();
    let s1 = mapper.to_screen(waves.source1);
    let s2 = mapper.to_screen(waves.source2);

    // Barrier with two openings.
    ctx.set_fill_style_str(INK);
    ctx.fill_rect(center.x - 200.0, center.y - 2.0, 400.0, 4.0);
    ctx.clear_rect(s1.x - 5.0, s1.y - 5.0, 10.0, 10.0);
    ctx.clear_rect(s2.x - 5.0, s2.y - 5.0, 10.0, 10.0);

    ctx.set_line_width(1.0);
    for (radius, alpha) in wave_rings(waves.time) {
        ctx.set_stroke_style_str(&format!("rgba(59, 130, 246, {alpha})"));
        for src in [s1, s2] {
            ctx.begin_path();
            // Upper half only: the wavefronts leave through the slits.
            ctx.arc_with_anticlockwise(src.x, src.y, radius, 0.0, PI, true)?;
            ctx.stroke();
        }
    }
    Ok(())
}

/// Radius and opacity of each expanding wavefront at simulated `time`.
fn wave_rings(time: f64) -> impl Iterator<Item = (f64, f64)> {
    (0..WAVE_RINGS).map(move |i| {
        let radius = (time * WAVE_SPEED_PX + f64::from(i) * WAVE_SPACING_PX) % WAVE_WRAP_PX;
        let alpha = (1.0 - radius / WAVE_FADE_PX).max(0.0);
        (radius, alpha)
    })
}

// =============================================================
// Annotations
// =============================================================

fn draw_annotation(ctx: &CanvasRenderingContext2d, ann: &Annotation, mapper: &Mapper) -> Result<(), JsValue> {
    let color = ann.color();
    ctx.set_fill_style_str(color);
    ctx.set_stroke_style_str(color);
    ctx.set_line_width(2.0);
    ctx.set_font(ANNOTATION_FONT);

    match ann.glyph(mapper) {
        Glyph::Arrow { from, to, head, label } => {
            ctx.begin_path();
            ctx.move_to(from.x, from.y);
            ctx.line_to(to.x, to.y);
            ctx.stroke();

            ctx.begin_path();
            ctx.move_to(to.x, to.y);
            ctx.line_to(head[0].x, head[0].y);
            ctx.line_to(head[1].x, head[1].y);
            ctx.fill();

            if let Some((text, at)) = label {
                ctx.set_fill_style_str(INK);
                ctx.fill_text(&text, at.x, at.y)?;
            }
        }
        Glyph::Label { at, text } => {
            ctx.fill_text(&text, at.x, at.y)?;
        }
        Glyph::Highlight { center, radius } => {
            ctx.begin_path();
            ctx.arc(center.x, center.y, radius, 0.0, TAU)?;
            ctx.stroke();
        }
    }
    Ok(())
}

// =============================================================
// HUD
// =============================================================

fn draw_hud(ctx: &CanvasRenderingContext2d, snapshot: &Snapshot) -> Result<(), JsValue> {
    ctx.set_font(HUD_FONT);
    ctx.set_fill_style_str("#64748b");
    ctx.fill_text(&hud_time(snapshot.elapsed_time), 20.0, 30.0)?;

    if snapshot.is_running {
        ctx.set_fill_style_str(GREEN);
        ctx.begin_path();
        ctx.arc(10.0, 25.0, 4.0, 0.0, TAU)?;
        ctx.fill();
    }
    Ok(())
}

fn hud_time(elapsed: f64) -> String {
    format!("Time: {elapsed:.2}")
}

// =============================================================
// Live graph
// =============================================================

/// Draw the live graph: axes, labels and the sample line.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails.
pub fn draw_plot(ctx: &CanvasRenderingContext2d, plot: &Plot, size: Viewport, dpr: f64) -> Result<(), JsValue> {
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.set_fill_style_str("#ffffff");
    ctx.fill_rect(0.0, 0.0, size.width, size.height);

    let axis_y = size.height - GRAPH_AXIS_BOTTOM_PX;
    ctx.set_stroke_style_str("#e2e8f0");
    ctx.set_line_width(1.0);
    ctx.begin_path();
    ctx.move_to(GRAPH_AXIS_LEFT_PX, 0.0);
    ctx.line_to(GRAPH_AXIS_LEFT_PX, axis_y);
    ctx.move_to(GRAPH_AXIS_LEFT_PX, axis_y);
    ctx.line_to(size.width, axis_y);
    ctx.stroke();

    ctx.set_fill_style_str("#64748b");
    ctx.set_font(GRAPH_FONT);
    ctx.fill_text(GRAPH_LABEL_Y, 5.0, 15.0)?;
    ctx.fill_text(GRAPH_LABEL_X, size.width - 30.0, size.height - 5.0)?;

    if plot.len() < 2 {
        return Ok(());
    }
    let points = graph_points(plot, size);
    ctx.set_stroke_style_str(GRAPH_LINE);
    ctx.set_line_width(2.0);
    ctx.begin_path();
    for (i, p) in points.iter().enumerate() {
        if i == 0 {
            ctx.move_to(p.x, p.y);
        } else {
            ctx.line_to(p.x, p.y);
        }
    }
    ctx.stroke();
    Ok(())
}

/// Screen points of the decimated series, scaled to fit `size`.
fn graph_points(plot: &Plot, size: Viewport) -> Vec<Point> {
    let scale = GraphScale::fit(plot.samples());
    plot.decimated().map(|s| scale.to_screen(s, size)).collect()
}

//! Shared numeric constants for the simulation crate.

// ── Frame timing ────────────────────────────────────────────────

/// Largest simulated step taken from one frame, in seconds. Longer gaps
/// (background tabs, debugger pauses) are clamped to this.
pub const DT_CEILING_S: f64 = 0.1;

// ── Hit-testing ─────────────────────────────────────────────────

/// Screen-space grab radius around a body's center, in pixels.
pub const HIT_RADIUS_PX: f64 = 20.0;

// ── Projections ─────────────────────────────────────────────────

/// Pixels per meter for the ground-anchored projection.
pub const GROUND_SCALE: f64 = 20.0;

/// Distance from the left canvas edge to world x = 0, in pixels.
pub const GROUND_ORIGIN_X_PX: f64 = 50.0;

/// Distance from the bottom canvas edge to world y = 0, in pixels.
pub const GROUND_BASELINE_PX: f64 = 50.0;

/// Pixels per field unit for the canvas-centered particle projection.
pub const CENTERED_SCALE: f64 = 40.0;

/// Pixels per millimeter for the canvas-centered optical bench.
pub const OPTICAL_SCALE: f64 = 100.0;

// ── Annotations ─────────────────────────────────────────────────

/// Arrowhead length in screen pixels.
pub const ARROW_HEAD_PX: f64 = 10.0;

/// Arrowhead half-angle in radians (30°).
pub const ARROW_HEAD_ANGLE: f64 = std::f64::consts::PI / 6.0;

/// Horizontal gap between an arrow tip and its label, in pixels.
pub const ARROW_LABEL_GAP_PX: f64 = 10.0;

/// Ring radius for highlight annotations, in pixels.
pub const HIGHLIGHT_RADIUS_PX: f64 = 18.0;

// ── Graph ───────────────────────────────────────────────────────

/// Number of samples retained by the live graph.
pub const PLOT_CAPACITY: usize = 200;

/// Default sampling cadence of the live graph, in milliseconds.
pub const PLOT_INTERVAL_MS: u32 = 50;

/// Shortest time axis drawn, in seconds.
pub const GRAPH_MIN_WINDOW_S: f64 = 10.0;

/// The value axis always spans at least `[0, GRAPH_MIN_VALUE_MAX]`.
pub const GRAPH_MIN_VALUE_MAX: f64 = 10.0;

/// Most points stroked per graph line; longer series are decimated.
pub const GRAPH_MAX_POINTS: usize = 500;

/// Left margin holding the value axis, in pixels.
pub const GRAPH_AXIS_LEFT_PX: f64 = 30.0;

/// Bottom margin holding the time axis, in pixels.
pub const GRAPH_AXIS_BOTTOM_PX: f64 = 20.0;

/// Padding kept free at the right and top edges, in pixels.
pub const GRAPH_PAD_PX: f64 = 10.0;

// ── Tutor ───────────────────────────────────────────────────────

/// Simulated think time of the scripted tutor, in milliseconds.
pub const TUTOR_LATENCY_MS: u32 = 800;

//! Frame clock: turns display-frame timestamps into a clamped simulation `dt`.

#[cfg(test)]
#[path = "clock_test.rs"]
mod clock_test;

use crate::consts::DT_CEILING_S;

/// Measures wall-clock time between frames.
///
/// The first tick after construction yields `0`.
/// Later ticks yield `(now - last) / 1000` seconds clamped into
/// `[0, ceiling]`, so a timestamp that runs backwards never produces a
/// negative step and a long stall (background tab) produces at most one
/// ceiling-sized step.
#[derive(Debug, Clone, Copy)]
pub struct FrameClock {
    last_ms: Option<f64>,
    ceiling_s: f64,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new(DT_CEILING_S)
    }
}

impl FrameClock {
    #[must_use]
    pub fn new(ceiling_s: f64) -> Self {
        Self { last_ms: None, ceiling_s }
    }

    /// Record a frame at `now_ms` and return the clamped delta in seconds.
    pub fn tick(&mut self, now_ms: f64) -> f64 {
        let dt = match self.last_ms {
            Some(last) => ((now_ms - last) / 1000.0).clamp(0.0, self.ceiling_s),
            None => 0.0,
        };
        self.last_ms = Some(self.last_ms.map_or(now_ms, |last| last.max(now_ms)));
        dt
    }
}

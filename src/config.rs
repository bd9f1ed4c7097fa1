//! Surface configuration supplied by the host page as JSON.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{DT_CEILING_S, HIT_RADIUS_PX, PLOT_INTERVAL_MS, TUTOR_LATENCY_MS};
use crate::error::SimError;

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// Largest accepted frame delta, in seconds.
const MAX_DT_CEILING_S: f64 = 1.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SurfaceConfig {
    /// Canvas width in CSS pixels.
    pub width: f64,
    /// Canvas height in CSS pixels.
    pub height: f64,
    /// Upper bound on the per-frame delta handed to the engine.
    pub dt_ceiling_s: f64,
    /// Pointer pick radius in CSS pixels.
    pub hit_radius_px: f64,
    /// Live graph sampling cadence.
    pub plot_interval_ms: u32,
    /// Scripted tutor think delay.
    pub tutor_latency_ms: u32,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            height: DEFAULT_HEIGHT,
            dt_ceiling_s: DT_CEILING_S,
            hit_radius_px: HIT_RADIUS_PX,
            plot_interval_ms: PLOT_INTERVAL_MS,
            tutor_latency_ms: TUTOR_LATENCY_MS,
        }
    }
}

impl SurfaceConfig {
    /// Parse a JSON config document. Missing fields take their defaults and
    /// out-of-range values are normalized.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::ConfigParse`] if `raw` is not a JSON object of the
    /// expected shape.
    pub fn from_json(raw: &str) -> Result<Self, SimError> {
        let config: Self = serde_json::from_str(raw).map_err(|e| SimError::ConfigParse(e.to_string()))?;
        Ok(config.normalized())
    }

    /// Clamp every field into its usable range.
    #[must_use]
    pub fn normalized(self) -> Self {
        let dt_ceiling_s = if self.dt_ceiling_s.is_finite() && self.dt_ceiling_s > 0.0 {
            self.dt_ceiling_s.min(MAX_DT_CEILING_S)
        } else {
            DT_CEILING_S
        };
        Self {
            width: at_least_one(self.width),
            height: at_least_one(self.height),
            dt_ceiling_s,
            hit_radius_px: if self.hit_radius_px.is_finite() { self.hit_radius_px.max(0.0) } else { HIT_RADIUS_PX },
            plot_interval_ms: self.plot_interval_ms.max(1),
            tutor_latency_ms: self.tutor_latency_ms,
        }
    }
}

fn at_least_one(v: f64) -> f64 {
    if v.is_finite() { v.max(1.0) } else { 1.0 }
}

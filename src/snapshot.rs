//! Read-only engine projection handed to the renderer and the tutor.
//!
//! A [`Snapshot`] is recomputed from the engine's private kinematic state on
//! every call and never written back; it is safe to take one at any rate,
//! including mid-drag.

#[cfg(test)]
#[path = "snapshot_test.rs"]
mod snapshot_test;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::mapper::Projection;
use crate::params::Params;
use crate::vector::Vector2;

/// Name of a simulated object inside a snapshot.
///
/// Declaration order is the hit-test priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyId {
    /// The launched ball of the projectile demo.
    Projectile,
    /// The charged particle of the crossed-fields demo.
    Particle,
    /// The pair of slit sources of the double-slit demo.
    Waves,
}

impl BodyId {
    /// Every body, in hit-test priority order.
    pub const ALL: [Self; 3] = [Self::Projectile, Self::Particle, Self::Waves];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Projectile => "projectile",
            Self::Particle => "particle",
            Self::Waves => "waves",
        }
    }

    /// Projection this body is drawn, hit-tested and dragged in.
    #[must_use]
    pub fn projection(self) -> Projection {
        match self {
            Self::Projectile => Projection::Ground,
            Self::Particle => Projection::Centered,
            Self::Waves => Projection::Optical,
        }
    }
}

/// Kinematic record for a moving body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BodyState {
    pub x: f64,
    pub y: f64,
    pub vx: f64,
    pub vy: f64,
}

impl BodyState {
    #[must_use]
    pub fn new(position: Vector2, velocity: Vector2) -> Self {
        Self { x: position.x, y: position.y, vx: velocity.x, vy: velocity.y }
    }
}

/// Kinematic record for a charged body.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ChargedState {
    #[serde(flatten)]
    pub body: BodyState,
    pub charge: f64,
}

/// Wave sources for the stylized double-slit sketch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct WaveState {
    pub source1: Vector2,
    pub source2: Vector2,
    pub frequency: f64,
    pub time: f64,
}

/// Per-kind object record.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum SimObject {
    Body(BodyState),
    Charged(ChargedState),
    Waves(WaveState),
}

impl SimObject {
    /// World-space position. Wave fields report the midpoint of their sources.
    #[must_use]
    pub fn position(&self) -> Vector2 {
        match self {
            Self::Body(b) | Self::Charged(ChargedState { body: b, .. }) => Vector2::new(b.x, b.y),
            Self::Waves(w) => (w.source1 + w.source2).scale(0.5),
        }
    }

    /// World-space velocity; wave fields are stationary.
    #[must_use]
    pub fn velocity(&self) -> Vector2 {
        match self {
            Self::Body(b) | Self::Charged(ChargedState { body: b, .. }) => Vector2::new(b.vx, b.vy),
            Self::Waves(_) => Vector2::ZERO,
        }
    }
}

/// Read-only view of an engine at one instant.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Snapshot {
    pub elapsed_time: f64,
    pub is_running: bool,
    pub parameters: Params,
    pub objects: BTreeMap<BodyId, SimObject>,
}

impl Snapshot {
    #[must_use]
    pub fn object(&self, id: BodyId) -> Option<&SimObject> {
        self.objects.get(&id)
    }
}

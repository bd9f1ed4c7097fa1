//! Charged particle in crossed fields.
//!
//! `B` points out of the plane, `E` along +x. The in-plane Lorentz force is
//! `F = q (E + v × B)`:
//!
//! ```text
//! Fx = q (E + vy B)
//! Fy = q (-vx B)
//! ```
//!
//! There is no boundary; the particle may leave the visible area.

#[cfg(test)]
#[path = "charged_particle_test.rs"]
mod charged_particle_test;

use std::collections::BTreeMap;

use crate::params::{ParamValue, Params};
use crate::snapshot::{BodyId, BodyState, ChargedState, SimObject, Snapshot};
use crate::vector::Vector2;

use super::{Draggable, Engine, SimKind, Timeline};

pub const CHARGE: &str = "charge";
pub const MASS: &str = "mass";
pub const MAGNETIC_FIELD: &str = "magneticField";
pub const ELECTRIC_FIELD: &str = "electricField";
pub const VELOCITY: &str = "velocity";

const DEFAULTS: &[(&str, f64)] = &[
    (CHARGE, 1.0),
    (MASS, 1.0),
    (MAGNETIC_FIELD, 0.0),
    (ELECTRIC_FIELD, 0.0),
    (VELOCITY, 10.0),
];

#[derive(Debug, Clone)]
pub struct ChargedParticleEngine {
    params: Params,
    timeline: Timeline,
    position: Vector2,
    velocity: Vector2,
}

impl Default for ChargedParticleEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ChargedParticleEngine {
    #[must_use]
    pub fn new() -> Self {
        let mut engine = Self {
            params: Params::with_defaults(DEFAULTS),
            timeline: Timeline::default(),
            position: Vector2::ZERO,
            velocity: Vector2::ZERO,
        };
        engine.reset();
        engine
    }

    /// Lorentz acceleration. A non-positive mass leaves the particle
    /// unaccelerated rather than producing non-finite state.
    fn acceleration(&self) -> Vector2 {
        let mass = self.params.number(MASS);
        if mass <= 0.0 {
            return Vector2::ZERO;
        }
        let q = self.params.number(CHARGE);
        let b = self.params.number(MAGNETIC_FIELD);
        let e = self.params.number(ELECTRIC_FIELD);
        let force = Vector2::new(q * (e + self.velocity.y * b), q * (-self.velocity.x * b));
        force.scale(1.0 / mass)
    }
}

impl Engine for ChargedParticleEngine {
    fn kind(&self) -> SimKind {
        SimKind::ChargedParticle
    }

    fn update(&mut self, dt: f64) {
        if !self.timeline.should_step(dt) {
            return;
        }
        self.timeline.advance(dt);

        self.velocity += self.acceleration() * dt;
        self.position += self.velocity * dt;
    }

    fn reset(&mut self) {
        self.timeline.rewind();
        self.position = Vector2::ZERO;
        self.velocity = Vector2::new(self.params.number(VELOCITY), 0.0);
    }

    fn start(&mut self) {
        self.timeline.start();
    }

    fn stop(&mut self) {
        self.timeline.stop();
    }

    fn is_running(&self) -> bool {
        self.timeline.is_running()
    }

    fn snapshot(&self) -> Snapshot {
        let mut objects = BTreeMap::new();
        objects.insert(
            BodyId::Particle,
            SimObject::Charged(ChargedState {
                body: BodyState::new(self.position, self.velocity),
                charge: self.params.number(CHARGE),
            }),
        );
        Snapshot {
            elapsed_time: self.timeline.elapsed,
            is_running: self.timeline.is_running(),
            parameters: self.params.clone(),
            objects,
        }
    }

    fn set_parameter(&mut self, key: &str, value: ParamValue) {
        self.params.set(key, value);
        if !self.timeline.is_running() {
            self.reset();
        }
    }

    fn params(&self) -> &Params {
        &self.params
    }

    fn as_draggable(&self) -> Option<&dyn Draggable> {
        Some(self)
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        Some(self)
    }
}

impl Draggable for ChargedParticleEngine {
    fn bodies(&self) -> &'static [BodyId] {
        &[BodyId::Particle]
    }

    /// Position only; the next reset still returns to the origin.
    fn set_object_position(&mut self, id: BodyId, x: f64, y: f64) {
        if id == BodyId::Particle {
            self.position = Vector2::new(x, y);
        }
    }
}

//! Projectile launched from a cannon under uniform gravity.
//!
//! Ground is `y = 0`. The integration step that carries the ball below ground
//! clamps it back to the surface and stops the run.

#[cfg(test)]
#[path = "projectile_test.rs"]
mod projectile_test;

use std::collections::BTreeMap;

use crate::params::{ParamValue, Params};
use crate::snapshot::{BodyId, BodyState, SimObject, Snapshot};
use crate::vector::Vector2;

use super::{Draggable, Engine, SimKind, Timeline};

pub const GRAVITY: &str = "gravity";
pub const VELOCITY: &str = "velocity";
pub const ANGLE: &str = "angle";
pub const HEIGHT: &str = "height";
pub const MASS: &str = "mass";
pub const DRAG: &str = "drag";

const DEFAULTS: &[(&str, f64)] = &[
    (GRAVITY, 9.81),
    (VELOCITY, 15.0),
    (ANGLE, 45.0),
    (HEIGHT, 0.0),
    (MASS, 1.0),
    (DRAG, 0.0),
];

#[derive(Debug, Clone)]
pub struct ProjectileEngine {
    params: Params,
    timeline: Timeline,
    position: Vector2,
    velocity: Vector2,
}

impl Default for ProjectileEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl ProjectileEngine {
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

    /// Gravity plus linear drag `-(drag / mass) * v`. Drag is skipped for a
    /// non-positive mass.
    fn acceleration(&self) -> Vector2 {
        let gravity = Vector2::new(0.0, -self.params.number(GRAVITY));
        let drag = self.params.number(DRAG);
        let mass = self.params.number(MASS);
        if drag == 0.0 || mass <= 0.0 {
            return gravity;
        }
        gravity + self.velocity.scale(-drag / mass)
    }

    fn on_ground(&self) -> bool {
        self.position.y <= 0.0
    }
}

impl Engine for ProjectileEngine {
    fn kind(&self) -> SimKind {
        SimKind::Projectile
    }

    fn update(&mut self, dt: f64) {
        if !self.timeline.should_step(dt) {
            return;
        }
        self.timeline.advance(dt);

        self.velocity += self.acceleration() * dt;
        self.position += self.velocity * dt;

        if self.position.y < 0.0 {
            self.position.y = 0.0;
            self.timeline.stop();
        }
    }

    fn reset(&mut self) {
        self.timeline.rewind();
        self.position = Vector2::new(0.0, self.params.number(HEIGHT));
        self.velocity = Vector2::from_polar_deg(self.params.number(VELOCITY), self.params.number(ANGLE));
    }

    /// A ball lying on the ground after a finished flight relaunches from
    /// its initial condition; otherwise the run resumes where it paused.
    fn start(&mut self) {
        if self.timeline.elapsed > 0.0 && self.on_ground() {
            self.reset();
        }
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
        objects.insert(BodyId::Projectile, SimObject::Body(BodyState::new(self.position, self.velocity)));
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

impl Draggable for ProjectileEngine {
    fn bodies(&self) -> &'static [BodyId] {
        &[BodyId::Projectile]
    }

    /// The ball cannot be placed below ground, and its height becomes the
    /// launch height for the next reset.
    fn set_object_position(&mut self, id: BodyId, x: f64, y: f64) {
        if id != BodyId::Projectile {
            return;
        }
        let y = y.max(0.0);
        self.position = Vector2::new(x, y);
        self.params.set(HEIGHT, ParamValue::Number(y));
    }
}

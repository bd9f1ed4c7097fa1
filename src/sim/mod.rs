//! Simulation engines and the contract the frame loop drives them through.
//!
//! DESIGN
//! ======
//! The three engines share no state and no base type. They meet at the
//! [`Engine`] trait: advance by a delta, reset, snapshot, edit a parameter.
//! Direct repositioning is a separate [`Draggable`] capability that an engine
//! may or may not expose; callers check for it before entering a drag.
//!
//! Every engine keeps exactly one authoritative copy of its kinematic state
//! and derives its [`Snapshot`] from it on demand.

pub mod charged_particle;
pub mod double_slit;
pub mod projectile;


use serde::Serialize;

use crate::error::SimError;
use crate::mapper::Projection;
use crate::params::{ParamValue, Params};
use crate::snapshot::{BodyId, Snapshot};

pub use charged_particle::ChargedParticleEngine;
pub use double_slit::DoubleSlitEngine;
pub use projectile::ProjectileEngine;

// =============================================================================
// CONTRACT
// =============================================================================

/// One physics simulation: private kinematic state plus stepping, reset and
/// parameter logic.
pub trait Engine {
    /// Which simulation this engine implements.
    fn kind(&self) -> SimKind;

    /// Advance by `dt` seconds with forward Euler. No-op while stopped or for
    /// `dt == 0`. The caller is responsible for clamping `dt`.
    fn update(&mut self, dt: f64);

    /// Re-derive initial kinematics from the current parameters, zero the
    /// elapsed time and stop. Idempotent.
    fn reset(&mut self);

    /// Begin (or resume) integration.
    fn start(&mut self);

    /// Pause integration without touching kinematic state.
    fn stop(&mut self);

    fn is_running(&self) -> bool;

    /// Pure projection of the current state.
    fn snapshot(&self) -> Snapshot;

    /// Store a parameter. While stopped the engine resets so the visible
    /// initial condition follows the edit; while running the value is picked
    /// up by the next step.
    fn set_parameter(&mut self, key: &str, value: ParamValue);

    /// Current parameter values.
    fn params(&self) -> &Params;

    /// The drag capability, if this engine has one.
    fn as_draggable(&self) -> Option<&dyn Draggable> {
        None
    }

    fn as_draggable_mut(&mut self) -> Option<&mut dyn Draggable> {
        None
    }
}

/// Optional capability: overwrite a named body's world position.
pub trait Draggable {
    /// Bodies that accept [`Draggable::set_object_position`].
    fn bodies(&self) -> &'static [BodyId];

    /// Move `id` to `(x, y)` in world space. Unknown ids are ignored.
    fn set_object_position(&mut self, id: BodyId, x: f64, y: f64);
}

// =============================================================================
// SHARED RUN STATE
// =============================================================================

/// Run state shared by every engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

/// Elapsed simulated time plus run state.
#[derive(Debug, Clone, Copy, Default)]
pub struct Timeline {
    pub elapsed: f64,
    pub state: RunState,
}

impl Timeline {
    #[must_use]
    pub fn is_running(&self) -> bool {
        self.state == RunState::Running
    }

    /// Whether a step of `dt` should integrate at all.
    #[must_use]
    pub fn should_step(&self, dt: f64) -> bool {
        self.is_running() && dt != 0.0
    }

    pub fn start(&mut self) {
        self.state = RunState::Running;
    }

    pub fn stop(&mut self) {
        self.state = RunState::Stopped;
    }

    pub fn rewind(&mut self) {
        self.elapsed = 0.0;
        self.state = RunState::Stopped;
    }

    pub fn advance(&mut self, dt: f64) {
        self.elapsed += dt;
    }
}

// =============================================================================
// KINDS
// =============================================================================

/// The simulations this crate knows how to build.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SimKind {
    #[default]
    Projectile,
    ChargedParticle,
    DoubleSlit,
}

impl SimKind {
    pub const ALL: [Self; 3] = [Self::Projectile, Self::ChargedParticle, Self::DoubleSlit];

    /// Page slug used by the host router.
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            Self::Projectile => "projectile",
            Self::ChargedParticle => "charged-particle",
            Self::DoubleSlit => "double-slit",
        }
    }

    /// Parse a page slug.
    ///
    /// # Errors
    ///
    /// Returns [`SimError::UnknownKind`] for a slug no simulation answers to.
    pub fn from_slug(slug: &str) -> Result<Self, SimError> {
        Self::ALL
            .into_iter()
            .find(|k| k.slug() == slug)
            .ok_or_else(|| SimError::UnknownKind(slug.to_owned()))
    }

    /// Kind for a page slug. Empty and unrecognised slugs show the default
    /// simulation; an unrecognised one is logged.
    #[must_use]
    pub fn resolve(slug: &str) -> Self {
        if slug.is_empty() {
            return Self::default();
        }
        Self::from_slug(slug).unwrap_or_else(|err| {
            log::warn!("{err}; showing {}", Self::default().slug());
            Self::default()
        })
    }

    /// Display title.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Projectile => "Projectile Motion",
            Self::ChargedParticle => "Charged Particle",
            Self::DoubleSlit => "Double Slit",
        }
    }

    /// World/screen projection used for this simulation's bodies.
    #[must_use]
    pub fn projection(self) -> Projection {
        match self {
            Self::Projectile => Projection::Ground,
            Self::ChargedParticle => Projection::Centered,
            Self::DoubleSlit => Projection::Optical,
        }
    }

    /// Construct a fresh engine with default parameters.
    #[must_use]
    pub fn build(self) -> Box<dyn Engine> {
        match self {
            Self::Projectile => Box::new(ProjectileEngine::new()),
            Self::ChargedParticle => Box::new(ChargedParticleEngine::new()),
            Self::DoubleSlit => Box::new(DoubleSlitEngine::new()),
        }
    }
}

//! Double slit, drawn as expanding wavefronts from two point sources.
//!
//! Nothing is integrated here: only the clock advances, and the renderer
//! derives wavefront radii from it. The sources sit symmetrically about the
//! origin, `slitDistance` apart.

#[cfg(test)]
#[path = "double_slit_test.rs"]
mod double_slit_test;

use std::collections::BTreeMap;

use crate::params::{ParamValue, Params};
use crate::snapshot::{BodyId, SimObject, Snapshot, WaveState};
use crate::vector::Vector2;

use super::{Engine, SimKind, Timeline};

pub const FREQUENCY: &str = "frequency";
pub const SLIT_DISTANCE: &str = "slitDistance";
pub const SLIT_WIDTH: &str = "slitWidth";
pub const INTENSITY: &str = "intensity";

const DEFAULTS: &[(&str, f64)] = &[(FREQUENCY, 5.0), (SLIT_DISTANCE, 2.0), (SLIT_WIDTH, 0.5), (INTENSITY, 1.0)];

#[derive(Debug, Clone)]
pub struct DoubleSlitEngine {
    params: Params,
    timeline: Timeline,
}

impl Default for DoubleSlitEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl DoubleSlitEngine {
    #[must_use]
    pub fn new() -> Self {
        Self { params: Params::with_defaults(DEFAULTS), timeline: Timeline::default() }
    }

    fn sources(&self) -> (Vector2, Vector2) {
        let half = self.params.number(SLIT_DISTANCE) / 2.0;
        (Vector2::new(-half, 0.0), Vector2::new(half, 0.0))
    }
}

impl Engine for DoubleSlitEngine {
    fn kind(&self) -> SimKind {
        SimKind::DoubleSlit
    }

    fn update(&mut self, dt: f64) {
        if self.timeline.should_step(dt) {
            self.timeline.advance(dt);
        }
    }

    fn reset(&mut self) {
        self.timeline.rewind();
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
        let (source1, source2) = self.sources();
        let mut objects = BTreeMap::new();
        objects.insert(
            BodyId::Waves,
            SimObject::Waves(WaveState {
                source1,
                source2,
                frequency: self.params.number(FREQUENCY),
                time: self.timeline.elapsed,
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
}

//! Rolling time series behind the live graph.

#[cfg(test)]
#[path = "plot_test.rs"]
mod plot_test;

use std::collections::VecDeque;

use serde::Serialize;

use crate::consts::{
    GRAPH_AXIS_BOTTOM_PX, GRAPH_AXIS_LEFT_PX, GRAPH_MAX_POINTS, GRAPH_MIN_VALUE_MAX, GRAPH_MIN_WINDOW_S,
    GRAPH_PAD_PX, PLOT_CAPACITY,
};
use crate::mapper::{Point, Viewport};
use crate::snapshot::{BodyId, SimObject, Snapshot};

/// One graph point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Sample {
    pub time: f64,
    pub value: f64,
}

/// Fixed-capacity window of the most recent samples.
#[derive(Debug, Clone)]
pub struct Plot {
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl Default for Plot {
    fn default() -> Self {
        Self::with_capacity(PLOT_CAPACITY)
    }
}

impl Plot {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { samples: VecDeque::with_capacity(capacity), capacity }
    }

    /// The plotted quantity for whichever simulation produced `snapshot`:
    /// body height for projectile and particle, a 5 rad/s sine for waves.
    #[must_use]
    pub fn probe(snapshot: &Snapshot) -> Option<Sample> {
        let value = BodyId::ALL.into_iter().find_map(|id| match snapshot.object(id)? {
            SimObject::Waves(_) => Some((snapshot.elapsed_time * 5.0).sin()),
            obj => Some(obj.position().y),
        })?;
        Some(Sample { time: snapshot.elapsed_time, value })
    }

    /// Append, evicting the oldest sample when full.
    pub fn record(&mut self, sample: Sample) {
        if self.samples.len() == self.capacity {
            self.samples.pop_front();
        }
        self.samples.push_back(sample);
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Samples oldest first.
    pub fn samples(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    /// Samples to stroke: the first one, then every `n`th after it so that
    /// at most [`GRAPH_MAX_POINTS`] remain.
    pub fn decimated(&self) -> impl Iterator<Item = &Sample> {
        let step = self.samples.len().div_ceil(GRAPH_MAX_POINTS).max(1);
        self.samples.iter().take(1).chain(self.samples.iter().skip(1).step_by(step))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }
}

// =============================================================================
// GRAPH SCALE
// =============================================================================

/// Axis ranges for drawing a series. Time runs from zero to `max_time`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GraphScale {
    pub max_time: f64,
    pub min_value: f64,
    pub max_value: f64,
}

impl Default for GraphScale {
    fn default() -> Self {
        Self { max_time: GRAPH_MIN_WINDOW_S, min_value: 0.0, max_value: GRAPH_MIN_VALUE_MAX }
    }
}

impl GraphScale {
    /// Smallest ranges covering `samples` that still include the default
    /// window, so a short or flat series is not stretched across the graph.
    pub fn fit<'a>(samples: impl IntoIterator<Item = &'a Sample>) -> Self {
        samples.into_iter().fold(Self::default(), |scale, s| Self {
            max_time: scale.max_time.max(s.time),
            min_value: scale.min_value.min(s.value),
            max_value: scale.max_value.max(s.value),
        })
    }

    /// Pixel position of `sample` in a graph of `size`, inside the axis
    /// margins.
    #[must_use]
    pub fn to_screen(&self, sample: &Sample, size: Viewport) -> Point {
        let span = self.max_value - self.min_value;
        let plot_width = size.width - GRAPH_AXIS_LEFT_PX - GRAPH_PAD_PX;
        let plot_height = size.height - GRAPH_AXIS_BOTTOM_PX - GRAPH_PAD_PX;
        Point::new(
            GRAPH_AXIS_LEFT_PX + sample.time / self.max_time * plot_width,
            size.height - GRAPH_AXIS_BOTTOM_PX - (sample.value - self.min_value) / span * plot_height,
        )
    }
}

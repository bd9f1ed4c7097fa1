#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::mapper::{Mapper, Point, Viewport};
use crate::snapshot::{BodyId, Snapshot};

/// Result of a hit test.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Hit {
    pub body: BodyId,
    /// Screen-space distance from the pointer to the body center.
    pub distance_px: f64,
}

/// Find the body under `screen_pt`.
///
/// Only `candidates` are considered (an engine without the drag capability
/// passes none). Bodies are tried in [`BodyId::ALL`] priority order and the
/// first one within `radius_px` wins, regardless of which is closest.
#[must_use]
pub fn hit_test(
    screen_pt: Point,
    snapshot: &Snapshot,
    candidates: &[BodyId],
    viewport: Viewport,
    radius_px: f64,
) -> Option<Hit> {
    BodyId::ALL
        .into_iter()
        .filter(|id| candidates.contains(id))
        .find_map(|body| {
            let obj = snapshot.object(body)?;
            let mapper = Mapper::new(body.projection(), viewport);
            let distance_px = mapper.to_screen(obj.position()).distance(screen_pt);
            (distance_px < radius_px).then_some(Hit { body, distance_px })
        })
}

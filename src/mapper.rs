//! World/screen coordinate transforms.
//!
//! Each simulation draws at its own scale and origin, so the transform is
//! chosen per [`Projection`]. All three flip the y axis (screen y grows
//! downward, world y grows upward), and for every projection
//! [`Mapper::to_world`] is the exact inverse of [`Mapper::to_screen`]: a
//! drag-derived world position re-maps to the pointer it came from.

#[cfg(test)]
#[path = "mapper_test.rs"]
mod mapper_test;

use serde::{Deserialize, Serialize};

use crate::consts::{CENTERED_SCALE, GROUND_BASELINE_PX, GROUND_ORIGIN_X_PX, GROUND_SCALE, OPTICAL_SCALE};
use crate::vector::Vector2;

/// A point in screen space (CSS pixels from the canvas's top-left corner).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Canvas size in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    #[must_use]
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.width * 0.5, self.height * 0.5)
    }
}

/// World/screen convention for one kind of scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Projection {
    /// Ground-anchored: world origin sits above the bottom-left corner,
    /// 20 px per meter. Projectile bodies and annotations.
    Ground,
    /// Canvas-centered, 40 px per unit. Charged particle.
    Centered,
    /// Canvas-centered, 100 px per unit. Double-slit sources.
    Optical,
}

/// Bidirectional transform for one projection on one viewport.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Mapper {
    scale: f64,
    /// Screen position of world (0, 0).
    origin: Point,
}

impl Mapper {
    #[must_use]
    pub fn new(projection: Projection, viewport: Viewport) -> Self {
        match projection {
            Projection::Ground => Self {
                scale: GROUND_SCALE,
                origin: Point::new(GROUND_ORIGIN_X_PX, viewport.height - GROUND_BASELINE_PX),
            },
            Projection::Centered => Self { scale: CENTERED_SCALE, origin: viewport.center() },
            Projection::Optical => Self { scale: OPTICAL_SCALE, origin: viewport.center() },
        }
    }

    /// World coordinates to screen pixels.
    #[must_use]
    pub fn to_screen(&self, world: Vector2) -> Point {
        Point {
            x: self.origin.x + world.x * self.scale,
            y: self.origin.y - world.y * self.scale,
        }
    }

    /// Screen pixels to world coordinates.
    #[must_use]
    pub fn to_world(&self, screen: Point) -> Vector2 {
        Vector2 {
            x: (screen.x - self.origin.x) / self.scale,
            y: (self.origin.y - screen.y) / self.scale,
        }
    }

    /// Screen position of world (0, 0).
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }
}

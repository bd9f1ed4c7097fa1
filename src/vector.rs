//! Minimal 2D vector value type for kinematic state.
//!
//! World-space quantities only: positions in meters (or field units),
//! velocities in units per second. Screen-space positions use
//! [`crate::mapper::Point`] so the two spaces cannot be mixed by accident.

#[cfg(test)]
#[path = "vector_test.rs"]
mod vector_test;

use std::ops::{Add, AddAssign, Mul, Sub};

use serde::{Deserialize, Serialize};

/// A 2D vector in world space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Unit vector at `deg` degrees counter-clockwise from +x, scaled by `len`.
    #[must_use]
    pub fn from_polar_deg(len: f64, deg: f64) -> Self {
        let rad = deg.to_radians();
        Self::new(rad.cos() * len, rad.sin() * len)
    }

    #[must_use]
    pub fn scale(self, s: f64) -> Self {
        Self::new(self.x * s, self.y * s)
    }

    #[must_use]
    pub fn magnitude(self) -> f64 {
        self.x.hypot(self.y)
    }

    /// Same direction with length 1, or zero for the zero vector.
    #[must_use]
    pub fn normalize(self) -> Self {
        let m = self.magnitude();
        if m == 0.0 { Self::ZERO } else { self.scale(1.0 / m) }
    }

    #[must_use]
    pub fn distance(self, other: Self) -> f64 {
        (self - other).magnitude()
    }
}

impl Add for Vector2 {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Vector2 {
    fn add_assign(&mut self, rhs: Self) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Vector2 {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Vector2 {
    type Output = Self;

    fn mul(self, rhs: f64) -> Self {
        self.scale(rhs)
    }
}

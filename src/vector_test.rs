#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-10;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

// --- Arithmetic ---

#[test]
fn add_and_sub_are_componentwise() {
    let a = Vector2::new(1.0, 2.0);
    let b = Vector2::new(3.0, -5.0);
    assert_eq!(a + b, Vector2::new(4.0, -3.0));
    assert_eq!(a - b, Vector2::new(-2.0, 7.0));
}

#[test]
fn add_assign_accumulates() {
    let mut a = Vector2::new(1.0, 1.0);
    a += Vector2::new(0.5, -2.0);
    assert_eq!(a, Vector2::new(1.5, -1.0));
}

#[test]
fn scale_and_mul_agree() {
    let a = Vector2::new(2.0, -3.0);
    assert_eq!(a.scale(2.5), a * 2.5);
    assert_eq!(a * 0.0, Vector2::ZERO);
}

// --- Magnitude / normalize / distance ---

#[test]
fn magnitude_of_3_4_is_5() {
    assert_eq!(Vector2::new(3.0, 4.0).magnitude(), 5.0);
}

#[test]
fn normalize_has_unit_length() {
    let n = Vector2::new(-7.0, 24.0).normalize();
    assert!(approx_eq(n.magnitude(), 1.0));
    assert!(n.x < 0.0 && n.y > 0.0);
}

#[test]
fn normalize_zero_is_zero() {
    assert_eq!(Vector2::ZERO.normalize(), Vector2::ZERO);
}

#[test]
fn distance_is_symmetric() {
    let a = Vector2::new(1.0, 1.0);
    let b = Vector2::new(4.0, 5.0);
    assert_eq!(a.distance(b), 5.0);
    assert_eq!(b.distance(a), 5.0);
}

// --- Polar ---

#[test]
fn from_polar_45_degrees_splits_evenly() {
    let v = Vector2::from_polar_deg(15.0, 45.0);
    assert!(approx_eq(v.x, v.y));
    assert!(approx_eq(v.magnitude(), 15.0));
}

#[test]
fn from_polar_90_degrees_points_up() {
    let v = Vector2::from_polar_deg(2.0, 90.0);
    assert!(v.x.abs() < EPSILON);
    assert!(approx_eq(v.y, 2.0));
}

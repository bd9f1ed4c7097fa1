#![allow(clippy::float_cmp)]

use super::*;

const DT: f64 = 1.0 / 60.0;

fn body(engine: &ProjectileEngine) -> (Vector2, Vector2) {
    let snap = engine.snapshot();
    let obj = snap.object(BodyId::Projectile).copied();
    let Some(obj) = obj else {
        panic!("projectile missing from snapshot");
    };
    (obj.position(), obj.velocity())
}

/// Step until the run stops on its own, with an iteration guard.
fn fly(engine: &mut ProjectileEngine, dt: f64) {
    for _ in 0..1_000_000 {
        if !engine.is_running() {
            return;
        }
        engine.update(dt);
    }
    panic!("projectile never landed");
}

fn launch_time(v: f64, angle_deg: f64, g: f64) -> f64 {
    2.0 * v * angle_deg.to_radians().sin() / g
}

// =============================================================
// Construction
// =============================================================

#[test]
fn new_uses_documented_defaults() {
    let engine = ProjectileEngine::new();
    let p = engine.params();
    assert_eq!(p.number(GRAVITY), 9.81);
    assert_eq!(p.number(VELOCITY), 15.0);
    assert_eq!(p.number(ANGLE), 45.0);
    assert_eq!(p.number(HEIGHT), 0.0);
    assert_eq!(p.number(MASS), 1.0);
    assert_eq!(p.number(DRAG), 0.0);
}

#[test]
fn new_starts_stopped_at_launch_point() {
    let engine = ProjectileEngine::new();
    let snap = engine.snapshot();
    assert!(!snap.is_running);
    assert_eq!(snap.elapsed_time, 0.0);
    let (pos, vel) = body(&engine);
    assert_eq!(pos, Vector2::ZERO);
    let expected = 15.0 * 45f64.to_radians().cos();
    assert!((vel.x - expected).abs() < 1e-12);
    assert!((vel.y - expected).abs() < 1e-12);
}

#[test]
fn kind_is_projectile() {
    assert_eq!(ProjectileEngine::new().kind(), SimKind::Projectile);
}

// =============================================================
// Integration
// =============================================================

#[test]
fn update_while_stopped_is_noop() {
    let mut engine = ProjectileEngine::new();
    let before = engine.snapshot();
    engine.update(DT);
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn update_with_zero_dt_is_noop() {
    let mut engine = ProjectileEngine::new();
    engine.start();
    let before = engine.snapshot();
    engine.update(0.0);
    assert_eq!(engine.snapshot(), before);
}

#[test]
fn update_accumulates_elapsed_time() {
    let mut engine = ProjectileEngine::new();
    engine.start();
    for _ in 0..10 {
        engine.update(0.01);
    }
    assert!((engine.snapshot().elapsed_time - 0.1).abs() < 1e-12);
}

#[test]
fn horizontal_velocity_is_constant_through_flight() {
    let mut engine = ProjectileEngine::new();
    let vx0 = body(&engine).1.x;
    engine.start();
    while engine.is_running() {
        engine.update(DT);
        let (_, vel) = body(&engine);
        assert!((vel.x - vx0).abs() < 1e-9);
    }
}

#[test]
fn trajectory_height_matches_parabola_mid_flight() {
    let mut engine = ProjectileEngine::new();
    engine.start();
    let dt = 0.0005;
    for _ in 0..1000 {
        engine.update(dt);
    }
    let t = engine.snapshot().elapsed_time;
    let vy0 = 15.0 * 45f64.to_radians().sin();
    let analytic = vy0 * t - 0.5 * 9.81 * t * t;
    let (pos, _) = body(&engine);
    assert!((pos.y - analytic).abs() < 0.01, "y={} analytic={analytic}", pos.y);
}

#[test]
fn time_to_ground_error_is_bounded_by_step() {
    let expected = launch_time(15.0, 45.0, 9.81);
    for dt in [0.01, 0.001] {
        let mut engine = ProjectileEngine::new();
        engine.start();
        fly(&mut engine, dt);
        let err = (engine.snapshot().elapsed_time - expected).abs();
        assert!(err <= dt + 1e-9, "dt={dt} err={err}");
    }
}

#[test]
fn end_to_end_lands_after_about_2_16_seconds() {
    let mut engine = ProjectileEngine::new();
    engine.set_parameter(GRAVITY, 9.81.into());
    engine.set_parameter(VELOCITY, 15.0.into());
    engine.set_parameter(ANGLE, 45.0.into());
    engine.set_parameter(HEIGHT, 0.0.into());
    engine.start();
    fly(&mut engine, DT);

    let snap = engine.snapshot();
    assert!((snap.elapsed_time - 2.16).abs() < 0.02, "elapsed {}", snap.elapsed_time);
    assert!(!snap.is_running);
    assert_eq!(body(&engine).0.y, 0.0);
}

#[test]
fn drag_slows_horizontal_motion() {
    let mut engine = ProjectileEngine::new();
    engine.set_parameter(DRAG, 0.5.into());
    let vx0 = body(&engine).1.x;
    engine.start();
    for _ in 0..30 {
        engine.update(DT);
    }
    assert!(body(&engine).1.x < vx0);
}

// =============================================================
// Ground clamp
// =============================================================

#[test]
fn landing_clamps_to_ground_and_stops() {
    let mut engine = ProjectileEngine::new();
    engine.start();
    fly(&mut engine, DT);
    let snap = engine.snapshot();
    assert!(!snap.is_running);
    assert_eq!(body(&engine).0.y, 0.0);
}

#[test]
fn updates_after_landing_are_noops() {
    let mut engine = ProjectileEngine::new();
    engine.start();
    fly(&mut engine, DT);
    let landed = engine.snapshot();
    for _ in 0..10 {
        engine.update(DT);
    }
    assert_eq!(engine.snapshot(), landed);
}

#[test]
fn flat_launch_from_ground_lands_on_first_step() {
    let mut engine = ProjectileEngine::new();
    engine.set_parameter(ANGLE, 0.0.into());
    engine.start();
    engine.update(DT);
    assert!(!engine.is_running());
    assert_eq!(body(&engine).0.y, 0.0);
}

// =============================================================
// Start / stop / reset
// =============================================================

#[test]
fn start_after_landing_relaunches() {
    let mut engine = ProjectileEngine::new();
    engine.start();
    fly(&mut engine, DT);
    engine.start();
    let snap = engine.snapshot();
    assert!(snap.is_running);
    assert_eq!(snap.elapsed_time, 0.0);
    assert_eq!(body(&engine).0, Vector2::ZERO);
}

#[test]
fn start_after_pause_resumes_in_place() {
    let mut engine = ProjectileEngine::new();
    engine.start();
    for _ in 0..20 {
        engine.update(DT);
    }
    engine.stop();
    let (paused_at, _) = body(&engine);
    let elapsed = engine.snapshot().elapsed_time;
    engine.start();
    assert_eq!(body(&engine).0, paused_at);
    assert_eq!(engine.snapshot().elapsed_time, elapsed);
}

#[test]
fn reset_is_idempotent() {
    let mut engine = ProjectileEngine::new();
    engine.start();
    engine.update(DT);
    engine.reset();
    let once = engine.snapshot();
    engine.reset();
    assert_eq!(engine.snapshot(), once);
    assert!(!once.is_running);
    assert_eq!(once.elapsed_time, 0.0);
}

// =============================================================
// Parameters
// =============================================================

#[test]
fn edit_while_stopped_matches_explicit_reset() {
    let mut edited = ProjectileEngine::new();
    edited.start();
    edited.update(DT);
    edited.stop();
    edited.set_parameter(ANGLE, 30.0.into());
    edited.set_parameter(HEIGHT, 5.0.into());

    let mut explicit = ProjectileEngine::new();
    explicit.params.set(ANGLE, 30.0.into());
    explicit.params.set(HEIGHT, 5.0.into());
    explicit.reset();

    assert_eq!(edited.snapshot(), explicit.snapshot());
    assert_eq!(body(&edited).0, Vector2::new(0.0, 5.0));
}

#[test]
fn edit_while_running_keeps_position_and_time() {
    let mut engine = ProjectileEngine::new();
    engine.start();
    for _ in 0..5 {
        engine.update(DT);
    }
    let before = engine.snapshot();
    engine.set_parameter(GRAVITY, 1.62.into());
    let after = engine.snapshot();
    assert!(after.is_running);
    assert_eq!(after.elapsed_time, before.elapsed_time);
    assert_eq!(after.objects, before.objects);
    assert_eq!(after.parameters.number(GRAVITY), 1.62);
}

#[test]
fn live_gravity_edit_applies_next_step() {
    let mut engine = ProjectileEngine::new();
    engine.start();
    engine.set_parameter(GRAVITY, 0.0.into());
    let vy0 = body(&engine).1.y;
    engine.update(DT);
    assert_eq!(body(&engine).1.y, vy0);
}

#[test]
fn unknown_key_is_stored_and_ignored() {
    let mut engine = ProjectileEngine::new();
    let before = body(&engine);
    engine.set_parameter("spin", 3.0.into());
    assert_eq!(engine.params().number("spin"), 3.0);
    assert_eq!(body(&engine), before);
}

// =============================================================
// Drag capability
// =============================================================

#[test]
fn exposes_drag_capability_for_projectile_only() {
    let engine = ProjectileEngine::new();
    let Some(drag) = engine.as_draggable() else {
        panic!("projectile should be draggable");
    };
    assert_eq!(drag.bodies(), &[BodyId::Projectile]);
}

#[test]
fn drag_moves_ball_and_persists_height() {
    let mut engine = ProjectileEngine::new();
    engine.set_object_position(BodyId::Projectile, 3.0, 4.0);
    assert_eq!(body(&engine).0, Vector2::new(3.0, 4.0));
    assert_eq!(engine.params().number(HEIGHT), 4.0);

    engine.reset();
    assert_eq!(body(&engine).0, Vector2::new(0.0, 4.0));
}

#[test]
fn drag_below_ground_clamps_to_zero() {
    let mut engine = ProjectileEngine::new();
    engine.set_object_position(BodyId::Projectile, 2.0, -3.0);
    assert_eq!(body(&engine).0, Vector2::new(2.0, 0.0));
    assert_eq!(engine.params().number(HEIGHT), 0.0);
}

#[test]
fn drag_of_foreign_body_is_ignored() {
    let mut engine = ProjectileEngine::new();
    let before = engine.snapshot();
    engine.set_object_position(BodyId::Particle, 9.0, 9.0);
    assert_eq!(engine.snapshot(), before);
}

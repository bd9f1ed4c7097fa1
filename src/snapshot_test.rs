#![allow(clippy::float_cmp)]

use serde_json::json;

use super::*;

fn body(x: f64, y: f64) -> SimObject {
    SimObject::Body(BodyState { x, y, vx: 1.0, vy: -2.0 })
}

fn snapshot_with(id: BodyId, obj: SimObject) -> Snapshot {
    let mut objects = BTreeMap::new();
    objects.insert(id, obj);
    Snapshot {
        elapsed_time: 1.5,
        is_running: true,
        parameters: Params::with_defaults(&[("gravity", 9.81)]),
        objects,
    }
}

// =============================================================
// BodyId
// =============================================================

#[test]
fn body_id_names_match_wire_keys() {
    let names = BodyId::ALL.map(BodyId::as_str);
    assert_eq!(names, ["projectile", "particle", "waves"]);
}

#[test]
fn body_id_priority_is_declaration_order() {
    assert!(BodyId::Projectile < BodyId::Particle);
    assert!(BodyId::Particle < BodyId::Waves);
}

// =============================================================
// SimObject
// =============================================================

#[test]
fn body_position_and_velocity() {
    let obj = body(3.0, 4.0);
    assert_eq!(obj.position(), Vector2::new(3.0, 4.0));
    assert_eq!(obj.velocity(), Vector2::new(1.0, -2.0));
}

#[test]
fn waves_position_is_source_midpoint() {
    let obj = SimObject::Waves(WaveState {
        source1: Vector2::new(-1.0, 0.0),
        source2: Vector2::new(1.0, 0.0),
        frequency: 5.0,
        time: 0.0,
    });
    assert_eq!(obj.position(), Vector2::ZERO);
    assert_eq!(obj.velocity(), Vector2::ZERO);
}

// =============================================================
// Serialization
// =============================================================

#[test]
fn snapshot_serializes_in_camel_case() {
    let snap = snapshot_with(BodyId::Projectile, body(2.0, 0.5));
    let value = serde_json::to_value(&snap).unwrap();
    assert_eq!(value["elapsedTime"], 1.5);
    assert_eq!(value["isRunning"], true);
    assert_eq!(value["parameters"]["gravity"], 9.81);
    assert_eq!(value["objects"]["projectile"], json!({ "x": 2.0, "y": 0.5, "vx": 1.0, "vy": -2.0 }));
}

#[test]
fn charged_state_flattens_body_fields() {
    let obj = SimObject::Charged(ChargedState {
        body: BodyState { x: 0.0, y: 1.0, vx: 10.0, vy: 0.0 },
        charge: -1.0,
    });
    let value = serde_json::to_value(snapshot_with(BodyId::Particle, obj)).unwrap();
    assert_eq!(
        value["objects"]["particle"],
        json!({ "x": 0.0, "y": 1.0, "vx": 10.0, "vy": 0.0, "charge": -1.0 })
    );
}

#[test]
fn waves_serialize_sources_as_points() {
    let obj = SimObject::Waves(WaveState {
        source1: Vector2::new(-1.0, 0.0),
        source2: Vector2::new(1.0, 0.0),
        frequency: 5.0,
        time: 0.25,
    });
    let value = serde_json::to_value(snapshot_with(BodyId::Waves, obj)).unwrap();
    assert_eq!(value["objects"]["waves"]["source1"], json!({ "x": -1.0, "y": 0.0 }));
    assert_eq!(value["objects"]["waves"]["time"], 0.25);
}

#[test]
fn object_lookup_by_id() {
    let snap = snapshot_with(BodyId::Particle, body(0.0, 0.0));
    assert!(snap.object(BodyId::Particle).is_some());
    assert!(snap.object(BodyId::Projectile).is_none());
}

#[test]
fn body_projection_matches_its_simulation() {
    assert_eq!(BodyId::Projectile.projection(), Projection::Ground);
    assert_eq!(BodyId::Particle.projection(), Projection::Centered);
    assert_eq!(BodyId::Waves.projection(), Projection::Optical);
}

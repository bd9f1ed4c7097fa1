#![allow(clippy::float_cmp)]

use super::*;

#[test]
fn empty_object_is_default() {
    assert_eq!(SurfaceConfig::from_json("{}").unwrap(), SurfaceConfig::default());
}

#[test]
fn defaults_match_demo_canvas() {
    let c = SurfaceConfig::default();
    assert_eq!(c.width, 800.0);
    assert_eq!(c.height, 600.0);
    assert_eq!(c.dt_ceiling_s, 0.1);
    assert_eq!(c.hit_radius_px, 20.0);
    assert_eq!(c.plot_interval_ms, 50);
    assert_eq!(c.tutor_latency_ms, 800);
}

#[test]
fn reads_camel_case_fields() {
    let c = SurfaceConfig::from_json(r#"{ "width": 1024, "dtCeilingS": 0.05, "hitRadiusPx": 12, "tutorLatencyMs": 0 }"#)
        .unwrap();
    assert_eq!(c.width, 1024.0);
    assert_eq!(c.height, 600.0);
    assert_eq!(c.dt_ceiling_s, 0.05);
    assert_eq!(c.hit_radius_px, 12.0);
    assert_eq!(c.tutor_latency_ms, 0);
}

#[test]
fn out_of_range_values_are_normalized() {
    let c = SurfaceConfig::from_json(r#"{ "width": 0, "height": -5, "dtCeilingS": 3, "hitRadiusPx": -1, "plotIntervalMs": 0 }"#)
        .unwrap();
    assert_eq!(c.width, 1.0);
    assert_eq!(c.height, 1.0);
    assert_eq!(c.dt_ceiling_s, 1.0);
    assert_eq!(c.hit_radius_px, 0.0);
    assert_eq!(c.plot_interval_ms, 1);
}

#[test]
fn non_positive_ceiling_falls_back() {
    let c = SurfaceConfig::from_json(r#"{ "dtCeilingS": 0 }"#).unwrap();
    assert_eq!(c.dt_ceiling_s, 0.1);
}

#[test]
fn malformed_json_is_config_error() {
    let err = SurfaceConfig::from_json("{ width: ").unwrap_err();
    assert!(matches!(err, SimError::ConfigParse(_)));
    assert_eq!(err.error_code(), "E_CONFIG_PARSE");
}

#[test]
fn wrong_field_type_is_config_error() {
    assert!(matches!(SurfaceConfig::from_json(r#"{ "width": "wide" }"#), Err(SimError::ConfigParse(_))));
}

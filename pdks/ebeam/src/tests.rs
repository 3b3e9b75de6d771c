use std::sync::Arc;

use approx::assert_abs_diff_eq;
use geometry::orientation::Rotation;
use geometry::point::Point;

use crate::components::{Mzi, Spiral, Waveguide};
use crate::error::Error;
use crate::registry::registry;
use crate::{Component, Ebeam};

/// Structural equivalence: same name, settings, ports, and recursively the
/// same placed children. Object identity is not required.
fn equivalent(a: &Component, b: &Component) -> bool {
    if a.name() != b.name()
        || a.settings() != b.settings()
        || a.elements().count() != b.elements().count()
    {
        return false;
    }
    let ports_a: Vec<_> = a.ports().collect();
    let ports_b: Vec<_> = b.ports().collect();
    if ports_a != ports_b {
        return false;
    }
    let insts_a: Vec<_> = a.instances().collect();
    let insts_b: Vec<_> = b.instances().collect();
    if insts_a.len() != insts_b.len() {
        return false;
    }
    insts_a.iter().zip(insts_b.iter()).all(|(x, y)| {
        x.name() == y.name()
            && x.transformation() == y.transformation()
            && equivalent(x.cell(), y.cell())
    })
}

#[test]
fn every_registered_factory_builds_with_defaults() {
    let pdk = Ebeam::new();
    assert!(!registry().is_empty());
    for name in registry().names() {
        let component = pdk
            .component(name)
            .unwrap_or_else(|e| panic!("factory `{}` failed: {}", name, e));
        assert!(!component.name().is_empty());
    }
}

#[test]
fn registry_rejects_unknown_component_types() {
    let pdk = Ebeam::new();
    match registry().get_factory("does_not_exist") {
        Err(Error::UnknownComponentType(name)) => assert_eq!(name, "does_not_exist"),
        other => panic!("expected UnknownComponentType, got {:?}", other.map(|_| ())),
    }
    assert!(matches!(
        pdk.component("also_missing"),
        Err(Error::UnknownComponentType(_))
    ));
}

#[test]
fn mzi_arm_length_difference_equals_delta_length() {
    let pdk = Ebeam::new();
    let mzi = pdk
        .mzi(Mzi {
            delta_length: 100_000,
            ..Default::default()
        })
        .unwrap();
    let top = mzi.settings().float("length_top").unwrap();
    let bot = mzi.settings().float("length_bot").unwrap();
    assert_abs_diff_eq!(top - bot, 100.0, epsilon = 1e-6);
    assert_eq!(mzi.settings().float("delta_length"), Some(100.0));
}

#[test]
fn mzi_ports_sit_on_the_axis() {
    let pdk = Ebeam::new();
    let mzi = pdk.mzi(Mzi::default()).unwrap();
    let w0 = mzi.port("W0");
    let e0 = mzi.port("E0");
    assert_eq!(w0.center, Point::zero());
    assert_eq!(w0.orientation, Rotation::R180);
    assert_eq!(e0.center.y, 0);
    assert_eq!(e0.orientation, Rotation::R0);
}

#[test]
fn mzi_rejects_bad_delta_length() {
    let pdk = Ebeam::new();
    for delta in [-2, 101] {
        let result = pdk.mzi(Mzi {
            delta_length: delta,
            ..Default::default()
        });
        assert!(matches!(result, Err(Error::InvalidParameter { .. })));
    }
}

#[test]
fn mzi_te_equals_decorating_a_prebuilt_mzi() {
    let pdk = Ebeam::new();
    let params = Mzi {
        delta_length: 40_000,
        ..Default::default()
    };
    let via_factory = pdk.mzi_te(params).unwrap();
    let prebuilt = pdk.mzi(params).unwrap();
    let via_decoration = pdk.add_gc(&prebuilt, None).unwrap();
    assert!(equivalent(&via_factory, &via_decoration));
}

#[test]
fn mzi_te_carries_the_measurement_label() {
    let pdk = Ebeam::new();
    let te = pdk.mzi_te(Mzi::default()).unwrap();
    let labels: Vec<_> = te
        .elements()
        .filter_map(|e| match e {
            photir::Element::Text(t) => Some(t.text().to_string()),
            _ => None,
        })
        .collect();
    assert!(labels
        .iter()
        .any(|l| l.starts_with("opt_in_TE_1550_device_mzi_dl")));
}

#[test]
fn spiral_te_name_embeds_truncated_total_length() {
    let pdk = Ebeam::new();
    let params = Spiral {
        n: 15,
        bend_radius: 20_000,
        x_inner_length_cutback: 0,
        y_straight_inner_top: 0,
        x_inner_offset: 100_000,
        ..Default::default()
    };
    let spiral = pdk.spiral(params).unwrap();
    let total = spiral.settings().float("total_length").unwrap();
    assert!(total > 0.);
    let te = pdk.spiral_te(params).unwrap();
    assert!(te.name().starts_with("spiral_te_"));
    assert!(te.name().contains(&format!("{}", total as i64)));
}

#[test]
fn identical_parameters_share_one_cached_cell() {
    let pdk = Ebeam::new();
    let a = pdk.waveguide(Waveguide::default()).unwrap();
    let b = pdk.waveguide(Waveguide::default()).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    let c = pdk
        .waveguide(Waveguide {
            length: 20_000,
            ..Default::default()
        })
        .unwrap();
    assert!(!Arc::ptr_eq(&a, &c));
}

#[test]
fn builds_are_deterministic_across_pdk_instances() {
    let first = Ebeam::new().mzi_te(Mzi::default()).unwrap();
    let second = Ebeam::new().mzi_te(Mzi::default()).unwrap();
    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(first.settings(), second.settings());
    assert!(equivalent(&first, &second));
}

#[test]
fn write_gds_smoke() {
    let pdk = Ebeam::new();
    let te = pdk.mzi_te(Mzi::default()).unwrap();
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("mzi_te.gds");
    pdk.write_gds(&te, &path).unwrap();
    let len = std::fs::metadata(&path).unwrap().len();
    assert!(len > 0);
}

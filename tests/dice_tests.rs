//! Tests for die geometry and face readout through the public API

use bevy_math::{Quat, Vec3};
use dicetray::tray::{build_polyhedron, resolve_value, DieKind, Pose};
use rand::rngs::StdRng;
use rand::SeedableRng;

#[test]
fn test_die_kind_max_values() {
    assert_eq!(DieKind::D4.max_value(), 4);
    assert_eq!(DieKind::D6.max_value(), 6);
    assert_eq!(DieKind::D8.max_value(), 8);
    assert_eq!(DieKind::D10.max_value(), 10);
    assert_eq!(DieKind::D12.max_value(), 12);
    assert_eq!(DieKind::D20.max_value(), 20);
    assert_eq!(DieKind::D100.max_value(), 100);
}

#[test]
fn test_die_kind_names_round_trip() {
    for kind in DieKind::ALL {
        assert_eq!(DieKind::parse(kind.name()), Some(kind));
        assert_eq!(kind.name().to_uppercase().parse::<DieKind>().unwrap(), kind);
    }
    assert_eq!(DieKind::parse("d3"), None);
    assert_eq!(DieKind::parse("invalid"), None);
}

#[test]
fn test_face_counts_per_kind() {
    let expected = [
        (DieKind::D4, 4),
        (DieKind::D6, 6),
        (DieKind::D8, 8),
        (DieKind::D10, 10),
        (DieKind::D12, 12),
        (DieKind::D20, 20),
    ];
    for (kind, faces) in expected {
        assert_eq!(build_polyhedron(kind).faces.len(), faces, "{}", kind);
    }
}

#[test]
fn test_every_face_reads_back_when_turned_up() {
    let mut rng = StdRng::seed_from_u64(1);
    for kind in DieKind::ALL {
        if matches!(kind, DieKind::D4 | DieKind::D100) {
            continue;
        }
        let poly = build_polyhedron(kind);
        for face in &poly.faces {
            let pose = Pose::new(
                Vec3::new(3.0, 2.0, -1.0),
                Quat::from_rotation_arc(face.normal, Vec3::Y),
            );
            assert_eq!(resolve_value(&poly, &pose, &mut rng), face.value, "{}", kind);
        }
    }
}

#[test]
fn test_d4_reads_the_vertex_pointing_up() {
    let poly = build_polyhedron(DieKind::D4);
    let values = poly.vertex_values.clone().unwrap();
    let mut rng = StdRng::seed_from_u64(2);
    for (vertex, value) in poly.mesh.positions.iter().zip(values) {
        let pose = Pose::new(Vec3::ZERO, Quat::from_rotation_arc(vertex.normalize(), Vec3::Y));
        assert_eq!(resolve_value(&poly, &pose, &mut rng), value);
    }
}

#[test]
fn test_d4_resting_on_a_face_shows_the_opposite_vertex() {
    let poly = build_polyhedron(DieKind::D4);
    let mut rng = StdRng::seed_from_u64(3);
    for face in &poly.faces {
        // Face down on the table
        let pose = Pose::new(Vec3::ZERO, Quat::from_rotation_arc(face.normal, Vec3::NEG_Y));
        assert_eq!(resolve_value(&poly, &pose, &mut rng), face.value);
    }
}

#[test]
fn test_d100_draws_from_one_to_hundred() {
    let poly = build_polyhedron(DieKind::D100);
    let mut rng = StdRng::seed_from_u64(4);
    let values: Vec<u32> = (0..500)
        .map(|_| resolve_value(&poly, &Pose::default(), &mut rng))
        .collect();
    assert!(values.iter().all(|v| (1..=100).contains(v)));
    // The readout ignores orientation, so repeated reads differ
    assert!(values.windows(2).any(|w| w[0] != w[1]));
}

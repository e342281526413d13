use bevy_math::Vec3;

use super::{grouped_polyhedron, orient_outward, GROUPING_TOLERANCE};
use crate::tray::types::{DieKind, Polyhedron, TriangleMesh};

/// Unit-circumradius icosahedron vertices.
pub(crate) fn icosahedron_vertices() -> Vec<Vec3> {
    let phi = (1.0 + 5.0_f32.sqrt()) / 2.0;
    [
        Vec3::new(0.0, 1.0, phi),
        Vec3::new(0.0, -1.0, phi),
        Vec3::new(0.0, 1.0, -phi),
        Vec3::new(0.0, -1.0, -phi),
        Vec3::new(1.0, phi, 0.0),
        Vec3::new(-1.0, phi, 0.0),
        Vec3::new(1.0, -phi, 0.0),
        Vec3::new(-1.0, -phi, 0.0),
        Vec3::new(phi, 0.0, 1.0),
        Vec3::new(-phi, 0.0, 1.0),
        Vec3::new(phi, 0.0, -1.0),
        Vec3::new(-phi, 0.0, -1.0),
    ]
    .iter()
    .map(|v| v.normalize())
    .collect()
}

pub(crate) const ICOSAHEDRON_FACES: [[u32; 3]; 20] = [
    [0, 1, 8],
    [0, 8, 4],
    [0, 4, 5],
    [0, 5, 9],
    [0, 9, 1],
    [1, 6, 8],
    [8, 6, 10],
    [8, 10, 4],
    [4, 10, 2],
    [4, 2, 5],
    [5, 2, 11],
    [5, 11, 9],
    [9, 11, 7],
    [9, 7, 1],
    [1, 7, 6],
    [3, 6, 7],
    [3, 10, 6],
    [3, 2, 10],
    [3, 11, 2],
    [3, 7, 11],
];

pub fn create_d20() -> Polyhedron {
    let radius = 3.4;
    let positions: Vec<Vec3> = icosahedron_vertices()
        .into_iter()
        .map(|v| v * radius)
        .collect();

    let indices = orient_outward(&positions, &ICOSAHEDRON_FACES);
    grouped_polyhedron(
        DieKind::D20,
        TriangleMesh::new(positions, indices),
        GROUPING_TOLERANCE,
    )
}

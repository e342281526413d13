use bevy_math::Vec3;

use super::{grouped_polyhedron, orient_outward, GROUPING_TOLERANCE};
use crate::tray::types::{DieKind, Polyhedron, TriangleMesh};

/// Regular octahedron with its vertices on the axes.
pub fn create_d8() -> Polyhedron {
    let radius = 3.0;
    let positions: Vec<Vec3> = [
        Vec3::X,
        Vec3::NEG_X,
        Vec3::Y,
        Vec3::NEG_Y,
        Vec3::Z,
        Vec3::NEG_Z,
    ]
    .iter()
    .map(|v| *v * radius)
    .collect();

    // One triangle per octant
    let mut triangles = Vec::with_capacity(8);
    for x in [0u32, 1] {
        for y in [2u32, 3] {
            for z in [4u32, 5] {
                triangles.push([x, y, z]);
            }
        }
    }

    let indices = orient_outward(&positions, &triangles);
    grouped_polyhedron(
        DieKind::D8,
        TriangleMesh::new(positions, indices),
        GROUPING_TOLERANCE,
    )
}

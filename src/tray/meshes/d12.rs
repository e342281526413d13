use bevy_math::Vec3;

use super::d20::{icosahedron_vertices, ICOSAHEDRON_FACES};
use super::{grouped_polyhedron, orient_outward, GROUPING_TOLERANCE};
use crate::tray::types::{DieKind, Polyhedron, TriangleMesh};

/// Regular dodecahedron built as the dual of the icosahedron.
///
/// Each icosahedron face centre becomes a dodecahedron vertex, and the five
/// faces around each icosahedron vertex form one pentagon, fanned into three
/// triangles.
pub fn create_d12() -> Polyhedron {
    let radius = 3.2;
    let ico = icosahedron_vertices();

    let positions: Vec<Vec3> = ICOSAHEDRON_FACES
        .iter()
        .map(|[a, b, c]| {
            let centroid = ico[*a as usize] + ico[*b as usize] + ico[*c as usize];
            centroid.normalize() * radius
        })
        .collect();

    let mut triangles = Vec::with_capacity(36);
    for (vertex, axis) in ico.iter().enumerate() {
        let mut ring: Vec<u32> = ICOSAHEDRON_FACES
            .iter()
            .enumerate()
            .filter(|(_, face)| face.contains(&(vertex as u32)))
            .map(|(i, _)| i as u32)
            .collect();

        // Sort the pentagon corners by angle around the axis
        let reference = axis.any_orthonormal_vector();
        let binormal = axis.cross(reference);
        ring.sort_by(|&p, &q| {
            let angle = |i: u32| {
                let d = positions[i as usize];
                d.dot(binormal).atan2(d.dot(reference))
            };
            angle(p).total_cmp(&angle(q))
        });

        for k in 1..ring.len() - 1 {
            triangles.push([ring[0], ring[k], ring[k + 1]]);
        }
    }

    let indices = orient_outward(&positions, &triangles);
    grouped_polyhedron(
        DieKind::D12,
        TriangleMesh::new(positions, indices),
        GROUPING_TOLERANCE,
    )
}

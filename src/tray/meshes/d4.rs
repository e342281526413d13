use bevy_math::Vec3;

use super::{group_center, orient_outward};
use crate::tray::types::{DieKind, FaceDescriptor, Polyhedron, TriangleMesh};

/// Labels of the four vertices, in construction order.
pub const D4_VERTEX_VALUES: [u32; 4] = [1, 2, 3, 4];

/// Tetrahedron read by its top vertex.
///
/// A resting d4 has one face on the table and one vertex pointing up, so each
/// vertex carries a value and each face is labelled with the vertex opposite
/// it (the number shown when that face is down).
pub fn create_d4() -> Polyhedron {
    let radius = 2.2;
    let positions: Vec<Vec3> = [
        Vec3::new(1.0, 1.0, 1.0),
        Vec3::new(-1.0, -1.0, 1.0),
        Vec3::new(-1.0, 1.0, -1.0),
        Vec3::new(1.0, -1.0, -1.0),
    ]
    .iter()
    .map(|v| v.normalize() * radius)
    .collect();

    let triangles: [[u32; 3]; 4] = [[2, 1, 0], [0, 3, 2], [1, 3, 0], [2, 3, 1]];
    let indices = orient_outward(&positions, &triangles);
    let mesh = TriangleMesh::new(positions, indices);

    let faces = triangles
        .iter()
        .enumerate()
        .map(|(face_index, tri)| {
            let opposite = (0..4u32)
                .find(|v| !tri.contains(v))
                .unwrap_or(0);
            FaceDescriptor {
                face_index,
                value: D4_VERTEX_VALUES[opposite as usize],
                normal: mesh.triangle_normal(face_index),
                center: group_center(&mesh, &[face_index]),
            }
        })
        .collect();

    Polyhedron {
        kind: DieKind::D4,
        mesh,
        faces,
        triangle_faces: vec![0, 1, 2, 3],
        vertex_values: Some(D4_VERTEX_VALUES.to_vec()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_d4_vertex_values_are_one_to_four() {
        let poly = create_d4();
        let mut values = poly.vertex_values.clone().unwrap();
        assert_eq!(values.len(), poly.mesh.positions.len());
        values.sort_unstable();
        assert_eq!(values, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_d4_face_points_away_from_its_labelled_vertex() {
        let poly = create_d4();
        let vertex_values = poly.vertex_values.as_ref().unwrap();
        for face in &poly.faces {
            let vertex = vertex_values
                .iter()
                .position(|&v| v == face.value)
                .unwrap();
            let apex = poly.mesh.positions[vertex];
            // The labelled vertex is the one the face turns its back on.
            assert!(face.normal.dot(apex) < 0.0);
        }
    }

    #[test]
    fn test_d4_has_four_single_triangle_faces() {
        let poly = create_d4();
        assert_eq!(poly.mesh.triangle_count(), 4);
        assert_eq!(poly.faces.len(), 4);
        assert!((poly.radius() - 2.2).abs() < 1e-4);
    }
}

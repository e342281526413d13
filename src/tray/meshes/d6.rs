use bevy_math::Vec3;

use super::{group_center, orient_outward};
use crate::tray::types::{DieKind, FaceDescriptor, Polyhedron, TriangleMesh};

/// Face directions in traversal order with their labels; opposite faces sum to 7.
pub const D6_FACES: [(Vec3, u32); 6] = [
    (Vec3::X, 3),
    (Vec3::NEG_X, 4),
    (Vec3::Y, 1),
    (Vec3::NEG_Y, 6),
    (Vec3::Z, 2),
    (Vec3::NEG_Z, 5),
];

pub fn create_d6() -> Polyhedron {
    let half = 2.0;

    let mut positions = Vec::with_capacity(24);
    let mut triangles = Vec::with_capacity(12);
    let mut triangle_faces = Vec::with_capacity(12);

    for (face_index, (normal, _)) in D6_FACES.iter().enumerate() {
        // Two axes spanning the face
        let u = if normal.x != 0.0 { Vec3::Y } else { Vec3::X };
        let v = normal.cross(u);
        let base = positions.len() as u32;
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            positions.push((*normal + u * su + v * sv) * half);
        }
        triangles.push([base, base + 1, base + 2]);
        triangles.push([base, base + 2, base + 3]);
        triangle_faces.extend([face_index, face_index]);
    }

    let indices = orient_outward(&positions, &triangles);
    let mesh = TriangleMesh::new(positions, indices);

    let faces = D6_FACES
        .iter()
        .enumerate()
        .map(|(face_index, (normal, value))| FaceDescriptor {
            face_index,
            value: *value,
            normal: *normal,
            center: group_center(&mesh, &[face_index * 2, face_index * 2 + 1]),
        })
        .collect();

    Polyhedron {
        kind: DieKind::D6,
        mesh,
        faces,
        triangle_faces,
        vertex_values: None,
    }
}

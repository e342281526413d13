//! Procedural die geometry
//!
//! d4 and d6 carry explicit face labels. The other solids are generated as
//! plain triangle lists and their logical faces are recovered by grouping
//! triangles with parallel normals.

pub mod d10;
pub mod d100;
pub mod d12;
pub mod d20;
pub mod d4;
pub mod d6;
pub mod d8;
pub mod labels;

use bevy_math::Vec3;

use crate::tray::types::{DieKind, FaceDescriptor, Polyhedron, TriangleMesh};

pub use d10::create_d10;
pub use d100::create_d100;
pub use d12::create_d12;
pub use d20::create_d20;
pub use d4::create_d4;
pub use d6::create_d6;
pub use d8::create_d8;

/// Cosine tolerance used by the builders when merging coplanar triangles.
pub const GROUPING_TOLERANCE: f32 = 1e-2;

/// Build fresh geometry for one die of the given kind.
pub fn build_polyhedron(kind: DieKind) -> Polyhedron {
    match kind {
        DieKind::D4 => create_d4(),
        DieKind::D6 => create_d6(),
        DieKind::D8 => create_d8(),
        DieKind::D10 => create_d10(),
        DieKind::D12 => create_d12(),
        DieKind::D20 => create_d20(),
        DieKind::D100 => create_d100(),
    }
}

/// Triangles sharing one outward direction
#[derive(Clone, Debug, PartialEq)]
pub struct FaceGroup {
    /// Normal of the first triangle that opened the group
    pub normal: Vec3,
    pub triangles: Vec<usize>,
}

/// Result of clustering a mesh's triangles by normal
#[derive(Clone, Debug, PartialEq)]
pub struct FaceGrouping {
    pub groups: Vec<FaceGroup>,
    /// Group index of every triangle
    pub triangle_groups: Vec<usize>,
}

/// Cluster triangles whose normals are parallel within `tolerance`.
///
/// A triangle joins the first group whose normal has a cosine similarity
/// above `1 - tolerance` with its own, otherwise it opens a new group. Groups
/// are reported in discovery order.
pub fn group_coplanar_faces(mesh: &TriangleMesh, tolerance: f32) -> FaceGrouping {
    let mut groups: Vec<FaceGroup> = Vec::new();
    let mut triangle_groups = Vec::with_capacity(mesh.triangle_count());

    for triangle in 0..mesh.triangle_count() {
        let normal = mesh.triangle_normal(triangle);
        let found = groups
            .iter()
            .position(|group| group.normal.dot(normal) > 1.0 - tolerance);

        let index = match found {
            Some(index) => index,
            None => {
                groups.push(FaceGroup {
                    normal,
                    triangles: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[index].triangles.push(triangle);
        triangle_groups.push(index);
    }

    FaceGrouping {
        groups,
        triangle_groups,
    }
}

/// Values for `group_count` groups, cycling through `1..=expected`.
pub fn assign_group_values(group_count: usize, expected: u32) -> Vec<u32> {
    let expected = expected.max(1) as usize;
    (0..group_count)
        .map(|i| (i % expected) as u32 + 1)
        .collect()
}

/// Build a polyhedron whose faces come from normal clustering.
pub fn grouped_polyhedron(kind: DieKind, mesh: TriangleMesh, tolerance: f32) -> Polyhedron {
    let grouping = group_coplanar_faces(&mesh, tolerance);
    let values = assign_group_values(grouping.groups.len(), kind.face_count());

    let faces = grouping
        .groups
        .iter()
        .zip(values)
        .enumerate()
        .map(|(face_index, (group, value))| FaceDescriptor {
            face_index,
            value,
            normal: group.normal,
            center: group_center(&mesh, &group.triangles),
        })
        .collect();

    Polyhedron {
        kind,
        mesh,
        faces,
        triangle_faces: grouping.triangle_groups,
        vertex_values: None,
    }
}

/// Area-agnostic centre of a set of triangles.
pub(crate) fn group_center(mesh: &TriangleMesh, triangles: &[usize]) -> Vec3 {
    if triangles.is_empty() {
        return Vec3::ZERO;
    }
    let sum: Vec3 = triangles
        .iter()
        .map(|&t| mesh.triangle_centroid(t))
        .sum();
    sum / triangles.len() as f32
}

/// Flip any triangle whose winding points towards the mesh centre.
///
/// Only valid for convex solids; used by the generators so face normals always
/// point outward regardless of how the index lists were written.
pub(crate) fn orient_outward(positions: &[Vec3], triangles: &[[u32; 3]]) -> Vec<u32> {
    let center = if positions.is_empty() {
        Vec3::ZERO
    } else {
        positions.iter().copied().sum::<Vec3>() / positions.len() as f32
    };

    let mut indices = Vec::with_capacity(triangles.len() * 3);
    for &[a, b, c] in triangles {
        let (pa, pb, pc) = (
            positions[a as usize],
            positions[b as usize],
            positions[c as usize],
        );
        let normal = (pb - pa).cross(pc - pa);
        let outward = (pa + pb + pc) / 3.0 - center;
        if normal.dot(outward) < 0.0 {
            indices.extend_from_slice(&[a, c, b]);
        } else {
            indices.extend_from_slice(&[a, b, c]);
        }
    }
    indices
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cube_mesh() -> TriangleMesh {
        let h = 1.0;
        let positions = vec![
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        let quads = [
            [0, 1, 2, 3],
            [4, 5, 6, 7],
            [0, 1, 5, 4],
            [3, 2, 6, 7],
            [1, 2, 6, 5],
            [0, 3, 7, 4],
        ];
        let triangles: Vec<[u32; 3]> = quads
            .iter()
            .flat_map(|q| [[q[0], q[1], q[2]], [q[0], q[2], q[3]]])
            .collect();
        let indices = orient_outward(&positions, &triangles);
        TriangleMesh::new(positions, indices)
    }

    fn octahedron_mesh() -> TriangleMesh {
        let positions = vec![Vec3::X, Vec3::NEG_X, Vec3::Y, Vec3::NEG_Y, Vec3::Z, Vec3::NEG_Z];
        let mut triangles = Vec::new();
        for x in [0, 1] {
            for y in [2, 3] {
                for z in [4, 5] {
                    triangles.push([x, y, z]);
                }
            }
        }
        let indices = orient_outward(&positions, &triangles);
        TriangleMesh::new(positions, indices)
    }

    #[test]
    fn test_cube_groups_into_six_faces() {
        let mesh = cube_mesh();
        let grouping = group_coplanar_faces(&mesh, GROUPING_TOLERANCE);
        assert_eq!(grouping.groups.len(), 6);
        assert_eq!(grouping.triangle_groups.len(), 12);
        for group in &grouping.groups {
            assert_eq!(group.triangles.len(), 2);
        }
    }

    #[test]
    fn test_octahedron_groups_into_eight_faces() {
        let mesh = octahedron_mesh();
        let grouping = group_coplanar_faces(&mesh, GROUPING_TOLERANCE);
        assert_eq!(grouping.groups.len(), 8);
    }

    #[test]
    fn test_loose_tolerance_merges_neighbouring_faces() {
        // Octahedron normals are 70.5 degrees apart (cos = 1/3), a tolerance of
        // 0.7 lets neighbours fall into the same group.
        let mesh = octahedron_mesh();
        let grouping = group_coplanar_faces(&mesh, 0.7);
        assert!(grouping.groups.len() < 8);
        assert_eq!(grouping.triangle_groups.len(), 8);
    }

    #[test]
    fn test_orient_outward_points_normals_away_from_center() {
        let mesh = octahedron_mesh();
        for t in 0..mesh.triangle_count() {
            let normal = mesh.triangle_normal(t);
            assert!(normal.dot(mesh.triangle_centroid(t)) > 0.0);
        }
    }

    #[test]
    fn test_group_values_wrap_when_more_groups_than_expected() {
        assert_eq!(assign_group_values(5, 3), vec![1, 2, 3, 1, 2]);
    }

    #[test]
    fn test_group_values_stop_at_group_count_when_fewer() {
        assert_eq!(assign_group_values(4, 6), vec![1, 2, 3, 4]);
        assert!(assign_group_values(0, 6).is_empty());
    }

    #[test]
    fn test_grouped_polyhedron_maps_every_triangle() {
        let poly = grouped_polyhedron(DieKind::D6, cube_mesh(), GROUPING_TOLERANCE);
        assert_eq!(poly.faces.len(), 6);
        assert_eq!(poly.triangle_faces.len(), poly.mesh.triangle_count());
        for t in 0..poly.mesh.triangle_count() {
            assert!(poly.face_for_triangle(t).is_some());
        }
    }

    #[test]
    fn test_every_kind_builds_complete_geometry() {
        for kind in DieKind::ALL {
            let poly = build_polyhedron(kind);
            assert_eq!(poly.kind, kind);
            assert_eq!(poly.mesh.indices.len() % 3, 0, "{} index count", kind);
            assert_eq!(poly.triangle_faces.len(), poly.mesh.triangle_count());
            assert!(poly
                .mesh
                .indices
                .iter()
                .all(|&i| (i as usize) < poly.mesh.positions.len()));
            if kind != DieKind::D100 {
                assert_eq!(
                    poly.faces.len() as u32,
                    kind.max_value(),
                    "{} face count",
                    kind
                );
            }
        }
    }

    #[test]
    fn test_face_values_cover_the_full_range() {
        for kind in DieKind::ALL {
            if kind == DieKind::D100 {
                continue;
            }
            let poly = build_polyhedron(kind);
            let mut values: Vec<u32> = poly.faces.iter().map(|f| f.value).collect();
            values.sort_unstable();
            let expected: Vec<u32> = (1..=kind.max_value()).collect();
            assert_eq!(values, expected, "{} values", kind);
        }
    }

    #[test]
    fn test_face_normals_are_unit_and_outward() {
        for kind in DieKind::ALL {
            let poly = build_polyhedron(kind);
            for face in &poly.faces {
                assert!((face.normal.length() - 1.0).abs() < 1e-4, "{}", kind);
                assert!(face.normal.dot(face.center) > 0.0, "{}", kind);
            }
        }
    }
}

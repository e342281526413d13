//! Die geometry: triangle mesh plus the logical faces that carry values

use bevy_math::Vec3;

use super::dice::DieKind;

/// Indexed triangle list shared by the visual proxy and the collision shape
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TriangleMesh {
    pub positions: Vec<Vec3>,
    /// Flat index buffer, three entries per triangle
    pub indices: Vec<u32>,
}

impl TriangleMesh {
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>) -> Self {
        Self { positions, indices }
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices
            .chunks_exact(3)
            .map(|tri| [tri[0], tri[1], tri[2]])
    }

    pub fn triangle_vertices(&self, triangle: usize) -> [Vec3; 3] {
        let base = triangle * 3;
        [
            self.positions[self.indices[base] as usize],
            self.positions[self.indices[base + 1] as usize],
            self.positions[self.indices[base + 2] as usize],
        ]
    }

    /// Unit normal from the triangle winding, zero for degenerate triangles.
    pub fn triangle_normal(&self, triangle: usize) -> Vec3 {
        let [a, b, c] = self.triangle_vertices(triangle);
        (b - a).cross(c - a).normalize_or_zero()
    }

    pub fn triangle_centroid(&self, triangle: usize) -> Vec3 {
        let [a, b, c] = self.triangle_vertices(triangle);
        (a + b + c) / 3.0
    }
}

/// A logical face of a die: one value, one outward normal
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceDescriptor {
    pub face_index: usize,
    pub value: u32,
    pub normal: Vec3,
    /// Centre of the face in body space, where its label sits
    pub center: Vec3,
}

/// Built geometry for a single spawned die
#[derive(Clone, Debug)]
pub struct Polyhedron {
    pub kind: DieKind,
    pub mesh: TriangleMesh,
    pub faces: Vec<FaceDescriptor>,
    /// Logical face of every triangle, indexed by triangle
    pub triangle_faces: Vec<usize>,
    /// Tetrahedron only: value read when the vertex points up
    pub vertex_values: Option<Vec<u32>>,
}

impl Polyhedron {
    pub fn face_for_triangle(&self, triangle: usize) -> Option<&FaceDescriptor> {
        self.triangle_faces
            .get(triangle)
            .and_then(|&face| self.faces.get(face))
    }

    /// Distance from the origin to the farthest vertex.
    pub fn radius(&self) -> f32 {
        self.mesh
            .positions
            .iter()
            .map(|p| p.length())
            .fold(0.0, f32::max)
    }
}

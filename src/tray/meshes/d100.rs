use std::f32::consts::PI;

use bevy_math::Vec3;

use super::{grouped_polyhedron, orient_outward, GROUPING_TOLERANCE};
use crate::tray::types::{DieKind, Polyhedron, TriangleMesh};

const WIDTH_SEGMENTS: u32 = 24;
const HEIGHT_SEGMENTS: u32 = 16;

/// Percentile die, a faceted sphere.
///
/// The faces are too many and too small to read by orientation; the value is
/// drawn at readout time and the face groups only exist to satisfy the common
/// polyhedron shape.
pub fn create_d100() -> Polyhedron {
    let radius = 3.6;
    let columns = WIDTH_SEGMENTS + 1;

    let mut positions = Vec::with_capacity((columns * (HEIGHT_SEGMENTS + 1)) as usize);
    for iy in 0..=HEIGHT_SEGMENTS {
        let v = iy as f32 / HEIGHT_SEGMENTS as f32;
        for ix in 0..=WIDTH_SEGMENTS {
            let u = ix as f32 / WIDTH_SEGMENTS as f32;
            let (sin_u, cos_u) = (u * 2.0 * PI).sin_cos();
            let (sin_v, cos_v) = (v * PI).sin_cos();
            positions.push(Vec3::new(
                -radius * cos_u * sin_v,
                radius * cos_v,
                radius * sin_u * sin_v,
            ));
        }
    }

    let at = |ix: u32, iy: u32| iy * columns + ix;
    let mut triangles = Vec::new();
    for iy in 0..HEIGHT_SEGMENTS {
        for ix in 0..WIDTH_SEGMENTS {
            let a = at(ix + 1, iy);
            let b = at(ix, iy);
            let c = at(ix, iy + 1);
            let d = at(ix + 1, iy + 1);
            // The pole rows collapse to a point, skip the degenerate halves
            if iy != 0 {
                triangles.push([a, b, d]);
            }
            if iy != HEIGHT_SEGMENTS - 1 {
                triangles.push([b, c, d]);
            }
        }
    }

    let indices = orient_outward(&positions, &triangles);
    grouped_polyhedron(
        DieKind::D100,
        TriangleMesh::new(positions, indices),
        GROUPING_TOLERANCE,
    )
}

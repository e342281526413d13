use std::f32::consts::PI;

use bevy_math::Vec3;

use super::{grouped_polyhedron, orient_outward, GROUPING_TOLERANCE};
use crate::tray::types::{DieKind, Polyhedron, TriangleMesh};

/// Pentagonal trapezohedron.
///
/// Two staggered rings of five vertices sit just above and below the equator,
/// closed by an apex at each pole. The apex height is chosen so each kite
/// (apex, ring vertex, opposite-ring vertex, ring vertex) is planar and the
/// grouping step sees exactly ten faces.
pub fn create_d10() -> Polyhedron {
    let radius = 3.2;
    let ring_height = 0.25;
    let half_step = PI / 5.0;
    let cos = half_step.cos();
    let apex_height = ring_height * (1.0 + cos) / (1.0 - cos);

    let mut positions = Vec::with_capacity(12);
    for i in 0..5 {
        let angle = i as f32 * 2.0 * half_step;
        positions.push(Vec3::new(
            radius * angle.cos(),
            ring_height,
            radius * angle.sin(),
        ));
    }
    for i in 0..5 {
        let angle = i as f32 * 2.0 * half_step + half_step;
        positions.push(Vec3::new(
            radius * angle.cos(),
            -ring_height,
            radius * angle.sin(),
        ));
    }
    positions.push(Vec3::new(0.0, apex_height, 0.0));
    positions.push(Vec3::new(0.0, -apex_height, 0.0));

    let (top, bottom) = (10u32, 11u32);
    let mut triangles = Vec::with_capacity(20);
    for i in 0..5u32 {
        let next = (i + 1) % 5;
        // Upper kite: top, upper i, lower i, upper next
        triangles.push([top, i, 5 + i]);
        triangles.push([top, 5 + i, next]);
        // Lower kite: bottom, lower i, upper next, lower next
        triangles.push([bottom, 5 + i, next]);
        triangles.push([bottom, next, 5 + next]);
    }

    let indices = orient_outward(&positions, &triangles);
    grouped_polyhedron(
        DieKind::D10,
        TriangleMesh::new(positions, indices),
        GROUPING_TOLERANCE,
    )
}

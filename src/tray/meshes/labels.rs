//! Face-value labels
//!
//! Numbers are drawn as flat seven-segment strokes in the XY plane facing +Z.
//! Most dice get one label per logical face, turned to the face normal. The d4
//! is read by its top vertex, so each face carries its three corner numbers
//! instead, each standing upright towards its corner.

use std::f32::consts::FRAC_PI_2;

use bevy_math::{Mat3, Quat, Vec3};

use crate::tray::types::{DieKind, FaceDescriptor, Polyhedron, TriangleMesh};

const DIGIT_WIDTH: f32 = 0.6;
const DIGIT_SPACING: f32 = 0.15;
const STROKE: f32 = 0.12;
/// Lift off the face so labels do not z-fight with it
const SURFACE_OFFSET: f32 = 0.02;
/// How far corner numbers sit from the face centre towards their corner
const CORNER_INSET: f32 = 0.5;

/// Segment endpoints as (x1, y1, x2, y2) on a unit digit cell centred at the origin.
const SEGMENTS: [(f32, f32, f32, f32); 7] = [
    (-0.25, 0.5, 0.25, 0.5),   // a: top
    (0.25, 0.5, 0.25, 0.0),    // b: top right
    (0.25, 0.0, 0.25, -0.5),   // c: bottom right
    (-0.25, -0.5, 0.25, -0.5), // d: bottom
    (-0.25, 0.0, -0.25, -0.5), // e: bottom left
    (-0.25, 0.5, -0.25, 0.0),  // f: top left
    (-0.25, 0.0, 0.25, 0.0),   // g: middle
];

/// Lit segments per digit, bit 0 is segment a.
const DIGIT_MASKS: [u8; 10] = [
    0b011_1111, // 0
    0b000_0110, // 1
    0b101_1011, // 2
    0b100_1111, // 3
    0b110_0110, // 4
    0b110_1101, // 5
    0b111_1101, // 6
    0b000_0111, // 7
    0b111_1111, // 8
    0b110_1111, // 9
];

fn digits_of(value: u32) -> Vec<u32> {
    value
        .to_string()
        .bytes()
        .map(|b| u32::from(b - b'0'))
        .collect()
}

/// Flat geometry spelling `value`, centred on the origin.
pub fn label_geometry(value: u32) -> TriangleMesh {
    let digits = digits_of(value);
    let total = digits.len() as f32 * DIGIT_WIDTH + (digits.len() as f32 - 1.0) * DIGIT_SPACING;
    let start_x = -total / 2.0 + DIGIT_WIDTH / 2.0;

    let mut positions = Vec::new();
    let mut indices = Vec::new();
    for (i, digit) in digits.iter().enumerate() {
        let offset_x = start_x + i as f32 * (DIGIT_WIDTH + DIGIT_SPACING);
        let mask = DIGIT_MASKS[*digit as usize];
        for (bit, &(x1, y1, x2, y2)) in SEGMENTS.iter().enumerate() {
            if mask & (1 << bit) != 0 {
                add_stroke(&mut positions, &mut indices, offset_x, (x1, y1), (x2, y2));
            }
        }
        // Tell 6 and 9 apart when the die is upside down
        if *digit == 6 || *digit == 9 {
            add_stroke(
                &mut positions,
                &mut indices,
                offset_x,
                (-0.25, -0.7),
                (0.25, -0.7),
            );
        }
    }

    TriangleMesh::new(positions, indices)
}

fn add_stroke(
    positions: &mut Vec<Vec3>,
    indices: &mut Vec<u32>,
    offset_x: f32,
    from: (f32, f32),
    to: (f32, f32),
) {
    let (dx, dy) = (to.0 - from.0, to.1 - from.1);
    let len = (dx * dx + dy * dy).sqrt();
    if len < 1e-3 {
        return;
    }
    let px = -dy / len * STROKE / 2.0;
    let py = dx / len * STROKE / 2.0;

    let base = positions.len() as u32;
    positions.push(Vec3::new(offset_x + from.0 - px, from.1 - py, 0.0));
    positions.push(Vec3::new(offset_x + to.0 - px, to.1 - py, 0.0));
    positions.push(Vec3::new(offset_x + to.0 + px, to.1 + py, 0.0));
    positions.push(Vec3::new(offset_x + from.0 + px, from.1 + py, 0.0));
    indices.extend_from_slice(&[base, base + 1, base + 2, base, base + 2, base + 3]);
}

/// Label size relative to the digit cell.
pub fn label_scale(kind: DieKind) -> f32 {
    match kind {
        DieKind::D4 => 0.55,
        DieKind::D6 => 1.4,
        DieKind::D8 => 1.0,
        DieKind::D10 => 0.8,
        DieKind::D12 => 0.8,
        DieKind::D20 => 0.6,
        DieKind::D100 => 1.6,
    }
}

/// Rotation turning the label's +Z towards `normal`.
pub fn label_rotation(normal: Vec3) -> Quat {
    if normal.y.abs() > 0.99 {
        if normal.y > 0.0 {
            Quat::from_rotation_x(-FRAC_PI_2)
        } else {
            Quat::from_rotation_x(FRAC_PI_2)
        }
    } else {
        Quat::from_rotation_arc(Vec3::Z, normal)
    }
}

/// Body-space placement of a face's label.
pub fn label_placement(face: &FaceDescriptor) -> (Vec3, Quat) {
    (
        face.center + face.normal * SURFACE_OFFSET,
        label_rotation(face.normal),
    )
}

/// A number on a die, in body space
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FaceLabel {
    pub value: u32,
    pub translation: Vec3,
    pub rotation: Quat,
}

/// Every printed number of a die.
///
/// Dice read by vertex get their corner numbers; the d100 gets none since its
/// number is drawn on each readout.
pub fn face_labels(polyhedron: &Polyhedron) -> Vec<FaceLabel> {
    if polyhedron.kind == DieKind::D100 {
        return Vec::new();
    }
    match &polyhedron.vertex_values {
        Some(vertex_values) => corner_labels(polyhedron, vertex_values),
        None => polyhedron
            .faces
            .iter()
            .map(|face| {
                let (translation, rotation) = label_placement(face);
                FaceLabel {
                    value: face.value,
                    translation,
                    rotation,
                }
            })
            .collect(),
    }
}

fn corner_labels(polyhedron: &Polyhedron, vertex_values: &[u32]) -> Vec<FaceLabel> {
    let mut labels = Vec::new();
    for (triangle, corners) in polyhedron.mesh.triangles().enumerate() {
        let Some(face) = polyhedron.face_for_triangle(triangle) else {
            continue;
        };
        for corner in corners {
            let Some(&value) = vertex_values.get(corner as usize) else {
                continue;
            };
            let towards = polyhedron.mesh.positions[corner as usize] - face.center;
            let up = (towards - face.normal * towards.dot(face.normal)).normalize_or_zero();
            labels.push(FaceLabel {
                value,
                translation: face.center + towards * CORNER_INSET + face.normal * SURFACE_OFFSET,
                rotation: upright_rotation(face.normal, up),
            });
        }
    }
    labels
}

/// Rotation turning the label's +Z to `normal` with its +Y along `up`.
fn upright_rotation(normal: Vec3, up: Vec3) -> Quat {
    if up == Vec3::ZERO {
        return label_rotation(normal);
    }
    Quat::from_mat3(&Mat3::from_cols(up.cross(normal), up, normal))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_one_is_two_strokes() {
        let mesh = label_geometry(1);
        assert_eq!(mesh.triangle_count(), 4);
    }

    #[test]
    fn test_eight_lights_every_segment() {
        assert_eq!(label_geometry(8).triangle_count(), 14);
    }

    #[test]
    fn test_six_and_nine_get_an_underline() {
        // 6 lights six segments, plus the underline
        assert_eq!(label_geometry(6).triangle_count(), 14);
        assert_eq!(label_geometry(9).triangle_count(), 14);
    }

    #[test]
    fn test_multi_digit_labels_are_centred() {
        let mesh = label_geometry(100);
        let min_x = mesh.positions.iter().map(|p| p.x).fold(f32::MAX, f32::min);
        let max_x = mesh.positions.iter().map(|p| p.x).fold(f32::MIN, f32::max);
        assert!((min_x + max_x).abs() < 1e-4);
        assert!(mesh.positions.iter().all(|p| p.z == 0.0));
    }

    #[test]
    fn test_label_rotation_faces_the_normal() {
        for normal in [Vec3::Y, Vec3::NEG_Y, Vec3::X, Vec3::new(0.6, 0.0, 0.8)] {
            let facing = label_rotation(normal) * Vec3::Z;
            assert!((facing - normal).length() < 1e-4, "{:?}", normal);
        }
    }

    #[test]
    fn test_d4_faces_carry_their_corner_numbers() {
        let poly = crate::tray::meshes::build_polyhedron(DieKind::D4);
        let labels = face_labels(&poly);
        assert_eq!(labels.len(), 12);
        for (face, chunk) in poly.faces.iter().zip(labels.chunks(3)) {
            let mut values: Vec<u32> = chunk.iter().map(|l| l.value).collect();
            values.sort_unstable();
            // Every number except the one opposite the face
            let expected: Vec<u32> = (1..=4).filter(|v| *v != face.value).collect();
            assert_eq!(values, expected);
            for label in chunk {
                assert!((label.rotation * Vec3::Z - face.normal).length() < 1e-4);
            }
        }
    }

    #[test]
    fn test_resting_d4_shows_its_reading_on_top_of_every_visible_face() {
        let poly = crate::tray::meshes::build_polyhedron(DieKind::D4);
        let labels = face_labels(&poly);
        for (down, _) in poly.faces.iter().enumerate() {
            let rest = Quat::from_rotation_arc(poly.faces[down].normal, Vec3::NEG_Y);
            let reading = poly.faces[down].value;
            for (face, chunk) in labels.chunks(3).enumerate() {
                if face == down {
                    continue;
                }
                let top = chunk
                    .iter()
                    .max_by(|a, b| {
                        (rest * a.translation).y.total_cmp(&(rest * b.translation).y)
                    })
                    .unwrap();
                assert_eq!(top.value, reading);
                // Upright: the digit's top points up the face
                assert!((rest * (top.rotation * Vec3::Y)).y > 0.0);
            }
        }
    }

    #[test]
    fn test_other_dice_get_one_label_per_face() {
        for kind in [DieKind::D6, DieKind::D8, DieKind::D10, DieKind::D12, DieKind::D20] {
            let poly = crate::tray::meshes::build_polyhedron(kind);
            let labels = face_labels(&poly);
            assert_eq!(labels.len(), poly.faces.len());
            assert!(labels.iter().zip(&poly.faces).all(|(l, f)| l.value == f.value));
        }
        let d100 = crate::tray::meshes::build_polyhedron(DieKind::D100);
        assert!(face_labels(&d100).is_empty());
    }
}

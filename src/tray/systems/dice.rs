//! Face-value readout and roll aggregation

use std::fmt;

use bevy_math::Vec3;
use rand::Rng;

use crate::tray::physics::Pose;
use crate::tray::types::{DieKind, Polyhedron, RollMode};

/// Read the value a die shows in the given pose.
///
/// The d100 has no readable geometry: it draws a fresh number on every call,
/// so the result is only meaningful once the die is at rest.
pub fn resolve_value<R: Rng + ?Sized>(polyhedron: &Polyhedron, pose: &Pose, rng: &mut R) -> u32 {
    match polyhedron.kind {
        DieKind::D4 => topmost_vertex_value(polyhedron, pose),
        DieKind::D100 => rng.gen_range(1..=100),
        _ => upward_face_value(polyhedron, pose),
    }
}

/// Value of the face whose world normal is closest to +Y; ties keep the first.
fn upward_face_value(polyhedron: &Polyhedron, pose: &Pose) -> u32 {
    let mut best_match = 1;
    let mut best_dot = f32::NEG_INFINITY;

    for face in &polyhedron.faces {
        let dot = (pose.rotation * face.normal).dot(Vec3::Y);
        if dot > best_dot {
            best_dot = dot;
            best_match = face.value;
        }
    }

    best_match
}

fn topmost_vertex_value(polyhedron: &Polyhedron, pose: &Pose) -> u32 {
    let Some(values) = &polyhedron.vertex_values else {
        return 1;
    };

    let mut best_index = 0;
    let mut best_height = f32::NEG_INFINITY;
    for (i, vertex) in polyhedron.mesh.positions.iter().enumerate() {
        let height = pose.transform_point(*vertex).y;
        if height > best_height {
            best_height = height;
            best_index = i;
        }
    }

    values.get(best_index).copied().unwrap_or(1)
}

/// One die's contribution to a readout
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DieRoll {
    pub kind: DieKind,
    pub value: u32,
}

/// Structured form of the status line
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RollSummary {
    Ready,
    Rolling,
    Total { total: u32, rolls: Vec<u32> },
    Advantage { high: u32, rolls: [u32; 2] },
    Disadvantage { low: u32, rolls: [u32; 2] },
    NeedTwoD20,
}

impl fmt::Display for RollSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RollSummary::Ready => f.write_str("Ready to roll."),
            RollSummary::Rolling => f.write_str("Rolling..."),
            RollSummary::Total { total, rolls } => {
                let addends: Vec<String> = rolls.iter().map(|v| v.to_string()).collect();
                write!(f, "Total: {} ({})", total, addends.join(" + "))
            }
            RollSummary::Advantage { high, rolls } => {
                write!(f, "ADV: {} (rolls: {}, {})", high, rolls[0], rolls[1])
            }
            RollSummary::Disadvantage { low, rolls } => {
                write!(f, "DIS: {} (rolls: {}, {})", low, rolls[0], rolls[1])
            }
            RollSummary::NeedTwoD20 => f.write_str("Roll two d20s for advantage/disadvantage."),
        }
    }
}

/// Aggregate a readout.
///
/// `read_rolls` is only called when values are actually needed, so a table
/// that is still rolling never triggers a d100 draw.
pub fn summarize<F>(mode: RollMode, any_rolling: bool, force: bool, read_rolls: F) -> RollSummary
where
    F: FnOnce() -> Vec<DieRoll>,
{
    if any_rolling && !force {
        return RollSummary::Rolling;
    }

    let rolls = read_rolls();

    if mode == RollMode::Normal {
        if rolls.is_empty() {
            return RollSummary::Ready;
        }
        let values: Vec<u32> = rolls.iter().map(|r| r.value).collect();
        return RollSummary::Total {
            total: values.iter().sum(),
            rolls: values,
        };
    }

    let mut d20s = rolls
        .iter()
        .filter(|r| r.kind == DieKind::D20)
        .map(|r| r.value);
    let (Some(a), Some(b)) = (d20s.next(), d20s.next()) else {
        return RollSummary::NeedTwoD20;
    };

    match mode {
        RollMode::Advantage => RollSummary::Advantage {
            high: a.max(b),
            rolls: [a, b],
        },
        _ => RollSummary::Disadvantage {
            low: a.min(b),
            rolls: [a, b],
        },
    }
}

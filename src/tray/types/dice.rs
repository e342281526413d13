//! Dice-related types
//!
//! This module contains the die kinds, the live `Die` entity kept by the
//! registry, and the roll mode used when aggregating results.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::TrayError;
use super::polyhedron::Polyhedron;
use crate::tray::physics::BodyHandle;

/// All supported die kinds
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DieKind {
    D4,
    D6,
    D8,
    D10,
    D12,
    D20,
    D100,
}

impl DieKind {
    pub const ALL: [DieKind; 7] = [
        DieKind::D4,
        DieKind::D6,
        DieKind::D8,
        DieKind::D10,
        DieKind::D12,
        DieKind::D20,
        DieKind::D100,
    ];

    pub fn max_value(&self) -> u32 {
        match self {
            DieKind::D4 => 4,
            DieKind::D6 => 6,
            DieKind::D8 => 8,
            DieKind::D10 => 10,
            DieKind::D12 => 12,
            DieKind::D20 => 20,
            DieKind::D100 => 100,
        }
    }

    /// Number of logical faces the geometry is labelled with.
    ///
    /// The percentile die is a sphere whose coarse face groups cycle through
    /// twelve labels; its readout ignores them.
    pub fn face_count(&self) -> u32 {
        match self {
            DieKind::D100 => 12,
            other => other.max_value(),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            DieKind::D4 => "d4",
            DieKind::D6 => "d6",
            DieKind::D8 => "d8",
            DieKind::D10 => "d10",
            DieKind::D12 => "d12",
            DieKind::D20 => "d20",
            DieKind::D100 => "d100",
        }
    }

    pub fn parse(s: &str) -> Option<DieKind> {
        match s.trim().to_lowercase().as_str() {
            "d4" => Some(DieKind::D4),
            "d6" => Some(DieKind::D6),
            "d8" => Some(DieKind::D8),
            "d10" => Some(DieKind::D10),
            "d12" => Some(DieKind::D12),
            "d20" => Some(DieKind::D20),
            "d100" => Some(DieKind::D100),
            _ => None,
        }
    }

    /// Base face image for this kind, relative to the viewer's asset root.
    pub fn base_texture_path(&self) -> String {
        format!("textures/dice/{}_base.png", self.name())
    }

    /// Flat colour used when the base face image is unavailable.
    pub fn fallback_color(&self) -> [f32; 4] {
        match self {
            // #d0d0d0, the percentile die is relabelled on every readout
            DieKind::D100 => [0.816, 0.816, 0.816, 1.0],
            // #d9c497 parchment
            _ => [0.851, 0.769, 0.592, 1.0],
        }
    }
}

impl fmt::Display for DieKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DieKind {
    type Err = TrayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DieKind::parse(s).ok_or_else(|| TrayError::UnknownDieKind(s.to_string()))
    }
}

/// Aggregation policy applied to the dice on the table
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RollMode {
    #[default]
    Normal,
    Advantage,
    Disadvantage,
}

impl RollMode {
    pub fn name(&self) -> &'static str {
        match self {
            RollMode::Normal => "normal",
            RollMode::Advantage => "advantage",
            RollMode::Disadvantage => "disadvantage",
        }
    }

    pub fn parse(s: &str) -> Option<RollMode> {
        match s.trim().to_lowercase().as_str() {
            "normal" => Some(RollMode::Normal),
            "advantage" | "adv" => Some(RollMode::Advantage),
            "disadvantage" | "dis" => Some(RollMode::Disadvantage),
            _ => None,
        }
    }
}

/// Stable identifier of a live die, unique for the lifetime of a session
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DieId(pub u64);

impl fmt::Display for DieId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "die#{}", self.0)
    }
}

/// A die on the table: its geometry, its physics body and the rest flag
#[derive(Clone, Debug)]
pub struct Die {
    pub id: DieId,
    pub kind: DieKind,
    pub polyhedron: Polyhedron,
    pub body: BodyHandle,
    pub at_rest: bool,
}

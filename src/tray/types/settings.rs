//! Tray settings types and persistence
//!
//! Every tunable of the simulation lives here with its default. Settings are
//! stored as JSON; missing sections or fields fall back to the defaults so a
//! partial file only overrides what it names.

use std::fs;
use std::path::Path;

use bevy_math::Vec3;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use super::error::TrayError;

// ============================================================================
// Physics
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PhysicsSettings {
    /// Exaggerated so dice settle quickly on screen
    pub gravity: [f32; 3],
    pub solver_iterations: usize,
    pub fixed_time_step: f32,
    pub max_sub_steps: u32,
    /// Frame time assumed when the host reports no elapsed time
    pub fallback_frame_seconds: f32,
}

impl Default for PhysicsSettings {
    fn default() -> Self {
        Self {
            gravity: [0.0, -60.0, 0.0],
            solver_iterations: 16,
            fixed_time_step: 1.0 / 60.0,
            max_sub_steps: 3,
            fallback_frame_seconds: 0.016,
        }
    }
}

impl PhysicsSettings {
    pub fn gravity(&self) -> Vec3 {
        Vec3::from_array(self.gravity)
    }
}

// ============================================================================
// Arena
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ArenaSettings {
    pub camera_fov_degrees: f32,
    pub camera_height: f32,
    pub padding: f32,
    pub wall_half_thickness: f32,
    pub wall_half_height: f32,
}

impl Default for ArenaSettings {
    fn default() -> Self {
        Self {
            camera_fov_degrees: 45.0,
            camera_height: 55.0,
            padding: 2.0,
            wall_half_thickness: 2.0,
            wall_half_height: 8.0,
        }
    }
}

// ============================================================================
// Dice
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DiceSettings {
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
    /// Inset from the inner bounds for spawn positions
    pub spawn_margin: f32,
    pub spawn_height: f32,
    pub spawn_height_jitter: f32,
    pub launch_horizontal_speed: f32,
    pub launch_upward_speed: f32,
    pub launch_upward_jitter: f32,
    pub launch_spin: f32,
    pub rest_linear_speed: f32,
    pub rest_angular_speed: f32,
}

impl Default for DiceSettings {
    fn default() -> Self {
        Self {
            mass: 1.0,
            linear_damping: 0.1,
            angular_damping: 0.2,
            friction: 0.3,
            restitution: 0.3,
            spawn_margin: 2.0,
            spawn_height: 10.0,
            spawn_height_jitter: 5.0,
            launch_horizontal_speed: 10.0,
            launch_upward_speed: 5.0,
            launch_upward_jitter: 5.0,
            launch_spin: 10.0,
            rest_linear_speed: 0.2,
            rest_angular_speed: 0.2,
        }
    }
}

// ============================================================================
// Recovery
// ============================================================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RecoverySettings {
    /// Dice below this height have tunnelled through the floor
    pub floor_threshold: f32,
    pub position: [f32; 3],
    pub velocity: [f32; 3],
    pub spin: [f32; 3],
}

impl Default for RecoverySettings {
    fn default() -> Self {
        Self {
            floor_threshold: -10.0,
            position: [0.0, 12.0, 0.0],
            velocity: [0.0, 8.0, 0.0],
            spin: [5.0, 5.0, 5.0],
        }
    }
}

// ============================================================================
// Root settings
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TraySettings {
    #[serde(default)]
    pub physics: PhysicsSettings,
    #[serde(default)]
    pub arena: ArenaSettings,
    #[serde(default)]
    pub dice: DiceSettings,
    #[serde(default)]
    pub recovery: RecoverySettings,
    /// Fixed RNG seed for reproducible launches; entropy when absent
    #[serde(default)]
    pub seed: Option<u64>,
}

impl TraySettings {
    pub fn load(path: &Path) -> Result<Self, TrayError> {
        let contents = fs::read_to_string(path)?;
        let settings = serde_json::from_str(&contents)?;
        info!("Loaded tray settings from {:?}", path);
        Ok(settings)
    }

    pub fn save(&self, path: &Path) -> Result<(), TrayError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)?;
        info!("Saved tray settings to {:?}", path);
        Ok(())
    }

    /// Load settings, falling back to the defaults when the file is missing or
    /// unreadable.
    pub fn load_or_default(path: &Path) -> Self {
        if !path.exists() {
            info!("No settings file at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::load(path) {
            Ok(settings) => settings,
            Err(e) => {
                warn!("Failed to load settings from {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}

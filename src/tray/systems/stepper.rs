//! Fixed-step advancement, rest detection and out-of-bounds recovery

use bevy_math::Vec3;
use tracing::warn;

use crate::tray::physics::{BodyVelocity, PhysicsWorld, Pose};
use crate::tray::scene::SceneSink;
use crate::tray::types::{DiceSettings, Die, DieId, PhysicsSettings, RecoverySettings};

/// Converts variable frame times into whole fixed steps
#[derive(Clone, Debug, PartialEq)]
pub struct FixedStepper {
    fixed_dt: f32,
    max_sub_steps: u32,
    fallback_dt: f32,
    accumulator: f32,
}

impl FixedStepper {
    pub fn new(settings: &PhysicsSettings) -> Self {
        Self {
            fixed_dt: settings.fixed_time_step,
            max_sub_steps: settings.max_sub_steps,
            fallback_dt: settings.fallback_frame_seconds,
            accumulator: 0.0,
        }
    }

    pub fn fixed_dt(&self) -> f32 {
        self.fixed_dt
    }

    pub fn accumulator(&self) -> f32 {
        self.accumulator
    }

    /// Number of fixed steps to run for a frame of `delta` seconds.
    ///
    /// Time beyond the sub-step cap is dropped rather than carried over, so a
    /// long stall never turns into a burst of catch-up steps.
    pub fn advance(&mut self, delta: f32) -> u32 {
        let delta = if delta.is_finite() && delta > 0.0 {
            delta
        } else {
            self.fallback_dt
        };
        if self.fixed_dt <= 0.0 || !self.fixed_dt.is_finite() {
            return 0;
        }

        self.accumulator += delta;
        let mut steps = 0;
        while self.accumulator >= self.fixed_dt && steps < self.max_sub_steps {
            self.accumulator -= self.fixed_dt;
            steps += 1;
        }
        self.accumulator %= self.fixed_dt;
        steps
    }
}

pub fn is_at_rest(velocity: &BodyVelocity, settings: &DiceSettings) -> bool {
    velocity.linear.length() < settings.rest_linear_speed
        && velocity.angular.length() < settings.rest_angular_speed
}

/// Dice currently below the recovery threshold.
pub fn fallen_dice<P: PhysicsWorld + ?Sized>(
    physics: &P,
    dice: &[Die],
    recovery: &RecoverySettings,
) -> Vec<DieId> {
    dice.iter()
        .filter(|die| {
            physics
                .pose(die.body)
                .is_some_and(|pose| pose.position.y < recovery.floor_threshold)
        })
        .map(|die| die.id)
        .collect()
}

/// Put dice that fell through the floor back above the table.
///
/// A die is recovered when it is below the threshold now or is listed in
/// `fallen_earlier`. Only the position and motion are reset; orientation is
/// kept.
pub fn recover_fallen<P: PhysicsWorld + ?Sized>(
    physics: &mut P,
    dice: &[Die],
    recovery: &RecoverySettings,
    fallen_earlier: &[DieId],
) -> Vec<DieId> {
    let mut recovered = Vec::new();
    for die in dice {
        let Some(pose) = physics.pose(die.body) else {
            continue;
        };
        if pose.position.y >= recovery.floor_threshold && !fallen_earlier.contains(&die.id) {
            continue;
        }

        warn!(
            "{} ({}) fell to y = {:.2}, respawning above the table",
            die.id, die.kind, pose.position.y
        );
        physics.set_pose(
            die.body,
            Pose::new(Vec3::from_array(recovery.position), pose.rotation),
        );
        physics.set_velocity(
            die.body,
            BodyVelocity {
                linear: Vec3::from_array(recovery.velocity),
                angular: Vec3::from_array(recovery.spin),
            },
        );
        recovered.push(die.id);
    }
    recovered
}

/// Copy poses to the scene and reclassify every die's rest state.
pub fn sync_dice<P, S>(physics: &P, scene: &mut S, dice: &mut [Die], settings: &DiceSettings)
where
    P: PhysicsWorld + ?Sized,
    S: SceneSink + ?Sized,
{
    for die in dice.iter_mut() {
        if let Some(pose) = physics.pose(die.body) {
            scene.sync_pose(die.id, pose);
        }
        die.at_rest = physics
            .velocity(die.body)
            .map(|velocity| is_at_rest(&velocity, settings))
            .unwrap_or(false);
    }
}

//! Rigid-body capability used by the tray
//!
//! The tray never talks to a physics engine directly. It creates bodies,
//! advances the world and reads poses through [`PhysicsWorld`], so tests can
//! drive the session with a hand-written world and the rapier backend stays
//! swappable.

mod rapier;

pub use rapier::RapierWorld;

use bevy_math::{Quat, Vec3};

/// Opaque reference to a body owned by a [`PhysicsWorld`]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct BodyHandle(pub u64);

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    pub fn new(position: Vec3, rotation: Quat) -> Self {
        Self { position, rotation }
    }

    pub fn from_position(position: Vec3) -> Self {
        Self::new(position, Quat::IDENTITY)
    }

    /// Map a body-space point into world space.
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.rotation * point + self.position
    }
}

impl Default for Pose {
    fn default() -> Self {
        Self::from_position(Vec3::ZERO)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct BodyVelocity {
    pub linear: Vec3,
    pub angular: Vec3,
}

/// Everything needed to put a die into the world
#[derive(Clone, Debug)]
pub struct DynamicBodyDesc {
    /// Collision trimesh in body space
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<[u32; 3]>,
    pub pose: Pose,
    pub velocity: BodyVelocity,
    pub mass: f32,
    pub linear_damping: f32,
    pub angular_damping: f32,
    pub friction: f32,
    pub restitution: f32,
}

pub trait PhysicsWorld {
    fn add_dynamic_body(&mut self, desc: &DynamicBodyDesc) -> BodyHandle;

    /// Immovable box, used for the arena walls.
    fn add_static_box(&mut self, center: Vec3, half_extents: Vec3) -> BodyHandle;

    /// Immovable horizontal plane at y = 0 facing up.
    fn add_ground(&mut self) -> BodyHandle;

    /// Removing an unknown handle is a no-op.
    fn remove_body(&mut self, handle: BodyHandle);

    /// Advance the world by exactly `dt` seconds.
    fn step(&mut self, dt: f32);

    fn pose(&self, handle: BodyHandle) -> Option<Pose>;

    fn velocity(&self, handle: BodyHandle) -> Option<BodyVelocity>;

    fn set_pose(&mut self, handle: BodyHandle, pose: Pose);

    fn set_velocity(&mut self, handle: BodyHandle, velocity: BodyVelocity);

    fn body_count(&self) -> usize;
}

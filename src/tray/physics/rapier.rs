use std::num::NonZeroUsize;

use bevy_math::{Quat, Vec3};
use rapier3d::na::{Isometry3, Quaternion, Translation3, UnitQuaternion, Vector3};
use rapier3d::prelude::*;
use tracing::debug;

use super::{BodyHandle, BodyVelocity, DynamicBodyDesc, PhysicsWorld, Pose};
use crate::tray::types::PhysicsSettings;

/// [`PhysicsWorld`] backed by rapier.
pub struct RapierWorld {
    gravity: Vector3<f32>,
    integration_parameters: IntegrationParameters,
    pipeline: PhysicsPipeline,
    islands: IslandManager,
    broad_phase: DefaultBroadPhase,
    narrow_phase: NarrowPhase,
    bodies: RigidBodySet,
    colliders: ColliderSet,
    impulse_joints: ImpulseJointSet,
    multibody_joints: MultibodyJointSet,
    ccd_solver: CCDSolver,
    query_pipeline: QueryPipeline,
}

impl RapierWorld {
    pub fn new(settings: &PhysicsSettings) -> Self {
        let mut integration_parameters = IntegrationParameters::default();
        integration_parameters.dt = settings.fixed_time_step;
        integration_parameters.num_solver_iterations =
            NonZeroUsize::new(settings.solver_iterations).unwrap_or(NonZeroUsize::MIN);

        let [gx, gy, gz] = settings.gravity;
        debug!(
            "Creating rapier world: gravity ({}, {}, {}), {} solver iterations",
            gx, gy, gz, settings.solver_iterations
        );

        Self {
            gravity: Vector3::new(gx, gy, gz),
            integration_parameters,
            pipeline: PhysicsPipeline::new(),
            islands: IslandManager::new(),
            broad_phase: DefaultBroadPhase::new(),
            narrow_phase: NarrowPhase::new(),
            bodies: RigidBodySet::new(),
            colliders: ColliderSet::new(),
            impulse_joints: ImpulseJointSet::new(),
            multibody_joints: MultibodyJointSet::new(),
            ccd_solver: CCDSolver::new(),
            query_pipeline: QueryPipeline::new(),
        }
    }

    fn insert_fixed(&mut self, translation: Vec3, collider: Collider) -> BodyHandle {
        let body = RigidBodyBuilder::fixed()
            .translation(to_vector(translation))
            .build();
        let handle = self.bodies.insert(body);
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);
        pack(handle)
    }
}

impl Default for RapierWorld {
    fn default() -> Self {
        Self::new(&PhysicsSettings::default())
    }
}

impl PhysicsWorld for RapierWorld {
    fn add_dynamic_body(&mut self, desc: &DynamicBodyDesc) -> BodyHandle {
        let body = RigidBodyBuilder::dynamic()
            .position(to_isometry(desc.pose))
            .linvel(to_vector(desc.velocity.linear))
            .angvel(to_vector(desc.velocity.angular))
            .linear_damping(desc.linear_damping)
            .angular_damping(desc.angular_damping)
            .ccd_enabled(true)
            .build();
        let handle = self.bodies.insert(body);

        let vertices: Vec<Point<f32>> = desc
            .vertices
            .iter()
            .map(|v| Point::new(v.x, v.y, v.z))
            .collect();
        let collider = ColliderBuilder::trimesh(vertices, desc.triangles.clone())
            .mass(desc.mass)
            .friction(desc.friction)
            .restitution(desc.restitution)
            .build();
        self.colliders
            .insert_with_parent(collider, handle, &mut self.bodies);

        pack(handle)
    }

    fn add_static_box(&mut self, center: Vec3, half_extents: Vec3) -> BodyHandle {
        let collider =
            ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z).build();
        self.insert_fixed(center, collider)
    }

    fn add_ground(&mut self) -> BodyHandle {
        let collider = ColliderBuilder::halfspace(Vector3::y_axis()).build();
        self.insert_fixed(Vec3::ZERO, collider)
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(
            unpack(handle),
            &mut self.islands,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            true,
        );
    }

    fn step(&mut self, dt: f32) {
        self.integration_parameters.dt = dt;
        self.pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.islands,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.bodies,
            &mut self.colliders,
            &mut self.impulse_joints,
            &mut self.multibody_joints,
            &mut self.ccd_solver,
            Some(&mut self.query_pipeline),
            &(),
            &(),
        );
    }

    fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        self.bodies.get(unpack(handle)).map(|body| {
            let t = body.translation();
            Pose::new(Vec3::new(t.x, t.y, t.z), from_unit_quaternion(body.rotation()))
        })
    }

    fn velocity(&self, handle: BodyHandle) -> Option<BodyVelocity> {
        self.bodies.get(unpack(handle)).map(|body| {
            let (v, w) = (body.linvel(), body.angvel());
            BodyVelocity {
                linear: Vec3::new(v.x, v.y, v.z),
                angular: Vec3::new(w.x, w.y, w.z),
            }
        })
    }

    fn set_pose(&mut self, handle: BodyHandle, pose: Pose) {
        if let Some(body) = self.bodies.get_mut(unpack(handle)) {
            body.set_position(to_isometry(pose), true);
        }
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: BodyVelocity) {
        if let Some(body) = self.bodies.get_mut(unpack(handle)) {
            body.set_linvel(to_vector(velocity.linear), true);
            body.set_angvel(to_vector(velocity.angular), true);
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

fn pack(handle: RigidBodyHandle) -> BodyHandle {
    let (index, generation) = handle.into_raw_parts();
    BodyHandle(u64::from(index) | (u64::from(generation) << 32))
}

fn unpack(handle: BodyHandle) -> RigidBodyHandle {
    RigidBodyHandle::from_raw_parts(handle.0 as u32, (handle.0 >> 32) as u32)
}

fn to_vector(v: Vec3) -> Vector3<f32> {
    Vector3::new(v.x, v.y, v.z)
}

fn to_isometry(pose: Pose) -> Isometry3<f32> {
    let q = pose.rotation;
    Isometry3::from_parts(
        Translation3::from(to_vector(pose.position)),
        UnitQuaternion::from_quaternion(Quaternion::new(q.w, q.x, q.y, q.z)),
    )
}

fn from_unit_quaternion(q: &UnitQuaternion<f32>) -> Quat {
    let c = q.quaternion().coords;
    Quat::from_xyzw(c.x, c.y, c.z, c.w)
}

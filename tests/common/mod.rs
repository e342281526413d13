//! Shared fixtures for the integration tests

#![allow(dead_code)]

use std::collections::HashMap;

use bevy_math::{Quat, Vec3};
use dicetray::tray::{
    ArenaBounds, BodyHandle, BodyVelocity, DieId, DieKind, DynamicBodyDesc, PhysicsWorld, Pose,
    SceneSink, SimulationSession, TraySettings, Viewport,
};

#[derive(Clone, Debug)]
struct Body {
    pose: Pose,
    velocity: BodyVelocity,
    dynamic: bool,
    asleep: bool,
}

/// Gravity-only world: no contacts, bodies fall forever unless put to sleep.
#[derive(Debug)]
pub struct BallisticWorld {
    gravity: Vec3,
    bodies: HashMap<u64, Body>,
    next: u64,
    pub steps: u32,
}

impl BallisticWorld {
    pub fn new(gravity: Vec3) -> Self {
        Self {
            gravity,
            bodies: HashMap::new(),
            next: 0,
            steps: 0,
        }
    }

    fn insert(&mut self, body: Body) -> BodyHandle {
        let handle = self.next;
        self.next += 1;
        self.bodies.insert(handle, body);
        BodyHandle(handle)
    }

    /// Park a body on the table in the given orientation, motionless.
    pub fn settle(&mut self, handle: BodyHandle, rotation: Quat) {
        if let Some(body) = self.bodies.get_mut(&handle.0) {
            body.pose = Pose::new(Vec3::new(body.pose.position.x, 2.0, body.pose.position.z), rotation);
            body.velocity = BodyVelocity::default();
            body.asleep = true;
        }
    }

    pub fn static_count(&self) -> usize {
        self.bodies.values().filter(|b| !b.dynamic).count()
    }
}

impl Default for BallisticWorld {
    fn default() -> Self {
        Self::new(TraySettings::default().physics.gravity())
    }
}

impl PhysicsWorld for BallisticWorld {
    fn add_dynamic_body(&mut self, desc: &DynamicBodyDesc) -> BodyHandle {
        self.insert(Body {
            pose: desc.pose,
            velocity: desc.velocity,
            dynamic: true,
            asleep: false,
        })
    }

    fn add_static_box(&mut self, center: Vec3, _half_extents: Vec3) -> BodyHandle {
        self.insert(Body {
            pose: Pose::from_position(center),
            velocity: BodyVelocity::default(),
            dynamic: false,
            asleep: true,
        })
    }

    fn add_ground(&mut self) -> BodyHandle {
        self.add_static_box(Vec3::ZERO, Vec3::ZERO)
    }

    fn remove_body(&mut self, handle: BodyHandle) {
        self.bodies.remove(&handle.0);
    }

    fn step(&mut self, dt: f32) {
        self.steps += 1;
        for body in self.bodies.values_mut() {
            if !body.dynamic || body.asleep {
                continue;
            }
            body.velocity.linear += self.gravity * dt;
            body.pose.position += body.velocity.linear * dt;
        }
    }

    fn pose(&self, handle: BodyHandle) -> Option<Pose> {
        self.bodies.get(&handle.0).map(|b| b.pose)
    }

    fn velocity(&self, handle: BodyHandle) -> Option<BodyVelocity> {
        self.bodies.get(&handle.0).map(|b| b.velocity)
    }

    fn set_pose(&mut self, handle: BodyHandle, pose: Pose) {
        if let Some(body) = self.bodies.get_mut(&handle.0) {
            body.pose = pose;
        }
    }

    fn set_velocity(&mut self, handle: BodyHandle, velocity: BodyVelocity) {
        if let Some(body) = self.bodies.get_mut(&handle.0) {
            body.velocity = velocity;
            body.asleep = velocity == BodyVelocity::default();
        }
    }

    fn body_count(&self) -> usize {
        self.bodies.len()
    }
}

pub fn seeded_settings(seed: u64) -> TraySettings {
    TraySettings {
        seed: Some(seed),
        ..Default::default()
    }
}

pub fn ballistic_session<S: SceneSink>(scene: S) -> SimulationSession<BallisticWorld, S> {
    SimulationSession::new(
        BallisticWorld::default(),
        scene,
        seeded_settings(42),
        Viewport::default(),
    )
}

/// Rotation that turns the face labelled `value` towards +Y.
pub fn face_up<P: PhysicsWorld, S: SceneSink>(
    session: &SimulationSession<P, S>,
    id: DieId,
    value: u32,
) -> Quat {
    let die = session.dice().iter().find(|d| d.id == id).expect("die exists");
    let face = die
        .polyhedron
        .faces
        .iter()
        .find(|f| f.value == value)
        .expect("face with that value");
    Quat::from_rotation_arc(face.normal, Vec3::Y)
}

/// Put a die to rest showing `value`.
pub fn rest_showing<S: SceneSink>(
    session: &mut SimulationSession<BallisticWorld, S>,
    id: DieId,
    value: u32,
) {
    let rotation = face_up(session, id, value);
    let body = session
        .dice()
        .iter()
        .find(|d| d.id == id)
        .expect("die exists")
        .body;
    session.physics_mut().settle(body, rotation);
}

pub fn kinds<P: PhysicsWorld, S: SceneSink>(session: &SimulationSession<P, S>) -> Vec<DieKind> {
    session.dice().iter().map(|d| d.kind).collect()
}

/// Whether a point lies between the walls, seen from above.
pub fn inside_walls(bounds: &ArenaBounds, point: Vec3) -> bool {
    point.x.abs() <= bounds.half_width && point.z.abs() <= bounds.half_depth
}

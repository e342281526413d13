//! Turning built geometry into a launched rigid body

use bevy_math::Vec3;
use rand::Rng;

use crate::tray::physics::{BodyVelocity, DynamicBodyDesc, Pose};
use crate::tray::types::{ArenaBounds, DiceSettings, Polyhedron};

/// Initial pose and motion of a freshly spawned die
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Launch {
    pub pose: Pose,
    pub velocity: BodyVelocity,
}

/// Random drop point above the table with a toss and a spin.
pub fn launch_state<R: Rng + ?Sized>(
    bounds: &ArenaBounds,
    settings: &DiceSettings,
    rng: &mut R,
) -> Launch {
    let reach_x = (bounds.inner_half_width - settings.spawn_margin).max(0.0);
    let reach_z = (bounds.inner_half_depth - settings.spawn_margin).max(0.0);

    let position = Vec3::new(
        rng.gen_range(-1.0f32..=1.0) * reach_x,
        settings.spawn_height + rng.gen::<f32>() * settings.spawn_height_jitter,
        rng.gen_range(-1.0f32..=1.0) * reach_z,
    );

    let horizontal = settings.launch_horizontal_speed;
    let linear = Vec3::new(
        (rng.gen::<f32>() - 0.5) * horizontal,
        settings.launch_upward_speed + rng.gen::<f32>() * settings.launch_upward_jitter,
        (rng.gen::<f32>() - 0.5) * horizontal,
    );

    let spin = settings.launch_spin;
    let angular = Vec3::new(
        rng.gen::<f32>() * spin,
        rng.gen::<f32>() * spin,
        rng.gen::<f32>() * spin,
    );

    Launch {
        pose: Pose::from_position(position),
        velocity: BodyVelocity { linear, angular },
    }
}

/// Dynamic body using the die's own triangles as its collision shape.
pub fn body_desc(polyhedron: &Polyhedron, launch: Launch, settings: &DiceSettings) -> DynamicBodyDesc {
    DynamicBodyDesc {
        vertices: polyhedron.mesh.positions.clone(),
        triangles: polyhedron.mesh.triangles().collect(),
        pose: launch.pose,
        velocity: launch.velocity,
        mass: settings.mass,
        linear_damping: settings.linear_damping,
        angular_damping: settings.angular_damping,
        friction: settings.friction,
        restitution: settings.restitution,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tray::meshes::build_polyhedron;
    use crate::tray::types::DieKind;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn bounds(inner: f32) -> ArenaBounds {
        ArenaBounds {
            half_width: inner + 2.0,
            half_depth: inner + 2.0,
            inner_half_width: inner,
            inner_half_depth: inner,
        }
    }

    #[test]
    fn test_launch_stays_inside_the_spawn_region() {
        let settings = DiceSettings::default();
        let bounds = bounds(20.0);
        let mut rng = StdRng::seed_from_u64(11);
        for _ in 0..500 {
            let launch = launch_state(&bounds, &settings, &mut rng);
            let p = launch.pose.position;
            assert!(p.x.abs() <= 18.0 && p.z.abs() <= 18.0);
            assert!((10.0..=15.0).contains(&p.y));

            let v = launch.velocity.linear;
            assert!(v.x.abs() <= 5.0 && v.z.abs() <= 5.0);
            assert!((5.0..=10.0).contains(&v.y));
            let w = launch.velocity.angular;
            assert!(w.min_element() >= 0.0 && w.max_element() <= 10.0);
        }
    }

    #[test]
    fn test_tiny_arena_spawns_at_the_centre() {
        let settings = DiceSettings::default();
        let mut rng = StdRng::seed_from_u64(12);
        let launch = launch_state(&bounds(1.0), &settings, &mut rng);
        assert_eq!(launch.pose.position.x, 0.0);
        assert_eq!(launch.pose.position.z, 0.0);
    }

    #[test]
    fn test_body_desc_copies_the_mesh() {
        let settings = DiceSettings::default();
        let poly = build_polyhedron(DieKind::D6);
        let mut rng = StdRng::seed_from_u64(13);
        let launch = launch_state(&bounds(20.0), &settings, &mut rng);
        let desc = body_desc(&poly, launch, &settings);
        assert_eq!(desc.vertices.len(), poly.mesh.positions.len());
        assert_eq!(desc.triangles.len(), poly.mesh.triangle_count());
        assert_eq!(desc.mass, 1.0);
        assert_eq!(desc.linear_damping, 0.1);
        assert_eq!(desc.angular_damping, 0.2);
        assert_eq!(desc.pose, launch.pose);
    }
}

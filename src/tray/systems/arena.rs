//! Ground plane and walls sized to what the camera sees

use tracing::debug;

use crate::tray::physics::{BodyHandle, PhysicsWorld};
use crate::tray::types::{ArenaBounds, ArenaSettings, TopDownCamera, Viewport, WallSpec};

#[derive(Clone, Debug)]
pub struct Arena {
    settings: ArenaSettings,
    camera: TopDownCamera,
    bounds: ArenaBounds,
    ground: BodyHandle,
    walls: Vec<BodyHandle>,
}

impl Arena {
    pub fn build<P: PhysicsWorld + ?Sized>(
        physics: &mut P,
        settings: &ArenaSettings,
        viewport: Viewport,
    ) -> Self {
        let camera = TopDownCamera::new(settings, viewport);
        let mut arena = Self {
            settings: settings.clone(),
            camera,
            bounds: ArenaBounds::from_camera(&camera, settings.padding),
            ground: physics.add_ground(),
            walls: Vec::with_capacity(4),
        };
        arena.rebuild_walls(physics);
        arena
    }

    /// Recompute the camera aspect and replace all four walls.
    pub fn resize<P: PhysicsWorld + ?Sized>(&mut self, physics: &mut P, viewport: Viewport) {
        self.camera = TopDownCamera::new(&self.settings, viewport);
        self.bounds = ArenaBounds::from_camera(&self.camera, self.settings.padding);
        self.rebuild_walls(physics);
    }

    fn rebuild_walls<P: PhysicsWorld + ?Sized>(&mut self, physics: &mut P) {
        for wall in self.walls.drain(..) {
            physics.remove_body(wall);
        }
        for spec in self.wall_specs() {
            self.walls
                .push(physics.add_static_box(spec.center, spec.half_extents));
        }
        debug!(
            "Arena walls at half extents {:.2} x {:.2}",
            self.bounds.half_width, self.bounds.half_depth
        );
    }

    pub fn wall_specs(&self) -> [WallSpec; 4] {
        self.bounds.walls(
            self.settings.wall_half_thickness,
            self.settings.wall_half_height,
        )
    }

    pub fn bounds(&self) -> &ArenaBounds {
        &self.bounds
    }

    pub fn camera(&self) -> &TopDownCamera {
        &self.camera
    }

    pub fn ground(&self) -> BodyHandle {
        self.ground
    }

    pub fn walls(&self) -> &[BodyHandle] {
        &self.walls
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tray::physics::RapierWorld;

    #[test]
    fn test_build_adds_ground_and_four_walls() {
        let mut physics = RapierWorld::default();
        let arena = Arena::build(&mut physics, &ArenaSettings::default(), Viewport::default());
        assert_eq!(arena.walls().len(), 4);
        assert_eq!(physics.body_count(), 5);
        assert!(physics.pose(arena.ground()).is_some());
    }

    #[test]
    fn test_resize_replaces_every_wall() {
        let settings = ArenaSettings::default();
        let mut physics = RapierWorld::default();
        let mut arena = Arena::build(&mut physics, &settings, Viewport::default());
        let old_walls = arena.walls().to_vec();

        arena.resize(&mut physics, Viewport::new(600.0, 900.0).unwrap());

        assert_eq!(physics.body_count(), 5);
        for wall in &old_walls {
            assert!(physics.pose(*wall).is_none());
        }
        let bounds = arena.bounds();
        assert!((bounds.half_width - bounds.inner_half_width - settings.padding).abs() < 1e-4);
        assert!((bounds.half_depth - bounds.inner_half_depth - settings.padding).abs() < 1e-4);
        // Portrait viewport: the table is deeper than it is wide
        assert!(bounds.half_depth > bounds.half_width);

        let right = physics.pose(arena.walls()[1]).unwrap();
        assert!((right.position.x - bounds.half_width).abs() < 1e-4);
    }
}

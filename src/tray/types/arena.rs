//! Arena geometry derived from the top-down camera and the viewport

use bevy_math::Vec3;

use super::error::TrayError;
use super::settings::ArenaSettings;

/// Size of the drawing surface in pixels
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    pub fn new(width: f32, height: f32) -> Result<Self, TrayError> {
        let valid = |v: f32| v.is_finite() && v > 0.0;
        if valid(width) && valid(height) {
            Ok(Self { width, height })
        } else {
            Err(TrayError::InvalidViewport { width, height })
        }
    }

    pub fn aspect(&self) -> f32 {
        self.width / self.height
    }
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
        }
    }
}

/// Perspective camera hanging above the table and looking straight down
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TopDownCamera {
    pub fov_degrees: f32,
    pub height: f32,
    pub aspect: f32,
}

impl TopDownCamera {
    pub fn new(settings: &ArenaSettings, viewport: Viewport) -> Self {
        Self {
            fov_degrees: settings.camera_fov_degrees,
            height: settings.camera_height,
            aspect: viewport.aspect(),
        }
    }

    /// Half extents (x, z) of the table area visible at floor level.
    pub fn visible_half_extents(&self) -> (f32, f32) {
        let half_depth = (self.fov_degrees.to_radians() / 2.0).tan() * self.height;
        (half_depth * self.aspect, half_depth)
    }
}

/// Wall placement and the spawn region inside it
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ArenaBounds {
    pub half_width: f32,
    pub half_depth: f32,
    pub inner_half_width: f32,
    pub inner_half_depth: f32,
}

impl ArenaBounds {
    pub fn from_camera(camera: &TopDownCamera, padding: f32) -> Self {
        let (visible_w, visible_d) = camera.visible_half_extents();
        Self {
            half_width: visible_w - padding,
            half_depth: visible_d - padding,
            inner_half_width: visible_w - padding * 2.0,
            inner_half_depth: visible_d - padding * 2.0,
        }
    }

    /// The four wall boxes: left, right, front, back.
    pub fn walls(&self, half_thickness: f32, half_height: f32) -> [WallSpec; 4] {
        let side = Vec3::new(half_thickness, half_height, self.half_depth + half_thickness);
        let end = Vec3::new(self.half_width + half_thickness, half_height, half_thickness);
        [
            WallSpec {
                center: Vec3::new(-self.half_width, half_height, 0.0),
                half_extents: side,
            },
            WallSpec {
                center: Vec3::new(self.half_width, half_height, 0.0),
                half_extents: side,
            },
            WallSpec {
                center: Vec3::new(0.0, half_height, -self.half_depth),
                half_extents: end,
            },
            WallSpec {
                center: Vec3::new(0.0, half_height, self.half_depth),
                half_extents: end,
            },
        ]
    }
}

/// A static box collider
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WallSpec {
    pub center: Vec3,
    pub half_extents: Vec3,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_rejects_degenerate_sizes() {
        assert!(Viewport::new(800.0, 600.0).is_ok());
        assert!(Viewport::new(0.0, 600.0).is_err());
        assert!(Viewport::new(800.0, -1.0).is_err());
        assert!(Viewport::new(f32::NAN, 600.0).is_err());
        assert!(Viewport::new(800.0, f32::INFINITY).is_err());
    }

    #[test]
    fn test_visible_extents_scale_with_aspect() {
        let settings = ArenaSettings::default();
        let square = TopDownCamera::new(&settings, Viewport::new(600.0, 600.0).unwrap());
        let wide = TopDownCamera::new(&settings, Viewport::new(1200.0, 600.0).unwrap());
        let (sw, sd) = square.visible_half_extents();
        let (ww, wd) = wide.visible_half_extents();
        assert!((sw - sd).abs() < 1e-4);
        assert!((wd - sd).abs() < 1e-4);
        assert!((ww - 2.0 * sw).abs() < 1e-3);
        // tan(22.5 deg) * 55
        assert!((sd - 22.781).abs() < 1e-2);
    }

    #[test]
    fn test_walls_sit_on_the_bounds() {
        let bounds = ArenaBounds {
            half_width: 30.0,
            half_depth: 20.0,
            inner_half_width: 28.0,
            inner_half_depth: 18.0,
        };
        let walls = bounds.walls(2.0, 8.0);
        assert_eq!(walls[0].center, Vec3::new(-30.0, 8.0, 0.0));
        assert_eq!(walls[1].center, Vec3::new(30.0, 8.0, 0.0));
        assert_eq!(walls[2].center, Vec3::new(0.0, 8.0, -20.0));
        assert_eq!(walls[3].center, Vec3::new(0.0, 8.0, 20.0));
        assert_eq!(walls[0].half_extents, Vec3::new(2.0, 8.0, 22.0));
        assert_eq!(walls[2].half_extents, Vec3::new(32.0, 8.0, 2.0));
    }
}

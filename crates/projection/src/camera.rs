use abysspath_common::ScreenRect;
use glam::{Mat4, Vec2, Vec3, Vec4Swizzles};
use serde::{Deserialize, Serialize};

use crate::project::CameraProjection;

/// Look-at perspective camera over a pixel viewport.
///
/// Stands in for the host camera when there is no game to read from. World
/// space is Z-up, matching the host's terrain heights.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerspectiveCamera {
    pub eye: Vec3,
    pub target: Vec3,
    /// Vertical field of view in degrees.
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub viewport: ScreenRect,
}

impl Default for PerspectiveCamera {
    fn default() -> Self {
        Self {
            eye: Vec3::new(0.0, -1000.0, 1250.0),
            target: Vec3::ZERO,
            fov_degrees: 60.0,
            near: 1.0,
            far: 20_000.0,
            viewport: ScreenRect::new(0.0, 0.0, 1920.0, 1080.0),
        }
    }
}

impl PerspectiveCamera {
    pub fn aspect(&self) -> f32 {
        if self.viewport.height > 0.0 {
            self.viewport.width / self.viewport.height
        } else {
            1.0
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.eye, self.target, Vec3::Z)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(
            self.fov_degrees.to_radians(),
            self.aspect(),
            self.near,
            self.far,
        )
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }
}

impl CameraProjection for PerspectiveCamera {
    /// Points at or behind the eye collapse to the origin.
    fn world_to_screen(&self, world: Vec3) -> Vec2 {
        let clip = self.view_projection() * world.extend(1.0);
        if clip.w <= f32::EPSILON {
            return Vec2::ZERO;
        }
        let ndc = clip.xy() / clip.w;
        let vp = &self.viewport;
        Vec2::new(
            vp.x + (ndc.x + 1.0) * 0.5 * vp.width,
            vp.y + (1.0 - ndc.y) * 0.5 * vp.height,
        )
    }
}

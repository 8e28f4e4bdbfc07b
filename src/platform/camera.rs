//! Camera collaborator
//!
//! Viewport coordinates are normalized: (0, 0) is the bottom-left corner of
//! the visible frame and (1, 1) the top-right. The `z` component of a
//! viewport point is a depth offset along the view axis from the camera.

use glam::{Vec2, Vec3};
use serde::{Deserialize, Serialize};

/// Viewport -> world conversion supplied by the rendering layer
pub trait CameraView {
    /// Map a normalized `(x, y, depth)` viewport point to world space
    fn viewport_to_world(&self, viewport: Vec3) -> Vec3;

    /// Camera position in world space
    fn position(&self) -> Vec3;
}

/// Axis-aligned orthographic camera looking along +z.
/// Depth only shifts the result along the view axis.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrthographicCamera {
    pub position: Vec3,
    /// Half of the visible world height
    pub half_height: f32,
    /// Width / height
    pub aspect: f32,
}

impl Default for OrthographicCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -10.0),
            half_height: 5.0,
            aspect: 9.0 / 16.0,
        }
    }
}

impl OrthographicCamera {
    pub fn new(position: Vec3, half_height: f32, aspect: f32) -> Self {
        Self {
            position,
            half_height,
            aspect,
        }
    }

    /// Visible world extent (width, height)
    pub fn extent(&self) -> Vec2 {
        Vec2::new(self.half_height * 2.0 * self.aspect, self.half_height * 2.0)
    }

    /// Inverse of `viewport_to_world` for the x/y plane
    pub fn world_to_viewport(&self, world: Vec2) -> Vec2 {
        (world - self.position.truncate()) / self.extent() + Vec2::splat(0.5)
    }
}

impl CameraView for OrthographicCamera {
    fn viewport_to_world(&self, viewport: Vec3) -> Vec3 {
        let offset = (viewport.truncate() - Vec2::splat(0.5)) * self.extent();
        Vec3::new(
            self.position.x + offset.x,
            self.position.y + offset.y,
            self.position.z + viewport.z,
        )
    }

    fn position(&self) -> Vec3 {
        self.position
    }
}

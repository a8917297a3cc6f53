//! Perspective camera state and view/projection math.

use glam::{Mat4, Vec2, Vec3};

use crate::options::CameraOptions;
use crate::scene::Ray;

/// Perspective camera defined by eye position, look-at target, and
/// projection parameters.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Eye (camera) position in world space.
    pub eye: Vec3,
    /// Look-at target position.
    pub target: Vec3,
    /// Up direction vector.
    pub up: Vec3,
    /// Viewport aspect ratio (width / height).
    pub aspect: f32,
    /// Vertical field of view in degrees.
    pub fovy: f32,
    /// Near clipping plane distance.
    pub znear: f32,
    /// Far clipping plane distance.
    pub zfar: f32,
}

impl Camera {
    /// Create a camera facing the wall plane from the configured initial
    /// distance.
    #[must_use]
    pub fn new(viewport: Vec2, options: &CameraOptions) -> Self {
        Self {
            eye: Vec3::new(0.0, 0.0, options.initial_distance),
            target: Vec3::ZERO,
            up: Vec3::Y,
            aspect: viewport.x / viewport.y,
            fovy: options.fovy,
            znear: options.znear,
            zfar: options.zfar,
        }
    }

    /// Build the combined view-projection matrix.
    #[must_use]
    pub fn view_proj(&self) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye, self.target, self.up);
        let proj = Mat4::perspective_rh(
            self.fovy.to_radians(),
            self.aspect,
            self.znear,
            self.zfar,
        );
        proj * view
    }

    /// Update the aspect ratio after a viewport resize.
    pub fn resize(&mut self, width: f32, height: f32) {
        self.aspect = width / height;
    }

    /// Build a world-space picking ray from screen coordinates.
    ///
    /// `screen` is in pixels with the origin at the top-left; the ray is
    /// unprojected through the near and far planes.
    #[must_use]
    pub fn ray_from_screen(&self, screen: Vec2, viewport: Vec2) -> Ray {
        let ndc = Vec2::new(
            screen.x / viewport.x * 2.0 - 1.0,
            1.0 - screen.y / viewport.y * 2.0,
        );
        let inv = self.view_proj().inverse();
        let near = inv.project_point3(Vec3::new(ndc.x, ndc.y, 0.0));
        let far = inv.project_point3(Vec3::new(ndc.x, ndc.y, 1.0));
        Ray {
            origin: near,
            dir: (far - near).normalize(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_camera() -> Camera {
        Camera::new(Vec2::new(1280.0, 720.0), &CameraOptions::default())
    }

    #[test]
    fn test_center_ray_points_at_target() {
        let camera = test_camera();
        let ray = camera.ray_from_screen(
            Vec2::new(640.0, 360.0),
            Vec2::new(1280.0, 720.0),
        );
        // Camera sits on +Z looking at the origin: the center ray goes -Z.
        assert!(ray.dir.z < -0.999);
        assert!(ray.dir.x.abs() < 1e-3);
        assert!(ray.dir.y.abs() < 1e-3);
    }

    #[test]
    fn test_left_half_ray_leans_left() {
        let camera = test_camera();
        let ray = camera.ray_from_screen(
            Vec2::new(100.0, 360.0),
            Vec2::new(1280.0, 720.0),
        );
        assert!(ray.dir.x < 0.0);
    }

    #[test]
    fn test_ray_origin_near_the_near_plane() {
        let camera = test_camera();
        let ray = camera.ray_from_screen(
            Vec2::new(640.0, 360.0),
            Vec2::new(1280.0, 720.0),
        );
        let from_eye = (ray.origin - camera.eye).length();
        assert!((from_eye - camera.znear).abs() < 1.0);
    }
}

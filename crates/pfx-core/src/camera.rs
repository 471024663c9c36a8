//! Perspective camera used for the scene render and screen-space projection.

use glam::{EulerRot, Mat4, Quat, Vec3};

/// Default vertical field of view in degrees.
pub const DEFAULT_FOV_DEGREES: f32 = 60.0;
/// Default near clip distance.
pub const DEFAULT_NEAR_CLIP: f32 = 1.0;
/// Default far clip distance.
pub const DEFAULT_FAR_CLIP: f32 = 10000.0;

/// Right-handed perspective camera looking down its local -Z axis.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    position: Vec3,
    /// Pitch (x), yaw (y) and roll (z) in radians
    rotation: Vec3,
    fov_y: f32,
    aspect: f32,
    near: f32,
    far: f32,
}

impl Camera {
    /// Creates a camera at the origin looking down -Z.
    pub fn new(aspect: f32) -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Vec3::ZERO,
            fov_y: DEFAULT_FOV_DEGREES.to_radians(),
            aspect,
            near: DEFAULT_NEAR_CLIP,
            far: DEFAULT_FAR_CLIP,
        }
    }

    pub fn position(&self) -> Vec3 {
        self.position
    }

    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Pitch, yaw, roll in radians.
    pub fn rotation(&self) -> Vec3 {
        self.rotation
    }

    pub fn set_rotation(&mut self, rotation: Vec3) {
        self.rotation = rotation;
    }

    /// Turns the camera to face `target`, clearing roll.
    pub fn look_at(&mut self, target: Vec3) {
        let dir = (target - self.position).normalize_or_zero();
        if dir == Vec3::ZERO {
            return;
        }
        let yaw = (-dir.x).atan2(-dir.z);
        let pitch = dir.y.clamp(-1.0, 1.0).asin();
        self.rotation = Vec3::new(pitch, yaw, 0.0);
    }

    /// Vertical field of view in radians.
    pub fn fov_y(&self) -> f32 {
        self.fov_y
    }

    pub fn set_fov_degrees(&mut self, degrees: f32) {
        self.fov_y = degrees.to_radians();
    }

    pub fn aspect(&self) -> f32 {
        self.aspect
    }

    pub fn update_aspect(&mut self, aspect: f32) {
        self.aspect = aspect;
    }

    pub fn near_clip(&self) -> f32 {
        self.near
    }

    pub fn set_near(&mut self, near: f32) {
        self.near = near;
    }

    pub fn far_clip(&self) -> f32 {
        self.far
    }

    pub fn set_far(&mut self, far: f32) {
        self.far = far;
    }

    fn orientation(&self) -> Quat {
        Quat::from_euler(
            EulerRot::YXZ,
            self.rotation.y,
            self.rotation.x,
            self.rotation.z,
        )
    }

    /// Unit vector the camera looks along.
    pub fn forward(&self) -> Vec3 {
        self.orientation() * Vec3::NEG_Z
    }

    /// Camera-to-world transform.
    pub fn world_transform(&self) -> Mat4 {
        Mat4::from_rotation_translation(self.orientation(), self.position)
    }

    /// World-to-camera transform.
    pub fn view(&self) -> Mat4 {
        self.world_transform().inverse()
    }

    /// Perspective projection with a 0..1 depth range.
    pub fn projection(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov_y, self.aspect, self.near, self.far)
    }

    pub fn view_projection(&self) -> Mat4 {
        self.projection() * self.view()
    }

    /// Distance of `point` along the view direction (negative if behind).
    pub fn view_distance(&self, point: Vec3) -> f32 {
        -self.view().transform_point3(point).z
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new(16.0 / 9.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_looks_down_negative_z() {
        let camera = Camera::new(1.0);
        let forward = camera.forward();
        assert_relative_eq!(forward.z, -1.0, epsilon = 1e-6);
        assert_relative_eq!(camera.view_distance(Vec3::new(0.0, 0.0, -10.0)), 10.0, epsilon = 1e-5);
        assert!(camera.view_distance(Vec3::new(0.0, 0.0, 5.0)) < 0.0);
    }

    #[test]
    fn test_look_at() {
        let mut camera = Camera::new(1.0);
        camera.set_position(Vec3::new(10.0, 5.0, 0.0));
        let target = Vec3::new(-10.0, 0.0, 20.0);
        camera.look_at(target);

        let expected = (target - camera.position()).normalize();
        let forward = camera.forward();
        assert_relative_eq!(forward.x, expected.x, epsilon = 1e-5);
        assert_relative_eq!(forward.y, expected.y, epsilon = 1e-5);
        assert_relative_eq!(forward.z, expected.z, epsilon = 1e-5);
    }

    #[test]
    fn test_view_inverts_world() {
        let mut camera = Camera::new(1.5);
        camera.set_position(Vec3::new(1.0, 2.0, 3.0));
        camera.set_rotation(Vec3::new(0.2, 1.1, 0.0));
        let product = camera.world_transform() * camera.view();
        assert!(product.abs_diff_eq(Mat4::IDENTITY, 1e-5));
    }
}

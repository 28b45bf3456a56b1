use glam::{Mat4, Vec3};
use lumen_components::components::Transform;
use lumen_ecs::Component;

use crate::config::CameraConfig;

pub struct CameraBuilder {
  target: Vec3,
  fov: f32,
  aspect_ratio: f32,
  near: f32,
  far: f32,
}

impl CameraBuilder {
  pub fn target(mut self, target: Vec3) -> Self {
    self.target = target;
    self
  }

  /// Degrees, clamped to `(0, 180)`.
  pub fn fov(mut self, fov: f32) -> Self {
    self.fov = fov.clamp(0.01, 179.99);
    self
  }

  pub fn aspect_ratio(mut self, aspect_ratio: f32) -> Self {
    self.aspect_ratio = aspect_ratio;
    self
  }

  pub fn near(mut self, near: f32) -> Self {
    self.near = near.max(f32::EPSILON);
    self
  }

  pub fn far(mut self, far: f32) -> Self {
    self.far = far;
    self
  }

  pub fn build(self) -> Camera {
    Camera {
      target: self.target,
      fov: self.fov,
      aspect_ratio: self.aspect_ratio,
      near: self.near,
      far: self.far.max(self.near + f32::EPSILON),
    }
  }
}

/// Perspective camera looking from its entity's position at `target`.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Camera {
  pub target: Vec3,
  fov: f32,
  aspect_ratio: f32,
  near: f32,
  far: f32,
}

impl Camera {
  pub fn builder() -> CameraBuilder {
    Self::builder_from(&CameraConfig::default())
  }

  pub fn builder_from(config: &CameraConfig) -> CameraBuilder {
    CameraBuilder {
      target: Vec3::ZERO,
      fov: config.fov,
      aspect_ratio: config.aspect_ratio,
      near: config.near,
      far: config.far,
    }
  }

  pub fn fov(&self) -> f32 {
    self.fov
  }

  pub fn set_aspect_ratio(&mut self, aspect_ratio: f32) {
    self.aspect_ratio = aspect_ratio;
  }

  pub fn view_matrix(&self, transform: &Transform) -> Mat4 {
    let eye = transform.position;
    let direction = self.target - eye;
    if direction.length_squared() <= f32::EPSILON {
      return Mat4::look_to_rh(eye, transform.direction(), Vec3::Y);
    }
    Mat4::look_at_rh(eye, self.target, Vec3::Y)
  }

  pub fn projection_matrix(&self) -> Mat4 {
    Mat4::perspective_rh(self.fov.to_radians(), self.aspect_ratio, self.near, self.far)
  }
}

#[cfg(test)]
mod test {
  use glam::{Vec3, Vec4Swizzles};
  use lumen_components::components::Transform;

  use super::Camera;

  #[test]
  fn target_lands_on_negative_z() {
    let camera = Camera::builder().target(Vec3::ZERO).build();
    let transform = Transform::from_position(Vec3::new(0.0, 0.0, 5.0));

    let target = camera.view_matrix(&transform) * Vec3::ZERO.extend(1.0);
    assert!((target.xyz() - Vec3::new(0.0, 0.0, -5.0)).length() < 1e-5);
  }

  #[test]
  fn eye_on_target_looks_along_transform_direction() {
    let camera = Camera::builder().target(Vec3::ONE).build();
    // +90 degrees about Y turns the view from -Z to -X
    let transform = Transform::from_position(Vec3::ONE).with_rotation(Vec3::new(0.0, 90.0, 0.0));
    let view = camera.view_matrix(&transform);

    assert!(!view.is_nan());
    let ahead = view * (Vec3::ONE + transform.direction() * 2.0).extend(1.0);
    assert!((ahead.xyz() - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
  }

  #[test]
  fn builder_clamps() {
    let camera = Camera::builder().fov(500.0).near(1.0).far(0.5).build();
    assert!(camera.fov() < 180.0);
    assert!(!camera.projection_matrix().is_nan());
  }
}

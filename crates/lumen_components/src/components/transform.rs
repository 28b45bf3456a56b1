use glam::{Mat3, Mat4, Vec3};
use lumen_ecs::Component;

/// Forward axis of an unrotated light or camera.
pub const FORWARD: Vec3 = Vec3::NEG_Z;

/// Placement of an entity in world space.
///
/// `rotation` holds Euler angles in degrees, one per axis.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct Transform {
  pub position: Vec3,
  pub rotation: Vec3,
  pub scale: Vec3,
}

impl Transform {
  pub fn from_position(position: Vec3) -> Self {
    Self {
      position,
      ..Default::default()
    }
  }

  pub fn with_rotation(mut self, degrees: Vec3) -> Self {
    self.rotation = degrees;
    self
  }

  pub fn with_scale(mut self, scale: Vec3) -> Self {
    self.scale = scale;
    self
  }

  /// Model matrix `T * Rx * Ry * Rz * S`.
  pub fn matrix(&self) -> Mat4 {
    let radians = self.radians();

    Mat4::from_translation(self.position)
      * Mat4::from_rotation_x(radians.x)
      * Mat4::from_rotation_y(radians.y)
      * Mat4::from_rotation_z(radians.z)
      * Mat4::from_scale(self.scale)
  }

  /// Direction the entity faces, `Rz * Ry * Rx * (0, 0, -1)`.
  pub fn direction(&self) -> Vec3 {
    let radians = self.radians();

    let rotation = Mat3::from_rotation_z(radians.z)
      * Mat3::from_rotation_y(radians.y)
      * Mat3::from_rotation_x(radians.x);
    rotation * FORWARD
  }

  #[inline]
  fn radians(&self) -> Vec3 {
    Vec3::new(
      self.rotation.x.to_radians(),
      self.rotation.y.to_radians(),
      self.rotation.z.to_radians(),
    )
  }
}

impl Default for Transform {
  fn default() -> Self {
    Self {
      position: Vec3::ZERO,
      rotation: Vec3::ZERO,
      scale: Vec3::ONE,
    }
  }
}

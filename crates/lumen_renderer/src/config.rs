use crate::lighting::{LightingError, LightingLayout};

pub const MAX_POINT_LIGHTS: u32 = 128;
pub const MAX_SPOT_LIGHTS: u32 = 128;

pub const MATRICES_BUFFER: &str = "matrices";
pub const LIGHTING_BUFFER: &str = "lighting";
pub const MATRICES_BLOCK: &str = "Matrices";
pub const LIGHTING_BLOCK: &str = "Lighting";
/// View and projection matrices, one mat4 each.
pub const MATRICES_SIZE: usize = 128;

#[derive(Debug, Clone)]
pub struct LightingConfig {
  pub max_point_lights: u32,
  pub max_spot_lights: u32,
  pub buffer: String,
  pub block: String,
}

impl LightingConfig {
  pub fn set_max_point_lights(mut self, max_point_lights: u32) -> Self {
    self.max_point_lights = max_point_lights;
    self
  }

  pub fn set_max_spot_lights(mut self, max_spot_lights: u32) -> Self {
    self.max_spot_lights = max_spot_lights;
    self
  }

  pub fn set_buffer(mut self, buffer: impl Into<String>) -> Self {
    self.buffer = buffer.into();
    self
  }

  pub fn set_block(mut self, block: impl Into<String>) -> Self {
    self.block = block.into();
    self
  }

  pub fn layout(&self) -> Result<LightingLayout, LightingError> {
    LightingLayout::new(self.max_point_lights, self.max_spot_lights)
  }
}

impl Default for LightingConfig {
  fn default() -> Self {
    Self {
      max_point_lights: MAX_POINT_LIGHTS,
      max_spot_lights: MAX_SPOT_LIGHTS,
      buffer: LIGHTING_BUFFER.into(),
      block: LIGHTING_BLOCK.into(),
    }
  }
}

#[derive(Debug, Clone)]
pub struct CameraConfig {
  /// Vertical field of view in degrees.
  pub fov: f32,
  pub aspect_ratio: f32,
  pub near: f32,
  pub far: f32,
  pub buffer: String,
  pub block: String,
}

impl CameraConfig {
  pub fn set_fov(mut self, fov: f32) -> Self {
    self.fov = fov;
    self
  }

  pub fn set_aspect_ratio(mut self, aspect_ratio: f32) -> Self {
    self.aspect_ratio = aspect_ratio;
    self
  }

  pub fn set_clip_planes(mut self, near: f32, far: f32) -> Self {
    self.near = near;
    self.far = far;
    self
  }

  pub fn set_buffer(mut self, buffer: impl Into<String>) -> Self {
    self.buffer = buffer.into();
    self
  }

  pub fn set_block(mut self, block: impl Into<String>) -> Self {
    self.block = block.into();
    self
  }
}

impl Default for CameraConfig {
  fn default() -> Self {
    Self {
      fov: 60.0,
      aspect_ratio: 800.0 / 600.0,
      near: 0.1,
      far: 100.0,
      buffer: MATRICES_BUFFER.into(),
      block: MATRICES_BLOCK.into(),
    }
  }
}

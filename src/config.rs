use lumen_renderer::config::{CameraConfig, LightingConfig};

#[derive(Debug, Clone, Default)]
pub struct SceneConfig {
  pub lighting: LightingConfig,
  pub camera: CameraConfig,
}

impl SceneConfig {
  pub fn set_lighting(mut self, lighting: LightingConfig) -> Self {
    self.lighting = lighting;
    self
  }

  pub fn set_camera(mut self, camera: CameraConfig) -> Self {
    self.camera = camera;
    self
  }
}

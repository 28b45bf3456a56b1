use lumen_components::components::Transform;
use lumen_ecs::{components::ColumnAccess, store::ComponentStore};

use crate::{
  config::{CameraConfig, LightingConfig},
  ecs::components::camera::Camera,
  lighting::LightingLayout,
  memory::{BufferError, BufferRegistry},
};

/// Uploads the view and projection of the active camera.
///
/// The active camera is the first `{Transform, Camera}` entity in view order.
pub struct CameraSystem {
  matrices: String,
  lighting: String,
}

impl CameraSystem {
  pub fn new(camera: &CameraConfig, lighting: &LightingConfig) -> Self {
    Self {
      matrices: camera.buffer.clone(),
      lighting: lighting.buffer.clone(),
    }
  }

  pub fn run<S>(&mut self, store: &S, buffers: &mut BufferRegistry) -> Result<(), BufferError>
  where
    S: ComponentStore + ColumnAccess<Transform> + ColumnAccess<Camera>,
  {
    let Some((_, (transform, camera))) = store.query::<(Transform, Camera)>().next() else {
      return Ok(());
    };

    let matrices = [
      camera.view_matrix(transform).to_cols_array(),
      camera.projection_matrix().to_cols_array(),
    ];
    buffers.retrieve_mut(&self.matrices)?.write_pod(0, &matrices)?;

    let view_position = transform.position.extend(1.0).to_array();
    buffers
      .retrieve_mut(&self.lighting)?
      .write_pod(LightingLayout::VIEW_POSITION_OFFSET, &view_position)?;

    Ok(())
  }
}

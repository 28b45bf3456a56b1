use anyhow::{Context, Error};
#[cfg(feature = "debug")]
use log::trace;
use lumen_components::components::Transform;
use lumen_ecs::{components::ColumnAccess, store::ComponentStore};

use crate::{
  backend::RenderBackend,
  ecs::components::renderer::{Mesh, Shader},
};

/// Issues one draw per `{Transform, Mesh, Shader}` entity.
#[derive(Debug, Default)]
pub struct RenderingSystem;

impl RenderingSystem {
  pub fn new() -> Self {
    Self
  }

  /// Returns the number of meshes drawn.
  pub fn run<S, B>(&mut self, store: &S, backend: &mut B) -> Result<usize, Error>
  where
    S: ComponentStore + ColumnAccess<Transform> + ColumnAccess<Mesh> + ColumnAccess<Shader>,
    B: RenderBackend + ?Sized,
  {
    let mut draws = 0;

    for (id, (transform, mesh, shader)) in store.query::<(Transform, Mesh, Shader)>() {
      #[cfg(feature = "debug")]
      trace!("Drawing Entity {}", id);

      draw(backend, transform, mesh, shader)
        .with_context(|| format!("Failed to draw Entity {}", id))?;
      draws += 1;
    }

    Ok(draws)
  }
}

fn draw<B: RenderBackend + ?Sized>(
  backend: &mut B,
  transform: &Transform,
  mesh: &Mesh,
  shader: &Shader,
) -> Result<(), Error> {
  backend.use_shader(shader.shader)?;
  backend.set_model_matrix(shader.shader, transform.matrix())?;
  backend.draw_mesh(mesh.model, shader.shader)
}

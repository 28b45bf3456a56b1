use lumen_ecs::error::{EcsError, ErrorKind};
use lumen_renderer::{lighting::LightingError, memory::BufferError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SceneError {
  #[error(transparent)]
  Ecs(#[from] EcsError),
  #[error(transparent)]
  Buffer(#[from] BufferError),
  #[error(transparent)]
  Lighting(#[from] LightingError),
  #[error(transparent)]
  Render(#[from] anyhow::Error),
  #[error("System {0} is not scheduled")]
  SystemNotFound(&'static str),
}

impl SceneError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      SceneError::Ecs(err) => err.kind(),
      SceneError::Buffer(err) => err.kind(),
      SceneError::Lighting(err) => err.kind(),
      SceneError::Render(_) => ErrorKind::InvalidState,
      SceneError::SystemNotFound(_) => ErrorKind::NotFound,
    }
  }
}

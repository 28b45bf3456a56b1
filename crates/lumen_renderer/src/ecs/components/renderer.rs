use lumen_ecs::Component;

use crate::backend::{ModelId, ShaderId};

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mesh {
  pub model: ModelId,
}

#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct Shader {
  pub shader: ShaderId,
}

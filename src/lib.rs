pub mod config;
pub mod error;
pub mod scene;

pub use glam as math;
pub use log;
pub use lumen_components as components;
pub use lumen_ecs as ecs;
pub use lumen_renderer as renderer;

pub mod prelude {
  pub use crate::{
    config::SceneConfig,
    error::SceneError,
    scene::{Scene, SceneStore},
  };
  pub use lumen_components::components::{Identity, Tag, Transform};
  pub use lumen_ecs::prelude::*;
  pub use lumen_renderer::{
    backend::{HeadlessBackend, ModelId, RenderBackend, ShaderId},
    ecs::{
      components::{Camera, Light, Mesh, Shader},
      systems::LightUpdateType,
    },
  };
}

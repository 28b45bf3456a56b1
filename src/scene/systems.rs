#[cfg(feature = "debug")]
use log::trace;
use lumen_ecs::scheduler::System;
use lumen_renderer::{
  backend::RenderBackend,
  ecs::systems::{CameraSystem, LightingSystem, RenderingSystem},
  memory::BufferRegistry,
};

use crate::error::SceneError;

use super::store::SceneStore;

pub const CAMERA_SYSTEM: &str = "camera";
pub const LIGHTING_SYSTEM: &str = "lighting";
pub const RENDERING_SYSTEM: &str = "rendering";

/// State the scene systems run against.
pub struct SceneContext<B> {
  pub store: SceneStore,
  pub buffers: BufferRegistry,
  pub backend: B,
}

pub enum SceneSystem {
  Camera(CameraSystem),
  Lighting(LightingSystem),
  Rendering(RenderingSystem),
}

impl<B: RenderBackend> System<SceneContext<B>> for SceneSystem {
  type Error = SceneError;

  fn name(&self) -> &'static str {
    match self {
      SceneSystem::Camera(_) => CAMERA_SYSTEM,
      SceneSystem::Lighting(_) => LIGHTING_SYSTEM,
      SceneSystem::Rendering(_) => RENDERING_SYSTEM,
    }
  }

  fn run(&mut self, ctx: &mut SceneContext<B>, _dt: f64) -> Result<(), SceneError> {
    match self {
      SceneSystem::Camera(system) => system.run(&ctx.store, &mut ctx.buffers)?,
      SceneSystem::Lighting(system) => system.run(&ctx.store, &mut ctx.buffers)?,
      SceneSystem::Rendering(system) => {
        let _draws = system.run(&ctx.store, &mut ctx.backend)?;

        #[cfg(feature = "debug")]
        trace!("Rendered {} Meshes", _draws);
      }
    }

    Ok(())
  }
}

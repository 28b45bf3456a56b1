use log::{debug, error};
use lumen_components::components::{Identity, Tag, Transform};
use lumen_ecs::{
  components::{ColumnAccess, Component},
  scheduler::Scheduler,
  store::ComponentStore,
  EntityId,
};
use lumen_renderer::{
  backend::{RenderBackend, ShaderId},
  config::MATRICES_SIZE,
  ecs::{
    components::Camera,
    systems::{CameraSystem, LightUpdateType, LightingSystem, RenderingSystem},
  },
  memory::{BufferError, BufferRegistry, UniformBuffer},
};

use crate::{config::SceneConfig, error::SceneError};

mod store;
mod systems;

pub use store::SceneStore;
pub use systems::{SceneContext, SceneSystem, CAMERA_SYSTEM, LIGHTING_SYSTEM, RENDERING_SYSTEM};

/// Entities, their uniform buffers, the render backend and the systems tying
/// them together.
pub struct Scene<B: RenderBackend> {
  context: SceneContext<B>,
  scheduler: Scheduler<SceneContext<B>, SceneSystem>,
  config: SceneConfig,
}

impl<B: RenderBackend> Scene<B> {
  /// Creates the matrices and lighting buffers in host memory.
  pub fn new(config: SceneConfig, backend: B) -> Result<Self, SceneError> {
    let mut buffers = BufferRegistry::new();

    let mut matrices = UniformBuffer::configure(config.camera.block.clone(), MATRICES_SIZE);
    matrices.allocate()?;
    buffers.register(config.camera.buffer.clone(), matrices);

    let mut lighting =
      UniformBuffer::configure(config.lighting.block.clone(), config.lighting.layout()?.size());
    lighting.allocate()?;
    buffers.register(config.lighting.buffer.clone(), lighting);

    Self::with_buffers(config, backend, buffers)
  }

  /// Uses buffers prepared by the caller, for example on a Vulkan device.
  pub fn with_buffers(
    config: SceneConfig,
    backend: B,
    buffers: BufferRegistry,
  ) -> Result<Self, SceneError> {
    check_size(&buffers, &config.camera.buffer, MATRICES_SIZE)?;
    check_size(&buffers, &config.lighting.buffer, config.lighting.layout()?.size())?;

    let mut builder = Scheduler::<SceneContext<B>, SceneSystem>::builder();
    builder
      .add_system(SceneSystem::Camera(CameraSystem::new(
        &config.camera,
        &config.lighting,
      )))
      .add_system(SceneSystem::Lighting(LightingSystem::new(&config.lighting)?))
      .add_system(SceneSystem::Rendering(RenderingSystem::new()));

    debug!("Scene initialized");

    Ok(Self {
      context: SceneContext {
        store: SceneStore::default(),
        buffers,
        backend,
      },
      scheduler: builder.build(),
      config,
    })
  }

  /// Creates an entity with an [`Identity`] and a [`Tag`] named `name`.
  pub fn create_entity(&mut self, name: impl Into<String>) -> Result<EntityId, SceneError> {
    let store = &mut self.context.store;
    let id = store.create_entity();
    store.add_component(id, Identity::new())?;
    store.add_component(id, Tag::new(name))?;
    Ok(id)
  }

  /// Creates an entity with a camera built from the scene's camera settings.
  pub fn create_camera(
    &mut self,
    name: impl Into<String>,
    transform: Transform,
    target: glam::Vec3,
  ) -> Result<EntityId, SceneError> {
    let id = self.create_entity(name)?;
    let camera = Camera::builder_from(&self.config.camera).target(target).build();
    self.context.store.add_component(id, transform)?;
    self.context.store.add_component(id, camera)?;
    Ok(id)
  }

  pub fn destroy_entity(&mut self, id: EntityId) -> Result<(), SceneError> {
    Ok(self.context.store.destroy_entity(id)?)
  }

  pub fn add_component<C: Component>(
    &mut self,
    id: EntityId,
    component: C,
  ) -> Result<&mut C, SceneError>
  where
    SceneStore: ColumnAccess<C>,
  {
    Ok(self.context.store.add_component(id, component)?)
  }

  pub fn get_component<C: Component>(&self, id: EntityId) -> Result<&C, SceneError>
  where
    SceneStore: ColumnAccess<C>,
  {
    Ok(self.context.store.get_component(id)?)
  }

  pub fn get_component_mut<C: Component>(&mut self, id: EntityId) -> Result<&mut C, SceneError>
  where
    SceneStore: ColumnAccess<C>,
  {
    Ok(self.context.store.get_component_mut(id)?)
  }

  pub fn remove_component<C: Component>(&mut self, id: EntityId) -> Result<C, SceneError>
  where
    SceneStore: ColumnAccess<C>,
  {
    Ok(self.context.store.remove_component(id)?)
  }

  pub fn has_component<C: Component>(&self, id: EntityId) -> bool
  where
    SceneStore: ColumnAccess<C>,
  {
    self.context.store.has_component::<C>(id)
  }

  /// Runs camera, lighting and rendering once. A failing system ends the tick
  /// and its error is returned.
  pub fn update(&mut self, dt: f64) -> Result<(), SceneError> {
    self
      .scheduler
      .run(&mut self.context, dt)
      .inspect_err(|err| error!("Scene update failed: {}", err))
  }

  /// Rewrites the lighting records of the chosen lights without a full tick.
  pub fn update_light_sources(&mut self, filter: LightUpdateType) -> Result<(), SceneError> {
    let context = &mut self.context;
    match self.scheduler.get_mut(LIGHTING_SYSTEM) {
      Some(SceneSystem::Lighting(lighting)) => {
        Ok(lighting.update_light_sources(&context.store, &mut context.buffers, filter)?)
      }
      _ => Err(SceneError::SystemNotFound(LIGHTING_SYSTEM)),
    }
  }

  /// Binds the matrices and lighting blocks of `shader`.
  pub fn bind_shader(&mut self, shader: ShaderId) -> Result<(), SceneError> {
    let context = &mut self.context;
    for name in [&self.config.camera.buffer, &self.config.lighting.buffer] {
      context
        .buffers
        .retrieve_mut(name)?
        .bind_shader_block(shader, &mut context.backend)?;
    }
    Ok(())
  }

  pub fn lighting(&self) -> Option<&LightingSystem> {
    match self.scheduler.get(LIGHTING_SYSTEM) {
      Some(SceneSystem::Lighting(lighting)) => Some(lighting),
      _ => None,
    }
  }

  pub fn scheduler_mut(&mut self) -> &mut Scheduler<SceneContext<B>, SceneSystem> {
    &mut self.scheduler
  }

  pub fn store(&self) -> &SceneStore {
    &self.context.store
  }

  pub fn store_mut(&mut self) -> &mut SceneStore {
    &mut self.context.store
  }

  pub fn buffers(&self) -> &BufferRegistry {
    &self.context.buffers
  }

  pub fn backend(&self) -> &B {
    &self.context.backend
  }

  pub fn backend_mut(&mut self) -> &mut B {
    &mut self.context.backend
  }

  pub fn config(&self) -> &SceneConfig {
    &self.config
  }

  /// Frees the memory of every registered buffer.
  pub fn cleanup(&mut self) -> Result<(), SceneError> {
    debug!("Cleaning up Scene");
    Ok(self.context.buffers.cleanup()?)
  }
}

/// Startup check of a buffer the systems write every tick.
fn check_size(buffers: &BufferRegistry, name: &str, required: usize) -> Result<(), BufferError> {
  let buffer = buffers.retrieve(name)?;
  if !buffer.is_allocated() {
    return Err(BufferError::NotAllocated(name.to_owned()));
  }
  if buffer.size() < required {
    return Err(BufferError::TooSmall {
      name: name.to_owned(),
      size: buffer.size(),
      required,
    });
  }
  Ok(())
}

use lumen_components::components::{Identity, Tag, Transform};
use lumen_ecs::component_store;
use lumen_renderer::ecs::components::{Camera, Light, Mesh, Shader};

component_store! {
  /// Every component a scene entity can hold.
  pub struct SceneStore {
    identities: Identity,
    tags: Tag,
    transforms: Transform,
    meshes: Mesh,
    shaders: Shader,
    lights: Light,
    cameras: Camera,
  }
}

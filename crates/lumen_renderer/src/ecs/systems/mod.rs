pub mod camera;
pub mod lighting;
pub mod renderer;

pub use camera::CameraSystem;
pub use lighting::{LightUpdateType, LightingSystem};
pub use renderer::RenderingSystem;

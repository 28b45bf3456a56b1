pub mod camera;
pub mod light;
pub mod renderer;

pub use camera::Camera;
pub use light::{Attenuation, Light, LightKind, LightType, SpotCone};
pub use renderer::{Mesh, Shader};

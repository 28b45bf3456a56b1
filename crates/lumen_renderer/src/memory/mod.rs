pub mod error;
pub mod host_buffer;
pub mod registry;
pub mod uniform_buffer;
pub mod vulkan_buffer;

pub use error::BufferError;
pub use registry::BufferRegistry;
pub use uniform_buffer::{MemorySource, UniformBuffer};
pub use vulkan_buffer::VulkanContext;

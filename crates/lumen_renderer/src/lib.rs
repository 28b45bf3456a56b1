pub mod backend;
pub mod config;
pub mod ecs;
pub mod lighting;
pub mod memory;

pub use ash;
pub use gpu_allocator;

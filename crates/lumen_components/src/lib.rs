pub mod components;

pub use glam as math;

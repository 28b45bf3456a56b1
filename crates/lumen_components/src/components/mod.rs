pub mod identity;
pub mod transform;

pub use identity::{Identity, Tag};
pub use transform::Transform;

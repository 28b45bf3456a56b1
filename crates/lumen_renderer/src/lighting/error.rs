use lumen_ecs::error::{EcsError, ErrorKind};
use thiserror::Error;

use crate::memory::BufferError;

use super::slots::SlotKind;

#[derive(Debug, Error)]
pub enum LightingError {
  #[error("All {capacity} {light:?} light slots are in use")]
  CapacityExceeded { light: SlotKind, capacity: u32 },
  #[error("Lighting block for {max_point_lights} point and {max_spot_lights} spot lights does not fit in memory")]
  LayoutOverflow {
    max_point_lights: u32,
    max_spot_lights: u32,
  },
  #[error(transparent)]
  Buffer(#[from] BufferError),
  #[error(transparent)]
  Ecs(#[from] EcsError),
}

impl LightingError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      LightingError::CapacityExceeded { .. } | LightingError::LayoutOverflow { .. } => {
        ErrorKind::OutOfRange
      }
      LightingError::Buffer(err) => err.kind(),
      LightingError::Ecs(err) => err.kind(),
    }
  }
}

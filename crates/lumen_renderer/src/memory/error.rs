use lumen_ecs::error::ErrorKind;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BufferError {
  #[error("Buffer {0} not found")]
  NotFound(String),
  #[error("Write of {len} bytes at offset {offset} exceeds Buffer {name} of {size} bytes")]
  OutOfRange {
    name: String,
    offset: usize,
    len: usize,
    size: usize,
  },
  #[error("Buffer {name} holds {size} bytes but {required} are required")]
  TooSmall {
    name: String,
    size: usize,
    required: usize,
  },
  #[error("Buffer {0} is not allocated")]
  NotAllocated(String),
  #[error("Buffer {0} is already allocated")]
  AlreadyAllocated(String),
  #[error(transparent)]
  Backend(#[from] anyhow::Error),
}

impl BufferError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      BufferError::NotFound(_) => ErrorKind::NotFound,
      BufferError::OutOfRange { .. } | BufferError::TooSmall { .. } => ErrorKind::OutOfRange,
      BufferError::NotAllocated(_) | BufferError::AlreadyAllocated(_) | BufferError::Backend(_) => {
        ErrorKind::InvalidState
      }
    }
  }
}

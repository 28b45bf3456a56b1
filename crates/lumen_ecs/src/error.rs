use thiserror::Error;

use crate::EntityId;

/// Failure classes shared by every error type in the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
  NotFound,
  OutOfRange,
  InvalidState,
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum EcsError {
  #[error("Entity {0} not found")]
  EntityNotFound(EntityId),
  #[error("Entity {0} was already destroyed")]
  EntityDestroyed(EntityId),
  #[error("Component {component} not found on Entity {entity}")]
  ComponentNotFound {
    entity: EntityId,
    component: &'static str,
  },
  #[error("Entity {entity} already has a {component} component")]
  DuplicateComponent {
    entity: EntityId,
    component: &'static str,
  },
}

impl EcsError {
  pub fn kind(&self) -> ErrorKind {
    match self {
      EcsError::EntityNotFound(_) | EcsError::ComponentNotFound { .. } => ErrorKind::NotFound,
      EcsError::EntityDestroyed(_) | EcsError::DuplicateComponent { .. } => ErrorKind::InvalidState,
    }
  }
}

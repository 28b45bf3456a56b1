use rustc_hash::FxHashSet;

#[cfg(feature = "debug")]
use log::trace;

use crate::{error::EcsError, EntityId};

/// Hands out entity ids. Ids are never reused, so anything keyed by an id
/// (light slots for example) can not be inherited by a later entity.
#[derive(Default)]
pub struct Entities {
  alive: FxHashSet<EntityId>,
  top_id: EntityId,
}

impl Entities {
  pub fn allocate(&mut self) -> EntityId {
    let id = self.top_id;
    self.top_id += 1;
    self.alive.insert(id);

    #[cfg(feature = "debug")]
    trace!("Creating Entity {}", id);

    id
  }

  #[inline]
  pub fn contains(&self, id: EntityId) -> bool {
    self.alive.contains(&id)
  }

  pub fn release(&mut self, id: EntityId) -> Result<(), EcsError> {
    if self.alive.remove(&id) {
      #[cfg(feature = "debug")]
      trace!("Removing Entity {}", id);

      Ok(())
    } else if id < self.top_id {
      Err(EcsError::EntityDestroyed(id))
    } else {
      Err(EcsError::EntityNotFound(id))
    }
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.alive.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.alive.is_empty()
  }
}

#[cfg(test)]
mod test {
  use super::Entities;
  use crate::error::{EcsError, ErrorKind};

  #[test]
  fn ids_are_monotonic() {
    let mut entities = Entities::default();

    let a = entities.allocate();
    let b = entities.allocate();
    entities.release(a).unwrap();
    let c = entities.allocate();

    assert_eq!((a, b, c), (0, 1, 2));
    assert_eq!(entities.len(), 2);
  }

  #[test]
  fn double_release() {
    let mut entities = Entities::default();

    let id = entities.allocate();
    entities.release(id).unwrap();

    let err = entities.release(id).unwrap_err();
    assert_eq!(err, EcsError::EntityDestroyed(id));
    assert_eq!(err.kind(), ErrorKind::InvalidState);
  }

  #[test]
  fn release_unknown() {
    let mut entities = Entities::default();

    assert_eq!(entities.release(7), Err(EcsError::EntityNotFound(7)));
  }
}

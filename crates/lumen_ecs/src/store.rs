#[cfg(feature = "debug")]
use log::trace;

use crate::{
  components::{ColumnAccess, Component},
  entity::Entities,
  error::EcsError,
  view::{Query, View, ViewQuery},
  EntityId,
};

/// Entity/component operations shared by every store declared with
/// [`component_store!`](crate::component_store).
pub trait ComponentStore: Sized {
  fn entities(&self) -> &Entities;
  fn entities_mut(&mut self) -> &mut Entities;
  /// Drops every component held by `id`, returns how many were dropped.
  fn clear_components(&mut self, id: EntityId) -> usize;

  fn create_entity(&mut self) -> EntityId {
    self.entities_mut().allocate()
  }

  fn is_alive(&self, id: EntityId) -> bool {
    self.entities().contains(id)
  }

  fn entity_count(&self) -> usize {
    self.entities().len()
  }

  /// Removes `id` together with all of its components.
  fn destroy_entity(&mut self, id: EntityId) -> Result<(), EcsError> {
    self.entities_mut().release(id)?;
    let _removed = self.clear_components(id);

    #[cfg(feature = "debug")]
    trace!("Dropped {} Components of Entity {}", _removed, id);

    Ok(())
  }

  fn add_component<C: Component>(&mut self, id: EntityId, component: C) -> Result<&mut C, EcsError>
  where
    Self: ColumnAccess<C>,
  {
    if !self.is_alive(id) {
      return Err(EcsError::EntityNotFound(id));
    }

    #[cfg(feature = "debug")]
    trace!("Adding Component {} to Entity {}", C::NAME, id);

    <Self as ColumnAccess<C>>::column_mut(self)
      .insert(id, component)
      .map_err(|_| EcsError::DuplicateComponent {
        entity: id,
        component: C::NAME,
      })
  }

  fn get_component<C: Component>(&self, id: EntityId) -> Result<&C, EcsError>
  where
    Self: ColumnAccess<C>,
  {
    if !self.is_alive(id) {
      return Err(EcsError::EntityNotFound(id));
    }

    <Self as ColumnAccess<C>>::column(self)
      .get(id)
      .ok_or(EcsError::ComponentNotFound {
        entity: id,
        component: C::NAME,
      })
  }

  fn get_component_mut<C: Component>(&mut self, id: EntityId) -> Result<&mut C, EcsError>
  where
    Self: ColumnAccess<C>,
  {
    if !self.is_alive(id) {
      return Err(EcsError::EntityNotFound(id));
    }

    <Self as ColumnAccess<C>>::column_mut(self)
      .get_mut(id)
      .ok_or(EcsError::ComponentNotFound {
        entity: id,
        component: C::NAME,
      })
  }

  fn has_component<C: Component>(&self, id: EntityId) -> bool
  where
    Self: ColumnAccess<C>,
  {
    <Self as ColumnAccess<C>>::column(self).contains(id)
  }

  fn remove_component<C: Component>(&mut self, id: EntityId) -> Result<C, EcsError>
  where
    Self: ColumnAccess<C>,
  {
    if !self.is_alive(id) {
      return Err(EcsError::EntityNotFound(id));
    }

    #[cfg(feature = "debug")]
    trace!("Removing Component {} from Entity {}", C::NAME, id);

    <Self as ColumnAccess<C>>::column_mut(self)
      .remove(id)
      .ok_or(EcsError::ComponentNotFound {
        entity: id,
        component: C::NAME,
      })
  }

  /// Ids of the entities holding every component of `Q`.
  fn view<Q: ViewQuery<Self>>(&self) -> View<'_, Self, Q> {
    View::new(self)
  }

  /// Same walk as [`ComponentStore::view`], yielding the components too.
  fn query<Q: ViewQuery<Self>>(&self) -> Query<'_, Self, Q> {
    Query::new(self)
  }
}

/// Declares a store with one typed column per listed component.
///
/// ```ignore
/// component_store! {
///   pub struct GameStore {
///     positions: Position,
///     velocities: Velocity,
///   }
/// }
/// ```
#[macro_export]
macro_rules! component_store {
  (
    $(#[$meta:meta])*
    $vis:vis struct $name:ident {
      $($field:ident: $component:ty),* $(,)?
    }
  ) => {
    $(#[$meta])*
    #[derive(Default)]
    $vis struct $name {
      entities: $crate::entity::Entities,
      $($field: $crate::storage::Column<$component>,)*
    }

    impl $crate::store::ComponentStore for $name {
      fn entities(&self) -> &$crate::entity::Entities {
        &self.entities
      }

      fn entities_mut(&mut self) -> &mut $crate::entity::Entities {
        &mut self.entities
      }

      fn clear_components(&mut self, id: $crate::EntityId) -> usize {
        let mut removed = 0;
        $(
          if self.$field.remove(id).is_some() {
            removed += 1;
          }
        )*
        removed
      }
    }

    $(
      impl $crate::components::ColumnAccess<$component> for $name {
        fn column(&self) -> &$crate::storage::Column<$component> {
          &self.$field
        }

        fn column_mut(&mut self) -> &mut $crate::storage::Column<$component> {
          &mut self.$field
        }
      }
    )*
  };
}

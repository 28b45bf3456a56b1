use std::marker::PhantomData;

use lumen_ecs_macros::all_tuples;

use crate::{
  components::{ColumnAccess, Component},
  EntityId,
};

/// A set of component types an entity must hold to be part of a view.
///
/// Implemented for every component and for tuples of up to eight components.
pub trait ViewQuery<S> {
  type Item<'s>
  where
    S: 's;

  /// Row ids of the narrowest column, the one iteration walks.
  fn ids(store: &S) -> &[Option<EntityId>];
  fn matches(store: &S, id: EntityId) -> bool;
  fn fetch(store: &S, id: EntityId) -> Option<Self::Item<'_>>;
}

impl<S: ColumnAccess<C>, C: Component> ViewQuery<S> for C {
  type Item<'s>
    = &'s C
  where
    S: 's;

  fn ids(store: &S) -> &[Option<EntityId>] {
    <S as ColumnAccess<C>>::column(store).ids()
  }

  fn matches(store: &S, id: EntityId) -> bool {
    <S as ColumnAccess<C>>::column(store).contains(id)
  }

  fn fetch(store: &S, id: EntityId) -> Option<Self::Item<'_>> {
    <S as ColumnAccess<C>>::column(store).get(id)
  }
}

macro_rules! impl_view_query {
  ($one:ident) => {};
  ($($params:ident),*) => {
    impl<S, $($params: Component),*> ViewQuery<S> for ($($params,)*)
    where
      $(S: ColumnAccess<$params>),*
    {
      type Item<'s> = ($(&'s $params,)*) where S: 's;

      fn ids(store: &S) -> &[Option<EntityId>] {
        // ties go to the first listed component
        let mut narrowest: Option<(usize, &[Option<EntityId>])> = None;
        $(
          let column = <S as ColumnAccess<$params>>::column(store);
          if narrowest.map_or(true, |(len, _)| column.len() < len) {
            narrowest = Some((column.len(), column.ids()));
          }
        )*
        narrowest.map(|(_, ids)| ids).unwrap_or_default()
      }

      fn matches(store: &S, id: EntityId) -> bool {
        $(<S as ColumnAccess<$params>>::column(store).contains(id))&&*
      }

      fn fetch(store: &S, id: EntityId) -> Option<Self::Item<'_>> {
        Some(($(<S as ColumnAccess<$params>>::column(store).get(id)?,)*))
      }
    }
  };
}

all_tuples!(impl_view_query, 1, 8, C);

/// Lazy sequence of the ids holding every component of `Q`, in insertion
/// order of the narrowest component column.
///
/// The view borrows the store, so components can not be added or removed
/// while it is alive. Cloning or [`View::reset`] restarts it.
pub struct View<'s, S, Q> {
  store: &'s S,
  ids: &'s [Option<EntityId>],
  cursor: usize,
  marker: PhantomData<fn() -> Q>,
}

impl<'s, S, Q: ViewQuery<S>> View<'s, S, Q> {
  pub(crate) fn new(store: &'s S) -> Self {
    View {
      store,
      ids: Q::ids(store),
      cursor: 0,
      marker: PhantomData,
    }
  }

  pub fn reset(&mut self) {
    self.cursor = 0;
  }
}

impl<S, Q> Clone for View<'_, S, Q> {
  fn clone(&self) -> Self {
    View {
      store: self.store,
      ids: self.ids,
      cursor: self.cursor,
      marker: PhantomData,
    }
  }
}

impl<S, Q: ViewQuery<S>> Iterator for View<'_, S, Q> {
  type Item = EntityId;

  fn next(&mut self) -> Option<Self::Item> {
    loop {
      let slot = self.ids.get(self.cursor)?;
      self.cursor += 1;

      if let Some(id) = *slot {
        if Q::matches(self.store, id) {
          return Some(id);
        }
      }
    }
  }

  fn size_hint(&self) -> (usize, Option<usize>) {
    (0, Some(self.ids.len() - self.cursor))
  }
}

/// Like [`View`] but also hands out the matched components.
pub struct Query<'s, S, Q> {
  view: View<'s, S, Q>,
}

impl<'s, S, Q: ViewQuery<S>> Query<'s, S, Q> {
  pub(crate) fn new(store: &'s S) -> Self {
    Query {
      view: View::new(store),
    }
  }
}

impl<'s, S, Q: ViewQuery<S>> Iterator for Query<'s, S, Q> {
  type Item = (EntityId, Q::Item<'s>);

  fn next(&mut self) -> Option<Self::Item> {
    let id = self.view.next()?;
    Some((id, Q::fetch(self.view.store, id)?))
  }
}

use crate::storage::Column;

/// Marker for data that can be attached to an entity.
///
/// Usually implemented through `#[derive(Component)]`.
pub trait Component: 'static {
  const NAME: &'static str;
}

/// Gives access to the column holding every `C` of a store.
///
/// Implemented by the `component_store!` macro, one impl per declared component.
pub trait ColumnAccess<C: Component> {
  fn column(&self) -> &Column<C>;
  fn column_mut(&mut self) -> &mut Column<C>;
}

use rustc_hash::FxHashMap;

use crate::EntityId;

/// Tombstones are only compacted once there are at least this many of them.
const COMPACT_THRESHOLD: usize = 32;

/// Typed storage for one component type.
///
/// Rows are kept in insertion order. Removing a row leaves a tombstone so add,
/// get and remove stay O(1); tombstones are compacted away once they
/// outnumber the live rows, which keeps the order of the survivors.
pub struct Column<T> {
  ids: Vec<Option<EntityId>>,
  values: Vec<Option<T>>,
  index: FxHashMap<EntityId, usize>,
}

impl<T> Default for Column<T> {
  fn default() -> Self {
    Self {
      ids: Vec::new(),
      values: Vec::new(),
      index: FxHashMap::default(),
    }
  }
}

impl<T> Column<T> {
  pub fn new() -> Self {
    Self::default()
  }

  /// Number of live rows.
  #[inline]
  pub fn len(&self) -> usize {
    self.index.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.index.is_empty()
  }

  #[inline]
  pub fn contains(&self, id: EntityId) -> bool {
    self.index.contains_key(&id)
  }

  /// Inserts `value` for `id`. Gives the value back if `id` already has one.
  pub fn insert(&mut self, id: EntityId, value: T) -> Result<&mut T, T> {
    if self.index.contains_key(&id) {
      return Err(value);
    }

    let row = self.values.len();
    self.ids.push(Some(id));
    self.values.push(None);
    self.index.insert(id, row);

    Ok(self.values[row].insert(value))
  }

  pub fn get(&self, id: EntityId) -> Option<&T> {
    let row = *self.index.get(&id)?;
    self.values.get(row)?.as_ref()
  }

  pub fn get_mut(&mut self, id: EntityId) -> Option<&mut T> {
    let row = *self.index.get(&id)?;
    self.values.get_mut(row)?.as_mut()
  }

  pub fn remove(&mut self, id: EntityId) -> Option<T> {
    let row = self.index.remove(&id)?;
    self.ids[row] = None;
    let value = self.values[row].take();

    while matches!(self.ids.last(), Some(None)) {
      self.ids.pop();
      self.values.pop();
    }

    let tombstones = self.ids.len() - self.index.len();
    if tombstones >= COMPACT_THRESHOLD && tombstones > self.index.len() {
      self.compact();
    }

    value
  }

  /// Row ids in insertion order, `None` marks a removed row.
  #[inline]
  pub fn ids(&self) -> &[Option<EntityId>] {
    &self.ids
  }

  pub fn iter(&self) -> impl Iterator<Item = (EntityId, &T)> {
    self
      .ids
      .iter()
      .zip(self.values.iter())
      .filter_map(|(id, value)| Some(((*id)?, value.as_ref()?)))
  }

  fn compact(&mut self) {
    let ids = std::mem::take(&mut self.ids);
    let values = std::mem::take(&mut self.values);
    self.index.clear();

    for (id, value) in ids.into_iter().zip(values) {
      if let (Some(id), Some(value)) = (id, value) {
        self.index.insert(id, self.ids.len());
        self.ids.push(Some(id));
        self.values.push(Some(value));
      }
    }
  }
}

#[cfg(test)]
mod test {
  use super::Column;

  #[test]
  fn insert_get() {
    let mut column = Column::new();

    *column.insert(3, 1usize).unwrap() += 1;

    assert_eq!(column.get(3), Some(&2));
    assert_eq!(column.get(4), None);
    assert_eq!(column.len(), 1);
  }

  #[test]
  fn duplicate_insert() {
    let mut column = Column::new();

    column.insert(0, "a").unwrap();
    assert_eq!(column.insert(0, "b"), Err("b"));
    assert_eq!(column.get(0), Some(&"a"));
  }

  #[test]
  fn remove_keeps_order() {
    let mut column = Column::new();
    for id in 0..5 {
      column.insert(id, id * 10).unwrap();
    }

    assert_eq!(column.remove(1), Some(10));
    assert_eq!(column.remove(1), None);
    column.insert(1, 11).unwrap();

    let order = column.iter().map(|(id, _)| id).collect::<Vec<_>>();
    assert_eq!(order, vec![0, 2, 3, 4, 1]);
  }

  #[test]
  fn trailing_tombstones_dropped() {
    let mut column = Column::new();
    column.insert(0, ()).unwrap();
    column.insert(1, ()).unwrap();

    column.remove(1);
    assert_eq!(column.ids().len(), 1);
  }

  #[test]
  fn compaction() {
    let mut column = Column::new();
    for id in 0..100 {
      column.insert(id, id).unwrap();
    }
    for id in 0..80 {
      column.remove(id);
    }

    assert!(column.ids().len() < 100);
    assert_eq!(column.len(), 20);
    assert_eq!(column.get(85), Some(&85));
    let order = column.iter().map(|(id, _)| id).collect::<Vec<_>>();
    assert_eq!(order, (80..100).collect::<Vec<_>>());
  }
}

use crate::{
  component_store,
  error::{EcsError, ErrorKind},
  store::ComponentStore,
  Component,
};

#[derive(Component, Debug, PartialEq)]
struct A(usize);

#[derive(Component, Debug, PartialEq)]
struct B(usize);

#[derive(Component, Debug, PartialEq)]
struct C(usize);

component_store! {
  struct TestStore {
    a: A,
    b: B,
    c: C,
  }
}

fn setup() -> TestStore {
  let mut store = TestStore::default();

  for i in 0..100 {
    let ab = store.create_entity();
    store.add_component(ab, A(i)).unwrap();
    store.add_component(ab, B(i)).unwrap();

    let a = store.create_entity();
    store.add_component(a, A(i)).unwrap();

    let b = store.create_entity();
    store.add_component(b, B(i)).unwrap();
  }

  store
}

#[test]
fn view_counts() {
  let store = setup();

  assert_eq!(store.view::<A>().count(), 200);
  assert_eq!(store.view::<B>().count(), 200);
  assert_eq!(store.view::<(A, B)>().count(), 100);
  assert_eq!(store.view::<(A, B, C)>().count(), 0);
}

#[test]
fn view_only_full_matches_in_insertion_order() {
  let mut store = TestStore::default();

  let first = store.create_entity();
  store.add_component(first, A(0)).unwrap();
  store.add_component(first, B(0)).unwrap();

  let partial = store.create_entity();
  store.add_component(partial, A(1)).unwrap();

  let second = store.create_entity();
  store.add_component(second, A(2)).unwrap();
  store.add_component(second, B(2)).unwrap();

  let ids = store.view::<(A, B)>().collect::<Vec<_>>();
  assert_eq!(ids, vec![first, second]);
}

#[test]
fn view_walks_narrowest_column() {
  let mut store = TestStore::default();

  let ids = (0..4).map(|_| store.create_entity()).collect::<Vec<_>>();
  for &id in &ids {
    store.add_component(id, A(id as usize)).unwrap();
  }
  // B is narrower and was inserted in reverse
  store.add_component(ids[3], B(0)).unwrap();
  store.add_component(ids[1], B(0)).unwrap();

  let order = store.view::<(A, B)>().collect::<Vec<_>>();
  assert_eq!(order, vec![ids[3], ids[1]]);
}

#[test]
fn view_is_restartable() {
  let store = setup();

  let mut view = store.view::<(A, B)>();
  let first = view.clone().collect::<Vec<_>>();
  let _ = view.by_ref().take(10).count();
  view.reset();

  assert_eq!(view.collect::<Vec<_>>(), first);
}

#[test]
fn query_fetches_components() {
  let store = setup();

  let sum = store
    .query::<(A, B)>()
    .map(|(_, (a, b))| a.0 + b.0)
    .sum::<usize>();

  assert_eq!(sum, 2 * (0..100).sum::<usize>());
}

#[test]
fn component_lifecycle() {
  let mut store = TestStore::default();
  let id = store.create_entity();

  store.add_component(id, A(1)).unwrap();
  store.get_component_mut::<A>(id).unwrap().0 = 5;
  assert_eq!(store.get_component::<A>(id), Ok(&A(5)));

  assert_eq!(store.remove_component::<A>(id), Ok(A(5)));
  assert!(!store.has_component::<A>(id));
  assert_eq!(
    store.get_component::<A>(id),
    Err(EcsError::ComponentNotFound {
      entity: id,
      component: "A"
    })
  );
}

#[test]
fn duplicate_component() {
  let mut store = TestStore::default();
  let id = store.create_entity();

  store.add_component(id, A(1)).unwrap();
  let err = store.add_component(id, A(2)).unwrap_err();

  assert_eq!(err.kind(), ErrorKind::InvalidState);
  assert_eq!(store.get_component::<A>(id), Ok(&A(1)));
}

#[test]
fn add_to_unknown_entity() {
  let mut store = TestStore::default();

  let err = store.add_component(42, A(0)).unwrap_err();
  assert_eq!(err, EcsError::EntityNotFound(42));
  assert_eq!(err.kind(), ErrorKind::NotFound);
}

#[test]
fn destroy_removes_everything() {
  let mut store = setup();
  let before = store.view::<A>().count();

  let victim = store.view::<(A, B)>().next().unwrap();
  store.destroy_entity(victim).unwrap();

  assert_eq!(store.view::<A>().count(), before - 1);
  assert!(!store.is_alive(victim));
  assert_eq!(
    store.get_component::<A>(victim),
    Err(EcsError::EntityNotFound(victim))
  );
  assert_eq!(
    store.destroy_entity(victim),
    Err(EcsError::EntityDestroyed(victim))
  );
}

#[test]
fn destroyed_ids_are_not_reused() {
  let mut store = TestStore::default();

  let first = store.create_entity();
  store.destroy_entity(first).unwrap();
  let second = store.create_entity();

  assert_ne!(first, second);
  assert_eq!(store.entity_count(), 1);
}

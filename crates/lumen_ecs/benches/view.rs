use criterion::{criterion_group, criterion_main, Criterion};
use lumen_ecs::{component_store, store::ComponentStore, Component};

#[derive(Component)]
struct Position([f32; 3]);

#[derive(Component)]
struct Velocity([f32; 3]);

component_store! {
  struct BenchStore {
    positions: Position,
    velocities: Velocity,
  }
}

fn populate(count: usize) -> BenchStore {
  let mut store = BenchStore::default();

  for i in 0..count {
    let id = store.create_entity();
    let _ = store.add_component(id, Position([i as f32; 3]));
    if i % 2 == 0 {
      let _ = store.add_component(id, Velocity([1.0; 3]));
    }
  }

  store
}

fn view(c: &mut Criterion) {
  let store = populate(10_000);

  c.bench_function("view (Position, Velocity)", |b| {
    b.iter(|| store.view::<(Position, Velocity)>().count())
  });

  c.bench_function("query (Position, Velocity)", |b| {
    b.iter(|| {
      store
        .query::<(Position, Velocity)>()
        .map(|(_, (p, v))| p.0[0] + v.0[0])
        .sum::<f32>()
    })
  });
}

fn churn(c: &mut Criterion) {
  c.bench_function("add/remove churn", |b| {
    b.iter(|| {
      let mut store = populate(1_000);
      for id in 0..500 {
        let _ = store.destroy_entity(id);
      }
      store.entity_count()
    })
  });
}

criterion_group!(benches, view, churn);
criterion_main!(benches);

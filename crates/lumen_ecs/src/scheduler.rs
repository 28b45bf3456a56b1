use std::marker::PhantomData;

use log::debug;
#[cfg(feature = "debug")]
use log::trace;

/// Per-tick logic operating on a context `Ctx`.
///
/// The set of systems is closed: implement this on an enum of system variants
/// and hand that enum to a [`Scheduler`], which dispatches statically.
pub trait System<Ctx> {
  type Error;

  /// Systems are unique by name inside a scheduler.
  fn name(&self) -> &'static str;
  fn run(&mut self, ctx: &mut Ctx, dt: f64) -> Result<(), Self::Error>;
}

/// Runs an ordered set of systems once per tick, one after another.
pub struct Scheduler<Ctx, S: System<Ctx>> {
  systems: Vec<S>,
  marker: PhantomData<fn(&mut Ctx)>,
}

pub struct SchedulerBuilder<Ctx, S: System<Ctx>> {
  systems: Vec<S>,
  marker: PhantomData<fn(&mut Ctx)>,
}

impl<Ctx, S: System<Ctx>> Scheduler<Ctx, S> {
  pub fn builder() -> SchedulerBuilder<Ctx, S> {
    SchedulerBuilder::default()
  }

  /// Runs every system in order. The tick stops at the first failing system.
  pub fn run(&mut self, ctx: &mut Ctx, dt: f64) -> Result<(), S::Error> {
    for system in &mut self.systems {
      #[cfg(feature = "debug")]
      trace!("Executing System {}", system.name());

      system.run(ctx, dt)?;
    }

    Ok(())
  }

  /// Appends `system`, or replaces the one with the same name in place.
  pub fn add_system(&mut self, system: S) -> Option<S> {
    insert_system(&mut self.systems, system)
  }

  pub fn remove_system(&mut self, name: &str) -> Option<S> {
    let position = self.systems.iter().position(|s| s.name() == name)?;
    debug!("Removing System {}", name);
    Some(self.systems.remove(position))
  }

  pub fn get(&self, name: &str) -> Option<&S> {
    self.systems.iter().find(|s| s.name() == name)
  }

  pub fn get_mut(&mut self, name: &str) -> Option<&mut S> {
    self.systems.iter_mut().find(|s| s.name() == name)
  }

  pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
    self.systems.iter().map(|s| s.name())
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.systems.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.systems.is_empty()
  }
}

impl<Ctx, S: System<Ctx>> SchedulerBuilder<Ctx, S> {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn add_system(&mut self, system: S) -> &mut Self {
    insert_system(&mut self.systems, system);
    self
  }

  pub fn build(self) -> Scheduler<Ctx, S> {
    debug!("Scheduler initialized with {} Systems", self.systems.len());

    Scheduler {
      systems: self.systems,
      marker: PhantomData,
    }
  }
}

impl<Ctx, S: System<Ctx>> Default for SchedulerBuilder<Ctx, S> {
  fn default() -> Self {
    Self {
      systems: Vec::new(),
      marker: PhantomData,
    }
  }
}

fn insert_system<Ctx, S: System<Ctx>>(systems: &mut Vec<S>, system: S) -> Option<S> {
  if let Some(existing) = systems.iter_mut().find(|s| s.name() == system.name()) {
    debug!("Replacing System {}", system.name());
    return Some(std::mem::replace(existing, system));
  }

  debug!("Adding System {}", system.name());
  systems.push(system);
  None
}

#[cfg(test)]
mod test {
  use super::{Scheduler, System};

  enum Step {
    Push(&'static str, u32),
    Fail,
  }

  impl System<Vec<u32>> for Step {
    type Error = &'static str;

    fn name(&self) -> &'static str {
      match self {
        Step::Push(name, _) => *name,
        Step::Fail => "fail",
      }
    }

    fn run(&mut self, ctx: &mut Vec<u32>, _dt: f64) -> Result<(), Self::Error> {
      match self {
        Step::Push(_, value) => {
          ctx.push(*value);
          Ok(())
        }
        Step::Fail => Err("failed"),
      }
    }
  }

  #[test]
  fn runs_in_order() {
    let mut builder = Scheduler::<Vec<u32>, Step>::builder();
    builder
      .add_system(Step::Push("a", 1))
      .add_system(Step::Push("b", 2));
    let mut scheduler = builder.build();

    let mut ctx: Vec<u32> = Vec::new();
    scheduler.run(&mut ctx, 0.016).unwrap();
    scheduler.run(&mut ctx, 0.016).unwrap();

    assert_eq!(ctx, vec![1, 2, 1, 2]);
  }

  #[test]
  fn same_name_replaces() {
    let mut builder = Scheduler::<Vec<u32>, Step>::builder();
    builder
      .add_system(Step::Push("a", 1))
      .add_system(Step::Push("b", 2))
      .add_system(Step::Push("a", 3));
    let mut scheduler = builder.build();

    let mut ctx: Vec<u32> = Vec::new();
    scheduler.run(&mut ctx, 0.0).unwrap();

    assert_eq!(ctx, vec![3, 2]);
    assert_eq!(scheduler.len(), 2);
  }

  #[test]
  fn remove() {
    let mut scheduler = Scheduler::<Vec<u32>, Step>::builder().build();
    scheduler.add_system(Step::Push("a", 1));
    scheduler.add_system(Step::Push("b", 2));

    assert!(scheduler.remove_system("a").is_some());
    assert!(scheduler.remove_system("a").is_none());
    assert_eq!(scheduler.names().collect::<Vec<_>>(), vec!["b"]);
  }

  #[test]
  fn error_stops_tick() {
    let mut builder = Scheduler::<Vec<u32>, Step>::builder();
    builder
      .add_system(Step::Push("a", 1))
      .add_system(Step::Fail)
      .add_system(Step::Push("c", 3));
    let mut scheduler = builder.build();

    let mut ctx: Vec<u32> = Vec::new();
    assert_eq!(scheduler.run(&mut ctx, 0.0), Err("failed"));
    assert_eq!(ctx, vec![1]);
  }
}

extern crate self as lumen_ecs;

pub mod components;
pub mod entity;
pub mod error;
pub mod scheduler;
pub mod storage;
pub mod store;
pub mod view;

#[cfg(test)]
mod test;

pub use lumen_ecs_macros::Component;

pub type Id = u64;
pub type EntityId = Id;

pub mod prelude {
  pub use crate::{
    components::{ColumnAccess, Component},
    error::{EcsError, ErrorKind},
    scheduler::{Scheduler, SchedulerBuilder, System},
    store::ComponentStore,
    EntityId,
  };
}

use lumen_ecs::Component;
use uuid::Uuid;

pub const DEFAULT_ENTITY_NAME: &str = "Game Object";

/// Globally unique id of an entity, stable across save/load unlike `EntityId`.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Identity(Uuid);

impl Identity {
  pub fn new() -> Self {
    Identity(Uuid::new_v4())
  }

  pub fn from_uuid(uuid: Uuid) -> Self {
    Identity(uuid)
  }

  pub fn uuid(&self) -> Uuid {
    self.0
  }
}

impl Default for Identity {
  fn default() -> Self {
    Self::new()
  }
}

#[derive(Component, Clone, Debug, PartialEq, Eq)]
pub struct Tag {
  pub name: String,
}

impl Tag {
  pub fn new(name: impl Into<String>) -> Self {
    Tag { name: name.into() }
  }
}

impl Default for Tag {
  fn default() -> Self {
    Tag::new(DEFAULT_ENTITY_NAME)
  }
}

use log::{debug, warn};
use rustc_hash::FxHashMap;

use super::{error::BufferError, uniform_buffer::UniformBuffer};

/// Named uniform buffers shared between the systems of one scene.
#[derive(Default)]
pub struct BufferRegistry {
  buffers: FxHashMap<String, UniformBuffer>,
  binding_points: FxHashMap<String, u32>,
  next_binding_point: u32,
}

impl BufferRegistry {
  pub fn new() -> Self {
    Self::default()
  }

  /// Stores `buffer` under `name`, replacing and returning any previous one.
  /// A name keeps its binding point across replacements.
  pub fn register(
    &mut self,
    name: impl Into<String>,
    mut buffer: UniformBuffer,
  ) -> Option<UniformBuffer> {
    let name = name.into();
    let binding_point = match self.binding_points.get(&name) {
      Some(binding_point) => *binding_point,
      None => {
        let binding_point = self.next_binding_point;
        self.next_binding_point += 1;
        self.binding_points.insert(name.clone(), binding_point);
        binding_point
      }
    };
    buffer.set_binding_point(binding_point);

    let previous = self.buffers.insert(name.clone(), buffer);
    if previous.is_some() {
      warn!("Buffer {} registered again, replacing the previous one", name);
    } else {
      debug!("Registered Buffer {} at binding point {}", name, binding_point);
    }
    previous
  }

  pub fn retrieve(&self, name: &str) -> Result<&UniformBuffer, BufferError> {
    self
      .buffers
      .get(name)
      .ok_or_else(|| BufferError::NotFound(name.to_owned()))
  }

  pub fn retrieve_mut(&mut self, name: &str) -> Result<&mut UniformBuffer, BufferError> {
    self
      .buffers
      .get_mut(name)
      .ok_or_else(|| BufferError::NotFound(name.to_owned()))
  }

  pub fn contains(&self, name: &str) -> bool {
    self.buffers.contains_key(name)
  }

  pub fn names(&self) -> impl Iterator<Item = &str> {
    self.buffers.keys().map(String::as_str)
  }

  pub fn len(&self) -> usize {
    self.buffers.len()
  }

  pub fn is_empty(&self) -> bool {
    self.buffers.is_empty()
  }

  pub fn next_binding_point(&self) -> u32 {
    self.next_binding_point
  }

  /// Releases the memory of every buffer. Buffers stay registered.
  pub fn cleanup(&mut self) -> Result<(), BufferError> {
    for buffer in self.buffers.values_mut() {
      buffer.cleanup()?;
    }
    Ok(())
  }
}

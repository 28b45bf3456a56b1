use ash::vk;
use bytemuck::Pod;
#[cfg(feature = "debug")]
use log::trace;
use log::debug;

use crate::backend::{RenderBackend, ShaderId};

use super::{
  error::BufferError,
  host_buffer::HostBuffer,
  vulkan_buffer::{VulkanBuffer, VulkanContext},
};

/// Where a uniform buffer gets its memory from once allocated.
#[derive(Clone, Default)]
pub enum MemorySource {
  #[default]
  Host,
  Vulkan(VulkanContext),
}

enum BufferMemory {
  Host(HostBuffer),
  Vulkan(VulkanBuffer, VulkanContext),
}

impl BufferMemory {
  fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), BufferError> {
    match self {
      BufferMemory::Host(buffer) => buffer.write(offset, data),
      BufferMemory::Vulkan(buffer, _) => buffer.write(offset, data)?,
    }
    Ok(())
  }

  fn read(&self, offset: usize, len: usize) -> Option<&[u8]> {
    match self {
      BufferMemory::Host(buffer) => Some(buffer.read(offset, len)),
      BufferMemory::Vulkan(buffer, _) => buffer.read(offset, len),
    }
  }

  fn cleanup(self) -> Result<(), BufferError> {
    match self {
      BufferMemory::Host(_) => Ok(()),
      BufferMemory::Vulkan(buffer, context) => Ok(buffer.cleanup(&context)?),
    }
  }
}

/// Fixed size block of shader visible memory written at byte offsets.
pub struct UniformBuffer {
  block_name: String,
  size: usize,
  binding_point: u32,
  source: MemorySource,
  memory: Option<BufferMemory>,
  bound_shaders: Vec<ShaderId>,
}

impl UniformBuffer {
  /// Unallocated buffer backed by host memory. The binding point is set when
  /// the buffer is registered.
  pub fn configure(block_name: impl Into<String>, size: usize) -> Self {
    let block_name = block_name.into();
    debug!("Configuring Uniform Buffer {} with {} bytes", block_name, size);

    Self {
      block_name,
      size,
      binding_point: 0,
      source: MemorySource::Host,
      memory: None,
      bound_shaders: Vec::new(),
    }
  }

  pub fn with_source(mut self, source: MemorySource) -> Self {
    self.source = source;
    self
  }

  pub fn allocate(&mut self) -> Result<(), BufferError> {
    if self.memory.is_some() {
      return Err(BufferError::AlreadyAllocated(self.block_name.clone()));
    }

    let memory = match &self.source {
      MemorySource::Host => BufferMemory::Host(HostBuffer::new(self.size)),
      MemorySource::Vulkan(context) => BufferMemory::Vulkan(
        VulkanBuffer::new(context, &self.block_name, self.size)?,
        context.clone(),
      ),
    };
    self.memory = Some(memory);

    debug!("Allocated Uniform Buffer {}", self.block_name);
    Ok(())
  }

  pub fn is_allocated(&self) -> bool {
    self.memory.is_some()
  }

  /// Copies `data` to `offset`. Nothing is written when the range does not fit.
  pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), BufferError> {
    self.check_range(offset, data.len())?;

    #[cfg(feature = "debug")]
    trace!(
      "Writing {} bytes to Uniform Buffer {} at {}",
      data.len(),
      self.block_name,
      offset
    );

    match &mut self.memory {
      Some(memory) => memory.write(offset, data),
      None => Err(BufferError::NotAllocated(self.block_name.clone())),
    }
  }

  pub fn write_pod<T: Pod>(&mut self, offset: usize, value: &T) -> Result<(), BufferError> {
    self.write(offset, bytemuck::bytes_of(value))
  }

  pub fn read(&self, offset: usize, len: usize) -> Result<&[u8], BufferError> {
    self.check_range(offset, len)?;

    self
      .memory
      .as_ref()
      .and_then(|memory| memory.read(offset, len))
      .ok_or_else(|| BufferError::NotAllocated(self.block_name.clone()))
  }

  /// Reads a value written with [`UniformBuffer::write_pod`].
  pub fn read_pod<T: Pod>(&self, offset: usize) -> Result<T, BufferError> {
    let bytes = self.read(offset, std::mem::size_of::<T>())?;
    Ok(bytemuck::pod_read_unaligned(bytes))
  }

  /// Binds the block of `shader` with this buffer's name to its binding point.
  pub fn bind_shader_block<B: RenderBackend + ?Sized>(
    &mut self,
    shader: ShaderId,
    backend: &mut B,
  ) -> Result<(), BufferError> {
    backend.bind_uniform_block(shader, &self.block_name, self.binding_point)?;
    if !self.bound_shaders.contains(&shader) {
      self.bound_shaders.push(shader);
    }
    Ok(())
  }

  pub fn cleanup(&mut self) -> Result<(), BufferError> {
    match self.memory.take() {
      Some(memory) => memory.cleanup(),
      None => Ok(()),
    }
  }

  pub fn block_name(&self) -> &str {
    &self.block_name
  }

  pub fn size(&self) -> usize {
    self.size
  }

  pub fn binding_point(&self) -> u32 {
    self.binding_point
  }

  pub(crate) fn set_binding_point(&mut self, binding_point: u32) {
    self.binding_point = binding_point;
  }

  pub fn bound_shaders(&self) -> &[ShaderId] {
    &self.bound_shaders
  }

  pub fn vk_buffer(&self) -> Option<vk::Buffer> {
    match &self.memory {
      Some(BufferMemory::Vulkan(buffer, _)) => Some(buffer.vk_buffer()),
      _ => None,
    }
  }

  /// Fails with `OutOfRange` unless `len` bytes at `offset` fit in the buffer.
  pub fn check_range(&self, offset: usize, len: usize) -> Result<(), BufferError> {
    match offset.checked_add(len) {
      Some(end) if end <= self.size => Ok(()),
      _ => Err(BufferError::OutOfRange {
        name: self.block_name.clone(),
        offset,
        len,
        size: self.size,
      }),
    }
  }
}

use std::sync::{Arc, Mutex};

use anyhow::{anyhow, Error};
use ash::vk;
use gpu_allocator::{vulkan, MemoryLocation};

/// Device handles needed to create and free Vulkan buffers.
#[derive(Clone)]
pub struct VulkanContext {
  device: ash::Device,
  allocator: Arc<Mutex<vulkan::Allocator>>,
}

impl VulkanContext {
  pub fn new(device: ash::Device, allocator: Arc<Mutex<vulkan::Allocator>>) -> Self {
    Self { device, allocator }
  }

  pub fn device(&self) -> &ash::Device {
    &self.device
  }

  fn with_allocator<R>(
    &self,
    f: impl FnOnce(&mut vulkan::Allocator) -> Result<R, Error>,
  ) -> Result<R, Error> {
    let mut allocator = self
      .allocator
      .lock()
      .map_err(|_| anyhow!("GPU allocator lock poisoned"))?;
    f(&mut allocator)
  }
}

/// Persistently mapped `CpuToGpu` uniform buffer.
pub struct VulkanBuffer {
  buffer: vk::Buffer,
  allocation: vulkan::Allocation,
  size: usize,
}

impl VulkanBuffer {
  pub fn new(context: &VulkanContext, name: &str, size: usize) -> Result<Self, Error> {
    let buffer_create_info = vk::BufferCreateInfo::default()
      .size(size as u64)
      .usage(vk::BufferUsageFlags::UNIFORM_BUFFER)
      .sharing_mode(vk::SharingMode::EXCLUSIVE);
    let buffer = unsafe { context.device.create_buffer(&buffer_create_info, None)? };

    let requirements = unsafe { context.device.get_buffer_memory_requirements(buffer) };
    let allocation_create_desc = vulkan::AllocationCreateDesc {
      requirements,
      location: MemoryLocation::CpuToGpu,
      linear: true,
      allocation_scheme: vulkan::AllocationScheme::GpuAllocatorManaged,
      name,
    };

    let allocation = match context.with_allocator(|a| Ok(a.allocate(&allocation_create_desc)?)) {
      Ok(allocation) => allocation,
      Err(err) => {
        unsafe { context.device.destroy_buffer(buffer, None) };
        return Err(err);
      }
    };

    unsafe {
      context
        .device
        .bind_buffer_memory(buffer, allocation.memory(), allocation.offset())?
    };

    let mut buffer = Self {
      buffer,
      allocation,
      size,
    };
    buffer.mapped_mut()?[..size].fill(0);

    Ok(buffer)
  }

  pub fn write(&mut self, offset: usize, data: &[u8]) -> Result<(), Error> {
    let mapped = self.mapped_mut()?;
    let target = mapped
      .get_mut(offset..offset + data.len())
      .ok_or_else(|| anyhow!("Mapped range too small for write at {}", offset))?;
    target.copy_from_slice(data);
    Ok(())
  }

  pub fn read(&self, offset: usize, len: usize) -> Option<&[u8]> {
    self.allocation.mapped_slice()?.get(offset..offset + len)
  }

  pub fn cleanup(self, context: &VulkanContext) -> Result<(), Error> {
    unsafe { context.device.destroy_buffer(self.buffer, None) };
    context.with_allocator(|a| Ok(a.free(self.allocation)?))
  }

  pub fn vk_buffer(&self) -> vk::Buffer {
    self.buffer
  }

  pub fn size(&self) -> usize {
    self.size
  }

  fn mapped_mut(&mut self) -> Result<&mut [u8], Error> {
    self
      .allocation
      .mapped_slice_mut()
      .ok_or_else(|| anyhow!("Uniform buffer memory is not host visible"))
  }
}

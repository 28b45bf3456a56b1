/// Buffer memory living in host RAM, used when no GPU device is attached.
pub struct HostBuffer {
  data: Vec<u8>,
}

impl HostBuffer {
  pub fn new(size: usize) -> Self {
    Self {
      data: vec![0; size],
    }
  }

  /// Callers check bounds before writing.
  pub fn write(&mut self, offset: usize, data: &[u8]) {
    self.data[offset..offset + data.len()].copy_from_slice(data);
  }

  pub fn read(&self, offset: usize, len: usize) -> &[u8] {
    &self.data[offset..offset + len]
  }

  pub fn size(&self) -> usize {
    self.data.len()
  }
}

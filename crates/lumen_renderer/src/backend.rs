use anyhow::Error;
use glam::Mat4;

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ShaderId(pub u32);

#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
pub struct ModelId(pub u32);

/// Graphics API seam driven by the rendering system and uniform buffers.
pub trait RenderBackend {
  fn use_shader(&mut self, shader: ShaderId) -> Result<(), Error>;
  fn set_model_matrix(&mut self, shader: ShaderId, model: Mat4) -> Result<(), Error>;
  fn draw_mesh(&mut self, model: ModelId, shader: ShaderId) -> Result<(), Error>;
  fn bind_uniform_block(
    &mut self,
    shader: ShaderId,
    block: &str,
    binding_point: u32,
  ) -> Result<(), Error>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum RenderCommand {
  UseShader(ShaderId),
  SetModelMatrix(ShaderId, Mat4),
  DrawMesh {
    model: ModelId,
    shader: ShaderId,
  },
  BindUniformBlock {
    shader: ShaderId,
    block: String,
    binding_point: u32,
  },
}

/// Backend without a device, recording every command it receives.
#[derive(Debug, Default)]
pub struct HeadlessBackend {
  commands: Vec<RenderCommand>,
}

impl HeadlessBackend {
  pub fn new() -> Self {
    Self::default()
  }

  pub fn commands(&self) -> &[RenderCommand] {
    &self.commands
  }

  pub fn take_commands(&mut self) -> Vec<RenderCommand> {
    std::mem::take(&mut self.commands)
  }

  pub fn draw_count(&self) -> usize {
    self
      .commands
      .iter()
      .filter(|c| matches!(c, RenderCommand::DrawMesh { .. }))
      .count()
  }
}

impl RenderBackend for HeadlessBackend {
  fn use_shader(&mut self, shader: ShaderId) -> Result<(), Error> {
    self.commands.push(RenderCommand::UseShader(shader));
    Ok(())
  }

  fn set_model_matrix(&mut self, shader: ShaderId, model: Mat4) -> Result<(), Error> {
    self.commands.push(RenderCommand::SetModelMatrix(shader, model));
    Ok(())
  }

  fn draw_mesh(&mut self, model: ModelId, shader: ShaderId) -> Result<(), Error> {
    self.commands.push(RenderCommand::DrawMesh { model, shader });
    Ok(())
  }

  fn bind_uniform_block(
    &mut self,
    shader: ShaderId,
    block: &str,
    binding_point: u32,
  ) -> Result<(), Error> {
    self.commands.push(RenderCommand::BindUniformBlock {
      shader,
      block: block.to_owned(),
      binding_point,
    });
    Ok(())
  }
}

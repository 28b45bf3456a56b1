use log::info;
use lumen::{
  math::Vec3,
  prelude::*,
  renderer::{backend::RenderCommand, lighting::SlotKind},
};

fn main() -> anyhow::Result<()> {
  env_logger::init();

  let mut scene = Scene::new(SceneConfig::default(), HeadlessBackend::new())?;
  let shader = ShaderId(0);
  scene.bind_shader(shader)?;

  scene.create_camera(
    "Camera",
    Transform::from_position(Vec3::new(0.0, 3.0, 8.0)),
    Vec3::ZERO,
  )?;

  for (i, x) in [-2.0, 0.0, 2.0].into_iter().enumerate() {
    let cube = scene.create_entity(format!("Cube {}", i))?;
    scene.add_component(cube, Transform::from_position(Vec3::new(x, 0.0, 0.0)))?;
    scene.add_component(cube, Mesh { model: ModelId(0) })?;
    scene.add_component(cube, Shader { shader })?;
  }

  let lamp = scene.create_entity("Lamp")?;
  scene.add_component(lamp, Transform::from_position(Vec3::new(0.0, 2.0, 0.0)))?;
  scene.add_component(lamp, Light::point())?;

  let torch = scene.create_entity("Torch")?;
  scene.add_component(
    torch,
    Transform::from_position(Vec3::new(0.0, 4.0, 0.0)).with_rotation(Vec3::new(-90.0, 0.0, 0.0)),
  )?;
  scene.add_component(torch, Light::spot(12.5, 17.5))?;

  let sun = scene.create_entity("Sun")?;
  scene.add_component(sun, Transform::default().with_rotation(Vec3::new(-45.0, 30.0, 0.0)))?;
  scene.add_component(sun, Light::directional())?;

  for frame in 0..3 {
    scene.get_component_mut::<Transform>(lamp)?.position.x = frame as f32;
    scene.update(1.0 / 60.0)?;

    let draws = scene
      .backend_mut()
      .take_commands()
      .into_iter()
      .filter(|c| matches!(c, RenderCommand::DrawMesh { .. }))
      .count();
    info!("Frame {}: {} draws", frame, draws);
  }

  if let Some(lighting) = scene.lighting() {
    info!(
      "{} point and {} spot lights uploaded",
      lighting.slots().count(SlotKind::Point),
      lighting.slots().count(SlotKind::Spot)
    );
  }

  scene.cleanup()?;
  Ok(())
}

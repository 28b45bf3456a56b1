#[cfg(feature = "debug")]
use log::trace;
use log::{debug, warn};
use lumen_components::components::Transform;
use lumen_ecs::{components::ColumnAccess, store::ComponentStore, EntityId};

use crate::{
  config::LightingConfig,
  ecs::components::light::{Light, LightKind, LightType},
  lighting::{
    DirectionalLightRecord, LightSlotTable, LightingError, LightingLayout, PointLightRecord,
    SlotKind, SpotLightRecord,
  },
  memory::{BufferRegistry, UniformBuffer},
};

/// Which lights a refresh rewrites.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightUpdateType {
  Point,
  Spot,
  Directional,
  All,
}

impl LightUpdateType {
  pub fn includes(&self, light_type: LightType) -> bool {
    match self {
      LightUpdateType::All => true,
      LightUpdateType::Point => light_type == LightType::Point,
      LightUpdateType::Spot => light_type == LightType::Spot,
      LightUpdateType::Directional => light_type == LightType::Directional,
    }
  }
}

/// Mirrors every `{Transform, Light}` entity into the lighting buffer.
pub struct LightingSystem {
  buffer: String,
  layout: LightingLayout,
  slots: LightSlotTable,
}

impl LightingSystem {
  pub fn new(config: &LightingConfig) -> Result<Self, LightingError> {
    Ok(Self {
      buffer: config.buffer.clone(),
      layout: config.layout()?,
      slots: LightSlotTable::new(config.max_point_lights, config.max_spot_lights),
    })
  }

  pub fn layout(&self) -> &LightingLayout {
    &self.layout
  }

  pub fn slots(&self) -> &LightSlotTable {
    &self.slots
  }

  pub fn run<S>(&mut self, store: &S, buffers: &mut BufferRegistry) -> Result<(), LightingError>
  where
    S: ComponentStore + ColumnAccess<Transform> + ColumnAccess<Light>,
  {
    self.update_light_sources(store, buffers, LightUpdateType::All)
  }

  /// Rewrites the records of every light matching `filter`, in view order.
  pub fn update_light_sources<S>(
    &mut self,
    store: &S,
    buffers: &mut BufferRegistry,
    filter: LightUpdateType,
  ) -> Result<(), LightingError>
  where
    S: ComponentStore + ColumnAccess<Transform> + ColumnAccess<Light>,
  {
    let buffer = buffers.retrieve_mut(&self.buffer)?;
    let mut directional_lights = 0;

    for (id, (transform, light)) in store.query::<(Transform, Light)>() {
      if !filter.includes(light.light_type()) {
        continue;
      }
      if light.light_type() == LightType::Directional {
        directional_lights += 1;
      }
      self.write_light(buffer, id, transform, light)?;
    }

    if directional_lights > 1 {
      warn!(
        "{} directional lights in the scene, only the last one is used",
        directional_lights
      );
    }

    Ok(())
  }

  /// Rewrites the record of a single light entity.
  pub fn sync_light<S>(
    &mut self,
    store: &S,
    buffers: &mut BufferRegistry,
    id: EntityId,
  ) -> Result<(), LightingError>
  where
    S: ComponentStore + ColumnAccess<Transform> + ColumnAccess<Light>,
  {
    let transform = store.get_component::<Transform>(id)?;
    let light = store.get_component::<Light>(id)?;
    let buffer = buffers.retrieve_mut(&self.buffer)?;
    self.write_light(buffer, id, transform, light)
  }

  fn write_light(
    &mut self,
    buffer: &mut UniformBuffer,
    id: EntityId,
    transform: &Transform,
    light: &Light,
  ) -> Result<(), LightingError> {
    #[cfg(feature = "debug")]
    trace!("Syncing {:?} light of Entity {}", light.light_type(), id);

    match light.kind() {
      LightKind::Point => {
        let record = PointLightRecord::new(transform, light);
        self.write_slotted(buffer, id, SlotKind::Point, bytemuck::bytes_of(&record))
      }
      LightKind::Spot(cone) => {
        let record = SpotLightRecord::new(transform, light, &cone);
        self.write_slotted(buffer, id, SlotKind::Spot, bytemuck::bytes_of(&record))
      }
      LightKind::Directional => {
        let record = DirectionalLightRecord::new(transform, light);
        Ok(buffer.write_pod(self.layout.directional_offset(), &record)?)
      }
    }
  }

  fn write_slotted(
    &mut self,
    buffer: &mut UniformBuffer,
    id: EntityId,
    kind: SlotKind,
    record: &[u8],
  ) -> Result<(), LightingError> {
    let assignment = self.slots.preview(id, kind)?;
    let record_offset = self.layout.record_offset(kind, assignment.slot);
    let count_offset = self.layout.count_offset(kind);

    // nothing is committed unless both writes fit
    buffer.check_range(record_offset, record.len())?;
    if assignment.newly_assigned {
      buffer.check_range(count_offset, std::mem::size_of::<i32>())?;
    }

    buffer.write(record_offset, record)?;
    if assignment.newly_assigned {
      self.slots.resolve_or_assign(id, kind)?;
      let count = self.slots.count(kind) as i32;
      buffer.write_pod(count_offset, &count)?;
      debug!("Assigned {:?} light slot {} to Entity {}", kind, assignment.slot, id);
    }

    Ok(())
  }
}

#[cfg(test)]
mod test {
  use glam::Vec3;
  use lumen_components::components::Transform;
  use lumen_ecs::{component_store, error::ErrorKind, store::ComponentStore};

  use super::{LightUpdateType, LightingSystem};
  use crate::{
    config::LightingConfig,
    ecs::components::light::Light,
    lighting::{
      DirectionalLightRecord, LightingError, LightingLayout, PointLightRecord, SlotKind,
      SpotLightRecord,
    },
    memory::{BufferRegistry, UniformBuffer},
  };

  component_store! {
    struct LightStore {
      transforms: Transform,
      lights: Light,
    }
  }

  fn setup(config: &LightingConfig) -> (LightingSystem, BufferRegistry) {
    let mut buffer = UniformBuffer::configure("Lighting", config.layout().unwrap().size());
    buffer.allocate().unwrap();
    let mut buffers = BufferRegistry::new();
    buffers.register(config.buffer.clone(), buffer);
    (LightingSystem::new(config).unwrap(), buffers)
  }

  fn spawn(store: &mut LightStore, position: Vec3, light: Light) -> u64 {
    let id = store.create_entity();
    store.add_component(id, Transform::from_position(position)).unwrap();
    store.add_component(id, light).unwrap();
    id
  }

  fn lighting(buffers: &BufferRegistry) -> &UniformBuffer {
    buffers.retrieve("lighting").unwrap()
  }

  #[test]
  fn point_lights_fill_slots_in_order() {
    let config = LightingConfig::default();
    let (mut system, mut buffers) = setup(&config);
    let mut store = LightStore::default();
    let first = spawn(&mut store, Vec3::X, Light::point());
    let second = spawn(&mut store, Vec3::Y, Light::point());

    system.run(&store, &mut buffers).unwrap();

    let buffer = lighting(&buffers);
    assert_eq!(buffer.read_pod::<i32>(LightingLayout::POINT_COUNT_OFFSET).unwrap(), 2);
    let layout = system.layout();
    let record: PointLightRecord = buffer.read_pod(layout.record_offset(SlotKind::Point, 1)).unwrap();
    assert_eq!(record.position, [0.0, 1.0, 0.0, 1.0]);
    assert_eq!(system.slots().slot(first, SlotKind::Point), Some(0));
    assert_eq!(system.slots().slot(second, SlotKind::Point), Some(1));
  }

  #[test]
  fn moved_light_keeps_its_slot() {
    let config = LightingConfig::default();
    let (mut system, mut buffers) = setup(&config);
    let mut store = LightStore::default();
    spawn(&mut store, Vec3::X, Light::point());
    let moved = spawn(&mut store, Vec3::Y, Light::point());
    system.run(&store, &mut buffers).unwrap();

    store.get_component_mut::<Transform>(moved).unwrap().position = Vec3::Z;
    system.run(&store, &mut buffers).unwrap();

    let buffer = lighting(&buffers);
    let record: PointLightRecord = buffer.read_pod(LightingLayout::POINT_ARRAY_OFFSET + 80).unwrap();
    assert_eq!(record.position, [0.0, 0.0, 1.0, 1.0]);
    assert_eq!(buffer.read_pod::<i32>(LightingLayout::POINT_COUNT_OFFSET).unwrap(), 2);
  }

  #[test]
  fn destroyed_light_slot_is_not_reused() {
    let config = LightingConfig::default();
    let (mut system, mut buffers) = setup(&config);
    let mut store = LightStore::default();
    spawn(&mut store, Vec3::X, Light::point());
    let doomed = spawn(&mut store, Vec3::Y, Light::point());
    system.run(&store, &mut buffers).unwrap();

    store.destroy_entity(doomed).unwrap();
    let third = spawn(&mut store, Vec3::Z, Light::point());
    system.run(&store, &mut buffers).unwrap();

    assert_eq!(system.slots().slot(third, SlotKind::Point), Some(2));
    let buffer = lighting(&buffers);
    assert_eq!(buffer.read_pod::<i32>(LightingLayout::POINT_COUNT_OFFSET).unwrap(), 3);
  }

  #[test]
  fn spot_lights_use_their_own_array() {
    let config = LightingConfig::default().set_max_point_lights(4).set_max_spot_lights(4);
    let (mut system, mut buffers) = setup(&config);
    let mut store = LightStore::default();
    spawn(&mut store, Vec3::X, Light::point());
    spawn(&mut store, Vec3::ONE, Light::spot(60.0, 90.0));

    system.run(&store, &mut buffers).unwrap();

    let layout = *system.layout();
    let buffer = lighting(&buffers);
    assert_eq!(buffer.read_pod::<i32>(layout.spot_count_offset()).unwrap(), 1);
    let record: SpotLightRecord = buffer.read_pod(layout.record_offset(SlotKind::Spot, 0)).unwrap();
    assert_eq!(record.position, [1.0, 1.0, 1.0, 1.0]);
    assert!((record.inner_cutoff - 0.5).abs() < 1e-6);
  }

  #[test]
  fn last_directional_light_wins() {
    let config = LightingConfig::default().set_max_point_lights(1).set_max_spot_lights(1);
    let (mut system, mut buffers) = setup(&config);
    let mut store = LightStore::default();
    spawn(&mut store, Vec3::ZERO, Light::directional());
    let last = store.create_entity();
    store
      .add_component(last, Transform::default().with_rotation(Vec3::new(0.0, 90.0, 0.0)))
      .unwrap();
    store.add_component(last, Light::directional()).unwrap();

    system.run(&store, &mut buffers).unwrap();

    let layout = *system.layout();
    let record: DirectionalLightRecord =
      lighting(&buffers).read_pod(layout.directional_offset()).unwrap();
    assert!((record.direction[0] + 1.0).abs() < 1e-6);
    assert!(record.direction[2].abs() < 1e-6);
  }

  #[test]
  fn capacity_exceeded_fails_the_tick() {
    let config = LightingConfig::default().set_max_point_lights(1).set_max_spot_lights(1);
    let (mut system, mut buffers) = setup(&config);
    let mut store = LightStore::default();
    spawn(&mut store, Vec3::X, Light::point());
    let overflow = spawn(&mut store, Vec3::Y, Light::point());

    let err = system.run(&store, &mut buffers).unwrap_err();

    assert!(matches!(err, LightingError::CapacityExceeded { .. }));
    assert_eq!(err.kind(), ErrorKind::OutOfRange);
    assert_eq!(system.slots().slot(overflow, SlotKind::Point), None);
  }

  #[test]
  fn missing_buffer_is_not_found() {
    let mut system = LightingSystem::new(&LightingConfig::default()).unwrap();
    let mut buffers = BufferRegistry::new();
    let store = LightStore::default();

    let err = system.run(&store, &mut buffers).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
  }

  #[test]
  fn undersized_buffer_is_out_of_range() {
    let config = LightingConfig::default();
    let mut buffer = UniformBuffer::configure("Lighting", 64);
    buffer.allocate().unwrap();
    let mut buffers = BufferRegistry::new();
    buffers.register("lighting", buffer);
    let mut system = LightingSystem::new(&config).unwrap();
    let mut store = LightStore::default();
    let id = spawn(&mut store, Vec3::X, Light::point());

    let err = system.run(&store, &mut buffers).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::OutOfRange);

    // a failed record write leaves neither a slot nor a count behind
    assert_eq!(system.slots().slot(id, SlotKind::Point), None);
    assert_eq!(system.slots().count(SlotKind::Point), 0);
    let buffer = lighting(&buffers);
    assert_eq!(buffer.read_pod::<i32>(LightingLayout::POINT_COUNT_OFFSET).unwrap(), 0);
    assert!(buffer.read(0, 64).unwrap().iter().all(|b| *b == 0));
  }

  #[test]
  fn filtered_update_skips_other_kinds() {
    let config = LightingConfig::default();
    let (mut system, mut buffers) = setup(&config);
    let mut store = LightStore::default();
    let point = spawn(&mut store, Vec3::X, Light::point());
    let spot = spawn(&mut store, Vec3::Y, Light::spot(10.0, 20.0));

    system
      .update_light_sources(&store, &mut buffers, LightUpdateType::Spot)
      .unwrap();

    assert_eq!(system.slots().slot(point, SlotKind::Point), None);
    assert_eq!(system.slots().slot(spot, SlotKind::Spot), Some(0));
  }

  #[test]
  fn sync_single_light() {
    let config = LightingConfig::default();
    let (mut system, mut buffers) = setup(&config);
    let mut store = LightStore::default();
    spawn(&mut store, Vec3::X, Light::point());
    let id = spawn(&mut store, Vec3::Y, Light::point());

    system.sync_light(&store, &mut buffers, id).unwrap();
    assert_eq!(system.slots().slot(id, SlotKind::Point), Some(0));

    let err = system.sync_light(&store, &mut buffers, 99).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::NotFound);
  }
}

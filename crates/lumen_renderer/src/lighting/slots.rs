use lumen_ecs::EntityId;
use rustc_hash::FxHashMap;

use crate::ecs::components::light::LightType;

use super::error::LightingError;

/// Light kinds stored in a fixed size array of the lighting block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SlotKind {
  Point,
  Spot,
}

impl SlotKind {
  pub fn from_light_type(light_type: LightType) -> Option<Self> {
    match light_type {
      LightType::Point => Some(SlotKind::Point),
      LightType::Spot => Some(SlotKind::Spot),
      LightType::Directional => None,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SlotAssignment {
  pub slot: u32,
  /// The entity had no slot of this kind before the call.
  pub newly_assigned: bool,
}

#[derive(Debug)]
struct KindSlots {
  slots: FxHashMap<EntityId, u32>,
  next_slot: u32,
  capacity: u32,
}

impl KindSlots {
  fn new(capacity: u32) -> Self {
    Self {
      slots: FxHashMap::default(),
      next_slot: 0,
      capacity,
    }
  }
}

/// Stable mapping from light entities to array slots.
///
/// Slots are handed out in first-seen order and never reused, even after the
/// entity is gone, so `count` is the number of lights ever assigned.
#[derive(Debug)]
pub struct LightSlotTable {
  point: KindSlots,
  spot: KindSlots,
}

impl LightSlotTable {
  pub fn new(max_point_lights: u32, max_spot_lights: u32) -> Self {
    Self {
      point: KindSlots::new(max_point_lights),
      spot: KindSlots::new(max_spot_lights),
    }
  }

  /// What [`LightSlotTable::resolve_or_assign`] would return, without
  /// assigning anything.
  pub fn preview(&self, entity: EntityId, kind: SlotKind) -> Result<SlotAssignment, LightingError> {
    let slots = self.slots(kind);

    if let Some(slot) = slots.slots.get(&entity) {
      return Ok(SlotAssignment {
        slot: *slot,
        newly_assigned: false,
      });
    }

    if slots.next_slot >= slots.capacity {
      return Err(LightingError::CapacityExceeded {
        light: kind,
        capacity: slots.capacity,
      });
    }

    Ok(SlotAssignment {
      slot: slots.next_slot,
      newly_assigned: true,
    })
  }

  pub fn resolve_or_assign(
    &mut self,
    entity: EntityId,
    kind: SlotKind,
  ) -> Result<SlotAssignment, LightingError> {
    let assignment = self.preview(entity, kind)?;

    if assignment.newly_assigned {
      let slots = self.slots_mut(kind);
      slots.next_slot += 1;
      slots.slots.insert(entity, assignment.slot);
    }

    Ok(assignment)
  }

  pub fn slot(&self, entity: EntityId, kind: SlotKind) -> Option<u32> {
    self.slots(kind).slots.get(&entity).copied()
  }

  pub fn count(&self, kind: SlotKind) -> u32 {
    self.slots(kind).next_slot
  }

  pub fn capacity(&self, kind: SlotKind) -> u32 {
    self.slots(kind).capacity
  }

  fn slots(&self, kind: SlotKind) -> &KindSlots {
    match kind {
      SlotKind::Point => &self.point,
      SlotKind::Spot => &self.spot,
    }
  }

  fn slots_mut(&mut self, kind: SlotKind) -> &mut KindSlots {
    match kind {
      SlotKind::Point => &mut self.point,
      SlotKind::Spot => &mut self.spot,
    }
  }
}

use std::mem::{offset_of, size_of};

use bytemuck::{Pod, Zeroable};
use glam::Vec3;
use lumen_components::components::Transform;

use crate::ecs::components::light::{Light, SpotCone};

use super::{error::LightingError, slots::SlotKind};

/// Point light as laid out in the std140 lighting block.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct PointLightRecord {
  pub position: [f32; 4],
  pub constant: f32,
  pub linear: f32,
  pub quadratic: f32,
  pub _padding: f32,
  pub ambient: [f32; 4],
  pub diffuse: [f32; 4],
  pub specular: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct SpotLightRecord {
  pub position: [f32; 4],
  pub direction: [f32; 4],
  pub constant: f32,
  pub linear: f32,
  pub quadratic: f32,
  /// Cosine of the inner cone angle.
  pub inner_cutoff: f32,
  pub outer_cutoff: f32,
  pub _padding: [f32; 3],
  pub ambient: [f32; 4],
  pub diffuse: [f32; 4],
  pub specular: [f32; 4],
}

#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Pod, Zeroable)]
pub struct DirectionalLightRecord {
  pub direction: [f32; 4],
  pub ambient: [f32; 4],
  pub diffuse: [f32; 4],
  pub specular: [f32; 4],
}

const _: () = assert!(size_of::<PointLightRecord>() == 80);
const _: () = assert!(offset_of!(PointLightRecord, constant) == 16);
const _: () = assert!(offset_of!(PointLightRecord, ambient) == 32);
const _: () = assert!(size_of::<SpotLightRecord>() == 112);
const _: () = assert!(offset_of!(SpotLightRecord, constant) == 32);
const _: () = assert!(offset_of!(SpotLightRecord, outer_cutoff) == 48);
const _: () = assert!(offset_of!(SpotLightRecord, ambient) == 64);
const _: () = assert!(size_of::<DirectionalLightRecord>() == 64);

fn vec4(v: Vec3, w: f32) -> [f32; 4] {
  v.extend(w).to_array()
}

impl PointLightRecord {
  pub fn new(transform: &Transform, light: &Light) -> Self {
    Self {
      position: vec4(transform.position, 1.0),
      constant: light.attenuation.constant,
      linear: light.attenuation.linear,
      quadratic: light.attenuation.quadratic,
      _padding: 0.0,
      ambient: vec4(light.ambient, 0.0),
      diffuse: vec4(light.diffuse, 0.0),
      specular: vec4(light.specular, 0.0),
    }
  }
}

impl SpotLightRecord {
  pub fn new(transform: &Transform, light: &Light, cone: &SpotCone) -> Self {
    Self {
      position: vec4(transform.position, 1.0),
      direction: vec4(transform.direction(), 0.0),
      constant: light.attenuation.constant,
      linear: light.attenuation.linear,
      quadratic: light.attenuation.quadratic,
      inner_cutoff: cone.inner.to_radians().cos(),
      outer_cutoff: cone.outer.to_radians().cos(),
      _padding: [0.0; 3],
      ambient: vec4(light.ambient, 0.0),
      diffuse: vec4(light.diffuse, 0.0),
      specular: vec4(light.specular, 0.0),
    }
  }
}

impl DirectionalLightRecord {
  pub fn new(transform: &Transform, light: &Light) -> Self {
    Self {
      direction: vec4(transform.direction(), 0.0),
      ambient: vec4(light.ambient, 0.0),
      diffuse: vec4(light.diffuse, 0.0),
      specular: vec4(light.specular, 0.0),
    }
  }
}

/// Byte offsets of the std140 lighting block for the given array capacities.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LightingLayout {
  max_point_lights: u32,
  max_spot_lights: u32,
  spot_count_offset: usize,
  directional_offset: usize,
}

impl LightingLayout {
  pub const VIEW_POSITION_OFFSET: usize = 0;
  pub const POINT_COUNT_OFFSET: usize = 16;
  pub const POINT_ARRAY_OFFSET: usize = 32;
  pub const POINT_STRIDE: usize = size_of::<PointLightRecord>();
  pub const SPOT_STRIDE: usize = size_of::<SpotLightRecord>();
  pub const DIRECTIONAL_SIZE: usize = size_of::<DirectionalLightRecord>();

  /// Fails when the block would not be addressable with `usize` offsets.
  pub fn new(max_point_lights: u32, max_spot_lights: u32) -> Result<Self, LightingError> {
    let overflow = || LightingError::LayoutOverflow {
      max_point_lights,
      max_spot_lights,
    };

    let spot_count_offset = usize::try_from(max_point_lights)
      .ok()
      .and_then(|n| n.checked_mul(Self::POINT_STRIDE))
      .and_then(|n| n.checked_add(Self::POINT_ARRAY_OFFSET))
      .ok_or_else(overflow)?;
    // the int count is padded to a full vec4 before the spot array
    let directional_offset = usize::try_from(max_spot_lights)
      .ok()
      .and_then(|n| n.checked_mul(Self::SPOT_STRIDE))
      .and_then(|n| n.checked_add(spot_count_offset))
      .and_then(|n| n.checked_add(16))
      .filter(|n| n.checked_add(Self::DIRECTIONAL_SIZE).is_some())
      .ok_or_else(overflow)?;

    Ok(Self {
      max_point_lights,
      max_spot_lights,
      spot_count_offset,
      directional_offset,
    })
  }

  pub fn max_point_lights(&self) -> u32 {
    self.max_point_lights
  }

  pub fn max_spot_lights(&self) -> u32 {
    self.max_spot_lights
  }

  pub fn spot_count_offset(&self) -> usize {
    self.spot_count_offset
  }

  pub fn spot_array_offset(&self) -> usize {
    self.spot_count_offset + 16
  }

  pub fn directional_offset(&self) -> usize {
    self.directional_offset
  }

  pub fn size(&self) -> usize {
    self.directional_offset + Self::DIRECTIONAL_SIZE
  }

  pub fn count_offset(&self, kind: SlotKind) -> usize {
    match kind {
      SlotKind::Point => Self::POINT_COUNT_OFFSET,
      SlotKind::Spot => self.spot_count_offset(),
    }
  }

  /// `slot` must be below the capacity of `kind`.
  pub fn record_offset(&self, kind: SlotKind, slot: u32) -> usize {
    match kind {
      SlotKind::Point => Self::POINT_ARRAY_OFFSET + slot as usize * Self::POINT_STRIDE,
      SlotKind::Spot => self.spot_array_offset() + slot as usize * Self::SPOT_STRIDE,
    }
  }
}

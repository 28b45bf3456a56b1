use glam::Vec3;
use lumen_ecs::Component;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Attenuation {
  pub constant: f32,
  pub linear: f32,
  pub quadratic: f32,
}

impl Default for Attenuation {
  fn default() -> Self {
    Self {
      constant: 1.0,
      linear: 0.09,
      quadratic: 0.032,
    }
  }
}

/// Cone of a spot light, angles in degrees from the light direction.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct SpotCone {
  pub inner: f32,
  pub outer: f32,
}

impl Default for SpotCone {
  fn default() -> Self {
    Self {
      inner: 12.5,
      outer: 17.5,
    }
  }
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum LightKind {
  Point,
  Directional,
  Spot(SpotCone),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LightType {
  Point,
  Directional,
  Spot,
}

impl LightKind {
  pub fn light_type(&self) -> LightType {
    match self {
      LightKind::Point => LightType::Point,
      LightKind::Directional => LightType::Directional,
      LightKind::Spot(_) => LightType::Spot,
    }
  }
}

/// Light source attached to an entity. Its kind is fixed at construction.
#[derive(Component, Clone, Debug, PartialEq)]
pub struct Light {
  kind: LightKind,
  pub attenuation: Attenuation,
  pub ambient: Vec3,
  pub diffuse: Vec3,
  pub specular: Vec3,
}

impl Light {
  fn new(kind: LightKind) -> Self {
    Self {
      kind,
      attenuation: Attenuation::default(),
      ambient: Vec3::splat(0.05),
      diffuse: Vec3::splat(0.8),
      specular: Vec3::ONE,
    }
  }

  pub fn point() -> Self {
    Self::new(LightKind::Point)
  }

  pub fn directional() -> Self {
    Self::new(LightKind::Directional)
  }

  pub fn spot(inner: f32, outer: f32) -> Self {
    Self::new(LightKind::Spot(SpotCone { inner, outer }))
  }

  pub fn with_colors(mut self, ambient: Vec3, diffuse: Vec3, specular: Vec3) -> Self {
    self.ambient = ambient;
    self.diffuse = diffuse;
    self.specular = specular;
    self
  }

  pub fn with_attenuation(mut self, constant: f32, linear: f32, quadratic: f32) -> Self {
    self.attenuation = Attenuation {
      constant,
      linear,
      quadratic,
    };
    self
  }

  pub fn kind(&self) -> LightKind {
    self.kind
  }

  pub fn light_type(&self) -> LightType {
    self.kind.light_type()
  }

  pub fn cone(&self) -> Option<&SpotCone> {
    match &self.kind {
      LightKind::Spot(cone) => Some(cone),
      _ => None,
    }
  }

  /// Cutoff angles can change, the kind cannot.
  pub fn cone_mut(&mut self) -> Option<&mut SpotCone> {
    match &mut self.kind {
      LightKind::Spot(cone) => Some(cone),
      _ => None,
    }
  }
}

pub mod error;
pub mod layout;
pub mod slots;

pub use error::LightingError;
pub use layout::{DirectionalLightRecord, LightingLayout, PointLightRecord, SpotLightRecord};
pub use slots::{LightSlotTable, SlotAssignment, SlotKind};

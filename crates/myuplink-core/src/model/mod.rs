// ── Domain model ──
//
// Canonical types built from the wire types in `myuplink-api`.
// Everything here is immutable within a refresh cycle.

pub mod device;
pub mod ids;
pub mod point;
pub mod snapshot;
pub mod system;

pub use device::{ConnectionState, Device};
pub use ids::{DeviceId, SystemId};
pub use point::{DevicePoint, EnumValue, PointValue};
pub use snapshot::Snapshot;
pub use system::System;

//! Data layer between `myuplink-api` and its consumers.
//!
//! This crate owns the domain model, the polling coordinator, and the
//! point-to-entity mapping logic for the myUplink workspace:
//!
//! - **[`Coordinator`]** -- Periodic-refresh wrapper around
//!   [`MyUplinkClient`](myuplink_api::MyUplinkClient). Holds the latest
//!   [`Snapshot`] and replaces it atomically on every refresh;
//!   overlapping refreshes queue. Auth failures are terminal
//!   ([`CoreError::AuthenticationFailed`]), everything else transient
//!   ([`CoreError::NotReady`]).
//!
//! - **[`classify`]** -- Pure classification of a device point into its
//!   target entity kind (sensor, binary sensor, number, switch) from
//!   enum/range/writability metadata.
//!
//! - **[`resolve_names`]** -- Product-name pattern table mapping devices
//!   to (manufacturer, series), with an explicit unknown-model sentinel.
//!
//! - **[`build_device_records`]** -- Device identity records for a host
//!   registry, grouping multi-device systems under a synthetic parent.
//!
//! - **Entity adapters** ([`entity`]) -- Read-only views over the
//!   snapshot, one per classified point / system attribute / device
//!   firmware state, each owning a coordinator handle.

pub mod classify;
pub mod convert;
pub mod coordinator;
pub mod entity;
pub mod error;
pub mod model;
pub mod names;
pub mod registry;

// ── Primary re-exports ──────────────────────────────────────────────
pub use classify::{EntityKind, classify};
pub use coordinator::{Coordinator, CoordinatorState, DEFAULT_REFRESH_INTERVAL};
pub use entity::{Entities, build_entities};
pub use error::CoreError;
pub use names::{ResolvedNames, UNKNOWN_MODEL, resolve_names};
pub use registry::{DeviceRecord, build_device_records};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    ConnectionState, Device, DeviceId, DevicePoint, EnumValue, PointValue, Snapshot, System,
    SystemId,
};

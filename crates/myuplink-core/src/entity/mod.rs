// ── Entity adapters ──
//
// Thin read-only views over the coordinator snapshot: one adapter per
// classified device point, one per system attribute, one update
// adapter per device. Each adapter owns a coordinator handle passed at
// construction time; state reads always go through the current
// snapshot, so an adapter created before a refresh observes values
// from after it.

pub mod descriptions;

pub use descriptions::{PointDescription, description_for};

use serde_json::json;

use crate::classify::{EntityKind, classify};
use crate::coordinator::Coordinator;
use crate::error::CoreError;
use crate::model::{DeviceId, DevicePoint, PointValue, SystemId};

// ── System attributes ────────────────────────────────────────────────

/// System-level attributes surfaced as binary sensors.
///
/// An explicit enumerated set of typed accessors; attribute resolution
/// happens here, at registration time, never by runtime name lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SystemAttribute {
    HasAlarm,
}

impl SystemAttribute {
    /// All attributes an entity set is built from.
    pub const ALL: &'static [Self] = &[Self::HasAlarm];

    /// Stable key used in the adapter's unique id.
    pub fn key(self) -> &'static str {
        match self {
            Self::HasAlarm => "alarm",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            Self::HasAlarm => "Alarm",
        }
    }

    fn read(self, system: &crate::model::System) -> bool {
        match self {
            Self::HasAlarm => system.has_alarm,
        }
    }
}

// ── Point adapters ───────────────────────────────────────────────────

/// Adapter for one device point, behaving per its classified kind.
#[derive(Clone)]
pub struct PointEntity {
    coordinator: Coordinator,
    device_id: DeviceId,
    parameter_id: String,
    kind: EntityKind,
    unique_id: String,
    name: String,
    description: Option<&'static PointDescription>,
}

impl PointEntity {
    fn new(coordinator: Coordinator, point: &DevicePoint) -> Self {
        let description = description_for(point);
        Self {
            unique_id: format!("{}-{}", point.device_id, point.parameter_id),
            device_id: point.device_id.clone(),
            parameter_id: point.parameter_id.clone(),
            kind: classify(point, description),
            name: point.parameter_name.clone(),
            description,
            coordinator,
        }
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn parameter_id(&self) -> &str {
        &self.parameter_id
    }

    pub fn description(&self) -> Option<&'static PointDescription> {
        self.description
    }

    /// The point's current value from the live snapshot. `None` when
    /// the point disappeared from the latest refresh.
    pub fn value(&self) -> Option<PointValue> {
        let snapshot = self.coordinator.snapshot();
        snapshot
            .point(&self.device_id, &self.parameter_id)
            .map(|p| p.value.clone())
    }

    pub fn numeric_value(&self) -> Option<f64> {
        self.value()?.as_f64()
    }

    /// Binary state: a non-zero value reads as "on".
    pub fn is_on(&self) -> bool {
        self.value().is_some_and(|v| v.is_nonzero())
    }

    /// Unit string from the live snapshot, preferring the description
    /// override.
    pub fn unit(&self) -> Option<String> {
        if let Some(unit) = self.description.and_then(|d| d.unit) {
            return Some(unit.to_owned());
        }
        let snapshot = self.coordinator.snapshot();
        snapshot
            .point(&self.device_id, &self.parameter_id)
            .map(|p| p.unit.clone())
            .filter(|u| !u.is_empty())
    }

    /// Write a numeric value (number adapters).
    pub async fn set(&self, value: f64) -> Result<(), CoreError> {
        self.coordinator
            .set_point(&self.device_id, &self.parameter_id, json!(value))
            .await
    }

    /// Switch on (switch adapters). The API expects the enum value as a
    /// string.
    pub async fn turn_on(&self) -> Result<(), CoreError> {
        self.coordinator
            .set_point(&self.device_id, &self.parameter_id, json!("1"))
            .await
    }

    /// Switch off (switch adapters).
    pub async fn turn_off(&self) -> Result<(), CoreError> {
        self.coordinator
            .set_point(&self.device_id, &self.parameter_id, json!("0"))
            .await
    }
}

// ── System adapters ──────────────────────────────────────────────────

/// Binary sensor for one system-level attribute.
#[derive(Clone)]
pub struct SystemBinarySensor {
    coordinator: Coordinator,
    system_id: SystemId,
    attribute: SystemAttribute,
    unique_id: String,
}

impl SystemBinarySensor {
    fn new(coordinator: Coordinator, system_id: SystemId, attribute: SystemAttribute) -> Self {
        Self {
            unique_id: format!("{}-{}", system_id, attribute.key()),
            coordinator,
            system_id,
            attribute,
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn name(&self) -> &'static str {
        self.attribute.display_name()
    }

    pub fn system_id(&self) -> &SystemId {
        &self.system_id
    }

    /// Attribute state from the live snapshot; `None` when the system
    /// disappeared from the latest refresh.
    pub fn is_on(&self) -> Option<bool> {
        let snapshot = self.coordinator.snapshot();
        snapshot
            .system(&self.system_id)
            .map(|s| self.attribute.read(s))
    }
}

// ── Update adapters ──────────────────────────────────────────────────

/// Firmware update indicator for one device.
#[derive(Clone)]
pub struct UpdateEntity {
    coordinator: Coordinator,
    device_id: DeviceId,
    unique_id: String,
}

impl UpdateEntity {
    fn new(coordinator: Coordinator, device_id: DeviceId) -> Self {
        Self {
            unique_id: format!("{device_id}-firmware"),
            coordinator,
            device_id,
        }
    }

    pub fn unique_id(&self) -> &str {
        &self.unique_id
    }

    pub fn device_id(&self) -> &DeviceId {
        &self.device_id
    }

    pub fn installed_version(&self) -> Option<String> {
        let snapshot = self.coordinator.snapshot();
        snapshot
            .device(&self.device_id)
            .and_then(|d| d.firmware_current.clone())
    }

    pub fn latest_version(&self) -> Option<String> {
        let snapshot = self.coordinator.snapshot();
        snapshot
            .device(&self.device_id)
            .and_then(|d| d.firmware_desired.clone())
    }

    pub fn update_available(&self) -> bool {
        let snapshot = self.coordinator.snapshot();
        snapshot
            .device(&self.device_id)
            .is_some_and(crate::model::Device::firmware_update_available)
    }
}

// ── Entity set construction ──────────────────────────────────────────

/// The full adapter set built from one snapshot walk, grouped by kind.
#[derive(Default)]
pub struct Entities {
    pub sensors: Vec<PointEntity>,
    pub binary_sensors: Vec<PointEntity>,
    pub numbers: Vec<PointEntity>,
    pub switches: Vec<PointEntity>,
    pub system_binary_sensors: Vec<SystemBinarySensor>,
    pub updates: Vec<UpdateEntity>,
}

impl Entities {
    pub fn len(&self) -> usize {
        self.sensors.len()
            + self.binary_sensors.len()
            + self.numbers.len()
            + self.switches.len()
            + self.system_binary_sensors.len()
            + self.updates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// All point adapters regardless of kind.
    pub fn points(&self) -> impl Iterator<Item = &PointEntity> {
        self.sensors
            .iter()
            .chain(&self.binary_sensors)
            .chain(&self.numbers)
            .chain(&self.switches)
    }
}

/// Walk the coordinator's current snapshot and build the adapter set.
///
/// Point adapters are sorted by unique id so repeated builds over the
/// same snapshot produce the same ordering.
pub fn build_entities(coordinator: &Coordinator) -> Entities {
    let snapshot = coordinator.snapshot();
    let mut entities = Entities::default();

    for point in snapshot.iter_points() {
        let adapter = PointEntity::new(coordinator.clone(), point);
        match adapter.kind() {
            EntityKind::Sensor => entities.sensors.push(adapter),
            EntityKind::BinarySensor => entities.binary_sensors.push(adapter),
            EntityKind::Number => entities.numbers.push(adapter),
            EntityKind::Switch => entities.switches.push(adapter),
        }
    }

    for group in [
        &mut entities.sensors,
        &mut entities.binary_sensors,
        &mut entities.numbers,
        &mut entities.switches,
    ] {
        group.sort_by(|a, b| a.unique_id.cmp(&b.unique_id));
    }

    for system in &snapshot.systems {
        for attribute in SystemAttribute::ALL {
            entities.system_binary_sensors.push(SystemBinarySensor::new(
                coordinator.clone(),
                system.id.clone(),
                *attribute,
            ));
        }

        for device_id in &system.devices {
            entities
                .updates
                .push(UpdateEntity::new(coordinator.clone(), device_id.clone()));
        }
    }

    entities
}

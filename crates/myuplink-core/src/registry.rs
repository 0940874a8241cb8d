// ── Device registry records ──
//
// Builds the device identity records a host registry consumes from a
// snapshot. Multi-device systems get a synthetic parent record so the
// member devices group under one installation node; single-device
// systems collapse to one record.

use serde::Serialize;

use crate::model::Snapshot;
use crate::names::resolve_names;

/// Identity record for one registry entry (device or synthetic system).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeviceRecord {
    pub id: String,
    pub name: String,
    pub manufacturer: Option<String>,
    pub model: Option<String>,
    pub firmware_version: Option<String>,
    pub serial_number: Option<String>,
    /// Id of the synthetic system record this device groups under.
    /// `None` for single-device systems and for the system record itself.
    pub parent_id: Option<String>,
}

/// Build registry records for every system and device in the snapshot.
///
/// Deterministic over snapshot content: re-running with an identical
/// snapshot produces identical records, so consumers can apply
/// create-or-update semantics.
pub fn build_device_records(snapshot: &Snapshot) -> Vec<DeviceRecord> {
    let mut records = Vec::new();

    for system in &snapshot.systems {
        let grouped = system.devices.len() > 1;

        if grouped {
            let first_product = system
                .devices
                .first()
                .and_then(|id| snapshot.device(id))
                .and_then(|d| d.product_name.clone());

            records.push(DeviceRecord {
                id: system.id.to_string(),
                name: format!("{} - System", system.name),
                manufacturer: None,
                model: first_product,
                firmware_version: None,
                serial_number: None,
                parent_id: None,
            });
        }

        for device_id in &system.devices {
            let Some(device) = snapshot.device(device_id) else {
                continue;
            };
            let resolved = resolve_names(system, device);

            records.push(DeviceRecord {
                id: device.id.to_string(),
                name: resolved.name,
                manufacturer: resolved.manufacturer,
                model: Some(resolved.model),
                firmware_version: device.firmware_current.clone(),
                serial_number: device.serial_number.clone(),
                parent_id: grouped.then(|| system.id.to_string()),
            });
        }
    }

    records
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ConnectionState, Device, DeviceId, System, SystemId};
    use pretty_assertions::assert_eq;

    fn device(id: &str, system_id: &str, product_name: &str) -> Device {
        Device {
            id: DeviceId::from(id),
            system_id: SystemId::from(system_id),
            product_name: Some(product_name.to_owned()),
            serial_number: Some(format!("serial-{id}")),
            firmware_current: Some("9501R2".into()),
            firmware_desired: Some("9501R2".into()),
            connection_state: ConnectionState::Connected,
        }
    }

    fn snapshot(systems: Vec<System>, devices: Vec<Device>) -> Snapshot {
        Snapshot {
            systems,
            devices: devices.into_iter().map(|d| (d.id.clone(), d)).collect(),
            points: std::collections::HashMap::new(),
        }
    }

    #[test]
    fn two_device_system_yields_parent_and_children() {
        let system = System {
            id: SystemId::from("sys-1"),
            name: "Huset".into(),
            has_alarm: false,
            security_level: None,
            country: None,
            devices: vec![DeviceId::from("dev-1"), DeviceId::from("dev-2")],
        };
        let snap = snapshot(
            vec![system],
            vec![
                device("dev-1", "sys-1", "VVM320 E"),
                device("dev-2", "sys-1", "F730 CU 3x400V"),
            ],
        );

        let records = build_device_records(&snap);

        assert_eq!(records.len(), 3);

        let parent = &records[0];
        assert_eq!(parent.id, "sys-1");
        assert_eq!(parent.name, "Huset - System");
        assert_eq!(parent.model.as_deref(), Some("VVM320 E"));
        assert_eq!(parent.parent_id, None);

        for child in &records[1..] {
            assert_eq!(child.parent_id.as_deref(), Some("sys-1"));
            assert_eq!(child.name, "Huset");
            assert_eq!(child.manufacturer.as_deref(), Some("Nibe"));
        }
        assert_eq!(records[1].model.as_deref(), Some("VVM320"));
        assert_eq!(records[2].model.as_deref(), Some("F730"));
    }

    #[test]
    fn single_device_system_yields_one_record() {
        let system = System {
            id: SystemId::from("sys-1"),
            name: "Stugan".into(),
            has_alarm: false,
            security_level: None,
            country: None,
            devices: vec![DeviceId::from("dev-1")],
        };
        let snap = snapshot(vec![system], vec![device("dev-1", "sys-1", "S1255PC")]);

        let records = build_device_records(&snap);

        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record.id, "dev-1");
        assert_eq!(record.name, "Stugan");
        assert_eq!(record.manufacturer.as_deref(), Some("Nibe"));
        assert_eq!(record.model.as_deref(), Some("S1255"));
        assert_eq!(record.serial_number.as_deref(), Some("serial-dev-1"));
        assert_eq!(record.firmware_version.as_deref(), Some("9501R2"));
        assert_eq!(record.parent_id, None);
    }

    #[test]
    fn rebuilding_from_the_same_snapshot_is_idempotent() {
        let system = System {
            id: SystemId::from("sys-1"),
            name: "Huset".into(),
            has_alarm: false,
            security_level: None,
            country: None,
            devices: vec![DeviceId::from("dev-1"), DeviceId::from("dev-2")],
        };
        let snap = snapshot(
            vec![system],
            vec![
                device("dev-1", "sys-1", "VVM320 E"),
                device("dev-2", "sys-1", "F730 CU 3x400V"),
            ],
        );

        assert_eq!(build_device_records(&snap), build_device_records(&snap));
    }
}

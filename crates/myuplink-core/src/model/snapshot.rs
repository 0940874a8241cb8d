// ── Refresh snapshot ──
//
// The coordinator's single unit of replacement. A snapshot is built
// once per refresh cycle and then never mutated; consumers hold an
// `Arc<Snapshot>` and see either the previous or the next one.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::device::Device;
use super::ids::{DeviceId, SystemId};
use super::point::DevicePoint;
use super::system::System;

/// Point-in-time aggregate of all systems, devices, and points.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Snapshot {
    /// Systems in the order the API reports them.
    pub systems: Vec<System>,
    /// Every device across all systems, keyed by device id.
    pub devices: HashMap<DeviceId, Device>,
    /// Per-device points, keyed by device id then parameter id.
    pub points: HashMap<DeviceId, HashMap<String, DevicePoint>>,
}

impl Snapshot {
    pub fn system(&self, id: &SystemId) -> Option<&System> {
        self.systems.iter().find(|s| &s.id == id)
    }

    pub fn device(&self, id: &DeviceId) -> Option<&Device> {
        self.devices.get(id)
    }

    pub fn points_for(&self, id: &DeviceId) -> Option<&HashMap<String, DevicePoint>> {
        self.points.get(id)
    }

    pub fn point(&self, device_id: &DeviceId, parameter_id: &str) -> Option<&DevicePoint> {
        self.points.get(device_id)?.get(parameter_id)
    }

    /// All points across all devices, in no particular order.
    pub fn iter_points(&self) -> impl Iterator<Item = &DevicePoint> {
        self.points.values().flat_map(HashMap::values)
    }

    pub fn device_count(&self) -> usize {
        self.devices.len()
    }

    pub fn point_count(&self) -> usize {
        self.points.values().map(HashMap::len).sum()
    }
}

// ── Device domain type ──

use serde::{Deserialize, Serialize};
use strum::Display;

use super::ids::{DeviceId, SystemId};

/// Cloud connection state as reported by the API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[non_exhaustive]
pub enum ConnectionState {
    Connected,
    Disconnected,
    Unknown,
}

impl ConnectionState {
    pub(crate) fn parse(raw: Option<&str>) -> Self {
        match raw {
            Some("Connected") => Self::Connected,
            Some("Disconnected") => Self::Disconnected,
            _ => Self::Unknown,
        }
    }

    pub fn is_connected(self) -> bool {
        matches!(self, Self::Connected)
    }
}

/// One physical controller/unit reporting telemetry.
///
/// Belongs to exactly one [`System`](super::System); the back-reference
/// is informational only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: DeviceId,
    pub system_id: SystemId,
    pub product_name: Option<String>,
    pub serial_number: Option<String>,
    pub firmware_current: Option<String>,
    pub firmware_desired: Option<String>,
    pub connection_state: ConnectionState,
}

impl Device {
    /// Whether the cloud advertises a firmware version newer than the
    /// one currently installed.
    pub fn firmware_update_available(&self) -> bool {
        match (&self.firmware_current, &self.firmware_desired) {
            (Some(current), Some(desired)) => current != desired,
            _ => false,
        }
    }
}

// ── System domain type ──

use serde::{Deserialize, Serialize};

use super::ids::{DeviceId, SystemId};

/// One physical installation grouping one or more devices under an
/// account. Rebuilt wholesale on every refresh.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct System {
    pub id: SystemId,
    pub name: String,
    pub has_alarm: bool,
    pub security_level: Option<String>,
    pub country: Option<String>,
    /// Member devices, in the order the API reports them.
    pub devices: Vec<DeviceId>,
}

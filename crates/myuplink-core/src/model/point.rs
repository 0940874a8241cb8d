// ── Device point domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ids::DeviceId;

/// Current value of a data point.
///
/// The API reports numbers for telemetry and enum indices, and the
/// occasional free-text value; absent values come through as null.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PointValue {
    Number(f64),
    Text(String),
    None,
}

impl PointValue {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) | Self::None => None,
        }
    }

    /// Non-zero numeric value. Text and null read as "off", matching
    /// how binary states are derived from raw point values.
    pub fn is_nonzero(&self) -> bool {
        self.as_f64().is_some_and(|n| n != 0.0)
    }
}

/// One entry of a point's enumerated value set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnumValue {
    pub value: String,
    pub text: String,
    pub icon: String,
}

/// One named, typed telemetry/control channel on a device.
///
/// Recreated on every refresh; identity across refreshes exists only
/// through the `(device_id, parameter_id)` key pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DevicePoint {
    pub device_id: DeviceId,
    pub parameter_id: String,
    pub parameter_name: String,
    /// Vendor category label, e.g. `"NIBEF F730"`. The prefix selects
    /// the description table for the point.
    pub category: String,
    pub unit: String,
    pub writable: bool,
    pub timestamp: Option<DateTime<Utc>>,
    pub value: PointValue,
    pub str_value: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub step_value: Option<f64>,
    pub scale: Option<f64>,
    pub enum_values: Vec<EnumValue>,
    pub zone_id: Option<String>,
}

impl DevicePoint {
    /// The vendor prefix of the category label (text before the first
    /// space), e.g. `"NIBEF"` for `"NIBEF F730"`.
    pub fn category_prefix(&self) -> &str {
        self.category
            .split_once(' ')
            .map_or(self.category.as_str(), |(prefix, _)| prefix)
    }

    /// Whether both range bounds are present and non-zero.
    ///
    /// A present-but-zero bound does not count; heat-pump parameters
    /// with a real range never report `0..0`, and the zero case is how
    /// the API pads points without one.
    pub fn has_numeric_range(&self) -> bool {
        let truthy = |bound: Option<f64>| bound.is_some_and(|b| b != 0.0);
        truthy(self.max_value) && truthy(self.min_value)
    }
}

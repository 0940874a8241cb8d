// Wire types for the myUplink REST API v2.
//
// Field names mirror the JSON payloads (camelCase); optional fields are
// defaulted because the API omits them freely between firmware versions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Systems ──────────────────────────────────────────────────────────

/// Paged envelope returned by `GET /v2/systems/me`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemsPage {
    #[serde(default)]
    pub page: u32,
    #[serde(default)]
    pub items_per_page: u32,
    #[serde(default)]
    pub num_items: u64,
    #[serde(default)]
    pub systems: Vec<SystemSummary>,
}

/// One system (installation) with its member devices.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemSummary {
    pub system_id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub security_level: Option<String>,
    #[serde(default)]
    pub has_alarm: bool,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub devices: Vec<SystemDevice>,
}

/// Per-device summary embedded in the systems response.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemDevice {
    pub id: String,
    #[serde(default)]
    pub connection_state: Option<String>,
    #[serde(default)]
    pub current_fw_version: Option<String>,
    #[serde(default)]
    pub product: Option<ProductInfo>,
}

// ── Devices ──────────────────────────────────────────────────────────

/// Response from `GET /v2/devices/{id}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeviceDetails {
    pub id: String,
    #[serde(default)]
    pub connection_state: Option<String>,
    #[serde(default)]
    pub firmware: Option<FirmwareInfo>,
    #[serde(default)]
    pub product: Option<ProductInfo>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FirmwareInfo {
    #[serde(default)]
    pub current_fw_version: Option<String>,
    #[serde(default)]
    pub desired_fw_version: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInfo {
    #[serde(default)]
    pub serial_number: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

// ── Device points ────────────────────────────────────────────────────

/// One telemetry/control channel from `GET /v2/devices/{id}/points`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DevicePointResponse {
    #[serde(default)]
    pub category: String,
    pub parameter_id: String,
    #[serde(default)]
    pub parameter_name: String,
    #[serde(default)]
    pub parameter_unit: String,
    #[serde(default)]
    pub writable: bool,
    #[serde(default)]
    pub timestamp: Option<DateTime<Utc>>,
    #[serde(default)]
    pub value: serde_json::Value,
    #[serde(default)]
    pub str_val: Option<String>,
    #[serde(default)]
    pub min_value: Option<f64>,
    #[serde(default)]
    pub max_value: Option<f64>,
    #[serde(default)]
    pub step_value: Option<f64>,
    #[serde(default)]
    pub enum_values: Vec<EnumValueResponse>,
    /// Sent by the API as a decimal string (e.g. `"0.1"`).
    #[serde(default)]
    pub scale_value: Option<String>,
    #[serde(default)]
    pub zone_id: Option<String>,
}

/// One entry of a point's enumerated value set.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValueResponse {
    pub value: String,
    #[serde(default)]
    pub text: String,
    #[serde(default)]
    pub icon: String,
}

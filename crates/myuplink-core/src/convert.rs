// ── Wire → domain conversion ──
//
// Translates `myuplink-api` response types into the canonical domain
// model. The device conversion merges the per-device summary embedded
// in the systems response with the device detail endpoint; the detail
// endpoint wins where both carry a field.

use myuplink_api::types::{DeviceDetails, DevicePointResponse, SystemDevice, SystemSummary};

use crate::model::{
    ConnectionState, Device, DeviceId, DevicePoint, EnumValue, PointValue, System, SystemId,
};

pub(crate) fn system_from_api(summary: &SystemSummary) -> System {
    System {
        id: SystemId::new(summary.system_id.clone()),
        name: summary.name.clone(),
        has_alarm: summary.has_alarm,
        security_level: summary.security_level.clone(),
        country: summary.country.clone(),
        devices: summary
            .devices
            .iter()
            .map(|d| DeviceId::new(d.id.clone()))
            .collect(),
    }
}

pub(crate) fn device_from_api(
    system_id: &SystemId,
    summary: &SystemDevice,
    details: &DeviceDetails,
) -> Device {
    let product = details.product.as_ref().or(summary.product.as_ref());

    let firmware_current = details
        .firmware
        .as_ref()
        .and_then(|f| f.current_fw_version.clone())
        .or_else(|| summary.current_fw_version.clone());
    let firmware_desired = details
        .firmware
        .as_ref()
        .and_then(|f| f.desired_fw_version.clone());

    let connection_state = ConnectionState::parse(
        details
            .connection_state
            .as_deref()
            .or(summary.connection_state.as_deref()),
    );

    Device {
        id: DeviceId::new(details.id.clone()),
        system_id: system_id.clone(),
        product_name: product.and_then(|p| p.name.clone()),
        serial_number: product.and_then(|p| p.serial_number.clone()),
        firmware_current,
        firmware_desired,
        connection_state,
    }
}

pub(crate) fn point_from_api(device_id: &DeviceId, raw: &DevicePointResponse) -> DevicePoint {
    DevicePoint {
        device_id: device_id.clone(),
        parameter_id: raw.parameter_id.clone(),
        parameter_name: raw.parameter_name.clone(),
        category: raw.category.clone(),
        unit: raw.parameter_unit.clone(),
        writable: raw.writable,
        timestamp: raw.timestamp,
        value: point_value(&raw.value),
        str_value: raw.str_val.clone(),
        min_value: raw.min_value,
        max_value: raw.max_value,
        step_value: raw.step_value,
        scale: raw.scale_value.as_deref().and_then(|s| s.parse().ok()),
        enum_values: raw
            .enum_values
            .iter()
            .map(|e| EnumValue {
                value: e.value.clone(),
                text: e.text.clone(),
                icon: e.icon.clone(),
            })
            .collect(),
        zone_id: raw.zone_id.clone(),
    }
}

fn point_value(raw: &serde_json::Value) -> PointValue {
    match raw {
        serde_json::Value::Number(n) => n.as_f64().map_or(PointValue::None, PointValue::Number),
        serde_json::Value::String(s) => PointValue::Text(s.clone()),
        serde_json::Value::Bool(b) => PointValue::Number(f64::from(u8::from(*b))),
        _ => PointValue::None,
    }
}

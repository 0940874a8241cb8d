// ── Point classification ──
//
// Maps a device point's metadata to the kind of entity it should
// surface as. Pure decision logic; always terminates with a value.

use serde::Serialize;
use strum::Display;

use crate::entity::PointDescription;
use crate::model::DevicePoint;

/// Target entity category for a device point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, Serialize)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum EntityKind {
    Sensor,
    BinarySensor,
    Number,
    Switch,
}

/// Classify a device point, first match wins:
///
/// 1. An enumerated value set of exactly `"0"`, `"1"` in that order is
///    binary: `Switch` when writable, `BinarySensor` otherwise.
/// 2. A description declaring the `DM` (degree minutes) unit, or a
///    point whose min/max bounds are both present and non-zero, is
///    numeric: `Number` when writable, `Sensor` otherwise. The DM
///    branch deliberately does not consult the point's own range -- see
///    the `dm_description_*` tests pinning this behavior.
/// 3. Everything else is a plain `Sensor`.
pub fn classify(point: &DevicePoint, description: Option<&PointDescription>) -> EntityKind {
    if point.enum_values.len() == 2
        && point.enum_values[0].value == "0"
        && point.enum_values[1].value == "1"
    {
        if point.writable {
            return EntityKind::Switch;
        }
        return EntityKind::BinarySensor;
    }

    if description.is_some_and(|d| d.unit == Some("DM")) || point.has_numeric_range() {
        if point.writable {
            return EntityKind::Number;
        }
        return EntityKind::Sensor;
    }

    EntityKind::Sensor
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceId, EnumValue, PointValue};
    use pretty_assertions::assert_eq;

    fn point(
        writable: bool,
        enum_values: &[(&str, &str)],
        min: Option<f64>,
        max: Option<f64>,
    ) -> DevicePoint {
        DevicePoint {
            device_id: DeviceId::from("dev-1"),
            parameter_id: "1000".into(),
            parameter_name: "test point".into(),
            category: "NIBEF F730".into(),
            unit: String::new(),
            writable,
            timestamp: None,
            value: PointValue::Number(0.0),
            str_value: None,
            min_value: min,
            max_value: max,
            step_value: None,
            scale: None,
            enum_values: enum_values
                .iter()
                .map(|(value, text)| EnumValue {
                    value: (*value).to_owned(),
                    text: (*text).to_owned(),
                    icon: String::new(),
                })
                .collect(),
            zone_id: None,
        }
    }

    fn dm_description() -> PointDescription {
        PointDescription {
            key: "degree_minutes",
            unit: Some("DM"),
            icon: None,
        }
    }

    #[test]
    fn binary_enum_classifies_by_writability() {
        let on_off = &[("0", "off"), ("1", "on")];
        assert_eq!(classify(&point(true, on_off, None, None), None), EntityKind::Switch);
        assert_eq!(
            classify(&point(false, on_off, None, None), None),
            EntityKind::BinarySensor
        );
    }

    #[test]
    fn enum_order_matters() {
        // "1", "0" is not the binary shape; falls through to the default.
        let reversed = &[("1", "on"), ("0", "off")];
        assert_eq!(
            classify(&point(false, reversed, None, None), None),
            EntityKind::Sensor
        );
    }

    #[test]
    fn larger_enum_is_not_binary() {
        let tri_state = &[("0", "off"), ("1", "on"), ("2", "auto")];
        assert_eq!(
            classify(&point(true, tri_state, None, None), None),
            EntityKind::Sensor
        );
    }

    #[test]
    fn ranged_point_classifies_by_writability() {
        assert_eq!(
            classify(&point(true, &[], Some(1.0), Some(100.0)), None),
            EntityKind::Number
        );
        assert_eq!(
            classify(&point(false, &[], Some(1.0), Some(100.0)), None),
            EntityKind::Sensor
        );
    }

    #[test]
    fn zero_bound_does_not_count_as_range() {
        // minValue of 0 reads as "no range": plain sensor even though
        // maxValue is set.
        assert_eq!(
            classify(&point(false, &[], Some(0.0), Some(100.0)), None),
            EntityKind::Sensor
        );
        assert_eq!(
            classify(&point(true, &[], Some(0.0), Some(100.0)), None),
            EntityKind::Sensor
        );
    }

    #[test]
    fn everything_else_is_a_sensor() {
        assert_eq!(classify(&point(false, &[], None, None), None), EntityKind::Sensor);
        assert_eq!(classify(&point(true, &[], None, None), None), EntityKind::Sensor);
    }

    // The DM branch is evaluated independently of the point's own range
    // metadata. A writable point with a DM description but no min/max
    // still becomes a Number. Pinned here on purpose: changing the rule
    // changes which entities existing installations expose.
    #[test]
    fn dm_description_wins_without_range() {
        let desc = dm_description();
        assert_eq!(
            classify(&point(true, &[], None, None), Some(&desc)),
            EntityKind::Number
        );
        assert_eq!(
            classify(&point(false, &[], None, None), Some(&desc)),
            EntityKind::Sensor
        );
    }

    #[test]
    fn dm_description_does_not_shadow_binary_enum() {
        let desc = dm_description();
        let on_off = &[("0", "off"), ("1", "on")];
        assert_eq!(
            classify(&point(true, on_off, None, None), Some(&desc)),
            EntityKind::Switch
        );
    }
}

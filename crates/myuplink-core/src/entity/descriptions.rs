// ── Category-based point descriptions ──
//
// Vendor-specific metadata for well-known parameters, keyed by the
// category prefix (e.g. "NIBEF") and parameter id. Lookup priority:
// category-specific entry, else none.

use crate::model::DevicePoint;

/// Static description for a known parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PointDescription {
    /// Stable key for the entity derived from this point.
    pub key: &'static str,
    /// Unit override; `"DM"` (degree minutes) switches classification
    /// to the numeric branch regardless of range metadata.
    pub unit: Option<&'static str>,
    pub icon: Option<&'static str>,
}

const NIBEF_DESCRIPTIONS: &[(&str, PointDescription)] = &[
    (
        "40940",
        PointDescription {
            key: "degree_minutes",
            unit: Some("DM"),
            icon: None,
        },
    ),
    (
        "43161",
        PointDescription {
            key: "elect_add",
            unit: None,
            icon: Some("mdi:electric-switch"),
        },
    ),
];

const NIBES_DESCRIPTIONS: &[(&str, PointDescription)] = &[(
    "40940",
    PointDescription {
        key: "degree_minutes",
        unit: Some("DM"),
        icon: None,
    },
)];

/// Look up the description for a device point, if one is known for its
/// category.
pub fn description_for(point: &DevicePoint) -> Option<&'static PointDescription> {
    let table = match point.category_prefix() {
        "NIBEF" => NIBEF_DESCRIPTIONS,
        "NIBES" => NIBES_DESCRIPTIONS,
        _ => return None,
    };

    table
        .iter()
        .find(|(id, _)| *id == point.parameter_id)
        .map(|(_, description)| description)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{DeviceId, PointValue};

    fn point(category: &str, parameter_id: &str) -> DevicePoint {
        DevicePoint {
            device_id: DeviceId::from("dev-1"),
            parameter_id: parameter_id.to_owned(),
            parameter_name: String::new(),
            category: category.to_owned(),
            unit: String::new(),
            writable: false,
            timestamp: None,
            value: PointValue::None,
            str_value: None,
            min_value: None,
            max_value: None,
            step_value: None,
            scale: None,
            enum_values: Vec::new(),
            zone_id: None,
        }
    }

    #[test]
    fn category_prefix_selects_table() {
        let description = description_for(&point("NIBEF F730", "40940")).unwrap();
        assert_eq!(description.key, "degree_minutes");
        assert_eq!(description.unit, Some("DM"));

        assert!(description_for(&point("CTC EcoHeat", "40940")).is_none());
        assert!(description_for(&point("NIBEF F730", "99999")).is_none());
    }
}

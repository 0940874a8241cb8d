//! `myuplink points` handler.

use tabled::Tabled;

use myuplink_core::entity::description_for;
use myuplink_core::{Coordinator, DeviceId, DevicePoint, classify};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{cell, emit};

#[derive(Tabled)]
struct PointRow {
    #[tabled(rename = "PARAMETER")]
    parameter: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "VALUE")]
    value: String,
    #[tabled(rename = "UNIT")]
    unit: String,
    #[tabled(rename = "WRITABLE")]
    writable: &'static str,
    #[tabled(rename = "KIND")]
    kind: String,
}

fn value_cell(point: &DevicePoint) -> String {
    if let Some(ref text) = point.str_value {
        return text.clone();
    }
    match point.value.as_f64() {
        Some(n) => n.to_string(),
        None => "-".into(),
    }
}

pub fn handle(
    coordinator: &Coordinator,
    global: &GlobalOpts,
    device: &str,
    writable_only: bool,
) -> Result<(), CliError> {
    let snapshot = coordinator.snapshot();
    let device_id = DeviceId::from(device);

    let Some(points) = snapshot.points_for(&device_id) else {
        return Err(CliError::NotFound {
            resource_type: "device".into(),
            identifier: device.to_owned(),
            list_command: "devices".into(),
        });
    };

    let mut points: Vec<&DevicePoint> = points
        .values()
        .filter(|p| !writable_only || p.writable)
        .collect();
    points.sort_by(|a, b| a.parameter_id.cmp(&b.parameter_id));

    let rows: Vec<PointRow> = points
        .iter()
        .map(|p| PointRow {
            parameter: p.parameter_id.clone(),
            name: p.parameter_name.clone(),
            value: value_cell(p),
            unit: if p.unit.is_empty() {
                cell(None)
            } else {
                p.unit.clone()
            },
            writable: if p.writable { "yes" } else { "no" },
            kind: classify(p, description_for(p)).to_string(),
        })
        .collect();

    emit(global.output, &points, &rows)
}

//! `myuplink devices` handler.

use tabled::Tabled;

use myuplink_core::{Coordinator, Device, SystemId};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{cell, emit};

#[derive(Tabled)]
struct DeviceRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "PRODUCT")]
    product: String,
    #[tabled(rename = "SERIAL")]
    serial: String,
    #[tabled(rename = "FIRMWARE")]
    firmware: String,
    #[tabled(rename = "STATE")]
    state: String,
    #[tabled(rename = "SYSTEM")]
    system: String,
}

pub fn handle(
    coordinator: &Coordinator,
    global: &GlobalOpts,
    system: Option<&str>,
) -> Result<(), CliError> {
    let snapshot = coordinator.snapshot();

    let system_filter = system.map(SystemId::from);
    if let Some(ref id) = system_filter {
        if snapshot.system(id).is_none() {
            return Err(CliError::NotFound {
                resource_type: "system".into(),
                identifier: id.to_string(),
                list_command: "systems".into(),
            });
        }
    }

    // Walk systems in order so devices group by installation.
    let devices: Vec<&Device> = snapshot
        .systems
        .iter()
        .filter(|s| system_filter.as_ref().is_none_or(|id| &s.id == id))
        .flat_map(|s| s.devices.iter().filter_map(|id| snapshot.device(id)))
        .collect();

    let rows: Vec<DeviceRow> = devices
        .iter()
        .map(|d| DeviceRow {
            id: d.id.to_string(),
            product: cell(d.product_name.as_deref()),
            serial: cell(d.serial_number.as_deref()),
            firmware: cell(d.firmware_current.as_deref()),
            state: d.connection_state.to_string(),
            system: d.system_id.to_string(),
        })
        .collect();

    emit(global.output, &devices, &rows)
}

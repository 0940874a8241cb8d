//! `myuplink records` handler.

use tabled::Tabled;

use myuplink_core::{Coordinator, build_device_records};

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{cell, emit};

#[derive(Tabled)]
struct RecordRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "MANUFACTURER")]
    manufacturer: String,
    #[tabled(rename = "MODEL")]
    model: String,
    #[tabled(rename = "FIRMWARE")]
    firmware: String,
    #[tabled(rename = "SERIAL")]
    serial: String,
    #[tabled(rename = "PARENT")]
    parent: String,
}

pub fn handle(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = coordinator.snapshot();
    let records = build_device_records(&snapshot);

    let rows: Vec<RecordRow> = records
        .iter()
        .map(|r| RecordRow {
            id: r.id.clone(),
            name: r.name.clone(),
            manufacturer: cell(r.manufacturer.as_deref()),
            model: cell(r.model.as_deref()),
            firmware: cell(r.firmware_version.as_deref()),
            serial: cell(r.serial_number.as_deref()),
            parent: cell(r.parent_id.as_deref()),
        })
        .collect();

    emit(global.output, &records, &rows)
}

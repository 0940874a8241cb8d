//! `myuplink systems` handler.

use tabled::Tabled;

use myuplink_core::Coordinator;

use crate::cli::GlobalOpts;
use crate::error::CliError;
use crate::output::{cell, emit};

#[derive(Tabled)]
struct SystemRow {
    #[tabled(rename = "ID")]
    id: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "DEVICES")]
    devices: usize,
    #[tabled(rename = "ALARM")]
    alarm: &'static str,
    #[tabled(rename = "COUNTRY")]
    country: String,
}

pub fn handle(coordinator: &Coordinator, global: &GlobalOpts) -> Result<(), CliError> {
    let snapshot = coordinator.snapshot();

    let rows: Vec<SystemRow> = snapshot
        .systems
        .iter()
        .map(|s| SystemRow {
            id: s.id.to_string(),
            name: s.name.clone(),
            devices: s.devices.len(),
            alarm: if s.has_alarm { "yes" } else { "no" },
            country: cell(s.country.as_deref()),
        })
        .collect();

    emit(global.output, &snapshot.systems, &rows)
}

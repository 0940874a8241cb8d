//! `myuplink set` handler.

use myuplink_core::{Coordinator, DeviceId};

use crate::cli::GlobalOpts;
use crate::error::CliError;

use super::util;

/// Numbers go over the wire as JSON numbers, everything else as the
/// string form the enum endpoints expect.
fn parse_value(raw: &str) -> serde_json::Value {
    if let Ok(n) = raw.parse::<i64>() {
        return serde_json::Value::from(n);
    }
    if let Ok(n) = raw.parse::<f64>() {
        return serde_json::Value::from(n);
    }
    serde_json::Value::from(raw)
}

pub async fn handle(
    coordinator: &Coordinator,
    global: &GlobalOpts,
    device: &str,
    parameter: &str,
    value: &str,
) -> Result<(), CliError> {
    if !util::confirm(
        &format!("Write {value} to point {parameter} on device {device}?"),
        global.yes,
    )? {
        return Ok(());
    }

    coordinator
        .set_point(&DeviceId::from(device), parameter, parse_value(value))
        .await?;

    if !global.quiet {
        eprintln!("Point {parameter} set to {value}");
    }
    Ok(())
}

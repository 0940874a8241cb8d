//! Command handlers.

pub mod config_cmd;
mod devices;
mod entities;
mod points;
mod records;
mod set;
mod systems;
mod util;
mod watch;

use std::time::Duration;

use myuplink_api::MyUplinkClient;
use myuplink_core::{Coordinator, CoreError};

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

pub async fn dispatch(command: Command, global: &GlobalOpts) -> Result<(), CliError> {
    match command {
        Command::Systems => systems::handle(&connect(global, None).await?, global),
        Command::Devices { system } => {
            devices::handle(&connect(global, None).await?, global, system.as_deref())
        }
        Command::Points { device, writable } => {
            points::handle(&connect(global, None).await?, global, &device, writable)
        }
        Command::Entities { kind } => entities::handle(&connect(global, None).await?, global, kind),
        Command::Records => records::handle(&connect(global, None).await?, global),
        Command::Set {
            device,
            parameter,
            value,
        } => set::handle(&connect(global, None).await?, global, &device, &parameter, &value).await,
        Command::Watch { interval } => watch::handle(global, interval).await,

        // Handled in main before dispatch.
        Command::Config(_) | Command::Completions { .. } => Ok(()),
    }
}

/// Build a coordinator from config + flags without touching the cloud.
/// `interval` overrides the profile's refresh interval (watch mode);
/// data commands never poll, so it is irrelevant there.
fn build(global: &GlobalOpts, interval: Option<Duration>) -> Result<Coordinator, CliError> {
    let settings = crate::config::resolve_settings(global)?;

    let client = MyUplinkClient::new(&settings.api_url, settings.credentials, &settings.transport)
        .map_err(|e| CliError::from(CoreError::from(e)))?;

    Ok(Coordinator::new(
        client,
        interval.unwrap_or(settings.refresh_interval),
    ))
}

/// Build a coordinator and pull the initial snapshot.
async fn connect(
    global: &GlobalOpts,
    interval: Option<Duration>,
) -> Result<Coordinator, CliError> {
    let coordinator = build(global, interval)?;
    coordinator.refresh().await?;
    Ok(coordinator)
}

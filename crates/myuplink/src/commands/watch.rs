//! `myuplink watch` handler.

use std::time::Duration;

use chrono::Local;
use owo_colors::OwoColorize;

use crate::cli::GlobalOpts;
use crate::error::CliError;

/// Start periodic polling and print one summary line per refresh until
/// interrupted.
pub async fn handle(global: &GlobalOpts, interval: Option<Duration>) -> Result<(), CliError> {
    let coordinator = super::build(global, interval)?;
    let mut updates = coordinator.subscribe();

    // start() performs the initial refresh before spawning the
    // periodic task; mark that first replacement as seen.
    coordinator.start().await?;
    let _ = updates.borrow_and_update();
    print_summary(&coordinator);

    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                print_summary(&coordinator);
            }
        }
    }

    coordinator.stop().await;
    if !global.quiet {
        eprintln!("stopped");
    }
    Ok(())
}

fn print_summary(coordinator: &myuplink_core::Coordinator) {
    let snapshot = coordinator.snapshot();
    let alarms = snapshot.systems.iter().filter(|s| s.has_alarm).count();

    let alarm_note = if alarms > 0 {
        format!("{}", format!("{alarms} alarm(s)").red())
    } else {
        format!("{}", "no alarms".green())
    };

    println!(
        "{} {} systems, {} devices, {} points, {alarm_note}",
        Local::now().format("%H:%M:%S").dimmed(),
        snapshot.systems.len(),
        snapshot.device_count(),
        snapshot.point_count(),
    );
}

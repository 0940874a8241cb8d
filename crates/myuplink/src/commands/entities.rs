//! `myuplink entities` handler.

use serde::Serialize;
use tabled::Tabled;

use myuplink_core::entity::PointEntity;
use myuplink_core::{Coordinator, build_entities};

use crate::cli::{GlobalOpts, KindFilter};
use crate::error::CliError;
use crate::output::emit;

#[derive(Serialize, Tabled)]
struct EntityRow {
    #[tabled(rename = "UNIQUE ID")]
    unique_id: String,
    #[tabled(rename = "KIND")]
    kind: String,
    #[tabled(rename = "NAME")]
    name: String,
    #[tabled(rename = "STATE")]
    state: String,
}

fn point_row(entity: &PointEntity) -> EntityRow {
    let state = match entity.kind() {
        myuplink_core::EntityKind::BinarySensor | myuplink_core::EntityKind::Switch => {
            if entity.is_on() { "on" } else { "off" }.to_owned()
        }
        _ => entity
            .numeric_value()
            .map_or_else(|| "-".to_owned(), |n| n.to_string()),
    };

    EntityRow {
        unique_id: entity.unique_id().to_owned(),
        kind: entity.kind().to_string(),
        name: entity.name().to_owned(),
        state,
    }
}

pub fn handle(
    coordinator: &Coordinator,
    global: &GlobalOpts,
    kind: Option<KindFilter>,
) -> Result<(), CliError> {
    let entities = build_entities(coordinator);

    let mut rows: Vec<EntityRow> = entities
        .points()
        .filter(|e| kind.is_none_or(|k| k.matches(e.kind())))
        .map(point_row)
        .collect();

    if kind.is_none() {
        for sensor in &entities.system_binary_sensors {
            rows.push(EntityRow {
                unique_id: sensor.unique_id().to_owned(),
                kind: "binary_sensor".into(),
                name: sensor.name().to_owned(),
                state: match sensor.is_on() {
                    Some(true) => "on".into(),
                    Some(false) => "off".into(),
                    None => "-".into(),
                },
            });
        }

        for update in &entities.updates {
            rows.push(EntityRow {
                unique_id: update.unique_id().to_owned(),
                kind: "update".into(),
                name: "Firmware".into(),
                state: if update.update_available() {
                    "update available".into()
                } else {
                    "up to date".into()
                },
            });
        }
    }

    emit(global.output, &rows, &rows)
}

use crate::climate::bridge::{EffectBoard, ReadoutKind};
use crate::ui::components::{ReadoutField, ReadoutText};
use bevy::prelude::*;
use std::collections::HashMap;

const HELP: &str = "Q/E turn temperature marker, T hide it | A/D turn wind marker, Y hide it | R rain, F snow";

pub fn spawn_hud(mut commands: Commands) {
    let rows = [
        (ReadoutKind::Temperature, ReadoutField::Panel, 12.0),
        (ReadoutKind::Wind, ReadoutField::Panel, 40.0),
        (ReadoutKind::Temperature, ReadoutField::Target, 68.0),
        (ReadoutKind::Wind, ReadoutField::Target, 96.0),
    ];

    for (kind, field, top) in rows {
        commands.spawn((
            Text::new(format_readout(kind, field, None)),
            TextFont {
                font_size: 22.0,
                ..default()
            },
            Node {
                position_type: PositionType::Absolute,
                top: Val::Px(top),
                left: Val::Px(12.0),
                ..default()
            },
            ReadoutText { kind, field },
        ));
    }

    commands.spawn((
        Text::new(HELP),
        TextFont {
            font_size: 14.0,
            ..default()
        },
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(12.0),
            left: Val::Px(12.0),
            ..default()
        },
    ));
}

/// Rewrite readouts whose values were pushed since the last frame
pub fn update_readouts(
    board: Res<EffectBoard>,
    mut seen: Local<HashMap<ReadoutKind, u64>>,
    mut texts: Query<(&ReadoutText, &mut Text)>,
) {
    let state = board.read();
    let mut changed = Vec::new();

    for (kind, readout) in state.readouts.iter() {
        if seen.get(kind) != Some(&readout.revision) {
            seen.insert(*kind, readout.revision);
            changed.push((*kind, *readout));
        }
    }

    for (kind, readout) in changed {
        for (label, mut text) in texts.iter_mut().filter(|(label, _)| label.kind == kind) {
            let value = match label.field {
                ReadoutField::Panel => readout.panel,
                ReadoutField::Target => readout.target,
            };
            text.0 = format_readout(kind, label.field, value);
        }
    }
}

pub fn format_readout(kind: ReadoutKind, field: ReadoutField, value: Option<f32>) -> String {
    let name = match (kind, field) {
        (ReadoutKind::Temperature, ReadoutField::Panel) => "Temperature",
        (ReadoutKind::Temperature, ReadoutField::Target) => "Temperature marker",
        (ReadoutKind::Wind, ReadoutField::Panel) => "Wind force",
        (ReadoutKind::Wind, ReadoutField::Target) => "Wind marker",
    };
    let unit = match kind {
        ReadoutKind::Temperature => " °C",
        ReadoutKind::Wind => "",
    };
    match value {
        Some(value) => format!("{name}: {value:.1}{unit}"),
        None => format!("{name}: --"),
    }
}

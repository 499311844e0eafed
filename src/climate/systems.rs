use super::{TemperatureState, WindState};
use crate::climate::bridge::{yaw_degrees, EffectBoard, EmitterEffect, ReadoutKind, TreeEffect};
use crate::climate::events::TreeGrownMessage;
use crate::scene::components::{ArMarker, Emitter, RainEmitter, SnowEmitter, TreeGrowth, TreeSway};
use crate::scene::daynight::DayNightCycle;
use bevy::prelude::*;
use climatecore::temperature::TemperatureController;
use climatecore::tracking::TrackingSample;
use climatecore::wind::{ParticleSink, TreeHandle, WindController, WindTargets};

/// Build both controllers against the spawned scene.
/// Panics if the scene is missing its snow emitter.
pub fn spawn_controllers(
    mut commands: Commands,
    board: Res<EffectBoard>,
    trees: Query<(Entity, &TreeGrowth, &Visibility)>,
    rain: Query<(Entity, &Emitter), With<RainEmitter>>,
    snow: Query<(Entity, &Emitter), With<SnowEmitter>>,
) {
    let config = climatecore::get_config();
    let (snow_entity, snow_emitter) = snow
        .single()
        .expect("scene must contain exactly one snow emitter");

    {
        let mut state = board.write();
        for (entity, growth, visibility) in trees.iter() {
            state.trees.insert(entity, tree_effect(growth, visibility));
        }
        for (entity, emitter) in rain.iter().chain(std::iter::once((snow_entity, snow_emitter))) {
            state.emitters.insert(
                entity,
                EmitterEffect {
                    playing: emitter.playing,
                    force: emitter.force,
                },
            );
        }
    }

    let temperature = TemperatureController::new(
        &config.temperature,
        Box::new(board.tracking()),
        Box::new(board.sky()),
        Box::new(board.readout(ReadoutKind::Temperature)),
    );

    let targets = WindTargets {
        display: Box::new(board.readout(ReadoutKind::Wind)),
        trees: trees
            .iter()
            .map(|(entity, _, _)| Box::new(board.tree(entity)) as Box<dyn TreeHandle>)
            .collect(),
        rain: rain
            .iter()
            .map(|(entity, _)| Box::new(board.emitter(entity)) as Box<dyn ParticleSink>)
            .collect(),
        snow: Box::new(board.emitter(snow_entity)),
    };
    let wind = WindController::new(&config.wind, Box::new(board.tracking()), targets);

    commands.insert_resource(TemperatureState(temperature));
    commands.insert_resource(WindState(wind));

    info!(
        "Climate controllers ready ({} trees, {} rain emitters)",
        trees.iter().count(),
        rain.iter().count()
    );
}

pub fn publish_scene_state(
    board: Res<EffectBoard>,
    cycle: Res<DayNightCycle>,
    markers: Query<(&ArMarker, &Transform)>,
    trees: Query<(Entity, &TreeGrowth, &Visibility)>,
    emitters: Query<(Entity, &Emitter)>,
) {
    let mut state = board.write();

    for (marker, transform) in markers.iter() {
        state.markers.insert(
            marker.name.clone(),
            TrackingSample {
                is_tracked: marker.tracked,
                yaw_degrees: yaw_degrees(transform),
            },
        );
    }

    state.is_day = cycle.is_day();
    state.is_night = cycle.is_night();

    for (entity, growth, visibility) in trees.iter() {
        let published = tree_effect(growth, visibility);
        state
            .trees
            .entry(entity)
            .and_modify(|tree| {
                tree.growth = published.growth;
                tree.active = published.active;
            })
            .or_insert(published);
    }

    for (entity, emitter) in emitters.iter() {
        state.emitters.entry(entity).or_default().playing = emitter.playing;
    }
}

pub fn update_temperature(mut temperature: ResMut<TemperatureState>) {
    temperature.0.update();
}

pub fn drift_temperature(time: Res<Time>, mut temperature: ResMut<TemperatureState>) {
    temperature.0.advance_drift(time.delta());
}

pub fn update_wind(mut wind: ResMut<WindState>) {
    wind.0.update();
}

pub fn resync_grown_trees(
    mut grown: MessageReader<TreeGrownMessage>,
    wind: Res<WindState>,
    board: Res<EffectBoard>,
) {
    for message in grown.read() {
        let mut tree = board.tree(message.tree);
        wind.0.on_tree_grown(&mut tree);
        debug!(
            "Tree {:?} grown, wind force {:.2} applied",
            message.tree,
            wind.0.last_dispatched()
        );
    }
}

pub fn apply_effects(
    board: Res<EffectBoard>,
    mut trees: Query<(Entity, &mut TreeSway)>,
    mut emitters: Query<(Entity, &mut Emitter)>,
) {
    let state = board.read();

    for (entity, mut sway) in trees.iter_mut() {
        if let Some(effect) = state.trees.get(&entity) {
            sway.speed = effect.sway_speed;
            sway.leaf_force_x = effect.leaf_force_x;
        }
    }

    for (entity, mut emitter) in emitters.iter_mut() {
        if let Some(effect) = state.emitters.get(&entity) {
            emitter.force = effect.force;
        }
    }
}

fn tree_effect(growth: &TreeGrowth, visibility: &Visibility) -> TreeEffect {
    TreeEffect {
        growth: growth.state,
        active: *visibility != Visibility::Hidden,
        leaf_force_x: 0.0,
        sway_speed: 0.0,
    }
}

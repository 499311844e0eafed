pub mod bridge;
pub mod events;
pub mod systems;

use crate::climate::bridge::EffectBoard;
use crate::climate::events::TreeGrownMessage;
use crate::climate::systems::*;
use bevy::prelude::*;
use climatecore::temperature::TemperatureController;
use climatecore::wind::WindController;

/// Ordering of the climate pipeline within a frame
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum ClimateSet {
    /// Startup: build controllers once the scene exists
    Setup,
    /// Copy scene state into the effect board
    Publish,
    /// Run the controllers
    Simulate,
    /// Copy controller output back onto components
    Apply,
}

#[derive(Resource)]
pub struct TemperatureState(pub TemperatureController);

#[derive(Resource)]
pub struct WindState(pub WindController);

pub struct ClimatePlugin;

impl Plugin for ClimatePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EffectBoard>()
            .add_message::<TreeGrownMessage>()
            .configure_sets(
                Update,
                (ClimateSet::Publish, ClimateSet::Simulate, ClimateSet::Apply).chain(),
            )
            .add_systems(Startup, spawn_controllers.in_set(ClimateSet::Setup))
            .add_systems(Update, publish_scene_state.in_set(ClimateSet::Publish))
            .add_systems(
                Update,
                (
                    (update_temperature, drift_temperature).chain(),
                    (update_wind, resync_grown_trees).chain(),
                )
                    .in_set(ClimateSet::Simulate),
            )
            .add_systems(Update, apply_effects.in_set(ClimateSet::Apply));
    }
}

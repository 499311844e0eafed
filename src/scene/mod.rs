pub mod components;
pub mod daynight;
pub mod systems;

use crate::climate::ClimateSet;
use crate::scene::daynight::*;
use crate::scene::systems::*;
use bevy::prelude::*;

/// Demo stand-in for the AR scene: turnable markers, trees, clouds, sky clock
pub struct ScenePlugin;

impl Plugin for ScenePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DayNightCycle>()
            .add_systems(Startup, spawn_scene.before(ClimateSet::Setup))
            .add_systems(
                Update,
                (marker_control, toggle_weather, advance_day_night, grow_trees)
                    .before(ClimateSet::Publish),
            )
            .add_systems(
                Update,
                (rotate_sun, animate_trees, draw_emitter_forces).after(ClimateSet::Apply),
            );
    }
}

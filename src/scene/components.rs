use bevy::prelude::*;
use climatecore::wind::GrowthState;

/// Stand-in for an AR image target: a named marker the user can turn and cover up
#[derive(Component)]
pub struct ArMarker {
    pub name: String,
    pub tracked: bool,
    pub turn_left: KeyCode,
    pub turn_right: KeyCode,
    pub toggle_tracking: KeyCode,
}

#[derive(Component)]
pub struct TreeGrowth {
    pub state: GrowthState,
    pub timer: Timer,
}

/// Wind response last pushed onto a tree
#[derive(Component)]
pub struct TreeSway {
    pub speed: f32,
    pub leaf_force_x: f32,
    pub phase: f32,
}

#[derive(Component, Default)]
pub struct Emitter {
    pub playing: bool,
    pub force: Vec3,
}

#[derive(Component)]
pub struct RainEmitter;

#[derive(Component)]
pub struct SnowEmitter;

#[derive(Component)]
pub struct Sun;

pub mod components;
mod systems;

use crate::climate::ClimateSet;
use crate::ui::systems::*;
use bevy::prelude::*;

pub struct UIPlugin;

impl Plugin for UIPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, spawn_hud)
            .add_systems(Update, update_readouts.after(ClimateSet::Apply));
    }
}

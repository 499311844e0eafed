mod climate;
mod scene;
mod ui;

use crate::climate::ClimatePlugin;
use crate::scene::ScenePlugin;
use crate::ui::UIPlugin;
use bevy::app::App;
#[cfg(debug_assertions)]
use bevy::diagnostic::LogDiagnosticsPlugin;
use bevy::prelude::*;

pub struct ArClimatePlugin;

impl Plugin for ArClimatePlugin {
    fn build(&self, app: &mut App) {
        app.add_plugins((ClimatePlugin, ScenePlugin, UIPlugin));

        #[cfg(debug_assertions)]
        {
            app.add_plugins(LogDiagnosticsPlugin::default());
        }
    }
}
